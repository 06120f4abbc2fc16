//! Record derive macro implementation.
//!
//! `#[derive(Record)]` generates an `impl ::anyconfig::Record` whose
//! `bindings()` method returns one `Binding` per field, in declaration
//! order. Each binding is built from the field's `#[conf(...)]` attribute:
//!
//! | Key | Example | Description |
//! |-----|---------|-------------|
//! | `key` | `key = "user"` | Decode key in parsed mappings (default: field name) |
//! | `env` | `env = "PORT"` | Environment-variable name for the field |
//! | `overwrite` | | Variable replaces a file-supplied value |
//! | `rule` | `rule = "gt=0"` | Comma-separated validation rules |
//! | `nested` | | Field is a sub-record implementing `Record` |
//! | `prefix` | `prefix = "SERVER_"` | Env prefix for a `nested` field |
//!
//! `overwrite` requires `env`, and `prefix` requires `nested`; a `nested`
//! field cannot carry leaf annotations. Violations are compile errors.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, spanned::Spanned};

/// Parsed per-field `#[conf(...)]` attribute.
#[derive(Default)]
struct FieldAttrs {
    key: Option<String>,
    env: Option<String>,
    overwrite: bool,
    rule: Option<String>,
    nested: bool,
    prefix: Option<String>,
}

pub fn derive_record(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            input.generics.span(),
            "Record cannot be derived for generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new(
                    input.span(),
                    "Record requires a struct with named fields",
                ));
            }
        },
        Data::Enum(_) => {
            return Err(syn::Error::new(
                input.span(),
                "Record cannot be derived for enums",
            ));
        }
        Data::Union(_) => {
            return Err(syn::Error::new(
                input.span(),
                "Record cannot be derived for unions",
            ));
        }
    };

    let mut bindings = Vec::new();
    for field in fields {
        let attrs = parse_field_attrs(&field.attrs)?;
        validate_field_attrs(field, &attrs)?;

        let ident = field.ident.as_ref().expect("named field");
        let field_name = ident.to_string();
        let field_name = field_name.strip_prefix("r#").unwrap_or(&field_name);
        let name_lit = syn::LitStr::new(field_name, ident.span());

        let constructor = if attrs.nested {
            quote! { ::anyconfig::Binding::nested(#name_lit, &mut self.#ident) }
        } else {
            quote! { ::anyconfig::Binding::field(#name_lit, &mut self.#ident) }
        };

        let mut chain = TokenStream::new();
        if let Some(key) = &attrs.key {
            let lit = syn::LitStr::new(key, ident.span());
            chain.extend(quote! { .key(#lit) });
        }
        if let Some(env) = &attrs.env {
            let lit = syn::LitStr::new(env, ident.span());
            chain.extend(quote! { .env(#lit) });
        }
        if attrs.overwrite {
            chain.extend(quote! { .overwrite() });
        }
        if let Some(rule) = &attrs.rule {
            let lit = syn::LitStr::new(rule, ident.span());
            chain.extend(quote! { .rules(#lit) });
        }
        if let Some(prefix) = &attrs.prefix {
            let lit = syn::LitStr::new(prefix, ident.span());
            chain.extend(quote! { .prefix(#lit) });
        }

        bindings.push(quote! { #constructor #chain });
    }

    Ok(quote! {
        #[automatically_derived]
        impl ::anyconfig::Record for #name {
            fn bindings(&mut self) -> ::std::vec::Vec<::anyconfig::Binding<'_>> {
                ::std::vec![
                    #(#bindings),*
                ]
            }
        }
    })
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut result = FieldAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("conf") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("key") {
                result.key = Some(meta.value()?.parse::<syn::LitStr>()?.value());
            } else if meta.path.is_ident("env") {
                result.env = Some(meta.value()?.parse::<syn::LitStr>()?.value());
            } else if meta.path.is_ident("overwrite") {
                result.overwrite = true;
            } else if meta.path.is_ident("rule") {
                result.rule = Some(meta.value()?.parse::<syn::LitStr>()?.value());
            } else if meta.path.is_ident("nested") {
                result.nested = true;
            } else if meta.path.is_ident("prefix") {
                result.prefix = Some(meta.value()?.parse::<syn::LitStr>()?.value());
            } else {
                return Err(meta.error(
                    "unknown #[conf] key; expected key, env, overwrite, rule, nested, or prefix",
                ));
            }
            Ok(())
        })?;
    }

    Ok(result)
}

fn validate_field_attrs(field: &syn::Field, attrs: &FieldAttrs) -> syn::Result<()> {
    if attrs.overwrite && attrs.env.is_none() {
        return Err(syn::Error::new(
            field.span(),
            "#[conf(overwrite)] requires `env = \"...\"`",
        ));
    }
    if attrs.prefix.is_some() && !attrs.nested {
        return Err(syn::Error::new(
            field.span(),
            "#[conf(prefix = \"...\")] requires `nested`",
        ));
    }
    if attrs.nested && (attrs.env.is_some() || attrs.rule.is_some() || attrs.overwrite) {
        return Err(syn::Error::new(
            field.span(),
            "#[conf(nested)] cannot be combined with env, overwrite, or rule",
        ));
    }
    Ok(())
}
