//! Load options and their construction.
//!
//! Responsibilities:
//! - Define `LoadOptions`, the immutable per-call settings bag.
//! - Provide builder methods for plain construction and `LoadOption`
//!   functional options for ordered construction.
//!
//! Does NOT handle:
//! - Applying the options; the pipeline in load.rs consumes them.
//!
//! Invariants:
//! - An empty file reference disables the file stage entirely; the same
//!   contract holds for any optional source added later.
//! - Both construction forms yield identical results for the same logical
//!   settings; functional options apply in order, later ones overriding
//!   earlier ones for the same setting.

/// Settings governing one load call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    file: String,
    env_prefix: String,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration file reference.
    ///
    /// A relative reference is looked up in the user's home directory
    /// first, then in the current directory; see the crate docs.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    /// Set a prefix prepended to every environment-variable name, before
    /// any nested-record prefixes.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// The file reference, or `None` when the file stage is disabled.
    pub(crate) fn file(&self) -> Option<&str> {
        if self.file.is_empty() {
            None
        } else {
            Some(&self.file)
        }
    }

    pub(crate) fn env_prefix(&self) -> &str {
        &self.env_prefix
    }
}

/// A single configuration step applied to a private [`LoadOptions`] value
/// before a load begins. Produced by [`with_file`] and [`with_env_prefix`].
pub struct LoadOption(Box<dyn FnOnce(&mut LoadOptions)>);

impl LoadOption {
    pub(crate) fn apply(self, options: &mut LoadOptions) {
        (self.0)(options)
    }
}

/// Functional option: set the configuration file reference.
pub fn with_file(file: impl Into<String>) -> LoadOption {
    let file = file.into();
    LoadOption(Box::new(move |options| options.file = file))
}

/// Functional option: set the global environment-variable prefix.
pub fn with_env_prefix(prefix: impl Into<String>) -> LoadOption {
    let prefix = prefix.into();
    LoadOption(Box::new(move |options| options.env_prefix = prefix))
}
