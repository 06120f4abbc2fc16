//! File reference resolution and reading.
//!
//! Responsibilities:
//! - Resolve a file reference to one of two candidate absolute locations
//!   (home-directory-joined or current-directory) and read its bytes.
//!
//! Does NOT handle:
//! - Decoding the bytes (see decode.rs).
//! - The empty-reference case; load.rs skips the stage before calling in.
//!
//! Invariants:
//! - A reference starting with the path separator is read as-is.
//! - A reference starting with `~` is joined onto the home directory with a
//!   single joining slash and never falls back to the current directory.
//! - A bare-relative reference tries `<home>/<reference>` first and falls
//!   back to the current directory; the second failure is the one surfaced.
//! - Reads only; no writes, no caching across calls.

use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use anyhow::Context;

use super::error::ConfigError;

/// Read the bytes behind a non-empty file reference.
pub(crate) fn read_reference(reference: &str) -> Result<Vec<u8>, ConfigError> {
    if reference.starts_with(MAIN_SEPARATOR) {
        return read(Path::new(reference));
    }

    if let Some(rest) = reference.strip_prefix('~') {
        let home = home_dir().map_err(|e| ConfigError::HomeDirUnavailable(e.to_string()))?;
        return read(&home.join(rest.trim_start_matches(MAIN_SEPARATOR)));
    }

    // Bare-relative reference: prefer the home directory so a short name
    // like `.myapp.yaml` resolves the same from a packaged install and a
    // project checkout. If home is unavailable, only the working directory
    // candidate remains.
    if let Ok(home) = home_dir() {
        let candidate = home.join(reference);
        match fs::read(&candidate) {
            Ok(bytes) => {
                tracing::debug!(path = %candidate.display(), "read configuration file from home directory");
                return Ok(bytes);
            }
            Err(error) => {
                tracing::debug!(
                    path = %candidate.display(),
                    %error,
                    "home directory candidate unreadable, falling back to working directory"
                );
            }
        }
    }

    read(Path::new(reference))
}

fn read(path: &Path) -> Result<Vec<u8>, ConfigError> {
    fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn home_dir() -> Result<PathBuf, anyhow::Error> {
    let dirs = directories::UserDirs::new().context("user directories unavailable")?;
    Ok(dirs.home_dir().to_path_buf())
}
