//! Absolute, scheme-qualified module addresses and specifier merging.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{Error, Result};

/// Absolute module address. Equality and hashing follow the canonical string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locator(Url);

impl Locator {
    /// Parses an already-absolute locator string such as `file:///a/x.js`.
    pub fn parse(s: &str) -> Result<Self> {
        Url::parse(s).map(Locator).map_err(|_| Error::InvalidLocator {
            specifier: s.to_string(),
            base: "<none>".to_string(),
        })
    }

    /// Builds the `file` locator for a local path. Relative paths are taken
    /// from the current directory and symlinks are resolved.
    pub fn from_path(path: &Path) -> Result<Self> {
        let shown = path.display().to_string();
        let abs = std::fs::canonicalize(path).map_err(|source| Error::NotFound {
            locator: shown.clone(),
            source,
        })?;
        Url::from_file_path(&abs)
            .map(Locator)
            .map_err(|()| Error::InvalidLocator {
                specifier: shown,
                base: "file://".to_string(),
            })
    }

    /// Merges `specifier` against this locator with RFC 3986 semantics.
    /// Absolute specifiers come back unchanged; relative ones are merged
    /// against this locator's directory.
    pub fn resolve(&self, specifier: &str) -> Result<Self> {
        self.0
            .join(specifier)
            .map(Locator)
            .map_err(|_| Error::InvalidLocator {
                specifier: specifier.to_string(),
                base: self.0.to_string(),
            })
    }

    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// True for locators fetched over the network.
    pub fn is_remote(&self) -> bool {
        matches!(self.scheme(), "http" | "https")
    }

    /// Canonical string form; this is what gets digested.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Local filesystem path for `file` locators.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.scheme() != "file" {
            return None;
        }
        self.0.to_file_path().ok()
    }

    /// Flattened module filename: `<digest>.js`.
    pub fn flat_filename(&self) -> String {
        format!("{}.js", crate::digest::digest_str(self.as_str()))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
