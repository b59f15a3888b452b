//! `file` scheme: read from the local filesystem.

use crate::error::{Error, Result};
use crate::locator::Locator;

use super::{decode, SchemeHandler};

#[derive(Debug, Clone, Copy, Default)]
pub struct FileHandler;

impl SchemeHandler for FileHandler {
    fn fetch(&self, locator: &Locator) -> Result<String> {
        let path = locator.to_file_path().ok_or_else(|| Error::NotFound {
            locator: locator.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a local path"),
        })?;
        let bytes = std::fs::read(&path).map_err(|source| Error::NotFound {
            locator: locator.to_string(),
            source,
        })?;
        decode(locator, bytes)
    }
}
