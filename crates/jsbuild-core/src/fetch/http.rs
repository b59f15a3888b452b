//! `http`/`https` schemes: cached GET.
//!
//! The cache key is derived from the URL, so an entry is served as-is until
//! the cache is purged, even if the remote resource changes.

use std::sync::Arc;

use crate::cache::Cache;
use crate::error::{Error, Result};
use crate::locator::Locator;

use super::{decode, SchemeHandler, Transport};

/// Cache key for a remote module.
pub fn http_cache_key(url: &str) -> String {
    format!("http_{url}")
}

pub struct HttpHandler {
    cache: Cache,
    transport: Arc<dyn Transport>,
}

impl HttpHandler {
    pub fn new(cache: Cache, transport: Arc<dyn Transport>) -> Self {
        Self { cache, transport }
    }

    /// Returns the blob cached under `key`, downloading `url` into it on a miss.
    /// Nothing is stored when the transfer fails.
    pub fn cached_get(&self, url: &str, key: &str) -> Result<Vec<u8>> {
        if let Some(bytes) = self.cache.get(key)? {
            tracing::debug!(url, "cache hit");
            return Ok(bytes);
        }
        tracing::info!("Downloading {}...", url);
        let bytes = self
            .transport
            .get(url)
            .map_err(|e| Error::FetchFailed {
                locator: url.to_string(),
                reason: e.to_string(),
            })?;
        self.cache.put(key, &bytes)?;
        Ok(bytes)
    }
}

impl SchemeHandler for HttpHandler {
    fn fetch(&self, locator: &Locator) -> Result<String> {
        let url = locator.as_str();
        let bytes = self.cached_get(url, &http_cache_key(url))?;
        decode(locator, bytes)
    }
}
