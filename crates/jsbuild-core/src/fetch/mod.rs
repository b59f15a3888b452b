//! Scheme-dispatched content fetching.
//!
//! The [`Fetcher`] owns an explicit registry from scheme tag to handler,
//! filled at construction time. Unknown schemes fail before any I/O.

mod file;
mod http;
mod transport;

pub use file::FileHandler;
pub use http::{http_cache_key, HttpHandler};
pub use transport::{CurlTransport, Transport, TransportError, USER_AGENT};

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::Cache;
use crate::error::{Error, Result};
use crate::locator::Locator;

/// Reads the content behind a locator of one or more schemes.
pub trait SchemeHandler {
    fn fetch(&self, locator: &Locator) -> Result<String>;
}

/// Registry of scheme handlers.
#[derive(Clone, Default)]
pub struct Fetcher {
    handlers: HashMap<String, Arc<dyn SchemeHandler>>,
}

impl Fetcher {
    /// Empty registry; every scheme is unsupported until registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// `file` from disk, `http`/`https` through `cache` and `transport`.
    pub fn with_defaults(cache: Cache, transport: Arc<dyn Transport>) -> Self {
        let http: Arc<dyn SchemeHandler> = Arc::new(HttpHandler::new(cache, transport));
        Self::new()
            .register("file", Arc::new(FileHandler))
            .register("http", Arc::clone(&http))
            .register("https", http)
    }

    /// Adds or replaces the handler for `scheme`.
    pub fn register(mut self, scheme: &str, handler: Arc<dyn SchemeHandler>) -> Self {
        self.handlers.insert(scheme.to_ascii_lowercase(), handler);
        self
    }

    pub fn supports(&self, scheme: &str) -> bool {
        self.handlers.contains_key(&scheme.to_ascii_lowercase())
    }

    pub fn fetch(&self, locator: &Locator) -> Result<String> {
        let handler = self
            .handlers
            .get(locator.scheme())
            .ok_or_else(|| Error::SchemeUnsupported {
                scheme: locator.scheme().to_string(),
            })?;
        tracing::debug!(%locator, "reading");
        handler.fetch(locator)
    }
}

/// Decodes fetched bytes as UTF-8.
pub(crate) fn decode(locator: &Locator, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| Error::Decode {
        locator: locator.to_string(),
    })
}
