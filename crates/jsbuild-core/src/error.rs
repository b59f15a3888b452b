//! Error taxonomy for the flattening engine.
//!
//! Every variant is fatal to the current invocation. Nothing here is retried.

use std::io;
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Locator scheme has no registered handler. Raised before any I/O.
    #[error("unsupported scheme `{scheme}`")]
    SchemeUnsupported { scheme: String },

    /// Specifier could not be merged against its base.
    #[error("cannot resolve `{specifier}` against {base}")]
    InvalidLocator { specifier: String, base: String },

    /// Local file missing or unreadable.
    #[error("{locator}: not found")]
    NotFound {
        locator: String,
        #[source]
        source: io::Error,
    },

    /// Network transfer failed or returned a non-2xx status.
    #[error("fetching {locator} failed: {reason}")]
    FetchFailed { locator: String, reason: String },

    /// Content is not valid UTF-8.
    #[error("{locator}: content is not valid UTF-8")]
    Decode { locator: String },

    /// External tool missing or exited with failure.
    #[error("{tool}: {reason}")]
    ExternalTool { tool: String, reason: String },

    #[error("cache I/O on {}", path.display())]
    CacheIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("build directory I/O on {}", path.display())]
    BuildIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Import graph contains a cycle; the path starts and ends at the same locator.
    #[error("cyclic import: {}", cycle.join(" -> "))]
    CyclicImport { cycle: Vec<String> },
}
