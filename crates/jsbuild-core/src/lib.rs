//! Core engine for jsbuild: fetch, walk, rewrite and flatten a JavaScript
//! module graph into a single directory for a whole-program compiler.

pub mod assemble;
pub mod cache;
pub mod compiler;
pub mod config;
pub mod digest;
pub mod doctor;
pub mod error;
pub mod fetch;
pub mod graph;
pub mod import_line;
pub mod locator;
pub mod logging;
pub mod rewrite;

pub use error::{Error, Result};

/// Program name, used for XDG prefixes, the scratch-dir prefix and the digest salt.
pub const NAME: &str = "jsbuild";

/// Version reported in the HTTP user agent.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
