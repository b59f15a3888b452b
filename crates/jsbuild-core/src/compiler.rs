//! Compiler capability and the Closure compiler adapter.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::cache::Cache;
use crate::error::{Error, Result};
use crate::fetch::Transport;

pub const DEFAULT_CLOSURE_VERSION: &str = "v20221004";
pub const DEFAULT_LANGUAGE_OUT: &str = "ECMASCRIPT_2019";

const MAVEN_REPO: &str = "https://repo1.maven.org/maven2";
const CLOSURE_PROJECT: &str = "com/google/javascript/closure-compiler";

/// Successful compilation: generated code plus any diagnostics (warnings).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOutput {
    pub code: String,
    pub diagnostics: Vec<String>,
}

/// Whole-program compiler run over a flattened build directory
/// (`main.js` + `imports/*.js`).
pub trait Compiler {
    fn compile(&self, build_dir: &Path) -> Result<CompileOutput>;
}

/// Maven URL of a Closure compiler release jar.
pub fn closure_url(version: &str) -> String {
    format!("{MAVEN_REPO}/{CLOSURE_PROJECT}/{version}/closure-compiler-{version}.jar")
}

/// The Closure jar as stored in the cache (key = jar URL).
#[derive(Debug, Clone)]
pub struct ClosureJar {
    url: String,
    cache: Cache,
}

impl ClosureJar {
    pub fn new(cache: Cache, version: &str) -> Self {
        Self {
            url: closure_url(version),
            cache,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn path(&self) -> PathBuf {
        self.cache.path_for(&self.url)
    }

    pub fn is_present(&self) -> bool {
        self.cache.contains(&self.url)
    }

    /// Downloads the jar unless it is already cached. `force` re-downloads.
    pub fn ensure(&self, transport: &dyn Transport, force: bool) -> Result<PathBuf> {
        if self.is_present() && !force {
            tracing::debug!(path = %self.path().display(), "closure jar present");
            return Ok(self.path());
        }
        tracing::info!("Downloading {}...", self.url);
        let bytes = transport.get(&self.url).map_err(|e| Error::FetchFailed {
            locator: self.url.clone(),
            reason: e.to_string(),
        })?;
        self.cache.put(&self.url, &bytes)
    }
}

/// `java -jar closure-compiler.jar` with advanced optimizations over
/// `imports/*.js` and `main.js` as the entry point.
#[derive(Debug, Clone)]
pub struct ClosureCompiler {
    pub java: String,
    pub jar: PathBuf,
    pub language_out: String,
}

impl ClosureCompiler {
    pub fn new(java: impl Into<String>, jar: impl Into<PathBuf>) -> Self {
        Self {
            java: java.into(),
            jar: jar.into(),
            language_out: DEFAULT_LANGUAGE_OUT.to_string(),
        }
    }

    pub fn language_out(mut self, language_out: impl Into<String>) -> Self {
        self.language_out = language_out.into();
        self
    }

    /// Arguments passed to `java`, in order.
    pub fn args(&self) -> Vec<String> {
        let jar = self.jar.display().to_string();
        [
            "-jar",
            jar.as_str(),
            "--js",
            "imports/*.js",
            "-W",
            "VERBOSE",
            "--compilation_level",
            "ADVANCED_OPTIMIZATIONS",
            "--assume_function_wrapper",
            "--isolation_mode",
            "IIFE",
            "--dependency_mode",
            "PRUNE",
            "--language_out",
            self.language_out.as_str(),
            "--js",
            "main.js",
            "--entry_point",
            "main.js",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

impl Compiler for ClosureCompiler {
    fn compile(&self, build_dir: &Path) -> Result<CompileOutput> {
        let tool_err = |reason: String| Error::ExternalTool {
            tool: self.java.clone(),
            reason,
        };
        tracing::debug!(java = %self.java, dir = %build_dir.display(), "running closure");
        let output = Command::new(&self.java)
            .args(self.args())
            .current_dir(build_dir)
            .output()
            .map_err(|e| tool_err(format!("cannot run: {e}")))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(tool_err(format!(
                "exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let diagnostics: Vec<String> = stderr
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        for line in &diagnostics {
            tracing::warn!("[closure] {}", line);
        }

        let code = String::from_utf8(output.stdout)
            .map_err(|_| tool_err("output is not valid UTF-8".to_string()))?;
        Ok(CompileOutput { code, diagnostics })
    }
}
