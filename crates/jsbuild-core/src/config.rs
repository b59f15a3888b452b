use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::compiler::{DEFAULT_CLOSURE_VERSION, DEFAULT_LANGUAGE_OUT};
use crate::graph::CyclePolicy;

/// Global configuration loaded from `~/.config/jsbuild/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsbuildConfig {
    /// Java binary used to run the Closure jar.
    #[serde(default = "default_java")]
    pub java: String,
    /// Closure `--language_out` value.
    #[serde(default = "default_language_out")]
    pub language_out: String,
    /// Closure compiler release, e.g. "v20221004".
    #[serde(default = "default_closure_version")]
    pub closure_version: String,
    /// "reject" (default) fails the build on an import cycle; "allow" flattens it.
    #[serde(default)]
    pub cycle_policy: CyclePolicy,
    /// Also append logs to `~/.local/state/jsbuild/jsbuild.log`.
    #[serde(default)]
    pub log_to_file: bool,
}

fn default_java() -> String {
    "java".to_string()
}

fn default_language_out() -> String {
    DEFAULT_LANGUAGE_OUT.to_string()
}

fn default_closure_version() -> String {
    DEFAULT_CLOSURE_VERSION.to_string()
}

impl Default for JsbuildConfig {
    fn default() -> Self {
        Self {
            java: default_java(),
            language_out: default_language_out(),
            closure_version: default_closure_version(),
            cycle_policy: CyclePolicy::Reject,
            log_to_file: false,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(crate::NAME)?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<JsbuildConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = JsbuildConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: JsbuildConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
