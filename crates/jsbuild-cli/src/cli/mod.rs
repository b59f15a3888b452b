//! CLI for jsbuild.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jsbuild_core::cache::Cache;
use jsbuild_core::config::{self, JsbuildConfig};
use jsbuild_core::fetch::{CurlTransport, Fetcher, Transport};
use jsbuild_core::assemble::Assembler;
use jsbuild_core::logging;
use std::path::PathBuf;
use std::sync::Arc;

use commands::{
    run_build, run_dependency_dag, run_doctor, run_ensure_closure, run_list_deps, run_nuke_cache,
};

/// Top-level CLI for jsbuild.
#[derive(Debug, Parser)]
#[command(name = "jsbuild", version)]
#[command(about = "Javascript builder and package manager", long_about = None)]
pub struct Cli {
    /// Debug-level logging.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Path to the Java binary. Defaults to the config value (`java`).
    #[arg(long, global = true, value_name = "PATH")]
    pub java: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch all the dependencies of the input file and build it.
    Build {
        /// The main file.
        file: PathBuf,
        /// Write compiled output here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Closure `--language_out` (e.g. ECMASCRIPT_2019).
        #[arg(long = "language-out", alias = "language_out", value_name = "LANG")]
        language_out: Option<String>,
    },

    /// Print every dependency of the file, recursively, as `<digest> <locator>`.
    ListDeps {
        /// The file to list the dependencies of.
        file: PathBuf,
        /// Print a JSON array instead of lines.
        #[arg(long)]
        json: bool,
    },

    /// Print the dependency graph as Graphviz DOT, or render it to PNG.
    DependencyDag {
        /// The main file.
        file: PathBuf,
        /// Render through `sfdp -Tpng` into this file.
        #[arg(long, value_name = "PATH")]
        png: Option<PathBuf>,
    },

    /// Download the Closure compiler into the cache.
    EnsureClosure {
        /// Download again even if already cached.
        #[arg(long)]
        force: bool,
    },

    /// Delete the cached files.
    NukeCache,

    /// Check if the environment is ready to run the tool.
    Doctor,
}

/// Shared state for one invocation: config, cache handle and network transport.
pub struct Session {
    pub cfg: JsbuildConfig,
    pub cache: Cache,
    pub transport: Arc<dyn Transport>,
    pub verbose: bool,
}

impl Session {
    pub fn assembler(&self) -> Assembler {
        let fetcher = Fetcher::with_defaults(self.cache.clone(), Arc::clone(&self.transport));
        Assembler::new(fetcher, self.cfg.cycle_policy)
    }
}

pub fn run_from_args() -> Result<()> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_init()?;
    if let Some(java) = cli.java.clone() {
        cfg.java = java;
    }

    if cfg.log_to_file {
        if let Err(e) = logging::init_logging_file(cli.verbose) {
            logging::init_logging_stderr(cli.verbose);
            tracing::warn!("file logging unavailable, using stderr: {:#}", e);
        }
    } else {
        logging::init_logging_stderr(cli.verbose);
    }
    tracing::debug!("Welcome to {} v{}!", jsbuild_core::NAME, jsbuild_core::VERSION);
    tracing::debug!("loaded config: {:?}", cfg);

    let cache = Cache::open_default()?;
    tracing::debug!("Caching files in {}.", cache.dir().display());

    let session = Session {
        cfg,
        cache,
        transport: Arc::new(CurlTransport::new()),
        verbose: cli.verbose,
    };

    match cli.command {
        CliCommand::Build {
            file,
            output,
            language_out,
        } => run_build(&session, &file, output.as_deref(), language_out.as_deref())?,
        CliCommand::ListDeps { file, json } => run_list_deps(&session, &file, json)?,
        CliCommand::DependencyDag { file, png } => {
            run_dependency_dag(&session, &file, png.as_deref())?
        }
        CliCommand::EnsureClosure { force } => run_ensure_closure(&session, force)?,
        CliCommand::NukeCache => run_nuke_cache(&session)?,
        CliCommand::Doctor => run_doctor(&session),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
