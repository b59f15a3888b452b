//! Flattening assembler: entry + reachable modules into one build directory.
//!
//! Layout handed to the compiler:
//!
//! ```text
//! <scratch>/main.js             rewritten entry
//! <scratch>/imports/<digest>.js one file per distinct dependency
//! ```
//!
//! The scratch directory belongs to the [`FlattenedBuild`] and is removed
//! when it is dropped, on every exit path.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::TempDir;

use crate::compiler::{CompileOutput, Compiler};
use crate::digest::digest_str;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::graph::{CyclePolicy, DependencyGraph};
use crate::locator::Locator;
use crate::rewrite::{rewrite_module, Placement};

pub const MAIN_FILE: &str = "main.js";
pub const IMPORTS_DIR: &str = "imports";

/// A module as written into the build directory.
#[derive(Debug, Clone)]
pub struct RewrittenModule {
    pub locator: Locator,
    /// Path relative to the build directory.
    pub filename: PathBuf,
    pub content: String,
}

/// One line of the dependency listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEntry {
    pub digest: String,
    pub locator: String,
}

/// A populated scratch directory. Dropping it deletes the directory.
#[derive(Debug)]
pub struct FlattenedBuild {
    dir: TempDir,
    main: RewrittenModule,
    imports: Vec<RewrittenModule>,
}

impl FlattenedBuild {
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn main(&self) -> &RewrittenModule {
        &self.main
    }

    /// Dependencies in order of first discovery.
    pub fn imports(&self) -> &[RewrittenModule] {
        &self.imports
    }
}

/// Orchestrates fetch, walk and rewrite. Holds the fetch registry and cycle policy.
pub struct Assembler {
    fetcher: Fetcher,
    policy: CyclePolicy,
}

impl Assembler {
    pub fn new(fetcher: Fetcher, policy: CyclePolicy) -> Self {
        Self { fetcher, policy }
    }

    /// Discovers the full graph reachable from the entry file.
    pub fn graph(&self, entry_path: &Path) -> Result<DependencyGraph> {
        let entry = Locator::from_path(entry_path)?;
        DependencyGraph::discover(&self.fetcher, entry, self.policy)
    }

    /// `(digest, locator)` for every distinct dependency, in discovery order.
    pub fn list_dependencies(&self, entry_path: &Path) -> Result<Vec<DependencyEntry>> {
        let graph = self.graph(entry_path)?;
        Ok(graph
            .dependencies()
            .iter()
            .map(|l| DependencyEntry {
                digest: digest_str(l.as_str()),
                locator: l.to_string(),
            })
            .collect())
    }

    /// Writes the rewritten entry and every dependency into a fresh scratch directory.
    pub fn flatten(&self, entry_path: &Path) -> Result<FlattenedBuild> {
        let entry = Locator::from_path(entry_path)?;
        let dir = tempfile::Builder::new()
            .prefix(&format!("{}-", crate::NAME))
            .tempdir()
            .map_err(|source| Error::BuildIo {
                path: std::env::temp_dir(),
                source,
            })?;
        tracing::debug!(dir = %dir.path().display(), "using build directory");

        let main = self.rewrite_into(dir.path(), &entry, PathBuf::from(MAIN_FILE), Placement::Entry)?;

        let imports_dir = dir.path().join(IMPORTS_DIR);
        fs::create_dir(&imports_dir).map_err(|source| Error::BuildIo {
            path: imports_dir.clone(),
            source,
        })?;

        let graph = DependencyGraph::discover(&self.fetcher, entry, self.policy)?;
        let mut imports = Vec::with_capacity(graph.dependencies().len());
        for dep in graph.dependencies() {
            let filename = Path::new(IMPORTS_DIR).join(dep.flat_filename());
            imports.push(self.rewrite_into(dir.path(), dep, filename, Placement::Nested)?);
        }
        tracing::info!(
            entry = %main.locator,
            dependencies = imports.len(),
            "flattened module graph"
        );

        Ok(FlattenedBuild { dir, main, imports })
    }

    /// Flattens the entry and runs `compiler` over the result. The scratch
    /// directory is gone by the time this returns.
    pub fn build(&self, entry_path: &Path, compiler: &dyn Compiler) -> Result<CompileOutput> {
        let flat = self.flatten(entry_path)?;
        compiler.compile(flat.dir())
    }

    fn rewrite_into(
        &self,
        root: &Path,
        locator: &Locator,
        filename: PathBuf,
        placement: Placement,
    ) -> Result<RewrittenModule> {
        let source = self.fetcher.fetch(locator)?;
        let content = rewrite_module(&source, locator, placement)?;
        let path = root.join(&filename);
        fs::write(&path, &content).map_err(|source| Error::BuildIo { path, source })?;
        Ok(RewrittenModule {
            locator: locator.clone(),
            filename,
            content,
        })
    }
}
