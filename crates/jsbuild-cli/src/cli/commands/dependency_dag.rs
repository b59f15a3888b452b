//! `jsbuild dependency-dag <file>` – DOT graph of the imports.

use anyhow::{Context, Result};
use jsbuild_core::graph::dot;
use std::path::Path;

use crate::cli::Session;

const SFDP: &str = "sfdp";

pub fn run_dependency_dag(session: &Session, file: &Path, png: Option<&Path>) -> Result<()> {
    let graph = session.assembler().graph(file)?;
    let source = dot::to_dot(&graph);
    match png {
        None => print!("{source}"),
        Some(path) => {
            let bytes = dot::render_png(&source, SFDP)?;
            std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}
