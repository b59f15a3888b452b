//! `jsbuild build <file>` – flatten, then compile with Closure.

use anyhow::{Context, Result};
use jsbuild_core::compiler::{ClosureCompiler, ClosureJar, Compiler};
use std::path::Path;

use crate::cli::Session;

pub fn run_build(
    session: &Session,
    file: &Path,
    output: Option<&Path>,
    language_out: Option<&str>,
) -> Result<()> {
    let flat = session
        .assembler()
        .flatten(file)
        .with_context(|| format!("build {}", file.display()))?;

    let jar = ClosureJar::new(session.cache.clone(), &session.cfg.closure_version);
    let jar_path = jar
        .ensure(session.transport.as_ref(), false)
        .context("fetch closure compiler")?;

    let compiler = ClosureCompiler::new(session.cfg.java.clone(), jar_path)
        .language_out(language_out.unwrap_or(&session.cfg.language_out));
    let out = compiler.compile(flat.dir())?;
    // Scratch directory goes away here, before any output is written.
    drop(flat);
    tracing::info!(warnings = out.diagnostics.len(), "build finished");

    match output {
        Some(path) => {
            std::fs::write(path, &out.code)
                .with_context(|| format!("write {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => println!("{}", out.code),
    }
    Ok(())
}
