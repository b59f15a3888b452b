//! `jsbuild nuke-cache` – delete every cached file.

use anyhow::Result;
use jsbuild_core::cache::Cache;
use std::io::Write;

use crate::cli::Session;

pub fn run_nuke_cache(session: &Session) -> Result<()> {
    nuke_cache(&session.cache, &mut std::io::stdout().lock())
}

fn nuke_cache(cache: &Cache, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Deleting cached files...")?;
    for path in cache.purge()? {
        writeln!(out, "  {}", path.display())?;
    }
    writeln!(out, "Done.")?;
    Ok(())
}
