//! `jsbuild ensure-closure` – download the Closure compiler.

use anyhow::Result;
use jsbuild_core::compiler::ClosureJar;

use crate::cli::Session;

pub fn run_ensure_closure(session: &Session, force: bool) -> Result<()> {
    let jar = ClosureJar::new(session.cache.clone(), &session.cfg.closure_version);
    let path = jar.ensure(session.transport.as_ref(), force)?;
    println!("Closure compiler at {}", path.display());
    Ok(())
}
