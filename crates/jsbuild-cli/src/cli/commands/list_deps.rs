//! `jsbuild list-deps <file>` – recursive dependency listing.

use anyhow::Result;
use std::path::Path;

use crate::cli::Session;

/// One `<digest> <locator>` line per distinct dependency, in discovery order.
pub fn run_list_deps(session: &Session, file: &Path, json: bool) -> Result<()> {
    let deps = session.assembler().list_dependencies(file)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&deps)?);
    } else {
        for d in deps {
            println!("{} {}", d.digest, d.locator);
        }
    }
    Ok(())
}
