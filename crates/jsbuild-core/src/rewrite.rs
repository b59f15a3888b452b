//! Rewrites import specifiers to digest-named relative paths.

use crate::error::Result;
use crate::import_line::ImportLine;
use crate::locator::Locator;

/// Where the module being rewritten will live in the build directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// `main.js` at the root; imports point into `./imports/`.
    Entry,
    /// A file inside `imports/`; imports point at siblings.
    Nested,
}

impl Placement {
    fn prefix(self) -> &'static str {
        match self {
            Placement::Entry => "./imports/",
            Placement::Nested => "./",
        }
    }
}

/// Rewrites one line. Lines that are not a recognized import come back unchanged.
pub fn rewrite_line(line: &str, current: &Locator, placement: Placement) -> Result<String> {
    let Some(imp) = ImportLine::parse(line) else {
        return Ok(line.to_string());
    };
    let target = current.resolve(imp.specifier)?;
    Ok(format!(
        "import {} from \"{}{}\";{}",
        imp.bindings,
        placement.prefix(),
        target.flat_filename(),
        imp.trailer
    ))
}

/// Rewrites every `\n`-separated line of `content`.
pub fn rewrite_module(content: &str, current: &Locator, placement: Placement) -> Result<String> {
    let lines = content
        .split('\n')
        .map(|line| rewrite_line(line, current, placement))
        .collect::<Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}
