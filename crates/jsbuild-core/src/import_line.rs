//! The one import form the engine recognizes.
//!
//! A line must be exactly `import <bindings> from "<specifier>";`. Single
//! quotes, multi-line imports, re-exports and `import()` are not matched.

use std::sync::OnceLock;

use regex::Regex;

fn pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^import (.*?) from "(.*?)";$"#).expect("import pattern is valid")
    })
}

/// A matched static import line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportLine<'a> {
    pub bindings: &'a str,
    pub specifier: &'a str,
    /// Line ending kept from the source (`"\r"` for CRLF input, otherwise empty).
    pub trailer: &'a str,
}

impl<'a> ImportLine<'a> {
    pub fn parse(line: &'a str) -> Option<Self> {
        let (body, trailer) = match line.strip_suffix('\r') {
            Some(body) => (body, "\r"),
            None => (line, ""),
        };
        let caps = pattern().captures(body)?;
        Some(ImportLine {
            bindings: caps.get(1)?.as_str(),
            specifier: caps.get(2)?.as_str(),
            trailer,
        })
    }
}

/// Specifiers of every recognized import in `content`, in source order.
pub fn specifiers(content: &str) -> impl Iterator<Item = &str> {
    content
        .split('\n')
        .filter_map(ImportLine::parse)
        .map(|imp| imp.specifier)
}
