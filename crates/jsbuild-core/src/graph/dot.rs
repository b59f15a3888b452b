//! Graphviz rendering of a dependency graph.

use std::fmt::Write as _;
use std::io::Write as _;
use std::process::{Command, Stdio};

use crate::digest::digest_str;
use crate::error::{Error, Result};

use super::DependencyGraph;

/// DOT source for `graph`. Nodes are keyed by locator digest and labelled
/// with the full locator; network modules are eggs, local ones boxes, and
/// the entry is red. Edges point from the imported module to the importer.
pub fn to_dot(graph: &DependencyGraph) -> String {
    let mut out = String::new();
    out.push_str("digraph {\n");
    out.push_str("graph [splines=true overlap=false];\n");

    for node in graph.nodes() {
        let shape = if node.is_remote() { "egg" } else { "box" };
        let _ = write!(
            out,
            "\"{}\" [label = \"{}\" shape=\"{}\"",
            digest_str(node.as_str()),
            node,
            shape
        );
        if node == graph.entry() {
            out.push_str(" color = red");
        }
        out.push_str("];\n");
    }

    for edge in graph.edges() {
        let _ = writeln!(
            out,
            "\"{}\" -> \"{}\"",
            digest_str(edge.target.as_str()),
            digest_str(edge.source.as_str())
        );
    }
    out.push_str("}\n");
    out
}

/// Renders DOT source to PNG bytes with `sfdp -Tpng`.
pub fn render_png(dot: &str, sfdp: &str) -> Result<Vec<u8>> {
    let tool_err = |reason: String| Error::ExternalTool {
        tool: sfdp.to_string(),
        reason,
    };
    let mut child = Command::new(sfdp)
        .arg("-Tpng")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| tool_err(e.to_string()))?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(dot.as_bytes())
            .map_err(|e| tool_err(e.to_string()))?;
    }
    let output = child
        .wait_with_output()
        .map_err(|e| tool_err(e.to_string()))?;
    if !output.status.success() {
        return Err(tool_err(format!(
            "exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(output.stdout)
}
