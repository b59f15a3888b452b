//! Dependency graph discovery.
//!
//! [`Walk`] is a lazy depth-first, pre-order iterator over import edges. It
//! keeps an explicit stack and a visited set, so each module is fetched at
//! most once per walk and cyclic graphs terminate. Edge deduplication is left
//! to the consumer ([`DependencyGraph`]).

pub mod dot;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::import_line;
use crate::locator::Locator;

/// Directed import edge: `source` contains an import of `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: Locator,
    pub target: Locator,
}

/// What to do when an import closes a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Fail the walk with [`Error::CyclicImport`].
    #[default]
    Reject,
    /// Emit the back edge and keep going.
    Allow,
}

struct Frame {
    locator: Locator,
    targets: std::vec::IntoIter<Locator>,
}

/// Lazy edge iterator. Stops after the first error.
pub struct Walk<'f> {
    fetcher: &'f Fetcher,
    policy: CyclePolicy,
    stack: Vec<Frame>,
    on_path: HashSet<String>,
    visited: HashSet<String>,
    pending: Option<Locator>,
    failed: bool,
}

impl<'f> Walk<'f> {
    pub fn new(fetcher: &'f Fetcher, entry: Locator, policy: CyclePolicy) -> Self {
        let mut visited = HashSet::new();
        visited.insert(entry.as_str().to_string());
        Self {
            fetcher,
            policy,
            stack: Vec::new(),
            on_path: HashSet::new(),
            visited,
            pending: Some(entry),
            failed: false,
        }
    }

    /// Fetches `locator`, resolves its imports and pushes it on the path.
    fn enter(&mut self, locator: Locator) -> Result<()> {
        let content = self.fetcher.fetch(&locator)?;
        let targets = import_line::specifiers(&content)
            .map(|spec| locator.resolve(spec))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(%locator, imports = targets.len(), "scanned");
        self.on_path.insert(locator.as_str().to_string());
        self.stack.push(Frame {
            locator,
            targets: targets.into_iter(),
        });
        Ok(())
    }

    /// Current path from the first occurrence of `target`, closed by `target`.
    fn cycle_through(&self, target: &Locator) -> Vec<String> {
        let start = self
            .stack
            .iter()
            .position(|f| &f.locator == target)
            .unwrap_or(0);
        self.stack[start..]
            .iter()
            .map(|f| f.locator.to_string())
            .chain(std::iter::once(target.to_string()))
            .collect()
    }

    fn fail(&mut self, err: Error) -> Option<Result<Edge>> {
        self.failed = true;
        Some(Err(err))
    }
}

impl Iterator for Walk<'_> {
    type Item = Result<Edge>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if let Some(locator) = self.pending.take() {
            if let Err(e) = self.enter(locator) {
                return self.fail(e);
            }
        }
        loop {
            let step = {
                let frame = self.stack.last_mut()?;
                frame
                    .targets
                    .next()
                    .map(|target| (frame.locator.clone(), target))
            };
            let Some((source, target)) = step else {
                if let Some(done) = self.stack.pop() {
                    self.on_path.remove(done.locator.as_str());
                }
                continue;
            };

            if self.on_path.contains(target.as_str()) {
                if self.policy == CyclePolicy::Reject {
                    let cycle = self.cycle_through(&target);
                    return self.fail(Error::CyclicImport { cycle });
                }
                tracing::debug!(%source, %target, "cyclic import allowed");
            } else if self.visited.insert(target.as_str().to_string()) {
                self.pending = Some(target.clone());
            }
            return Some(Ok(Edge { source, target }));
        }
    }
}

/// Starts a walk from `entry`.
pub fn walk(fetcher: &Fetcher, entry: Locator, policy: CyclePolicy) -> Walk<'_> {
    Walk::new(fetcher, entry, policy)
}

/// Collected result of a walk: the edge set and the distinct dependencies.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    entry: Locator,
    edges: Vec<Edge>,
    dependencies: Vec<Locator>,
}

impl DependencyGraph {
    /// Drains `edges`, deduplicating edges and targets in order of first discovery.
    pub fn collect<I>(entry: Locator, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Edge>>,
    {
        let mut seen_edges = HashSet::new();
        let mut seen_targets = HashSet::new();
        let mut graph = DependencyGraph {
            entry,
            edges: Vec::new(),
            dependencies: Vec::new(),
        };
        for edge in edges {
            let edge = edge?;
            if seen_targets.insert(edge.target.as_str().to_string()) {
                graph.dependencies.push(edge.target.clone());
            }
            if seen_edges.insert(edge.clone()) {
                graph.edges.push(edge);
            }
        }
        Ok(graph)
    }

    /// Walks from `entry` and collects the whole graph.
    pub fn discover(fetcher: &Fetcher, entry: Locator, policy: CyclePolicy) -> Result<Self> {
        let edges = walk(fetcher, entry.clone(), policy);
        Self::collect(entry, edges)
    }

    pub fn entry(&self) -> &Locator {
        &self.entry
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Distinct import targets, in order of first discovery.
    pub fn dependencies(&self) -> &[Locator] {
        &self.dependencies
    }

    /// Entry followed by every other locator that appears in an edge.
    pub fn nodes(&self) -> Vec<&Locator> {
        let mut seen = HashSet::new();
        std::iter::once(&self.entry)
            .chain(self.edges.iter().flat_map(|e| [&e.source, &e.target]))
            .filter(|l| seen.insert(l.as_str()))
            .collect()
    }
}
