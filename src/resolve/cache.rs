//! Per-run memoization of resolved groups.

use std::sync::Arc;

use hashbrown::HashMap;

use crate::resolve::CoordinateNode;

/// Write-once, read-many map from group path to its resolved node.
///
/// Owned by one [`SelectionResolver`](crate::resolve::SelectionResolver) and
/// passed through the resolution call graph, keeping runs isolated from each
/// other (nothing process-wide). [`seed`](ResolutionCache::seed) lets a
/// caller hand in nodes resolved elsewhere: a later phase over the same
/// granule, or a test fixing a neighbor group's selection.
#[derive(Clone, Debug, Default)]
pub struct ResolutionCache {
    nodes: HashMap<String, Arc<CoordinateNode>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached node for `path`, if any.
    pub fn get(&self, path: &str) -> Option<Arc<CoordinateNode>> {
        self.nodes.get(path).cloned()
    }

    /// Insert a node under its own path. First write wins; a later insert
    /// for the same path is dropped and reported as `false`.
    pub fn insert(&mut self, node: Arc<CoordinateNode>) -> bool {
        match self.nodes.entry(node.path.clone()) {
            hashbrown::hash_map::Entry::Occupied(_) => false,
            hashbrown::hash_map::Entry::Vacant(slot) => {
                slot.insert(node);
                true
            }
        }
    }

    /// Alias of [`insert`](Self::insert) for pre-populating a resolver.
    pub fn seed(&mut self, node: Arc<CoordinateNode>) -> bool {
        self.insert(node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Paths of every cached node, in no particular order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }
}
