//! Selection resolution: one [`RangeSelection`] per group, memoized.
//!
//! A group's selection may derive from its own coordinate arrays or
//! transitively from another group's, chased through forward or reverse
//! pointer relationships. The resolver walks that graph depth-first,
//! dispatching on a closed [`Strategy`] set and caching every result so a
//! group's coordinate arrays are consulted at most once per subset run no
//! matter how many referencing groups need them.
//!
//! # Errors
//! * [`SubsetError::CyclicRelationship`]: the declared relationship graph
//!   contains a cycle. This is a configuration fault and surfaces to the
//!   caller; every data-shaped problem (dangling references, inconsistent
//!   array lengths, missing coordinates) instead degrades to a zero-size
//!   selection so the run still completes.

pub mod cache;

mod direct;
mod forward;
mod merged;
mod reverse;
mod super_group;

use std::sync::Arc;

use itertools::Itertools;

use crate::constraint::Constraints;
use crate::selection::RangeSelection;
use crate::store::{GroupData, GroupStore, Relationship};
use crate::subset_error::SubsetError;

pub use cache::ResolutionCache;

/// How a group's selection is computed. Fixed, closed set: the match in
/// [`SelectionResolver::resolve`] is exhaustive over [`Relationship`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Own time/lat/lon arrays.
    Direct,
    /// Derived from a parent group's pointer column.
    Forward,
    /// Own pointer column into an already-resolved target group.
    Reverse,
    /// Several lat/lon pairs sharing one time array, OR-combined.
    SuperGroup,
    /// Own coordinate test unioned with rows addressed by a secondary
    /// group's selection.
    Merged,
}

impl Strategy {
    /// The strategy a relationship kind dispatches to.
    pub fn for_relationship(relationship: &Relationship) -> Self {
        match relationship {
            Relationship::None => Strategy::Direct,
            Relationship::ForwardRefTo { .. } => Strategy::Forward,
            Relationship::ReverseRefTo { .. } => Strategy::Reverse,
            Relationship::SuperGroupOf { .. } => Strategy::SuperGroup,
            Relationship::MergedWith { .. } => Strategy::Merged,
        }
    }
}

/// Outcome of resolving one group.
///
/// `Unconstrained` means no constraint applies to the group at all: the
/// copy layer copies every row and skips pointer remapping. It is distinct
/// from a selection that happens to cover everything, which still drives
/// remapping.
#[derive(Clone, Debug)]
pub enum Resolution {
    Unconstrained,
    Selected(Arc<RangeSelection>),
}

impl Resolution {
    pub fn selected(selection: RangeSelection) -> Self {
        Resolution::Selected(Arc::new(selection))
    }

    #[inline]
    pub fn is_unconstrained(&self) -> bool {
        matches!(self, Resolution::Unconstrained)
    }

    /// The selection, when one was computed.
    pub fn selection(&self) -> Option<&RangeSelection> {
        match self {
            Resolution::Unconstrained => None,
            Resolution::Selected(sel) => Some(sel),
        }
    }

    /// Effective selected ranges, treating `Unconstrained` as "every row of
    /// a `row_count`-sized group".
    pub fn spans_or_all(&self, row_count: i64) -> Vec<(i64, i64)> {
        match self {
            Resolution::Unconstrained if row_count > 0 => vec![(0, row_count)],
            Resolution::Unconstrained => Vec::new(),
            Resolution::Selected(sel) => sel.spans(),
        }
    }
}

/// The resolver's unit of work for one group; what the cache stores.
#[derive(Clone, Debug)]
pub struct CoordinateNode {
    /// Group path; also the cache key.
    pub path: String,
    pub strategy: Strategy,
    /// Array length for this group, read once and reused.
    pub row_count: i64,
    pub selection: Resolution,
}

impl CoordinateNode {
    /// Rows the copy layer will emit for this group.
    pub fn retained_rows(&self) -> i64 {
        match &self.selection {
            Resolution::Unconstrained => self.row_count,
            Resolution::Selected(sel) => sel.size(),
        }
    }

    fn rejecting(path: &str, strategy: Strategy, row_count: i64) -> Self {
        Self {
            path: path.to_string(),
            strategy,
            row_count,
            selection: Resolution::selected(reject_all(row_count)),
        }
    }
}

/// A selection that rejects every row of a `row_count`-sized group.
pub(crate) fn reject_all(row_count: i64) -> RangeSelection {
    let mut sel = RangeSelection::new(row_count);
    sel.restrict(0, 0);
    sel
}

/// Resolves group selections against one constraint set, memoizing per group
/// path through an explicit, injectable [`ResolutionCache`].
pub struct SelectionResolver<'a, S: GroupStore> {
    store: &'a S,
    constraints: Constraints,
    cache: ResolutionCache,
    /// Resolution stack for cycle detection, outermost first.
    in_flight: Vec<String>,
}

impl<'a, S: GroupStore> SelectionResolver<'a, S> {
    pub fn new(store: &'a S, constraints: Constraints) -> Self {
        Self::with_cache(store, constraints, ResolutionCache::new())
    }

    /// Resume with a pre-populated cache (e.g. nodes carried over from an
    /// earlier resolution phase).
    pub fn with_cache(store: &'a S, constraints: Constraints, cache: ResolutionCache) -> Self {
        Self {
            store,
            constraints,
            cache,
            in_flight: Vec::new(),
        }
    }

    #[inline]
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    #[inline]
    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn into_cache(self) -> ResolutionCache {
        self.cache
    }

    /// Group lookup with the store's lifetime, so group borrows survive
    /// recursive `&mut self` calls.
    fn store_group(&self, path: &str) -> Option<&'a GroupData> {
        self.store.group(path)
    }

    /// Resolve the selection for the group at `path`, reusing any cached
    /// node. Each group is resolved at most once per resolver lifetime.
    pub fn resolve(&mut self, path: &str) -> Result<Arc<CoordinateNode>, SubsetError> {
        if let Some(node) = self.cache.get(path) {
            log::debug!("selection for `{path}` served from cache");
            return Ok(node);
        }
        if self.in_flight.iter().any(|p| p == path) {
            return Err(SubsetError::CyclicRelationship {
                path: path.to_string(),
                chain: self.in_flight.iter().join(" -> "),
            });
        }
        self.in_flight.push(path.to_string());
        let resolved = self.resolve_uncached(path);
        self.in_flight.pop();
        let node = Arc::new(resolved?);
        self.cache.insert(node.clone());
        Ok(node)
    }

    fn resolve_uncached(&mut self, path: &str) -> Result<CoordinateNode, SubsetError> {
        let Some(group) = self.store_group(path) else {
            log::warn!("group `{path}` is absent from the granule; selecting no rows");
            return Ok(CoordinateNode::rejecting(path, Strategy::Direct, 0));
        };
        let strategy = Strategy::for_relationship(&group.relationship);
        if self.constraints.is_unconstrained() {
            return Ok(CoordinateNode {
                path: path.to_string(),
                strategy,
                row_count: group.row_count,
                selection: Resolution::Unconstrained,
            });
        }
        log::debug!("resolving `{path}` via {strategy:?}");
        let selection = match &group.relationship {
            Relationship::None => direct::resolve(group, &self.constraints),
            Relationship::ForwardRefTo { parent } => forward::resolve(self, group, parent)?,
            Relationship::ReverseRefTo { target } => reverse::resolve(self, group, target)?,
            Relationship::SuperGroupOf { siblings } => super_group::resolve(self, group, siblings),
            Relationship::MergedWith { secondary } => merged::resolve(self, group, secondary)?,
        };
        Ok(CoordinateNode {
            path: path.to_string(),
            strategy,
            row_count: group.row_count,
            selection,
        })
    }
}
