//! `RangeSelection`: a coalescing interval set over the rows of a 1-D array.
//!
//! The selection starts out covering the whole array. Temporal filtering
//! narrows the *valid bound* once via [`RangeSelection::restrict`]; spatial
//! filtering then accumulates explicit segments via [`RangeSelection::union`].
//! An empty segment set with a non-empty bound means "everything inside the
//! bound is selected, expressed implicitly".
//!
//! # Invariants
//!
//! - `0 <= bound_begin <= bound_end <= max_size`.
//! - Segments are pairwise disjoint and non-touching: for consecutive
//!   segments `(s1, l1)` and `(s2, _)` with `s1 < s2`, `s1 + l1 < s2`.
//! - Every segment lies inside the valid bound and has positive length.
//!
//! These are checked after mutations in debug builds via
//! [`debug_assert_invariants`](RangeSelection::debug_assert_invariants).
//!
//! # Clipping policy
//!
//! Out-of-range `union` inputs are silently clipped to the valid bound, and
//! a clipped-to-nothing insert is a no-op. Subsetting is best-effort over
//! possibly ragged granule data, so a request past the end of an array is a
//! normal event, not a fault. "Reject all rows" is expressed as
//! `restrict(x, x)`, after which [`size`](RangeSelection::size) is zero.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Which rows of an array of `max_size` rows are retained.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSelection {
    max_size: i64,
    bound_begin: i64,
    bound_end: i64,
    /// start -> length, ordered, disjoint, non-touching.
    segments: BTreeMap<i64, i64>,
}

impl RangeSelection {
    /// New selection over `max_size` rows, initially selecting all of them.
    pub fn new(max_size: i64) -> Self {
        let max_size = max_size.max(0);
        Self {
            max_size,
            bound_begin: 0,
            bound_end: max_size,
            segments: BTreeMap::new(),
        }
    }

    /// Number of rows in the underlying array.
    #[inline]
    pub fn max_size(&self) -> i64 {
        self.max_size
    }

    /// First row of the valid bound.
    #[inline]
    pub fn offset(&self) -> i64 {
        self.bound_begin
    }

    /// The valid bound as a half-open `(begin, end)` pair.
    #[inline]
    pub fn valid_bound(&self) -> (i64, i64) {
        (self.bound_begin, self.bound_end)
    }

    /// Number of retained rows: the segment total when explicit segments
    /// exist, otherwise the width of the valid bound.
    pub fn size(&self) -> i64 {
        let total: i64 = self.segments.values().sum();
        if total == 0 {
            self.bound_end - self.bound_begin
        } else {
            total
        }
    }

    /// Whether no rows are retained.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Iterate explicit segments as `(start, length)` pairs in row order.
    pub fn segments(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.segments.iter().map(|(&s, &l)| (s, l))
    }

    /// Number of explicit segments.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Re-clip the valid bound to `[begin, end)` and re-apply every existing
    /// segment against it. Segments outside the new bound are dropped;
    /// partially overlapping segments are clipped. Called once, by temporal
    /// filtering, before any spatial unions.
    pub fn restrict(&mut self, begin: i64, end: i64) {
        let begin = begin.clamp(0, self.max_size);
        let end = end.clamp(begin, self.max_size);
        log::trace!(
            "selection bound ({},{}) -> ({begin},{end})",
            self.bound_begin,
            self.bound_end
        );
        self.bound_begin = begin;
        self.bound_end = end;
        let old = std::mem::take(&mut self.segments);
        for (start, length) in old {
            self.union(start, length);
        }
        #[cfg(debug_assertions)]
        self.debug_assert_invariants();
    }

    /// Insert `[start, start + length)`, clipped to the valid bound, merging
    /// with every existing segment it overlaps or touches. Commutative and
    /// idempotent: the final segment set does not depend on insertion order.
    pub fn union(&mut self, start: i64, length: i64) {
        if length <= 0 {
            return;
        }
        let mut lo = start.max(self.bound_begin);
        let mut hi = start.saturating_add(length).min(self.bound_end);
        if hi <= lo {
            return;
        }
        // Sweep absorbed segments right-to-left; anything starting past
        // `hi` cannot touch, and the walk stops at the first segment that
        // ends strictly before `lo`.
        let mut absorbed = Vec::new();
        for (&s, &l) in self.segments.range(..=hi).rev() {
            if s + l < lo {
                break;
            }
            absorbed.push(s);
            lo = lo.min(s);
            hi = hi.max(s + l);
        }
        for s in absorbed {
            self.segments.remove(&s);
        }
        self.segments.insert(lo, hi - lo);
        #[cfg(debug_assertions)]
        self.debug_assert_invariants();
    }

    /// Effective selected ranges: explicit segments when present, else the
    /// valid bound as a single span. Empty when nothing is retained.
    pub fn spans(&self) -> Vec<(i64, i64)> {
        if self.segments.is_empty() {
            if self.bound_end > self.bound_begin {
                vec![(self.bound_begin, self.bound_end - self.bound_begin)]
            } else {
                Vec::new()
            }
        } else {
            self.segments().collect()
        }
    }

    /// Retained row indices in ascending order.
    pub fn selected_indices(&self) -> impl Iterator<Item = i64> + '_ {
        self.spans().into_iter().flat_map(|(s, l)| s..s + l)
    }

    /// Compact `data` down to the retained rows.
    ///
    /// The selection must have been built for `data` (its domain indices
    /// must all be in bounds), which every caller in this crate checks
    /// against [`max_size`](Self::max_size) first.
    pub fn gather<T: Copy>(&self, data: &[T]) -> Vec<T> {
        self.selected_indices().map(|i| data[i as usize]).collect()
    }

    /// Validate the segment invariants. Mutating operations call this after
    /// every change in debug builds.
    pub fn debug_assert_invariants(&self) {
        debug_assert!(
            0 <= self.bound_begin
                && self.bound_begin <= self.bound_end
                && self.bound_end <= self.max_size,
            "valid bound ({}, {}) escapes [0, {}]",
            self.bound_begin,
            self.bound_end,
            self.max_size
        );
        for (&s, &l) in &self.segments {
            debug_assert!(
                l > 0 && s >= self.bound_begin && s + l <= self.bound_end,
                "segment ({s}, {l}) escapes bound ({}, {})",
                self.bound_begin,
                self.bound_end
            );
        }
        for ((s1, l1), (s2, _)) in self.segments().tuple_windows() {
            debug_assert!(s1 + l1 < s2, "segments ({s1}, {l1}) and ({s2}, ..) touch");
        }
    }
}
