//! # granule-subset
//!
//! granule-subset computes *which rows survive* when a hierarchical satellite
//! granule (nested groups of parallel, row-aligned arrays) is subsetted by
//! spatial boxes, a polygon, and/or a temporal window. It owns the three
//! tightly coupled pieces of that problem and nothing else:
//!
//! - **Row selections**: [`selection::RangeSelection`], a coalescing
//!   interval set with a contiguous-bound fast path for temporal filtering
//!   and explicit segments for spatial filtering.
//! - **Selection resolution**: [`resolve::SelectionResolver`], a memoized,
//!   cycle-detecting walk over the declared group-relationship graph with
//!   five strategies (direct coordinates, forward and reverse pointer
//!   references, super-groups, merged groups).
//! - **Pointer rewriting**: [`rewrite`], the three algorithms that keep
//!   begin/count columns internally consistent after both the addressing and
//!   the addressed group have been independently compacted.
//!
//! Container I/O, tree traversal and copying, attribute handling, and the
//! product-naming configuration all live with the caller: groups arrive
//! through the [`store::GroupStore`] seam already shaped into
//! [`store::GroupData`], and selections plus rewritten pointer arrays go
//! back out to be written.
//!
//! ## Degradation over failure
//!
//! Broken product wiring (a dangling reference, a missing coordinate
//! dataset, mismatched array lengths) degrades the affected group to an
//! empty selection so the subset run still completes. Only a cyclic
//! relationship graph (a configuration bug, not a data gap) surfaces as an
//! error, via [`subset_error::SubsetError::CyclicRelationship`].
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! granule-subset = "0.4"
//! ```
//!
//! ```rust
//! use granule_subset::prelude::*;
//!
//! let mut store = InMemoryStore::new();
//! store.insert("/gt1l/land_ice", GroupData {
//!     row_count: 4,
//!     coords: vec![CoordPair::new(vec![1.0, 2.0, 60.0, 61.0], vec![1.0, 2.0, 3.0, 4.0])],
//!     ..Default::default()
//! });
//!
//! let constraints = Constraints {
//!     boxes: vec![GeoBox::new(-10.0, -10.0, 10.0, 10.0)],
//!     ..Default::default()
//! };
//! let mut resolver = SelectionResolver::new(&store, constraints);
//! let node = resolver.resolve("/gt1l/land_ice").unwrap();
//! assert_eq!(node.retained_rows(), 2);
//! ```

pub mod constraint;
pub mod resolve;
pub mod rewrite;
pub mod selection;
pub mod store;
pub mod subset_error;

/// A convenient prelude for the most-used types.
pub mod prelude {
    pub use crate::constraint::{Constraints, GeoBox, GeoPolygon, TemporalWindow};
    pub use crate::resolve::{
        CoordinateNode, Resolution, ResolutionCache, SelectionResolver, Strategy,
    };
    pub use crate::rewrite::{
        begin_from_counts, rebase_with_fill_skip, remap_pointer_dataset, remap_values,
        subset_pointer_column,
    };
    pub use crate::selection::RangeSelection;
    pub use crate::store::{
        CoordPair, GroupData, GroupStore, InMemoryStore, PointerColumn, Relationship,
    };
    pub use crate::subset_error::SubsetError;
}
