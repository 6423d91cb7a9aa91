//! Per-group data as handed over by the surrounding I/O and configuration
//! layers.
//!
//! This crate never touches the container format. The copy layer reads each
//! group's coordinate arrays and pointer columns, the configuration layer
//! pattern-matches names into coordinate roles and relationship kinds, and
//! both arrive here as a [`GroupData`] per group path. The [`GroupStore`]
//! trait is the seam: the resolver walks relationship edges through it, and
//! tests plug in [`InMemoryStore`].

pub mod group;

pub use group::{CoordPair, GroupData, InMemoryStore, PointerColumn, Relationship};

/// Read-only access to group data by path.
pub trait GroupStore {
    /// The group at `path`, or `None` when the file does not carry it
    /// (a declared relationship may dangle; the resolver degrades that to a
    /// zero-size selection).
    fn group(&self, path: &str) -> Option<&GroupData>;
}
