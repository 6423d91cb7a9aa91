//! SubsetError: unified error type for granule-subset public APIs
//!
//! Configuration gaps and inconsistent granule data are *not* errors in this
//! crate: the resolver degrades them to zero-size selections so a subset run
//! still completes, merely excluding the affected group. Only genuine faults
//! (broken relationship graphs, contract violations on rewrite inputs,
//! malformed polygon payloads) surface through this type.

use thiserror::Error;

/// Unified error type for granule-subset operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubsetError {
    /// The group relationship graph contains a cycle; expected a DAG.
    #[error("cyclic group relationship at `{path}` (resolution chain: {chain})")]
    CyclicRelationship {
        /// Group whose resolution was re-entered.
        path: String,
        /// The in-flight resolution chain, outermost first.
        chain: String,
    },
    /// A pointer dataset's length disagrees with the selection it is
    /// subsetted by.
    #[error("pointer dataset holds {dataset_rows} rows but the selection domain is {selection_rows}")]
    PointerLengthMismatch {
        dataset_rows: usize,
        selection_rows: usize,
    },
    /// A begin/count pair was handed to a rewrite entry point with differing
    /// lengths.
    #[error("begin array holds {begin} rows but count array holds {count}")]
    MismatchedPointerPair { begin: usize, count: usize },
    /// The polygon constraint payload is not usable GeoJSON geometry.
    #[error("polygon constraint is not valid GeoJSON: {0}")]
    InvalidPolygon(String),
}
