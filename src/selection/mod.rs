//! Row-selection algebra for one-dimensional trajectory arrays.
//!
//! A [`RangeSelection`] records which rows of a fixed-size array survive a
//! subset operation, as a clipping *valid bound* (produced by temporal
//! filtering) plus an ordered set of disjoint, non-touching segments
//! (produced by spatial filtering). The strategy resolver and the pointer
//! rewriter both speak in terms of this type.

pub mod range;

pub use range::RangeSelection;
