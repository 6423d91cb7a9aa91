//! Pointer-array rewriting: keeping begin/count columns consistent after
//! both ends of a reference have been subsetted and compacted.
//!
//! A naively copied pointer column still addresses rows of the *original*
//! target array. These routines recompute the values so they address the
//! compacted target instead. Three distinct modes cover the three data
//! layouts that occur:
//!
//! - [`remap::remap_pointer_dataset`]: the general case, walking the
//!   retained values against the target group's selection and carrying a
//!   running offset across the target's dropped gaps.
//! - [`recount::begin_from_counts`]: the begin column is fully derivable
//!   from a co-located, already-subsetted count column.
//! - [`fill_skip::rebase_with_fill_skip`]: the source column interleaves
//!   sentinel rows with addressed rows inside one retained range; values are
//!   rebased against the first meaningful value, sentinels pass through.
//!
//! Sentinels `0` and `-1` never participate in offset math in any mode.

pub mod fill_skip;
pub mod recount;
pub mod remap;

pub use fill_skip::rebase_with_fill_skip;
pub use recount::{begin_from_counts, subset_pointer_column};
pub use remap::{remap_pointer_dataset, remap_values};

/// "No corresponding rows" marker used by products whose fill value is zero.
pub const FILL_ZERO: i64 = 0;
/// "No corresponding rows" marker used by products whose fill value is -1.
pub const FILL_MINUS_ONE: i64 = -1;

/// Whether a pointer value is a sentinel under either convention.
#[inline]
pub fn is_fill(value: i64) -> bool {
    value == FILL_ZERO || value == FILL_MINUS_ONE
}
