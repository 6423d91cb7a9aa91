//! Rebase of a begin column whose retained ranges interleave sentinel rows
//! with addressed rows.
//!
//! Some layouts keep rows that address nothing (sentinel begin values)
//! between rows that do, inside one retained range. The rebase anchor for a
//! range is the first *meaningful* value found scanning forward, never
//! simply the first element; sentinel rows are emitted verbatim while
//! meaningful rows are shifted so the anchor lands on 1.

use crate::rewrite::is_fill;
use crate::selection::RangeSelection;
use crate::subset_error::SubsetError;

/// Rebase `data`'s retained ranges into locally 1-based begin values.
///
/// Each retained range of `source` is rebased independently against its own
/// anchor; a range holding nothing but sentinels is copied through
/// unchanged.
pub fn rebase_with_fill_skip(
    data: &[i64],
    source: &RangeSelection,
) -> Result<Vec<i64>, SubsetError> {
    if data.len() as i64 != source.max_size() {
        return Err(SubsetError::PointerLengthMismatch {
            dataset_rows: data.len(),
            selection_rows: source.max_size() as usize,
        });
    }
    let mut out = Vec::with_capacity(source.size().max(0) as usize);
    for (start, length) in source.spans() {
        let rows = &data[start as usize..(start + length) as usize];
        match rows.iter().copied().find(|&v| !is_fill(v)) {
            None => out.extend_from_slice(rows),
            Some(anchor) => out.extend(
                rows.iter()
                    .map(|&v| if is_fill(v) { v } else { v - anchor + 1 }),
            ),
        }
    }
    Ok(out)
}
