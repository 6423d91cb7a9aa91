//! Begin-column recomputation from an already-subsetted count column.
//!
//! When every addressed row of the target survives exactly when its
//! addressing row does (photon-style layouts), the begin column after
//! subsetting is a pure running sum of the subsetted counts: no target
//! selection is consulted at all.

use crate::selection::RangeSelection;
use crate::store::PointerColumn;
use crate::subset_error::SubsetError;

/// `begin[i]` is the 1-based running position of row `i`'s first addressed
/// row, or the `0` sentinel when `count[i]` is itself the zero sentinel. The
/// position advances by `count[i]` either way.
pub fn begin_from_counts(counts: &[i64]) -> Vec<i64> {
    let mut position = 1i64;
    counts
        .iter()
        .map(|&count| {
            let begin = if count == 0 { 0 } else { position };
            position += count;
            begin
        })
        .collect()
}

/// Subset a whole begin/count column in one step: gather the count column by
/// the source selection, then recompute the begin column from what survived.
///
/// The column must be internally consistent and cover the selection's
/// domain; both are caller contract violations, not data gaps.
pub fn subset_pointer_column(
    column: &PointerColumn,
    source: &RangeSelection,
) -> Result<PointerColumn, SubsetError> {
    let Some(rows) = column.len() else {
        return Err(SubsetError::MismatchedPointerPair {
            begin: column.begin.len(),
            count: column.count.len(),
        });
    };
    if rows as i64 != source.max_size() {
        return Err(SubsetError::PointerLengthMismatch {
            dataset_rows: rows,
            selection_rows: source.max_size() as usize,
        });
    }
    let count = source.gather(&column.count);
    let begin = begin_from_counts(&count);
    Ok(PointerColumn { begin, count })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_positions_skip_zero_counts() {
        assert_eq!(begin_from_counts(&[3, 0, 2, 0, 1]), vec![1, 0, 5, 0, 8]);
    }

    #[test]
    fn leading_zero_counts_keep_position_one() {
        assert_eq!(begin_from_counts(&[0, 0, 4]), vec![0, 0, 1]);
    }

    #[test]
    fn empty_input() {
        assert!(begin_from_counts(&[]).is_empty());
    }

    #[test]
    fn all_nonzero_is_a_prefix_sum() {
        assert_eq!(begin_from_counts(&[1, 1, 1, 1]), vec![1, 2, 3, 4]);
    }

    #[test]
    fn column_subset_gathers_counts_and_renumbers() {
        let column = PointerColumn::new(vec![1, 4, 4, 6, 0], vec![3, 0, 2, 4, 0]);
        let mut sel = RangeSelection::new(5);
        sel.union(0, 1);
        sel.union(2, 2);
        let out = subset_pointer_column(&column, &sel).unwrap();
        assert_eq!(out.count, vec![3, 2, 4]);
        assert_eq!(out.begin, vec![1, 4, 6]);
    }

    #[test]
    fn column_subset_rejects_a_ragged_pair() {
        let column = PointerColumn::new(vec![1, 2], vec![1]);
        let sel = RangeSelection::new(2);
        assert!(matches!(
            subset_pointer_column(&column, &sel),
            Err(SubsetError::MismatchedPointerPair { begin: 2, count: 1 })
        ));
    }

    #[test]
    fn column_subset_rejects_a_foreign_selection() {
        let column = PointerColumn::new(vec![1, 2], vec![1, 1]);
        let sel = RangeSelection::new(9);
        assert!(matches!(
            subset_pointer_column(&column, &sel),
            Err(SubsetError::PointerLengthMismatch { .. })
        ));
    }
}
