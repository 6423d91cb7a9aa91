//! Forward-reference strategy: a group whose rows are addressed by a parent
//! group's pointer column.
//!
//! The parent is resolved first (through the cache). Each selected parent
//! range is collapsed to at most one child range by scanning the parent's
//! begin column forward for the first addressed row and backward for the
//! last addressed row plus its count; fill-valued begin entries inside the
//! range are skipped by both scans.

use crate::resolve::{Resolution, SelectionResolver, reject_all};
use crate::selection::RangeSelection;
use crate::store::{GroupData, GroupStore, PointerColumn};
use crate::subset_error::SubsetError;

pub(super) fn resolve<S: GroupStore>(
    resolver: &mut SelectionResolver<'_, S>,
    group: &GroupData,
    parent_path: &str,
) -> Result<Resolution, SubsetError> {
    let Some(parent_group) = resolver.store_group(parent_path) else {
        log::warn!("forward reference parent `{parent_path}` is absent; selecting no rows");
        return Ok(Resolution::selected(reject_all(group.row_count)));
    };
    let parent_node = resolver.resolve(parent_path)?;
    let Resolution::Selected(parent_sel) = &parent_node.selection else {
        // The whole chain up from here is unfiltered.
        return Ok(Resolution::Unconstrained);
    };

    let Some(pointer) = &parent_group.pointer else {
        log::warn!("parent `{parent_path}` declares no pointer column; selecting no rows");
        return Ok(Resolution::selected(reject_all(group.row_count)));
    };
    if pointer.len() != Some(parent_group.row_count as usize) {
        log::warn!("parent `{parent_path}` pointer column is inconsistent; selecting no rows");
        return Ok(Resolution::selected(reject_all(group.row_count)));
    }

    let mut sel = RangeSelection::new(group.row_count);
    for (start, count) in parent_sel.spans() {
        if let Some((child_start, child_len)) = child_range(pointer, start, count) {
            sel.union(child_start, child_len);
        }
    }
    if sel.segment_count() == 0 {
        log::debug!("no addressed rows matched the constraints");
        sel.restrict(0, 0);
    }
    Ok(Resolution::selected(sel))
}

/// Map one selected parent range onto the child row range it addresses.
///
/// Begin values are 1-based; values <= 0 are fill. Returns `None` when the
/// range holds nothing but fill.
fn child_range(pointer: &PointerColumn, start: i64, count: i64) -> Option<(i64, i64)> {
    let rows = start..start + count;
    let first_begin = rows
        .clone()
        .map(|i| pointer.begin[i as usize])
        .find(|&b| b > 0)?;
    let last_row = rows.rev().find(|&i| pointer.begin[i as usize] > 0)?;
    let last_begin = pointer.begin[last_row as usize];
    let last_count = pointer.count[last_row as usize].max(0);
    Some((first_begin - 1, last_begin - 1 + last_count - (first_begin - 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_spans_first_to_last_addressed_row() {
        // Parent rows 5..9: row 5 begins at 100 for 3 rows, rows 6 and 7 are
        // fill, row 8 begins at 103 for 2 rows.
        let mut begin = vec![0i64; 10];
        let mut count = vec![0i64; 10];
        begin[5] = 100;
        count[5] = 3;
        begin[8] = 103;
        count[8] = 2;
        let pointer = PointerColumn::new(begin, count);
        assert_eq!(child_range(&pointer, 5, 4), Some((99, 5)));
    }

    #[test]
    fn all_fill_range_yields_nothing() {
        let pointer = PointerColumn::new(vec![0, -1, 0], vec![0, 0, 0]);
        assert_eq!(child_range(&pointer, 0, 3), None);
    }

    #[test]
    fn single_row_range() {
        let pointer = PointerColumn::new(vec![0, 7, 0], vec![0, 4, 0]);
        assert_eq!(child_range(&pointer, 1, 1), Some((6, 4)));
    }
}
