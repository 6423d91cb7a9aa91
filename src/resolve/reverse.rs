//! Reverse-reference strategy: a group whose own pointer column addresses
//! an already-resolved target group.
//!
//! The target is resolved first. For each of its selected ranges, this
//! group's begin column, monotone by construction, is scanned for the
//! first row addressing at or past the range start and the last row
//! addressing before the range end; those rows delimit one selected range
//! here. A target range wholly outside the column's value span is skipped
//! before any scanning.

use crate::resolve::{Resolution, SelectionResolver, reject_all};
use crate::selection::RangeSelection;
use crate::store::{GroupData, GroupStore};
use crate::subset_error::SubsetError;

pub(super) fn resolve<S: GroupStore>(
    resolver: &mut SelectionResolver<'_, S>,
    group: &GroupData,
    target_path: &str,
) -> Result<Resolution, SubsetError> {
    if resolver.store_group(target_path).is_none() {
        log::warn!("reverse reference target `{target_path}` is absent; selecting no rows");
        return Ok(Resolution::selected(reject_all(group.row_count)));
    }
    let target_node = resolver.resolve(target_path)?;
    let Resolution::Selected(target_sel) = &target_node.selection else {
        return Ok(Resolution::Unconstrained);
    };

    let Some(pointer) = &group.pointer else {
        log::warn!("reverse reference group declares no pointer column; selecting no rows");
        return Ok(Resolution::selected(reject_all(group.row_count)));
    };
    if pointer.len() != Some(group.row_count as usize) || pointer.begin.is_empty() {
        log::warn!("reverse reference pointer column is inconsistent; selecting no rows");
        return Ok(Resolution::selected(reject_all(group.row_count)));
    }
    let begin = &pointer.begin;
    let (first_value, last_value) = (begin[0], begin[begin.len() - 1]);

    let mut sel = RangeSelection::new(group.row_count);
    if target_sel.segment_count() > 0 {
        for (s, l) in target_sel.segments() {
            // 1-based window over the target rows of this range.
            let start = s + 1;
            let end = start + l;
            // Cheap bound check before scanning the column.
            if start > last_value || end < first_value {
                continue;
            }
            if let (Some(row_first), Some(row_last)) = (
                begin.iter().position(|&b| b >= start),
                begin.iter().rposition(|&b| b < end),
            ) {
                sel.union(row_first as i64, row_last as i64 + 1 - row_first as i64);
            }
        }
    } else {
        // Temporal-only target: one window from the valid bound.
        let (bound_begin, bound_end) = target_sel.valid_bound();
        if let (Some(row_first), Some(row_last)) = (
            begin.iter().position(|&b| b > bound_begin),
            begin.iter().rposition(|&b| b <= bound_end),
        ) {
            sel.union(row_first as i64, row_last as i64 + 1 - row_first as i64);
        }
    }
    if sel.segment_count() == 0 {
        log::debug!("no rows address the selected target ranges");
        sel.restrict(0, 0);
    }
    Ok(Resolution::selected(sel))
}
