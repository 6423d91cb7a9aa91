//! Merged strategy: a group selected by its own coordinate test *or* by
//! being addressed from a secondary group's selection.
//!
//! The secondary group (a leads-style neighbor) is resolved first; every row
//! of its selection contributes the `(begin - 1, count)` range its pointer
//! column addresses here. Those ranges and the group's own Direct result
//! coalesce into one selection. Sentinel pointer rows produce non-positive
//! ranges and clip away inside `union`.

use crate::resolve::{Resolution, SelectionResolver, direct, reject_all};
use crate::selection::RangeSelection;
use crate::store::{GroupData, GroupStore};
use crate::subset_error::SubsetError;

pub(super) fn resolve<S: GroupStore>(
    resolver: &mut SelectionResolver<'_, S>,
    group: &GroupData,
    secondary_path: &str,
) -> Result<Resolution, SubsetError> {
    let Some(secondary_group) = resolver.store_group(secondary_path) else {
        log::warn!("merge secondary `{secondary_path}` is absent; selecting no rows");
        return Ok(Resolution::selected(reject_all(group.row_count)));
    };
    let secondary_node = resolver.resolve(secondary_path)?;

    let mut sel = RangeSelection::new(group.row_count);

    // (a) the group's own coordinate test. An unconstrained outcome (no own
    // coordinates) contributes nothing; the secondary side then decides.
    let local = direct::resolve(group, resolver.constraints());
    if let Some(local_sel) = local.selection() {
        for (start, length) in local_sel.spans() {
            sel.union(start, length);
        }
    }

    // (b) rows addressed from the secondary selection through its pointer
    // column.
    let Some(pointer) = &secondary_group.pointer else {
        log::warn!("merge secondary `{secondary_path}` declares no pointer column; selecting no rows");
        return Ok(Resolution::selected(reject_all(group.row_count)));
    };
    if pointer.len() != Some(secondary_group.row_count as usize) {
        log::warn!("merge secondary `{secondary_path}` pointer column is inconsistent; selecting no rows");
        return Ok(Resolution::selected(reject_all(group.row_count)));
    }
    for (start, length) in secondary_node
        .selection
        .spans_or_all(secondary_group.row_count)
    {
        for i in start..start + length {
            sel.union(pointer.begin[i as usize] - 1, pointer.count[i as usize]);
        }
    }

    if sel.segment_count() == 0 {
        log::debug!("neither the local test nor the secondary selection matched");
        sel.restrict(0, 0);
    }
    Ok(Resolution::selected(sel))
}
