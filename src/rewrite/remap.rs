//! General pointer remapping against the target group's selection.
//!
//! The retained pointer values are walked in original order with a cursor
//! over the target selection's spans. The first meaningful value anchors the
//! numbering inside its containing span; every later value advances by its
//! raw delta while it stays inside the same span, and crossing into a later
//! span charges the un-consumed remainder of the span being left plus the
//! kept rows of any spans skipped over entirely. The effect is that every
//! dropped gap in the target shrinks the addressed positions by exactly its
//! width.

use crate::rewrite::{FILL_ZERO, is_fill};
use crate::selection::RangeSelection;
use crate::subset_error::SubsetError;

/// Subset `data` by `source` and remap the surviving values into the
/// compacted row space described by `target`.
///
/// `data` must be the full original pointer dataset for the source group:
/// its length has to match the source selection's domain.
pub fn remap_pointer_dataset(
    data: &[i64],
    source: &RangeSelection,
    target: &RangeSelection,
) -> Result<Vec<i64>, SubsetError> {
    if data.len() as i64 != source.max_size() {
        return Err(SubsetError::PointerLengthMismatch {
            dataset_rows: data.len(),
            selection_rows: source.max_size() as usize,
        });
    }
    Ok(remap_values(&source.gather(data), target))
}

/// Remap already-gathered pointer values against the target selection.
///
/// Values are 1-based into the original target array; outputs are 1-based
/// into the compacted one. Sentinels pass through unchanged. When the target
/// keeps no rows at all there is nothing left to address and every
/// meaningful value degrades to the zero sentinel.
pub fn remap_values(values: &[i64], target: &RangeSelection) -> Vec<i64> {
    let spans = target.spans();
    if spans.is_empty() {
        return values
            .iter()
            .map(|&v| if is_fill(v) { v } else { FILL_ZERO })
            .collect();
    }

    let mut out = Vec::with_capacity(values.len());
    // Span the previous meaningful value fell into, and how much of it the
    // walk has accounted for so far.
    let mut seg = 0usize;
    let mut consumed = 0i64;
    let mut prev: Option<(i64, i64)> = None; // (raw, new)

    for &raw in values {
        if is_fill(raw) {
            out.push(raw);
            continue;
        }
        // Containing span, searched forward from the cursor. A 1-based value
        // `v` belongs to span `(s, l)` when `s < v <= s + l + 1`; the extra
        // slot tolerates values addressing one past the span's content.
        let mut found = seg;
        for (k, &(s, l)) in spans.iter().enumerate().skip(seg) {
            if raw > s && raw <= s + l + 1 {
                found = k;
                break;
            }
        }
        let (span_start, _) = spans[found];
        let new = match prev {
            None => {
                // Anchor: position within the containing span, credited with
                // every kept row of earlier spans.
                let kept_before: i64 = spans[..found].iter().map(|&(_, l)| l).sum();
                consumed = raw - (span_start + 1);
                kept_before + (raw - span_start) + 1
            }
            Some((_, prev_new)) if found != seg => {
                // Crossing spans: charge the remainder of the span being
                // left and every kept span skipped over, then restart
                // in-span accounting. This keeps a chained value equal to
                // what anchoring it directly would produce.
                let (_, prev_len) = spans[seg];
                let skipped: i64 = spans[seg + 1..found].iter().map(|&(_, l)| l).sum();
                let offset = raw - (span_start + 1);
                let new = prev_new + (prev_len - consumed) + skipped + offset;
                consumed = offset;
                new
            }
            Some((prev_raw, prev_new)) => {
                let offset = raw - prev_raw;
                consumed += offset;
                prev_new + offset
            }
        };
        seg = found;
        prev = Some((raw, new));
        out.push(new);
    }
    out
}
