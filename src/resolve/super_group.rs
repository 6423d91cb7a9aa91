//! Super-group strategy: several independent lat/lon pairs sharing one time
//! array.
//!
//! A row is selected when *any* of its coordinate pairs satisfies the
//! spatial constraint; the pairs describe physically distinct footprints of
//! the same observation, so containment is an OR across pairs rather than
//! Direct's single-pair test. Sibling groups named by the relationship
//! contribute their pairs (and the shared time array, wherever it lives).

use crate::constraint::{GeoBox, GeoPolygon};
use crate::resolve::direct::temporal_restrict;
use crate::resolve::{Resolution, SelectionResolver, reject_all};
use crate::selection::RangeSelection;
use crate::store::{CoordPair, GroupData, GroupStore};

pub(super) fn resolve<S: GroupStore>(
    resolver: &mut SelectionResolver<'_, S>,
    group: &GroupData,
    siblings: &[String],
) -> Resolution {
    let constraints = resolver.constraints();

    // Pull pairs and the shared time array from this group and its declared
    // siblings, in declaration order.
    let mut pairs: Vec<&CoordPair> = group.coords.iter().collect();
    let mut time = group.time.as_deref();
    let mut broken = group.broken_coordinates;
    for path in siblings {
        match resolver.store_group(path) {
            Some(sibling) => {
                pairs.extend(sibling.coords.iter());
                if time.is_none() {
                    time = sibling.time.as_deref();
                }
                broken |= sibling.broken_coordinates;
            }
            None => {
                log::warn!("super-group sibling `{path}` is absent; selecting no rows");
                return Resolution::selected(reject_all(group.row_count));
            }
        }
    }
    if broken {
        log::warn!("super-group coordinate reference is unusable; selecting no rows");
        return Resolution::selected(reject_all(group.row_count));
    }

    let rows = group.row_count as usize;
    let consistent = pairs
        .iter()
        .all(|pair| pair.lat.len() == rows && pair.lon.len() == rows)
        && time.is_none_or(|t| t.len() == rows);
    if !consistent {
        log::warn!("super-group coordinate arrays disagree in length; selecting no rows");
        return Resolution::selected(reject_all(group.row_count));
    }
    if pairs.is_empty() && time.is_none() {
        return Resolution::Unconstrained;
    }

    let mut sel = RangeSelection::new(group.row_count);

    if let (Some(window), Some(time)) = (&constraints.temporal, time) {
        temporal_restrict(&mut sel, time, window);
    }

    if constraints.has_spatial() && !pairs.is_empty() {
        let mut boxes = constraints.boxes.clone();
        if let Some(polygon) = &constraints.polygon {
            boxes.push(polygon.envelope());
        }
        box_scan_any_pair(&mut sel, &pairs, &boxes);
        if let Some(polygon) = &constraints.polygon {
            polygon_narrow_any_pair(&mut sel, &pairs, polygon);
        }
    }

    Resolution::selected(sel)
}

/// Row-wise sweep of the valid bound; a row joins the current run when any
/// pair lands in any box.
fn box_scan_any_pair(sel: &mut RangeSelection, pairs: &[&CoordPair], boxes: &[GeoBox]) {
    let (bound_begin, bound_end) = sel.valid_bound();
    let mut start = 0i64;
    let mut length = 0i64;
    for i in bound_begin..bound_end {
        let contained = pairs.iter().any(|pair| {
            let (la, lo) = (pair.lat[i as usize], pair.lon[i as usize]);
            boxes.iter().any(|b| b.contains(la, lo))
        });
        if contained {
            if length == 0 {
                start = i;
            }
            length += 1;
        } else if length != 0 {
            sel.union(start, length);
            length = 0;
        }
    }
    if length != 0 {
        sel.union(start, length);
    }
    if sel.segment_count() == 0 {
        sel.restrict(0, 0);
    }
}

/// Exact polygon pass over the rows the box pre-filter kept.
fn polygon_narrow_any_pair(sel: &mut RangeSelection, pairs: &[&CoordPair], polygon: &GeoPolygon) {
    if sel.is_empty() {
        return;
    }
    let mut narrowed = RangeSelection::new(sel.max_size());
    let (bound_begin, bound_end) = sel.valid_bound();
    narrowed.restrict(bound_begin, bound_end);

    let mut start = 0i64;
    let mut length = 0i64;
    for (s, l) in sel.spans() {
        for i in s..s + l {
            let contained = pairs
                .iter()
                .any(|pair| polygon.contains(pair.lat[i as usize], pair.lon[i as usize]));
            if contained {
                if length == 0 {
                    start = i;
                }
                length += 1;
            } else if length != 0 {
                narrowed.union(start, length);
                length = 0;
            }
        }
        if length != 0 {
            narrowed.union(start, length);
            length = 0;
        }
    }
    if narrowed.segment_count() == 0 {
        narrowed.restrict(0, 0);
    }
    *sel = narrowed;
}
