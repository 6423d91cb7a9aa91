//! Direct strategy: a group filtered by its own time/lat/lon arrays.
//!
//! Temporal filtering narrows the valid bound once; spatial filtering then
//! sweeps the rows inside the bound, accumulating maximal runs of matching
//! rows. A row with fill-valued coordinates (|lat| > 90 or |lon| > 180)
//! extends an open run but never starts one, so sentinel rows interleaved
//! with good data do not shatter a run. The polygon constraint is applied in
//! two passes over the same machinery: its envelope joins the box list for
//! the cheap pre-filter, then the exact containment test re-scans only the
//! rows the pre-filter kept.

use crate::constraint::{Constraints, GeoBox, GeoPolygon, TemporalWindow};
use crate::resolve::{Resolution, reject_all};
use crate::selection::RangeSelection;
use crate::store::GroupData;

pub(super) fn resolve(group: &GroupData, constraints: &Constraints) -> Resolution {
    if group.broken_coordinates {
        log::warn!("coordinate reference is declared but unusable; selecting no rows");
        return Resolution::selected(reject_all(group.row_count));
    }
    // No coordinate references at all: the group cannot be filtered and is
    // copied whole.
    if group.has_no_coordinates() {
        log::debug!("no coordinate references; group passes through unfiltered");
        return Resolution::Unconstrained;
    }
    if !lengths_consistent(group) {
        log::warn!("coordinate arrays disagree with the group row count; selecting no rows");
        return Resolution::selected(reject_all(group.row_count));
    }

    let mut sel = RangeSelection::new(group.row_count);

    if let (Some(window), Some(time)) = (&constraints.temporal, &group.time) {
        temporal_restrict(&mut sel, time, window);
    }

    if constraints.has_spatial()
        && let Some(pair) = group.coords.first()
    {
        let mut boxes = constraints.boxes.clone();
        if let Some(polygon) = &constraints.polygon {
            boxes.push(polygon.envelope());
        }
        box_scan(&mut sel, &pair.lat, &pair.lon, &boxes);
        if let Some(polygon) = &constraints.polygon {
            polygon_narrow(&mut sel, &pair.lat, &pair.lon, polygon);
        }
    }

    Resolution::selected(sel)
}

/// Every present coordinate array must match the group's row count.
fn lengths_consistent(group: &GroupData) -> bool {
    let rows = group.row_count as usize;
    if group.time.as_ref().is_some_and(|t| t.len() != rows) {
        return false;
    }
    group
        .coords
        .iter()
        .all(|pair| pair.lat.len() == rows && pair.lon.len() == rows)
}

/// Fill-valued coordinates: anything outside the physical lat/lon range.
#[inline]
pub(super) fn is_coordinate_fill(lat: f64, lon: f64) -> bool {
    lat > 90.0 || lat < -90.0 || lon > 180.0 || lon < -180.0
}

/// Narrow the valid bound to the first..last rows inside the window. Rows
/// are time-ordered, so one contiguous run covers every match; no match at
/// all empties the bound.
pub(super) fn temporal_restrict(sel: &mut RangeSelection, time: &[f64], window: &TemporalWindow) {
    let mut start = 0i64;
    let mut length = 0i64;
    if let (Some(&lo), Some(&hi)) = (time.first(), time.last())
        && lo <= window.end()
        && hi >= window.start()
        && let Some(first) = time.iter().position(|&t| window.contains(t))
    {
        let last = time.iter().rposition(|&t| window.contains(t)).unwrap_or(first);
        start = first as i64;
        length = (last - first + 1) as i64;
    }
    sel.restrict(start, start + length);
}

/// Sweep the valid bound accumulating runs of rows contained by any box.
pub(super) fn box_scan(sel: &mut RangeSelection, lat: &[f64], lon: &[f64], boxes: &[GeoBox]) {
    let (bound_begin, bound_end) = sel.valid_bound();
    let mut start = 0i64;
    let mut length = 0i64;
    for i in bound_begin..bound_end {
        let (la, lo) = (lat[i as usize], lon[i as usize]);
        if is_coordinate_fill(la, lo) {
            // Sentinel rows ride along inside an open run.
            if length != 0 {
                length += 1;
            }
        } else if boxes.iter().any(|b| b.contains(la, lo)) {
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

/// Re-scan only the already-selected rows against the exact polygon,
/// replacing the selection with the narrowed result.
pub(super) fn polygon_narrow(
    sel: &mut RangeSelection,
    lat: &[f64],
    lon: &[f64],
    polygon: &GeoPolygon,
) {
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
            let (la, lo) = (lat[i as usize], lon[i as usize]);
            if is_coordinate_fill(la, lo) {
                if length != 0 {
                    length += 1;
                }
            } else if polygon.contains(la, lo) {
                if length == 0 {
                    start = i;
                }
                length += 1;
            } else if length != 0 {
                narrowed.union(start, length);
                length = 0;
            }
        }
        // Runs never bridge the gap between two selected spans.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CoordPair;

    fn constraints_with_box(b: GeoBox) -> Constraints {
        Constraints {
            boxes: vec![b],
            ..Default::default()
        }
    }

    fn group_with_track(lat: Vec<f64>, lon: Vec<f64>) -> GroupData {
        GroupData {
            row_count: lat.len() as i64,
            coords: vec![CoordPair::new(lat, lon)],
            ..Default::default()
        }
    }

    fn selection(res: Resolution) -> RangeSelection {
        res.selection().expect("strategy should select").clone()
    }

    #[test]
    fn temporal_window_narrows_the_bound() {
        let mut group = group_with_track(vec![0.0; 6], vec![0.0; 6]);
        group.time = Some(vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
        let constraints = Constraints {
            temporal: Some(TemporalWindow::new(25.0, 45.0)),
            ..Default::default()
        };
        let sel = selection(resolve(&group, &constraints));
        assert_eq!(sel.valid_bound(), (2, 4));
        assert_eq!(sel.size(), 2);
    }

    #[test]
    fn temporal_window_outside_data_rejects_all() {
        let mut group = GroupData::with_rows(3);
        group.time = Some(vec![10.0, 20.0, 30.0]);
        let constraints = Constraints {
            temporal: Some(TemporalWindow::new(100.0, 200.0)),
            ..Default::default()
        };
        assert_eq!(selection(resolve(&group, &constraints)).size(), 0);
    }

    #[test]
    fn box_scan_accumulates_runs() {
        // Rows 1-2 and 5 inside the box.
        let group = group_with_track(
            vec![50.0, 0.0, 0.0, 50.0, 50.0, 0.0],
            vec![0.0; 6],
        );
        let constraints = constraints_with_box(GeoBox::new(-10.0, -10.0, 10.0, 10.0));
        let sel = selection(resolve(&group, &constraints));
        assert_eq!(sel.segments().collect::<Vec<_>>(), vec![(1, 2), (5, 1)]);
    }

    #[test]
    fn fill_rows_extend_but_never_start_a_run() {
        // Row 2 is fill, sandwiched between in-box rows: one run of 3.
        // Row 0 is fill before any run: ignored.
        let group = group_with_track(
            vec![999.0, 0.0, 999.0, 0.0, 50.0],
            vec![0.0; 5],
        );
        let constraints = constraints_with_box(GeoBox::new(-10.0, -10.0, 10.0, 10.0));
        let sel = selection(resolve(&group, &constraints));
        assert_eq!(sel.segments().collect::<Vec<_>>(), vec![(1, 3)]);
    }

    #[test]
    fn no_spatial_match_rejects_all() {
        let group = group_with_track(vec![50.0, 50.0], vec![0.0, 0.0]);
        let constraints = constraints_with_box(GeoBox::new(-10.0, -10.0, 10.0, 10.0));
        assert_eq!(selection(resolve(&group, &constraints)).size(), 0);
    }

    #[test]
    fn polygon_narrows_the_box_prefilter() {
        // All rows inside the envelope; only rows 0-1 inside the triangle.
        let group = group_with_track(
            vec![1.0, 2.0, 8.0, 9.0],
            vec![1.0, 2.0, 9.0, 1.0],
        );
        let geojson = r#"{"type":"Polygon","coordinates":[[[0,0],[10,0],[0,10],[0,0]]]}"#;
        let constraints = Constraints {
            polygon: Some(GeoPolygon::from_geojson(geojson).unwrap()),
            ..Default::default()
        };
        let sel = selection(resolve(&group, &constraints));
        assert_eq!(sel.segments().collect::<Vec<_>>(), vec![(0, 2)]);
    }

    #[test]
    fn inconsistent_coordinate_lengths_reject_all() {
        let mut group = group_with_track(vec![0.0; 4], vec![0.0; 3]);
        group.row_count = 4;
        let constraints = constraints_with_box(GeoBox::new(-10.0, -10.0, 10.0, 10.0));
        assert_eq!(selection(resolve(&group, &constraints)).size(), 0);
    }

    #[test]
    fn broken_coordinates_reject_all() {
        let mut group = group_with_track(vec![0.0; 2], vec![0.0; 2]);
        group.broken_coordinates = true;
        let constraints = constraints_with_box(GeoBox::new(-10.0, -10.0, 10.0, 10.0));
        assert_eq!(selection(resolve(&group, &constraints)).size(), 0);
    }

    #[test]
    fn coordinate_free_group_passes_through() {
        let group = GroupData::with_rows(7);
        let constraints = constraints_with_box(GeoBox::new(-10.0, -10.0, 10.0, 10.0));
        assert!(resolve(&group, &constraints).is_unconstrained());
    }

    #[test]
    fn spatial_constraint_without_latlon_leaves_temporal_result() {
        // Group carries time only; the box cannot be evaluated and the
        // temporal narrowing stands.
        let mut group = GroupData::with_rows(4);
        group.time = Some(vec![10.0, 20.0, 30.0, 40.0]);
        let constraints = Constraints {
            boxes: vec![GeoBox::new(-10.0, -10.0, 10.0, 10.0)],
            temporal: Some(TemporalWindow::new(15.0, 35.0)),
            ..Default::default()
        };
        let sel = selection(resolve(&group, &constraints));
        assert_eq!(sel.valid_bound(), (1, 3));
        assert_eq!(sel.segment_count(), 0);
    }
}
