//! End-to-end: resolve a parent/child pair, then rewrite the parent's
//! pointer column against both selections.

use granule_subset::prelude::*;

#[test]
fn forward_pair_remaps_consistently() {
    // 6 segment rows addressing 30 child rows, 5 each; the box keeps
    // segment rows 2..4, so child rows [10, 20) survive.
    let begin: Vec<i64> = (0..6).map(|i| 1 + 5 * i).collect();
    let count = vec![5i64; 6];
    let mut lat = vec![50.0; 6];
    lat[2] = 0.0;
    lat[3] = 0.0;

    let mut store = InMemoryStore::new();
    store.insert(
        "/geolocation",
        GroupData {
            row_count: 6,
            coords: vec![CoordPair::new(lat, vec![0.0; 6])],
            pointer: Some(PointerColumn::new(begin.clone(), count.clone())),
            ..Default::default()
        },
    );
    store.insert(
        "/heights",
        GroupData {
            row_count: 30,
            relationship: Relationship::ForwardRefTo {
                parent: "/geolocation".into(),
            },
            ..Default::default()
        },
    );

    let constraints = Constraints {
        boxes: vec![GeoBox::new(-10.0, -10.0, 10.0, 10.0)],
        ..Default::default()
    };
    let mut resolver = SelectionResolver::new(&store, constraints);
    let parent = resolver.resolve("/geolocation").unwrap();
    let child = resolver.resolve("/heights").unwrap();

    let parent_sel = parent.selection.selection().unwrap();
    let child_sel = child.selection.selection().unwrap();
    assert_eq!(child_sel.segments().collect::<Vec<_>>(), vec![(10, 10)]);

    // The surviving begin values (11, 16) remap to (2, 7) against the
    // compacted child rows [10, 20).
    let rewritten = remap_pointer_dataset(&begin, parent_sel, child_sel).unwrap();
    assert_eq!(rewritten, vec![2, 7]);

    // For this photon-style layout the begin column is also count-derivable:
    // the gathered counts renumber from 1.
    let column = subset_pointer_column(
        &PointerColumn::new(begin.clone(), count.clone()),
        parent_sel,
    )
    .unwrap();
    assert_eq!(column.count, vec![5, 5]);
    assert_eq!(column.begin, vec![1, 6]);
}

#[test]
fn gathered_sentinels_survive_the_remap() {
    // Source keeps rows 1..5 of its pointer column; rows 2 and 4 are
    // sentinels. Target keeps rows [5, 15) of 20.
    let data = vec![99, 6, 0, 8, -1, 99];
    let mut source = RangeSelection::new(6);
    source.union(1, 4);
    let mut target = RangeSelection::new(20);
    target.union(5, 10);

    let rewritten = remap_pointer_dataset(&data, &source, &target).unwrap();
    assert_eq!(rewritten, vec![2, 0, 4, -1]);
}

#[test]
fn fill_skip_matches_manual_rebase() {
    let data = vec![0, 0, 40, 43, 0, 47, 0, 0];
    let mut source = RangeSelection::new(8);
    source.union(1, 6);
    let rewritten = rebase_with_fill_skip(&data, &source).unwrap();
    assert_eq!(rewritten, vec![0, 1, 4, 0, 8, 0]);
}
