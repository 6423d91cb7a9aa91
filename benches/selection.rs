use criterion::{Criterion, black_box, criterion_group, criterion_main};
use granule_subset::rewrite::remap_values;
use granule_subset::selection::RangeSelection;

fn bench_union(c: &mut Criterion) {
    c.bench_function("union_appending_runs", |b| {
        b.iter(|| {
            let mut sel = RangeSelection::new(1_000_000);
            for i in 0..10_000 {
                sel.union(black_box(i * 100), black_box(40));
            }
            sel.size()
        })
    });

    c.bench_function("union_coalescing_overlaps", |b| {
        b.iter(|| {
            let mut sel = RangeSelection::new(1_000_000);
            for i in 0..10_000 {
                sel.union(black_box(i * 50), black_box(80));
            }
            sel.segment_count()
        })
    });
}

fn bench_remap(c: &mut Criterion) {
    let mut target = RangeSelection::new(1_000_000);
    for i in 0..1_000 {
        target.union(i * 1_000, 500);
    }
    // Monotone begin values with sentinel rows where the target dropped data.
    let values: Vec<i64> = (0..100_000i64)
        .map(|i| {
            let v = i * 9 + 1;
            if v % 1_000 < 500 { v } else { 0 }
        })
        .collect();

    c.bench_function("remap_values_100k", |b| {
        b.iter(|| remap_values(black_box(&values), black_box(&target)))
    });
}

criterion_group!(benches, bench_union, bench_remap);
criterion_main!(benches);
