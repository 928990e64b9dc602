// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for drop target resolution on pointer moves.
//!
//! Targets are laid out as a single row of equal cells. Node handles are their own
//! live bounds, so the geometry query is as cheap as it gets and the numbers reflect
//! the resolver itself.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_drag_drop::{DragDropStore, DropTarget};

const CELL: f64 = 10.0;

type Geom = fn(&Rect) -> Rect;
type Store = DragDropStore<u32, u32, Rect, Geom>;

fn node_bounds(node: &Rect) -> Rect {
    *node
}

fn build(len: u32) -> Store {
    let mut store: Store = DragDropStore::new(node_bounds as Geom);
    for i in 0..len {
        let x0 = f64::from(i) * CELL;
        let rect = Rect::new(x0, 0.0, x0 + CELL, CELL);
        store.register(DropTarget::new(i, rect, rect, i));
    }
    store.start_drag([u32::MAX]);
    store
}

fn bench_cache_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_drop/move_within_target");

    // Hypothesis: constant time regardless of registry size.
    for len in [16_u32, 256, 4_096] {
        let mut store = build(len);
        let last = f64::from(len - 1) * CELL;
        store.move_and_check_bounds(Point::new(last + 5.0, 5.0));
        group.throughput(Throughput::Elements(1));

        let mut flip = false;
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter(|| {
                flip = !flip;
                let x = if flip { last + 4.0 } else { last + 6.0 };
                black_box(store.move_and_check_bounds(Point::new(x, 5.0)));
            });
        });
    }

    group.finish();
}

fn bench_boundary_crossing(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_drop/cross_targets");

    // Hypothesis: linear in the position of the hit target, since every crossing rescans.
    for len in [16_u32, 256, 4_096] {
        let mut store = build(len);
        let last = f64::from(len - 1) * CELL;
        group.throughput(Throughput::Elements(u64::from(len)));

        let mut flip = false;
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter(|| {
                flip = !flip;
                let x = if flip { last + 5.0 } else { last - 5.0 };
                black_box(store.move_and_check_bounds(Point::new(x, 5.0)));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cache_hit, bench_boundary_crossing);
criterion_main!(benches);
