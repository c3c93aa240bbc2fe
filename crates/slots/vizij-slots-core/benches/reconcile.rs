//! Reconciliation and controller pass benchmarks.
//!
//! Run with: cargo bench -p vizij-slots-core --bench reconcile

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use vizij_slots_core::{
    format_number, position_separators, reconcile, IdAllocator, SlotNumbers, SlotsConfig,
};

fn settled_row(value: f64, ids: &mut IdAllocator) -> Vec<vizij_slots_core::Slot> {
    let digits = format_number(value, None, false).map(|f| f.digits).unwrap_or_default();
    vizij_slots_core::settle(&reconcile(&digits, &[], None, ids).slots)
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    for (from, to) in [(35420.0, 15770.0), (999.0, 1000.0), (1_234_567_890.0, 987_654_321.0)] {
        let mut ids = IdAllocator::new();
        let previous = settled_row(from, &mut ids);
        let next = format_number(to, None, false).map(|f| f.digits).unwrap_or_default();
        group.bench_with_input(
            BenchmarkId::new("digits", format!("{from}->{to}")),
            &(),
            |b, _| b.iter(|| black_box(reconcile(&next, &previous, None, &mut ids))),
        );
    }
    group.finish();
}

fn bench_separators(c: &mut Criterion) {
    let previous = position_separators(9, &[], true, 0);
    c.bench_function("separators/shrink_9_to_7", |b| {
        b.iter(|| black_box(position_separators(7, &previous, false, 0)))
    });
}

fn bench_controller(c: &mut Criterion) {
    let mut group = c.benchmark_group("controller");
    for continuous in [false, true] {
        let config = SlotsConfig {
            include_comma: true,
            animate_intermediate_values: continuous,
            ..Default::default()
        };
        let Ok(mut slots) = SlotNumbers::new(config) else {
            continue;
        };
        let mut value = 1.0;
        group.bench_function(if continuous { "continuous" } else { "discrete" }, |b| {
            b.iter(|| {
                value = (value * 7.0 + 13.0) % 10_000_000.0;
                let pass = slots.set_value(value).ok().and_then(|o| o.frame.as_ref().map(|f| f.pass));
                if let Some(pass) = pass {
                    black_box(slots.complete_pass(pass));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reconcile, bench_separators, bench_controller);
criterion_main!(benches);
