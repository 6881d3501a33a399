use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::hint::black_box;
use vchart_rs::core::{ChartSpec, ChartType, LinearScale, normalize};
use vchart_rs::{ChartHost, ChartHostConfig, NullDecorator};

fn records(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            json!({"label": format!("c{i}"), "a": t * 0.5, "b": 100.0 - t * 0.01, "c": (t % 17.0) + 1.0})
        })
        .collect()
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new((0.0, 10_000.0), (1_080.0, 0.0)).expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.map(black_box(4_321.123));
            let _ = scale.invert(px).expect("from pixel");
        })
    });
}

fn bench_linear_scale_ticks(c: &mut Criterion) {
    let scale = LinearScale::new((-3.7, 12_345.6), (0.0, 800.0)).expect("valid scale");

    c.bench_function("linear_scale_ticks", |b| {
        b.iter(|| {
            let _ = scale.ticks(black_box(10));
        })
    });
}

fn bench_normalize_10k(c: &mut Criterion) {
    let spec = ChartSpec::new("bench", ChartType::Line)
        .with_metric(["a", "b", "c"])
        .with_dim("label")
        .with_data(records(10_000));

    c.bench_function("normalize_10k", |b| {
        b.iter(|| {
            let _ = normalize(black_box(&spec));
        })
    });
}

fn bench_vbar_mount_and_update_2k(c: &mut Criterion) {
    let spec = ChartSpec::new("bench", ChartType::VerticalBar)
        .with_size(1_600.0, 900.0)
        .with_metric(["a", "b"])
        .with_dim("label")
        .with_data(records(2_000));
    let grown = spec.clone().with_data(records(2_100));
    let config = ChartHostConfig::new().with_transition_duration(Duration::ZERO);

    c.bench_function("vbar_mount_and_update_2k", |b| {
        b.iter(|| {
            let mut host = ChartHost::new(NullDecorator, config);
            host.mount(black_box(spec.clone())).expect("mount");
            let _ = host.update(black_box(grown.clone())).expect("update");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_linear_scale_ticks,
    bench_normalize_10k,
    bench_vbar_mount_and_update_2k
);
criterion_main!(benches);
