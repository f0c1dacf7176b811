// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
// criterion_group!/criterion_main! expand to undocumented functions that cannot
// carry #[allow] (attributes on macro invocations are ignored). Crate-level
// suppress is required for benchmark binaries using Criterion.
#![allow(missing_docs)]
//! Snap resolution with and without the per-session anchor cache.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use skid_geom::{Footprint, Transform, Vec3};
use skid_layout::{
    find_snap_point, Compatibility, Connector, ConnectorKind, Instance, InstanceId, SnapOptions,
    SnapResolver,
};

fn plugged(id: u64, p: Vec3) -> Instance {
    let kinds = [
        ConnectorKind::Electrical,
        ConnectorKind::Hydraulic,
        ConnectorKind::Mechanical,
    ];
    let connectors = kinds
        .iter()
        .enumerate()
        .map(|(i, k)| {
            let dz = i as f32 * 0.5 - 0.5;
            Connector::new(format!("c{i}"), *k, Vec3::new(1.0, 0.0, dz), Vec3::UNIT_X)
        })
        .collect();
    Instance::new(
        InstanceId(id),
        Transform::from_translation(p),
        Footprint::cube(2.0),
    )
    .with_connectors(connectors)
}

fn bench_snap(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap");
    for &n in &[8usize, 64, 256] {
        let others: Vec<Instance> = (0..n)
            .map(|i| {
                let p = Vec3::new((i % 16) as f32 * 3.0, 1.0, (i / 16) as f32 * 3.0);
                plugged(i as u64 + 1, p)
            })
            .collect();
        let moving = plugged(0, Vec3::new(-5.0, 1.0, -5.0));
        let target = Vec3::new(4.2, 1.0, 0.3);
        let opts = SnapOptions::default();
        let compat = Compatibility::new();
        group.bench_with_input(BenchmarkId::new("pure", n), &others, |b, others| {
            b.iter(|| black_box(find_snap_point(&moving, target, others, &opts, &compat)));
        });
        let mut resolver = SnapResolver::new(opts, compat.clone());
        group.bench_with_input(BenchmarkId::new("cached", n), &others, |b, others| {
            b.iter(|| black_box(resolver.resolve(&moving, target, others, 1)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_snap);
criterion_main!(benches);
