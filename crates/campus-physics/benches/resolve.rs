use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;

use campus_geom::Vec3;
use campus_physics::{CameraParams, ChaseCamera, MovementResolver};
use campus_world::config::default_buildings;
use campus_world::Campus;

fn bench_resolve_outdoor(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_outdoor");
    let campus = Campus::generate(&default_buildings());
    let r = MovementResolver::default();
    group.bench_function("open_ground", |b| {
        b.iter(|| {
            let out = r.resolve(
                &campus.buildings,
                black_box(Vec3::new(0.0, 0.5, 0.0)),
                black_box(Vec3::new(0.1, 0.0, 0.15)),
            );
            black_box(out);
        })
    });
    group.bench_function("wall_slide", |b| {
        b.iter(|| {
            let out = r.resolve(
                &campus.buildings,
                black_box(Vec3::new(20.0, 0.5, 30.7)),
                black_box(Vec3::new(0.3, 0.0, -0.2)),
            );
            black_box(out);
        })
    });
    group.finish();
}

fn bench_resolve_indoor(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_indoor");
    let campus = Campus::generate(&default_buildings());
    let r = MovementResolver::default();
    group.bench_function("classroom_floor_1", |b| {
        b.iter(|| {
            let out = r.resolve(
                &campus.buildings,
                black_box(Vec3::new(45.0, 3.5, 45.0)),
                black_box(Vec3::new(0.2, 0.0, 0.0)),
            );
            black_box(out);
        })
    });
    group.finish();
}

fn bench_camera_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("camera_update");
    let campus = Campus::generate(&default_buildings());
    let mut cam = ChaseCamera::new(CameraParams::default());
    group.bench_function("default_campus", |b| {
        b.iter(|| {
            let pos = cam.update(black_box(Vec3::new(20.0, 0.5, 5.0)), campus.obstacles());
            black_box(pos);
        })
    });
    group.finish();
}

fn configure() -> Criterion {
    Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = configure();
    targets = bench_resolve_outdoor, bench_resolve_indoor, bench_camera_update
}
criterion_main!(benches);
