//! Benchmarks for the per-frame cloth work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sailcloth::mesh;
use sailcloth::{Cloth, ForceMode, Vec3};

fn hanging_cloth(count: usize) -> Cloth {
    let mut cloth = Cloth::new(5.0, 10.0, count, count);
    cloth.add_anchor(0, count - 1).unwrap();
    cloth.add_anchor(count - 1, count - 1).unwrap();
    cloth
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_particle_positions");

    for count in [10, 20, 40] {
        group.bench_with_input(BenchmarkId::new("grid", count), &count, |b, &count| {
            let mut cloth = hanging_cloth(count);
            b.iter(|| {
                cloth.add_force(Vec3::new(0.0, -0.05, 0.0), ForceMode::Uniform);
                cloth.update_particle_positions();
                black_box(cloth.particles().len())
            })
        });
    }

    group.finish();
}

fn bench_forces(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_force");

    group.bench_function("uniform_40", |b| {
        let mut cloth = hanging_cloth(40);
        b.iter(|| cloth.add_force(black_box(Vec3::new(0.0, -0.05, 0.0)), ForceMode::Uniform))
    });

    group.bench_function("per_triangle_40", |b| {
        let mut cloth = hanging_cloth(40);
        b.iter(|| cloth.add_force(black_box(Vec3::new(0.25, 0.0, -0.25)), ForceMode::PerTriangle))
    });

    group.finish();
}

fn bench_render_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_data");

    group.bench_function("compute_normals_40", |b| {
        let mut cloth = hanging_cloth(40);
        b.iter(|| cloth.compute_normals())
    });

    group.bench_function("triangle_vertices_40", |b| {
        let mut cloth = hanging_cloth(40);
        cloth.compute_normals();
        b.iter(|| black_box(mesh::triangle_vertices(&cloth)))
    });

    group.finish();
}

criterion_group!(benches, bench_update, bench_forces, bench_render_data);
criterion_main!(benches);
