//! Benchmarks comparing uniform grid and adaptive octree clustering

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use meshcluster_core::{Point3f, TriangleMesh};
use meshcluster_simplification::{AdaptiveSimplifier, MeshSimplifier, UniformGridSimplifier};

fn generate_sine_surface(size: usize) -> TriangleMesh {
    let mut vertices = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let fx = x as f32 / (size - 1) as f32 * std::f32::consts::PI;
            let fy = y as f32 / (size - 1) as f32 * std::f32::consts::PI;
            vertices.push(Point3f::new(
                x as f32,
                y as f32,
                (fx.sin() * fy.sin()) * 2.0,
            ));
        }
    }
    let mut faces = Vec::with_capacity((size - 1) * (size - 1) * 2);
    for y in 0..(size - 1) {
        for x in 0..(size - 1) {
            let tl = y * size + x;
            let tr = tl + 1;
            let bl = (y + 1) * size + x;
            let br = bl + 1;
            faces.push([tl, bl, tr]);
            faces.push([tr, bl, br]);
        }
    }
    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

fn bench_clustering(c: &mut Criterion) {
    let sizes = [20, 50, 100];
    let resolutions = [8, 32];
    let thresholds = [5, 20];

    let mut group = c.benchmark_group("clustering");

    for &size in &sizes {
        let mesh = generate_sine_surface(size);
        let face_count = mesh.face_count();

        for &resolution in &resolutions {
            group.bench_with_input(
                BenchmarkId::new("grid", format!("{}f_r{}", face_count, resolution)),
                &mesh,
                |b, mesh| {
                    let simplifier = UniformGridSimplifier::new(resolution);
                    b.iter(|| {
                        let mut working = mesh.clone();
                        let outcome = simplifier.simplify(black_box(&mut working)).unwrap();
                        black_box(outcome);
                    });
                },
            );
        }

        for &threshold in &thresholds {
            group.bench_with_input(
                BenchmarkId::new("octree", format!("{}f_t{}", face_count, threshold)),
                &mesh,
                |b, mesh| {
                    let simplifier = AdaptiveSimplifier::new(threshold);
                    b.iter(|| {
                        let mut working = mesh.clone();
                        let outcome = simplifier.simplify(black_box(&mut working)).unwrap();
                        black_box(outcome);
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_clustering);
criterion_main!(benches);
