use automesh_core::{classify::NodeClassifier, mesh::MeshBuilder, neighbor::NeighborGraph, smooth::{Algorithm, Smoother}, voxel_grid::VoxelGrid};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn cube_grid(side: u32) -> VoxelGrid {
    let count = (side * side * side) as usize;
    VoxelGrid::from_flat(vec![1; count], side, side, side).unwrap()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_build");
    for side in [4u32, 8, 16] {
        let grid = cube_grid(side);
        group.bench_with_input(BenchmarkId::from_parameter(side), &grid, |b, grid| {
            b.iter(|| MeshBuilder::new().build(black_box(grid), black_box(&[1])).unwrap())
        });
    }
    group.finish();
}

fn bench_smooth(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_smooth");
    for side in [4u32, 8] {
        let grid = cube_grid(side);
        let mesh = MeshBuilder::new().build(&grid, &[1]).unwrap();
        let graph = NeighborGraph::from_mesh(&mesh);
        let levels = vec![automesh_core::classify::Level::Interior; mesh.node_count()];
        let classifier = NodeClassifier::new(levels, Default::default()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(side), &mesh, |b, mesh| {
            b.iter_batched(
                || mesh.coordinates.clone(),
                |mut coords| {
                    let smoother = Smoother::new(&graph, &classifier);
                    smoother
                        .smooth(
                            black_box(&mut coords),
                            Algorithm::Taubin {
                                lambda: 0.5,
                                mu: -0.52,
                            },
                            black_box(10),
                        )
                        .unwrap();
                    coords
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_smooth);
criterion_main!(benches);
