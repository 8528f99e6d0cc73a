use criterion::{black_box, criterion_group, criterion_main, Criterion};
use snowgrid::{
    AllPassable, GridConfig, HexGrid, MapConfig, OffsetDistance, TileIndex,
    TileMap,
};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing");

    let grid = HexGrid::from_config(&GridConfig::default()).unwrap();
    let map = TileMap::generate(&grid, &MapConfig::default()).unwrap();
    let from = TileIndex(0);
    let to = TileIndex(grid.len() - 1);

    group.bench_function("path open grid", |b| {
        b.iter(|| {
            grid.path(
                black_box(from),
                black_box(to),
                &AllPassable,
                &OffsetDistance,
            )
        })
    });
    group.bench_function("waypoints open grid", |b| {
        b.iter(|| {
            grid.waypoints(
                black_box(from),
                black_box(to),
                &AllPassable,
                &OffsetDistance,
            )
        })
    });
    // Corners are usually hidden on a generated map, so route between
    // tiles nearer the middle
    let center = TileIndex(grid.len() / 2 + grid.height() as usize / 2);
    group.bench_function("path generated map", |b| {
        b.iter(|| {
            grid.path(
                black_box(TileIndex(200)),
                black_box(center),
                &map,
                &OffsetDistance,
            )
        })
    });
    group.bench_function("map generation", |b| {
        b.iter(|| TileMap::generate(black_box(&grid), &MapConfig::default()))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
