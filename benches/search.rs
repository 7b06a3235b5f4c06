//! Pathfinding benchmarks.
//!
//! Measures A* on an open grid (worst case for the linear open-list scan)
//! and on the default demo maze.
//!
//! Run with: `cargo bench`
//! View HTML reports in: `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use marga::{astar, MargaConfig, NavGraph, TileMap};

/// Fully walkable n x n grid
fn open_grid(n: usize) -> NavGraph {
    let rows = vec!["1".repeat(n); n];
    NavGraph::build(&TileMap::parse(&rows, 50.0))
}

/// The 24x17 demo maze
fn maze() -> NavGraph {
    let config = MargaConfig::default();
    NavGraph::build(&TileMap::parse(&config.map.rows, config.map.cell_size))
}

fn bench_open_grid(c: &mut Criterion) {
    let graph = open_grid(24);
    let start = graph.node_at(0, 0).unwrap();
    let goal = graph.node_at(23, 23).unwrap();

    c.bench_function("astar_open_24x24_corner_to_corner", |b| {
        b.iter(|| astar(black_box(&graph), start, goal))
    });
}

fn bench_maze(c: &mut Criterion) {
    let graph = maze();
    let start = graph.node_at(1, 1).unwrap();
    let goal = graph.node_at(22, 15).unwrap();

    c.bench_function("astar_maze_corner_to_corner", |b| {
        b.iter(|| astar(black_box(&graph), start, goal))
    });
}

fn bench_unreachable(c: &mut Criterion) {
    // Split grid: the search must exhaust the start component
    let mut rows = vec!["1".repeat(24); 24];
    rows[12] = "0".repeat(24);
    let graph = NavGraph::build(&TileMap::parse(&rows, 50.0));
    let start = graph.node_at(0, 0).unwrap();
    let goal = graph.node_at(23, 23).unwrap();

    c.bench_function("astar_unreachable_24x24", |b| {
        b.iter(|| astar(black_box(&graph), start, goal))
    });
}

criterion_group!(benches, bench_open_grid, bench_maze, bench_unreachable);
criterion_main!(benches);
