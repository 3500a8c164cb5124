//! Measure calculating every field for a goal on an open grid with no impassable cells.
//!
//! The grid is 200x200 with the goal in the bottom right corner so the wavefront has to cross the entire grid
//!

use bevy_flowfield_grid_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Create the grid before benchmarking
fn prepare_grid(columns: usize, rows: usize) -> GridGraph {
	match GridGraph::new(columns, rows, 1.0, true, true) {
		Ok(grid) => grid,
		Err(e) => panic!("Failed creating bench grid: {}", e),
	}
}

/// Build the cost, integration and vector fields towards the bottom right corner
fn calc_fields(grid: &GridGraph, strategy: IntegrationStrategy) {
	let settings = FlowFieldSettings::new(TerrainCostTable::default(), strategy);
	let mut path = FlowFieldPath::new(grid, settings);
	if let Err(e) = path.set_goal(grid, grid.len() - 1) {
		panic!("Failed calculating bench fields: {}", e);
	}
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(100);
	let grid = prepare_grid(200, 200);
	group.bench_function("calc_fields_open_wavefront", |b| {
		b.iter(|| calc_fields(black_box(&grid), black_box(IntegrationStrategy::Wavefront)))
	});
	group.bench_function("calc_fields_open_prioritised", |b| {
		b.iter(|| calc_fields(black_box(&grid), black_box(IntegrationStrategy::Prioritised)))
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
