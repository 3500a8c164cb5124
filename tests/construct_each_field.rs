//! Try building each field
//!

use std::{cmp::Reverse, collections::BinaryHeap};

use bevy::prelude::*;
use bevy_flowfield_grid_plugin::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Build every field of a grid, one after the other
fn build_fields(
	grid: &GridGraph,
	goal: usize,
	strategy: IntegrationStrategy,
) -> (CostField, IntegrationField, VectorField) {
	let cost_field = CostField::from_grid(grid, &TerrainCostTable::default());
	let mut integration_field = IntegrationField::new(grid.len());
	integration_field
		.calculate_field_with_strategy(grid, &cost_field, goal, strategy)
		.unwrap();
	let mut vector_field = VectorField::new(grid.len());
	vector_field.calculate(grid, &integration_field).unwrap();
	(cost_field, integration_field, vector_field)
}

/// Grid of random terrain, roughly a fifth water and a little mud
fn random_grid(rng: &mut StdRng, diagonals_allowed: bool, cost_based: bool) -> GridGraph {
	let columns = rng.random_range(1..16);
	let rows = rng.random_range(1..16);
	let mut grid = GridGraph::new(columns, rows, 1.0, diagonals_allowed, cost_based).unwrap();
	for index in 0..grid.len() {
		let roll: f32 = rng.random();
		let terrain = if roll < 0.2 {
			TerrainType::Water
		} else if roll < 0.35 {
			TerrainType::Mud
		} else {
			TerrainType::Default
		};
		grid.set_node_terrain(index, terrain).unwrap();
	}
	grid
}

/// Minimum cost of reaching `goal` from every cell, found by walking the grid coordinates directly rather than through the grid connections
fn reference_costs(grid: &GridGraph, cost_field: &CostField, goal: usize) -> Vec<u16> {
	let columns = grid.get_columns() as i64;
	let rows = grid.get_rows() as i64;
	let costs = cost_field.get_field();
	let blocked = |c: i64, r: i64| costs[(r * columns + c) as usize] == 255;
	let mut best = vec![u32::MAX; grid.len()];
	best[goal] = 0;
	let mut heap = BinaryHeap::new();
	heap.push(Reverse((0_u32, goal)));
	while let Some(Reverse((dist, index))) = heap.pop() {
		if dist > best[index] {
			continue;
		}
		let (c, r) = (index as i64 % columns, index as i64 / columns);
		for dc in -1..=1_i64 {
			for dr in -1..=1_i64 {
				if dc == 0 && dr == 0 {
					continue;
				}
				let diagonal = dc != 0 && dr != 0;
				if diagonal && !grid.is_diagonals_allowed() {
					continue;
				}
				let (nc, nr) = (c + dc, r + dr);
				if nc < 0 || nr < 0 || nc >= columns || nr >= rows || blocked(nc, nr) {
					continue;
				}
				let n = (nr * columns + nc) as usize;
				let base = if diagonal && grid.is_cost_based_connections() {
					1.5
				} else {
					1.0
				};
				let step = ((costs[n] as f32 * base).round() as u32).max(1);
				let candidate = dist + step;
				if candidate < best[n] {
					best[n] = candidate;
					heap.push(Reverse((candidate, n)));
				}
			}
		}
	}
	best.iter()
		.map(|d| if *d >= INT_UNREACHED as u32 { INT_UNREACHED } else { *d as u16 })
		.collect()
}

#[test]
fn field_on_field() {
	//  ___________________
	// |__|__|__|__|__|__|
	// |__|x_|x_|x_|x_|__|
	// |__|__|__|__|x_|__|
	// |__|__|G_|__|x_|__|
	let mut grid = GridGraph::new(6, 4, 10.0, true, true).unwrap();
	for i in [7, 8, 9, 10, 16, 22] {
		grid.set_node_terrain(i, TerrainType::Water).unwrap();
	}
	let goal = grid.get_node_index_at_world_position(Vec2::new(-5.0, -15.0));
	assert_eq!(20, goal);
	let (cost_field, integration_field, vector_field) =
		build_fields(&grid, goal, IntegrationStrategy::Wavefront);
	assert_eq!(255, cost_field.get_field_cell_value(16).unwrap());
	assert_eq!(0, integration_field.get_field_cell_value(goal).unwrap());
	// top right is reached by going over the wall
	assert!(integration_field.is_reached(5));
	assert!(integration_field.is_reached(23));
	// follow the vector field from the bottom right back to the goal
	let mut current = 23;
	let mut steps = 0;
	while current != goal {
		let ordinal = vector_field.get_direction(current).unwrap();
		assert_ne!(Ordinal::Zero, ordinal);
		current = grid.get_neighbour(current, ordinal).unwrap().unwrap();
		steps += 1;
		assert!(steps < grid.len(), "vector field contains a loop");
	}
	assert!(is_goal(vector_field.get_field_cell_value(goal).unwrap()));
}

#[test]
#[cfg(feature = "ron")]
fn fields_from_ron_layout() {
	let path = env!("CARGO_MANIFEST_DIR").to_string() + "/assets/grid_layout.ron";
	let grid = GridGraph::from_ron(&path).unwrap();
	let (cost_field, integration_field, vector_field) =
		build_fields(&grid, 0, IntegrationStrategy::Prioritised);
	assert_eq!(255, cost_field.get_field_cell_value(7).unwrap());
	assert_eq!(5, cost_field.get_field_cell_value(16).unwrap());
	assert!(!integration_field.is_reached(7));
	assert_eq!(Ordinal::Zero, vector_field.get_direction(12).unwrap());
	assert!(is_pathable(vector_field.get_field_cell_value(24).unwrap()));
}

#[test]
#[cfg(feature = "csv")]
fn fields_from_csv_terrain() {
	let path = env!("CARGO_MANIFEST_DIR").to_string() + "/assets/csv/grid_terrain.csv";
	let grid = GridGraph::from_csv(&path, 1.0, false, true).unwrap();
	let (cost_field, integration_field, _) =
		build_fields(&grid, 0, IntegrationStrategy::Wavefront);
	assert_eq!(255, cost_field.get_field_cell_value(2).unwrap());
	assert_eq!(1, cost_field.get_field_cell_value(23).unwrap());
	assert_eq!(1, integration_field.get_field_cell_value(1).unwrap());
}

#[test]
fn integration_matches_reference_minimum_cost() {
	let mut rng = StdRng::seed_from_u64(7);
	for round in 0..60 {
		let diagonals = round % 3 != 0;
		let cost_based = round % 2 == 0;
		let grid = random_grid(&mut rng, diagonals, cost_based);
		let goal = rng.random_range(0..grid.len());
		let (cost_field, integration_field, _) =
			build_fields(&grid, goal, IntegrationStrategy::Wavefront);
		let expected = reference_costs(&grid, &cost_field, goal);
		assert_eq!(expected, integration_field.get_field(), "round {}", round);
	}
}

#[test]
fn strategies_agree_on_random_grids() {
	let mut rng = StdRng::seed_from_u64(31);
	for round in 0..60 {
		let grid = random_grid(&mut rng, round % 2 == 0, true);
		let goal = rng.random_range(0..grid.len());
		let (_, wave, wave_vectors) = build_fields(&grid, goal, IntegrationStrategy::Wavefront);
		let (_, prioritised, prioritised_vectors) =
			build_fields(&grid, goal, IntegrationStrategy::Prioritised);
		assert_eq!(wave, prioritised, "round {}", round);
		assert_eq!(wave_vectors, prioritised_vectors, "round {}", round);
	}
}

#[test]
fn neighbouring_costs_are_bounded() {
	let mut rng = StdRng::seed_from_u64(99);
	for _ in 0..40 {
		let grid = random_grid(&mut rng, true, true);
		let goal = rng.random_range(0..grid.len());
		let (cost_field, integration_field, _) =
			build_fields(&grid, goal, IntegrationStrategy::Wavefront);
		// a diagonal step onto the most expensive passable cell is the largest step on the grid
		let max_step = (cost_field.get_max_passable_cost() as f32 * DIAGONAL_CONNECTION_COST).round() as i32;
		for node in grid.get_all_nodes() {
			let a = node.get_index();
			for connection in grid.get_node_connections(a).unwrap() {
				let b = connection.get_to();
				if integration_field.is_reached(a) && integration_field.is_reached(b) {
					let va = integration_field.get_field_cell_value(a).unwrap() as i32;
					let vb = integration_field.get_field_cell_value(b).unwrap() as i32;
					assert!((va - vb).abs() <= max_step);
				}
			}
		}
	}
}

#[test]
fn vectors_descend_towards_goal() {
	let mut rng = StdRng::seed_from_u64(2024);
	for _ in 0..40 {
		let grid = random_grid(&mut rng, true, true);
		let goal = rng.random_range(0..grid.len());
		let (_, integration_field, vector_field) =
			build_fields(&grid, goal, IntegrationStrategy::Wavefront);
		for index in 0..grid.len() {
			let value = integration_field.get_field_cell_value(index).unwrap();
			let ordinal = vector_field.get_direction(index).unwrap();
			if value == INT_UNREACHED || value == 0 {
				assert_eq!(Ordinal::Zero, ordinal);
				continue;
			}
			// every reached cell other than the goal has a cheaper neighbour, it came from one
			let next = grid.get_neighbour(index, ordinal).unwrap().unwrap();
			assert!(integration_field.get_field_cell_value(next).unwrap() < value);
		}
	}
}

#[test]
fn walled_off_cells_stay_unreached() {
	//  _______________
	// |__|__|x_|__|__|
	// |__|__|x_|__|__|
	// |__|__|x_|__|__|
	let mut grid = GridGraph::new(5, 3, 1.0, true, true).unwrap();
	for i in [2, 7, 12] {
		grid.set_node_terrain(i, TerrainType::Water).unwrap();
	}
	let (_, integration_field, vector_field) =
		build_fields(&grid, 0, IntegrationStrategy::Wavefront);
	for i in [3, 4, 8, 9, 13, 14] {
		assert!(!integration_field.is_reached(i));
		assert_eq!(Ordinal::Zero, vector_field.get_direction(i).unwrap());
		assert!(!is_pathable(vector_field.get_field_cell_value(i).unwrap()));
	}
}
