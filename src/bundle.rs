//! Spawn a [GridGraph] and the [FlowFieldPath] which calculates fields over it
//!

use crate::prelude::*;
use bevy::prelude::*;

#[derive(Bundle)]
pub struct FlowFieldGridBundle {
	/// Nodes, connections and terrain
	grid_graph: GridGraph,
	/// Fields calculated over the grid
	flow_field_path: FlowFieldPath,
}

impl FlowFieldGridBundle {
	/// Create a new instance of [FlowFieldGridBundle] of `columns x rows` nodes of default terrain
	pub fn new(
		columns: usize,
		rows: usize,
		cell_size: f32,
		diagonals_allowed: bool,
		cost_based_connections: bool,
		settings: FlowFieldSettings,
	) -> Result<Self, FlowFieldError> {
		let grid_graph = GridGraph::new(
			columns,
			rows,
			cell_size,
			diagonals_allowed,
			cost_based_connections,
		)?;
		Ok(FlowFieldGridBundle::from_grid(grid_graph, settings))
	}
	/// Create a new instance of [FlowFieldGridBundle] from an existing grid
	pub fn from_grid(grid_graph: GridGraph, settings: FlowFieldSettings) -> Self {
		let flow_field_path = FlowFieldPath::new(&grid_graph, settings);
		FlowFieldGridBundle {
			grid_graph,
			flow_field_path,
		}
	}
	/// Create a new instance of [FlowFieldGridBundle] where the [GridGraph] is derived from a `ron` [GridLayout] on disk
	#[cfg(feature = "ron")]
	pub fn new_from_disk(path: &str, settings: FlowFieldSettings) -> Result<Self, FlowFieldError> {
		let grid_graph = GridGraph::from_ron(path)?;
		Ok(FlowFieldGridBundle::from_grid(grid_graph, settings))
	}
	pub fn get_grid_graph(&self) -> &GridGraph {
		&self.grid_graph
	}
	pub fn get_flow_field_path(&self) -> &FlowFieldPath {
		&self.flow_field_path
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn new_bundle() {
		let bundle =
			FlowFieldGridBundle::new(4, 3, 16.0, true, true, FlowFieldSettings::default()).unwrap();
		assert_eq!(12, bundle.get_grid_graph().len());
		assert_eq!(PathState::Idle, bundle.get_flow_field_path().get_state());
		assert_eq!(12, bundle.get_flow_field_path().get_cost_field().get_field().len());
	}
	#[test]
	fn invalid_bundle() {
		let result = FlowFieldGridBundle::new(0, 3, 16.0, true, true, FlowFieldSettings::default());
		assert!(result.is_err());
	}
	#[test]
	#[cfg(feature = "ron")]
	fn bundle_from_disk() {
		let path = env!("CARGO_MANIFEST_DIR").to_string() + "/assets/grid_layout.ron";
		let bundle = FlowFieldGridBundle::new_from_disk(&path, FlowFieldSettings::default()).unwrap();
		assert_eq!(25, bundle.get_grid_graph().len());
		assert_eq!(
			TerrainType::Water,
			bundle.get_grid_graph().get_node_terrain(12).unwrap()
		);
	}
}
