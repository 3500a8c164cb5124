//! The CostField contains an array of 8-bit values, one per grid node. The
//! values correspond to the cost of entering that node. A value of 1 is the
//! default, a value of 255 is a special case that indicates that the node is
//! strictly forbidden from being used in a pathing calculation (effectively
//! saying there is water or a wall there). Any other value indicates a harder
//! cost of movement, such as mud.
//!
//! The field is derived from the terrain of the [GridGraph] through a
//! [TerrainCostTable]. For a `5x5` grid with some mud and water it may look:
//!
//! ```text
//!  _____________________________
//! |     |     |     |     |     |
//! |  1  |  1  |  1  |  1  |  1  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  1  |  1  | 255 |  1  |  1  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  1  |  1  | 255 |  1  |  1  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  1  |  5  |  5  |  1  |  1  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  1  |  1  |  1  |  1  |  1  |
//! |_____|_____|_____|_____|_____|
//! ```
//!

use crate::prelude::*;

#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostField(Vec<u8>);

impl Field<u8> for CostField {
	/// Get a reference to the field array
	fn get_field(&self) -> &[u8] {
		&self.0
	}
	/// Retrieve a field cell value
	fn get_field_cell_value(&self, index: usize) -> Result<u8, FlowFieldError> {
		self.0
			.get(index)
			.copied()
			.ok_or_else(|| out_of_range(index, self.0.len()))
	}
	/// Set a field cell to a value
	fn set_field_cell_value(&mut self, value: u8, index: usize) -> Result<(), FlowFieldError> {
		let len = self.0.len();
		let cell = self.0.get_mut(index).ok_or_else(|| out_of_range(index, len))?;
		*cell = value;
		Ok(())
	}
}

impl CostField {
	/// Create a new [CostField] of `size` cells, each with the default cost of `1`
	pub fn new(size: usize) -> Self {
		CostField(vec![DEFAULT_COST; size])
	}
	/// Create a [CostField] from the current terrain of a grid
	pub fn from_grid(grid: &GridGraph, table: &TerrainCostTable) -> Self {
		let mut field = CostField::new(grid.len());
		field.calculate(grid, table);
		field
	}
	/// Reset every cell to the default cost of `1`
	pub fn reset(&mut self) {
		self.0.iter_mut().for_each(|c| *c = DEFAULT_COST);
	}
	/// Assign each node the cost of its terrain. The field is resized to match the grid so no previous values survive
	pub fn calculate(&mut self, grid: &GridGraph, table: &TerrainCostTable) {
		self.0.clear();
		self.0.extend(
			grid.get_all_nodes()
				.iter()
				.map(|node| table.get_cost(node.get_terrain())),
		);
	}
	/// Is the cell strictly forbidden from being entered, out of range cells are treated as impassable
	pub fn is_impassable(&self, index: usize) -> bool {
		self.0.get(index).is_none_or(|c| *c == IMPASSABLE_COST)
	}
	/// The largest cost of any passable cell
	pub fn get_max_passable_cost(&self) -> u8 {
		self.0
			.iter()
			.filter(|c| **c != IMPASSABLE_COST)
			.max()
			.copied()
			.unwrap_or(DEFAULT_COST)
	}
}
