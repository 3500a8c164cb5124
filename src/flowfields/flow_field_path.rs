//! A [FlowFieldPath] owns the fields that guide actors across a [GridGraph] towards a single goal.
//!
//! Whenever the goal or the terrain changes the whole pipeline is rebuilt from scratch:
//!
//! ```text
//! GridGraph -> CostField -> IntegrationField -> VectorField
//! ```
//!
//! The three fields are published together as an immutable [PathFields] snapshot behind an [Arc]. A rebuild creates a new snapshot and swaps it in, anyone still holding the previous snapshot keeps a consistent view of it. Each snapshot carries a generation number which grows by one on every swap.
//!

use std::sync::Arc;

use crate::prelude::*;
use bevy::prelude::*;

/// Whether a [FlowFieldPath] currently has a goal
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum PathState {
	/// No goal, fields are at their defaults
	#[default]
	Idle,
	/// Fields have been built for the current goal
	Ready,
}

/// Tuning of how a [FlowFieldPath] builds its fields
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FlowFieldSettings {
	/// Cost of each terrain type
	terrain_costs: TerrainCostTable,
	/// How the integration field is propagated
	integration_strategy: IntegrationStrategy,
}

impl FlowFieldSettings {
	pub fn new(terrain_costs: TerrainCostTable, integration_strategy: IntegrationStrategy) -> Self {
		FlowFieldSettings {
			terrain_costs,
			integration_strategy,
		}
	}
	pub fn get_terrain_costs(&self) -> &TerrainCostTable {
		&self.terrain_costs
	}
	pub fn get_integration_strategy(&self) -> IntegrationStrategy {
		self.integration_strategy
	}
}

/// A consistent set of fields built for one goal
#[derive(Debug, Clone, PartialEq)]
pub struct PathFields {
	/// Goal the fields lead towards, [INVALID_NODE_INDEX] when there is none
	goal: usize,
	/// Incremented each time a new set of fields is published
	generation: u64,
	/// Cost of entering each node
	cost_field: CostField,
	/// Cumulative cost of reaching the goal from each node
	integration_field: IntegrationField,
	/// Direction of travel out of each node
	vector_field: VectorField,
}

impl PathFields {
	/// Fields of `size` cells at their defaults, every cost `1`, nothing reached and no directions
	fn empty(size: usize, generation: u64) -> Self {
		PathFields {
			goal: INVALID_NODE_INDEX,
			generation,
			cost_field: CostField::new(size),
			integration_field: IntegrationField::new(size),
			vector_field: VectorField::new(size),
		}
	}
	/// Run the whole pipeline for `goal`
	fn build(
		grid: &GridGraph,
		settings: &FlowFieldSettings,
		goal: usize,
		generation: u64,
	) -> Result<Self, FlowFieldError> {
		let cost_field = CostField::from_grid(grid, &settings.terrain_costs);
		let mut integration_field = IntegrationField::new(grid.len());
		integration_field.calculate_field_with_strategy(
			grid,
			&cost_field,
			goal,
			settings.integration_strategy,
		)?;
		let mut vector_field = VectorField::new(grid.len());
		vector_field.calculate(grid, &integration_field)?;
		Ok(PathFields {
			goal,
			generation,
			cost_field,
			integration_field,
			vector_field,
		})
	}
	pub fn get_goal(&self) -> usize {
		self.goal
	}
	pub fn get_generation(&self) -> u64 {
		self.generation
	}
	pub fn get_cost_field(&self) -> &CostField {
		&self.cost_field
	}
	pub fn get_integration_field(&self) -> &IntegrationField {
		&self.integration_field
	}
	pub fn get_vector_field(&self) -> &VectorField {
		&self.vector_field
	}
}

/// Drives the calculation of the fields of a [GridGraph] for a single goal, attach it to the same entity as the grid (see [crate::prelude::FlowFieldGridBundle])
#[derive(Component, Debug, Clone)]
pub struct FlowFieldPath {
	/// How the fields are built
	settings: FlowFieldSettings,
	/// Whether a goal is set
	state: PathState,
	/// Latest published fields
	fields: Arc<PathFields>,
}

impl FlowFieldPath {
	/// Create a new [FlowFieldPath] for a grid, it starts [PathState::Idle]
	pub fn new(grid: &GridGraph, settings: FlowFieldSettings) -> Self {
		FlowFieldPath {
			settings,
			state: PathState::Idle,
			fields: Arc::new(PathFields::empty(grid.len(), 0)),
		}
	}
	pub fn get_settings(&self) -> &FlowFieldSettings {
		&self.settings
	}
	pub fn get_state(&self) -> PathState {
		self.state
	}
	/// The current goal, [INVALID_NODE_INDEX] when [PathState::Idle]
	pub fn get_goal(&self) -> usize {
		self.fields.goal
	}
	pub fn get_generation(&self) -> u64 {
		self.fields.generation
	}
	pub fn get_cost_field(&self) -> &CostField {
		&self.fields.cost_field
	}
	pub fn get_integration_field(&self) -> &IntegrationField {
		&self.fields.integration_field
	}
	pub fn get_vector_field(&self) -> &VectorField {
		&self.fields.vector_field
	}
	/// Get a shared handle to the current fields, it is never mutated by later rebuilds
	pub fn snapshot(&self) -> Arc<PathFields> {
		Arc::clone(&self.fields)
	}
	/// Change the goal and rebuild every field. A goal of [INVALID_NODE_INDEX] clears the path back to [PathState::Idle], any other index outside of the grid is rejected and leaves the path untouched
	pub fn set_goal(&mut self, grid: &GridGraph, goal: usize) -> Result<(), FlowFieldError> {
		if goal == INVALID_NODE_INDEX {
			self.clear(grid);
			return Ok(());
		}
		if goal >= grid.len() {
			return Err(FlowFieldError::IndexOutOfRange {
				index: goal,
				len: grid.len(),
			});
		}
		self.rebuild(grid, goal)
	}
	/// Find the node at a world position and make it the goal, a position outside of the grid clears the goal
	pub fn set_goal_at_world_position(
		&mut self,
		grid: &GridGraph,
		position: Vec2,
	) -> Result<(), FlowFieldError> {
		let goal = grid.get_node_index_at_world_position(position);
		self.set_goal(grid, goal)
	}
	/// The terrain of the grid has changed, rebuild the fields for the current goal. Does nothing when [PathState::Idle]
	pub fn on_terrain_edited(&mut self, grid: &GridGraph) -> Result<(), FlowFieldError> {
		match self.state {
			PathState::Idle => Ok(()),
			PathState::Ready => self.rebuild(grid, self.fields.goal),
		}
	}
	/// Replace the settings, the fields are rebuilt when there is a goal
	pub fn set_settings(
		&mut self,
		grid: &GridGraph,
		settings: FlowFieldSettings,
	) -> Result<(), FlowFieldError> {
		self.settings = settings;
		self.on_terrain_edited(grid)
	}
	/// Direction an actor at `position` should move in, [Ordinal::Zero] when it is outside of the grid, at the goal or can't reach it
	pub fn sample_direction(&self, grid: &GridGraph, position: Vec2) -> Ordinal {
		let index = grid.get_node_index_at_world_position(position);
		self.fields
			.vector_field
			.get_direction(index)
			.unwrap_or(Ordinal::Zero)
	}
	/// Normalised world-space direction an actor at `position` should move in, zero when there is no direction
	pub fn sample_direction_vector(&self, grid: &GridGraph, position: Vec2) -> Vec2 {
		let index = grid.get_node_index_at_world_position(position);
		self.fields
			.vector_field
			.get_field_cell_value(index)
			.map(get_2d_direction_unit_vector_from_bits)
			.unwrap_or(Vec2::ZERO)
	}
	/// Build the fields for `goal` and publish them, nothing changes if the build fails
	fn rebuild(&mut self, grid: &GridGraph, goal: usize) -> Result<(), FlowFieldError> {
		let generation = self.fields.generation + 1;
		let fields = PathFields::build(grid, &self.settings, goal, generation)?;
		debug!(
			"Rebuilt flow field towards node {} with {:?}, generation {}",
			goal, self.settings.integration_strategy, generation
		);
		self.fields = Arc::new(fields);
		self.state = PathState::Ready;
		Ok(())
	}
	/// Publish default fields and return to [PathState::Idle]
	fn clear(&mut self, grid: &GridGraph) {
		let generation = self.fields.generation + 1;
		debug!("Cleared flow field goal, generation {}", generation);
		self.fields = Arc::new(PathFields::empty(grid.len(), generation));
		self.state = PathState::Idle;
	}
}
