//! The IntegrationField contains an array of 16-bit values and it uses a [CostField] to
//! produce a cumulative cost of reaching the goal.
//!
//! When a new goal needs to be processed the field is reset to [INT_UNREACHED] and the node containing the goal is set to `0`. A wavefront then expands from the goal calculating the field values:
//!
//! 1. The goal is placed into a queue
//! 2. The front of the queue is taken and for each of its [GridConnection]s the neighbour's `CostField` value is looked up, impassable neighbours are ignored
//! 3. The neighbour's cost is added to the `IntegrationField` value of the current node (at the beginning this is the goal so + `0`)
//! 4. If that produces a cheaper value than the neighbour currently holds it is stored and the neighbour joins the back of the queue, unless it's already waiting in it
//! 5. Repeat until the queue is empty
//!
//! This produces a nice diamond-like pattern as the wave expands across a 4-connected grid (the underlying `CostField` are set to `1` here):
//!
//! ```text
//!  _____________________________
//! |     |     |     |     |     |
//! |  4  |  3  |  2  |  3  |  4  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  3  |  2  |  1  |  2  |  3  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  2  |  1  |  0  |  1  |  2  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  3  |  2  |  1  |  2  |  3  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  4  |  3  |  2  |  3  |  4  |
//! |_____|_____|_____|_____|_____|
//! ```
//!
//! When the grid connects diagonally the cost of entering a neighbour is
//! multiplied by the base cost of the [GridConnection] (`1.5` for a diagonal
//! when connections are cost based) and rounded, so a diagonal step onto
//! default terrain costs `2`.
//!
//! Impassable cells, `255` in the `CostField`, are never entered so the wave flows around them and they keep the [INT_UNREACHED] value, as does anything walled off by them.
//!
//! The FIFO wavefront can revisit a node when a cheaper route to it arrives later. [IntegrationStrategy::Prioritised] always expands the cheapest node first (Dijkstra) and so settles each node once, both produce the same field.
//!

use std::{cmp::Reverse, collections::BinaryHeap, collections::VecDeque};

use crate::prelude::*;
use bevy::prelude::*;
use fixedbitset::FixedBitSet;

/// How the [IntegrationField] is propagated from the goal
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum IntegrationStrategy {
	/// First-in-first-out wavefront relaxation
	#[default]
	Wavefront,
	/// Min-priority queue keyed by integration cost
	Prioritised,
}

#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegrationField(Vec<u16>);

impl Field<u16> for IntegrationField {
	/// Get a reference to the field array
	fn get_field(&self) -> &[u16] {
		&self.0
	}
	/// Retrieve a field cell value
	fn get_field_cell_value(&self, index: usize) -> Result<u16, FlowFieldError> {
		self.0
			.get(index)
			.copied()
			.ok_or_else(|| out_of_range(index, self.0.len()))
	}
	/// Set a field cell to a value
	fn set_field_cell_value(&mut self, value: u16, index: usize) -> Result<(), FlowFieldError> {
		let len = self.0.len();
		let cell = self.0.get_mut(index).ok_or_else(|| out_of_range(index, len))?;
		*cell = value;
		Ok(())
	}
}

impl IntegrationField {
	/// Creates a new [IntegrationField] of `size` cells all set to [INT_UNREACHED]
	pub fn new(size: usize) -> Self {
		IntegrationField(vec![INT_UNREACHED; size])
	}
	/// Reset all the cells of the [IntegrationField] to [INT_UNREACHED] apart from the `goal` which is the starting point of calculating the field and is set to `0`. A `goal` of [INVALID_NODE_INDEX] leaves every cell unreached
	pub fn reset(&mut self, goal: usize) -> Result<(), FlowFieldError> {
		if goal != INVALID_NODE_INDEX && goal >= self.0.len() {
			return Err(out_of_range(goal, self.0.len()));
		}
		self.0.iter_mut().for_each(|c| *c = INT_UNREACHED);
		if goal != INVALID_NODE_INDEX {
			self.0[goal] = 0;
		}
		Ok(())
	}
	/// Has the cell been reached by the wavefront
	pub fn is_reached(&self, index: usize) -> bool {
		self.0.get(index).is_some_and(|c| *c != INT_UNREACHED)
	}
	/// From the `goal` node iterate over successive neighbouring nodes and calculate the field values from the `cost_field` using the FIFO wavefront
	pub fn calculate_field(
		&mut self,
		grid: &GridGraph,
		cost_field: &CostField,
		goal: usize,
	) -> Result<(), FlowFieldError> {
		self.calculate_field_with_strategy(grid, cost_field, goal, IntegrationStrategy::Wavefront)
	}
	/// From the `goal` node calculate the field values from the `cost_field` with the chosen [IntegrationStrategy]. A `goal` of [INVALID_NODE_INDEX] is a no-op, the field keeps every cell unreached
	pub fn calculate_field_with_strategy(
		&mut self,
		grid: &GridGraph,
		cost_field: &CostField,
		goal: usize,
		strategy: IntegrationStrategy,
	) -> Result<(), FlowFieldError> {
		if goal != INVALID_NODE_INDEX && goal >= grid.len() {
			return Err(out_of_range(goal, grid.len()));
		}
		if self.0.len() != grid.len() {
			self.0 = vec![INT_UNREACHED; grid.len()];
		}
		self.reset(goal)?;
		if goal == INVALID_NODE_INDEX {
			return Ok(());
		}
		match strategy {
			IntegrationStrategy::Wavefront => self.propagate_wavefront(grid, cost_field, goal),
			IntegrationStrategy::Prioritised => self.propagate_prioritised(grid, cost_field, goal),
		}
	}
	/// Relax neighbours in first-in-first-out order until nothing improves
	fn propagate_wavefront(
		&mut self,
		grid: &GridGraph,
		cost_field: &CostField,
		goal: usize,
	) -> Result<(), FlowFieldError> {
		let mut queue = VecDeque::new();
		// nodes currently waiting in the queue, prevents the same node being queued over and over
		let mut pending = FixedBitSet::with_capacity(self.0.len());
		queue.push_back(goal);
		pending.insert(goal);
		let mut pops = 0;
		while let Some(current) = queue.pop_front() {
			pending.set(current, false);
			pops += 1;
			let current_cost = self.0[current];
			for connection in grid.get_node_connections(current)? {
				if let Some(candidate) = self.relax(cost_field, current_cost, connection)? {
					let n = connection.get_to();
					self.0[n] = candidate;
					if !pending.contains(n) {
						pending.insert(n);
						queue.push_back(n);
					}
				}
			}
		}
		trace!("Wavefront from {} settled after {} pops", goal, pops);
		Ok(())
	}
	/// Expand the cheapest known node first
	fn propagate_prioritised(
		&mut self,
		grid: &GridGraph,
		cost_field: &CostField,
		goal: usize,
	) -> Result<(), FlowFieldError> {
		let mut heap = BinaryHeap::new();
		heap.push(Reverse((0, goal)));
		let mut pops = 0;
		while let Some(Reverse((current_cost, current))) = heap.pop() {
			// stale entry, a cheaper route has already been expanded
			if current_cost > self.0[current] {
				continue;
			}
			pops += 1;
			for connection in grid.get_node_connections(current)? {
				if let Some(candidate) = self.relax(cost_field, current_cost, connection)? {
					let n = connection.get_to();
					self.0[n] = candidate;
					heap.push(Reverse((candidate, n)));
				}
			}
		}
		trace!("Prioritised expansion from {} settled after {} pops", goal, pops);
		Ok(())
	}
	/// Find the cost of reaching the end of `connection` from its start. [None] when the neighbour can't be entered or the route is no cheaper than what it already holds
	fn relax(
		&self,
		cost_field: &CostField,
		current_cost: u16,
		connection: &GridConnection,
	) -> Result<Option<u16>, FlowFieldError> {
		let n = connection.get_to();
		let cell_cost = cost_field.get_field_cell_value(n)?;
		// ignore impassable cells
		if cell_cost == IMPASSABLE_COST {
			return Ok(None);
		}
		let candidate = current_cost as u32 + step_cost(cell_cost, connection) as u32;
		// a route this long is indistinguishable from unreached
		if candidate >= INT_UNREACHED as u32 || candidate >= self.0[n] as u32 {
			return Ok(None);
		}
		Ok(Some(candidate as u16))
	}
}

/// Cost of entering a cell of `cell_cost` through `connection`. The connection's base cost scales the cell cost, rounded, and a step never costs less than `1`
pub fn step_cost(cell_cost: u8, connection: &GridConnection) -> u16 {
	let scaled = (cell_cost as f32 * connection.get_cost()).round();
	(scaled as u16).max(1)
}
