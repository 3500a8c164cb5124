//! The world is represented as a uniform grid of `columns x rows` nodes. Each
//! node is identified by an index and has a terrain classification, the node
//! `(column, row)` position is derived from the index:
//!
//! ```text
//! row = index / columns
//! column = index % columns
//! ```
//!
//! For a `4x3` grid:
//!
//! ```text
//!  _______________________
//! |     |     |     |     |
//! |  0  |  1  |  2  |  3  |
//! |_____|_____|_____|_____|
//! |     |     |     |     |
//! |  4  |  5  |  6  |  7  |
//! |_____|_____|_____|_____|
//! |     |     |     |     |
//! |  8  |  9  | 10  | 11  |
//! |_____|_____|_____|_____|
//! ```
//!
//! Every node is connected to its orthogonal neighbours and, optionally, to its
//! diagonal neighbours. The connections are built once and never change, editing
//! terrain only changes the classification which a [CostField] reads.
//!
//! In world space the grid is centred on the origin, the top left corner of node
//! `0` sits at `(-width / 2, height / 2)` with columns heading towards `+x` and
//! rows heading towards `-y`.
//!

pub mod terrain;

use crate::prelude::*;
use bevy::prelude::*;

/// Base cost of moving between orthogonally adjacent nodes
pub const ORTHOGONAL_CONNECTION_COST: f32 = 1.0;
/// Base cost of moving between diagonally adjacent nodes when connections are cost based
pub const DIAGONAL_CONNECTION_COST: f32 = 1.5;

/// A single cell of the grid
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct GridNode {
	/// Position of the node within the grid
	index: usize,
	/// What the node is made of
	terrain: TerrainType,
}

impl GridNode {
	/// Get the index of the node
	pub fn get_index(&self) -> usize {
		self.index
	}
	/// Get the terrain of the node
	pub fn get_terrain(&self) -> TerrainType {
		self.terrain
	}
}

/// A directed edge from one node to an adjacent node
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct GridConnection {
	/// Node the connection leaves
	from: usize,
	/// Node the connection enters
	to: usize,
	/// Base cost of traversing the connection
	cost: f32,
	/// Direction of travel from `from` to `to`
	ordinal: Ordinal,
}

impl GridConnection {
	/// Get the node the connection starts from
	pub fn get_from(&self) -> usize {
		self.from
	}
	/// Get the node the connection leads to
	pub fn get_to(&self) -> usize {
		self.to
	}
	/// Get the base traversal cost
	pub fn get_cost(&self) -> f32 {
		self.cost
	}
	/// Get the direction of travel
	pub fn get_ordinal(&self) -> Ordinal {
		self.ordinal
	}
}

/// Grid of nodes with fixed connectivity, the leaf of the pathfinding pipeline
#[derive(Component, Clone, Debug)]
pub struct GridGraph {
	/// Number of nodes along the `x` axis
	columns: usize,
	/// Number of nodes along the `y` axis
	rows: usize,
	/// World-space length of a side of a node
	cell_size: f32,
	/// Whether nodes connect to their diagonal neighbours
	diagonals_allowed: bool,
	/// When `true` diagonal connections cost [DIAGONAL_CONNECTION_COST], otherwise every connection costs [ORTHOGONAL_CONNECTION_COST]
	cost_based_connections: bool,
	/// Every node, position in the list is the node index
	nodes: Vec<GridNode>,
	/// Outgoing connections of each node in [DIRECTION_PRIORITY] order
	connections: Vec<Vec<GridConnection>>,
}

impl GridGraph {
	/// Create a new [GridGraph] of `columns x rows` nodes, all of [TerrainType::Default]
	pub fn new(
		columns: usize,
		rows: usize,
		cell_size: f32,
		diagonals_allowed: bool,
		cost_based_connections: bool,
	) -> Result<Self, FlowFieldError> {
		let len = columns
			.checked_mul(rows)
			.filter(|len| *len > 0)
			.ok_or(FlowFieldError::InvalidDimensions { columns, rows })?;
		if !cell_size.is_finite() || cell_size <= 0.0 {
			return Err(FlowFieldError::InvalidCellSize(cell_size));
		}
		let nodes = (0..len)
			.map(|index| GridNode {
				index,
				terrain: TerrainType::Default,
			})
			.collect();
		let mut graph = GridGraph {
			columns,
			rows,
			cell_size,
			diagonals_allowed,
			cost_based_connections,
			nodes,
			connections: Vec::new(),
		};
		let connections = (0..len)
			.map(|index| graph.build_connections(index))
			.collect();
		graph.connections = connections;
		Ok(graph)
	}
	/// Find each valid neighbour of a node and describe the connection to it
	fn build_connections(&self, index: usize) -> Vec<GridConnection> {
		let mut connections = Vec::new();
		let (column, row) = (index % self.columns, index / self.columns);
		for ordinal in DIRECTION_PRIORITY.iter() {
			if ordinal.is_diagonal() && !self.diagonals_allowed {
				continue;
			}
			if let Some(to) = self.step(column, row, *ordinal) {
				let cost = if ordinal.is_diagonal() && self.cost_based_connections {
					DIAGONAL_CONNECTION_COST
				} else {
					ORTHOGONAL_CONNECTION_COST
				};
				connections.push(GridConnection {
					from: index,
					to,
					cost,
					ordinal: *ordinal,
				});
			}
		}
		connections
	}
	/// From a `(column, row)` take one step in the direction of `ordinal`, [None] if it leaves the grid
	fn step(&self, column: usize, row: usize, ordinal: Ordinal) -> Option<usize> {
		let (dc, dr) = ordinal.get_offset();
		let c = column as i64 + dc;
		let r = row as i64 + dr;
		if c < 0 || r < 0 || c >= self.columns as i64 || r >= self.rows as i64 {
			None
		} else {
			Some(r as usize * self.columns + c as usize)
		}
	}
	/// Ensure an index refers to a node
	fn check_index(&self, index: usize) -> Result<(), FlowFieldError> {
		if index >= self.nodes.len() {
			Err(FlowFieldError::IndexOutOfRange {
				index,
				len: self.nodes.len(),
			})
		} else {
			Ok(())
		}
	}
	pub fn get_columns(&self) -> usize {
		self.columns
	}
	pub fn get_rows(&self) -> usize {
		self.rows
	}
	pub fn get_cell_size(&self) -> f32 {
		self.cell_size
	}
	pub fn is_diagonals_allowed(&self) -> bool {
		self.diagonals_allowed
	}
	pub fn is_cost_based_connections(&self) -> bool {
		self.cost_based_connections
	}
	/// Number of nodes in the grid
	pub fn len(&self) -> usize {
		self.nodes.len()
	}
	/// A grid always holds at least one node
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
	/// World-space `(width, height)` covered by the grid
	pub fn get_world_size(&self) -> Vec2 {
		Vec2::new(
			self.columns as f32 * self.cell_size,
			self.rows as f32 * self.cell_size,
		)
	}
	/// Get a node by its index
	pub fn get_node(&self, index: usize) -> Result<&GridNode, FlowFieldError> {
		self.check_index(index)?;
		Ok(&self.nodes[index])
	}
	/// Get every node of the grid, ordered by index
	pub fn get_all_nodes(&self) -> &[GridNode] {
		&self.nodes
	}
	/// Get the outgoing connections of a node, these are ordered by [DIRECTION_PRIORITY]
	pub fn get_node_connections(&self, index: usize) -> Result<&[GridConnection], FlowFieldError> {
		self.check_index(index)?;
		Ok(&self.connections[index])
	}
	/// Get the terrain of a node
	pub fn get_node_terrain(&self, index: usize) -> Result<TerrainType, FlowFieldError> {
		Ok(self.get_node(index)?.terrain)
	}
	/// Change the terrain of a node, the connections of the grid are left untouched
	pub fn set_node_terrain(
		&mut self,
		index: usize,
		terrain: TerrainType,
	) -> Result<(), FlowFieldError> {
		self.check_index(index)?;
		self.nodes[index].terrain = terrain;
		Ok(())
	}
	/// Get the `(column, row)` of a node
	pub fn get_column_row(&self, index: usize) -> Result<(usize, usize), FlowFieldError> {
		self.check_index(index)?;
		Ok((index % self.columns, index / self.columns))
	}
	/// Get the index of the node at `(column, row)`, [None] if the position is outside of the grid
	pub fn get_index(&self, column: usize, row: usize) -> Option<usize> {
		if column < self.columns && row < self.rows {
			Some(row * self.columns + column)
		} else {
			None
		}
	}
	/// Get the neighbour of a node in the direction of `ordinal`. The neighbour is [None] when it would be outside of the grid or, for diagonals, when the grid doesn't connect diagonally
	pub fn get_neighbour(
		&self,
		index: usize,
		ordinal: Ordinal,
	) -> Result<Option<usize>, FlowFieldError> {
		Ok(self
			.get_node_connections(index)?
			.iter()
			.find(|c| c.ordinal == ordinal)
			.map(|c| c.to))
	}
	/// For a diagonal move out of `index` find the two orthogonal neighbours either side of it, i.e moving north-east is flanked by the northern and eastern nodes
	///
	/// ```text
	///  _____ _____
	/// |     |     |
	/// |  N  | NE  |
	/// |_____|_____|
	/// |     |     |
	/// |  o  |  E  |
	/// |_____|_____|
	/// ```
	///
	/// Returns [None] for orthogonal directions or when the diagonal leaves the grid
	pub fn get_flanking_nodes(
		&self,
		index: usize,
		ordinal: Ordinal,
	) -> Result<Option<(usize, usize)>, FlowFieldError> {
		let (column, row) = self.get_column_row(index)?;
		if let Some((a, b)) = ordinal.get_flanking_ordinals() {
			if self.step(column, row, ordinal).is_some() {
				if let (Some(first), Some(second)) =
					(self.step(column, row, a), self.step(column, row, b))
				{
					return Ok(Some((first, second)));
				}
			}
		}
		Ok(None)
	}
	/// From a position in 2D `x, y` space find the index of the node that the point resides in. A position outside of the grid gives [INVALID_NODE_INDEX]
	pub fn get_node_index_at_world_position(&self, position: Vec2) -> usize {
		let size = self.get_world_size();
		// translate into a coordinate system with a (0, 0) origin in the top left of the grid
		let x_origin = position.x + size.x / 2.0;
		let y_origin = size.y / 2.0 - position.y;
		if !(0.0..=size.x).contains(&x_origin) || !(0.0..=size.y).contains(&y_origin) {
			return INVALID_NODE_INDEX;
		}
		// safety for x-y being at the exact limits of the grid
		let column = ((x_origin / self.cell_size).floor() as usize).min(self.columns - 1);
		let row = ((y_origin / self.cell_size).floor() as usize).min(self.rows - 1);
		row * self.columns + column
	}
	/// Get the world-space position of the centre of a node
	pub fn get_node_world_position(&self, index: usize) -> Result<Vec2, FlowFieldError> {
		let (column, row) = self.get_column_row(index)?;
		let size = self.get_world_size();
		let half_cell = self.cell_size / 2.0;
		Ok(Vec2::new(
			-size.x / 2.0 + column as f32 * self.cell_size + half_cell,
			size.y / 2.0 - row as f32 * self.cell_size - half_cell,
		))
	}
}

/// Serialisable description of a grid, its connectivity and terrain
#[cfg(feature = "serde")]
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct GridLayout {
	/// Number of nodes along the `x` axis
	pub columns: usize,
	/// Number of nodes along the `y` axis
	pub rows: usize,
	/// World-space length of a side of a node
	pub cell_size: f32,
	/// Whether nodes connect to their diagonal neighbours
	pub diagonals_allowed: bool,
	/// Whether diagonal connections are more costly than orthogonal ones
	pub cost_based_connections: bool,
	/// Terrain of each node ordered by index
	pub terrain: Vec<TerrainType>,
}

#[cfg(feature = "serde")]
impl GridGraph {
	/// Create a [GridGraph] from a [GridLayout]
	pub fn from_layout(layout: &GridLayout) -> Result<Self, FlowFieldError> {
		let mut graph = GridGraph::new(
			layout.columns,
			layout.rows,
			layout.cell_size,
			layout.diagonals_allowed,
			layout.cost_based_connections,
		)?;
		if layout.terrain.len() != graph.len() {
			return Err(FlowFieldError::LayoutMismatch {
				expected: graph.len(),
				found: layout.terrain.len(),
			});
		}
		for (node, terrain) in graph.nodes.iter_mut().zip(layout.terrain.iter()) {
			node.terrain = *terrain;
		}
		Ok(graph)
	}
	/// Describe the grid as a [GridLayout]
	pub fn to_layout(&self) -> GridLayout {
		GridLayout {
			columns: self.columns,
			rows: self.rows,
			cell_size: self.cell_size,
			diagonals_allowed: self.diagonals_allowed,
			cost_based_connections: self.cost_based_connections,
			terrain: self.nodes.iter().map(|n| n.terrain).collect(),
		}
	}
	/// From a `ron` file of a [GridLayout] generate the [GridGraph]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> Result<Self, FlowFieldError> {
		let file = std::fs::File::open(path)?;
		let layout: GridLayout = ron::de::from_reader(file)?;
		GridGraph::from_layout(&layout)
	}
	/// From a `csv` file of terrain codes generate the [GridGraph]. Each line of the file is a row of the grid starting from the top (northern) row, each value is a [TerrainType] code
	#[cfg(feature = "csv")]
	pub fn from_csv(
		path: &str,
		cell_size: f32,
		diagonals_allowed: bool,
		cost_based_connections: bool,
	) -> Result<Self, FlowFieldError> {
		let data = std::fs::File::open(path)?;
		let mut rdr = csv::ReaderBuilder::new()
			.has_headers(false)
			.trim(csv::Trim::All)
			.from_reader(data);
		let mut terrain = Vec::new();
		let mut rows = 0;
		for record in rdr.records() {
			let record = record?;
			for value in record.iter() {
				let code: u8 = value
					.parse()
					.map_err(|_| FlowFieldError::InvalidTerrainCode(value.to_string()))?;
				terrain.push(TerrainType::from_code(code));
			}
			rows += 1;
		}
		let columns = if rows == 0 { 0 } else { terrain.len() / rows };
		GridGraph::from_layout(&GridLayout {
			columns,
			rows,
			cell_size,
			diagonals_allowed,
			cost_based_connections,
			terrain,
		})
	}
}
