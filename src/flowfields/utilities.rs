//! Useful structures and tools used by the grid and fields
//!

use bevy::prelude::*;

/// Sentinel node index meaning "no node", returned for world positions outside of the grid and used to clear a goal
pub const INVALID_NODE_INDEX: usize = usize::MAX;
/// Cost of a cell which can never be entered
pub const IMPASSABLE_COST: u8 = 255;
/// Cost of a cell of ordinary terrain
pub const DEFAULT_COST: u8 = 1;
/// Initial value of every [crate::prelude::IntegrationField] cell, a cell still holding this after propagation cannot reach the goal
pub const INT_UNREACHED: u16 = 60000;

/// Order in which neighbouring cells are enumerated. Connections of a [crate::prelude::GridGraph] node are stored in this order and the [crate::prelude::VectorField] picks the first of any equally cheap neighbours, which makes the chosen directions deterministic
pub const DIRECTION_PRIORITY: [Ordinal; 8] = [
	Ordinal::North,
	Ordinal::NorthEast,
	Ordinal::East,
	Ordinal::SouthEast,
	Ordinal::South,
	Ordinal::SouthWest,
	Ordinal::West,
	Ordinal::NorthWest,
];

/// Convenience way of accessing the 4 orthogonal and 4 diagonal neighbours of a grid node and the 8 directions
/// of movement in [crate::prelude::VectorField]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Reflect)]
pub enum Ordinal {
	North,
	East,
	South,
	West,
	NorthEast,
	SouthEast,
	SouthWest,
	NorthWest,
	/// Special case, used to indicate a cell with no direction in the [crate::prelude::VectorField] (unreached, the goal or a local minimum)
	Zero,
}

impl Ordinal {
	/// The `(column, row)` step taken when moving in this direction. Rows grow southwards so north is a negative row step
	pub fn get_offset(&self) -> (i64, i64) {
		match self {
			Ordinal::North => (0, -1),
			Ordinal::East => (1, 0),
			Ordinal::South => (0, 1),
			Ordinal::West => (-1, 0),
			Ordinal::NorthEast => (1, -1),
			Ordinal::SouthEast => (1, 1),
			Ordinal::SouthWest => (-1, 1),
			Ordinal::NorthWest => (-1, -1),
			Ordinal::Zero => (0, 0),
		}
	}
	/// Is this one of the four diagonal directions
	pub fn is_diagonal(&self) -> bool {
		matches!(
			self,
			Ordinal::NorthEast | Ordinal::SouthEast | Ordinal::SouthWest | Ordinal::NorthWest
		)
	}
	/// For a diagonal direction get the two orthogonal directions either side of it, i.e `NorthEast` is flanked by `North` and `East`. Orthogonal directions and [Ordinal::Zero] have no flanks
	pub fn get_flanking_ordinals(&self) -> Option<(Ordinal, Ordinal)> {
		match self {
			Ordinal::NorthEast => Some((Ordinal::North, Ordinal::East)),
			Ordinal::SouthEast => Some((Ordinal::South, Ordinal::East)),
			Ordinal::SouthWest => Some((Ordinal::South, Ordinal::West)),
			Ordinal::NorthWest => Some((Ordinal::North, Ordinal::West)),
			_ => None,
		}
	}
	/// Returns the opposite [Ordinal] of the current
	pub fn inverse(&self) -> Ordinal {
		match self {
			Ordinal::North => Ordinal::South,
			Ordinal::East => Ordinal::West,
			Ordinal::South => Ordinal::North,
			Ordinal::West => Ordinal::East,
			Ordinal::NorthEast => Ordinal::SouthWest,
			Ordinal::SouthEast => Ordinal::NorthWest,
			Ordinal::SouthWest => Ordinal::NorthEast,
			Ordinal::NorthWest => Ordinal::SouthEast,
			Ordinal::Zero => Ordinal::Zero,
		}
	}
	/// For two cells next to each other it can be useful to find the [Ordinal] pointing from the `source` to the `target`. Cells are `(column, row)` pairs. Returns [None] if the cells are not orthogonally or diagonally adjacent
	pub fn cell_to_cell_direction(target: (usize, usize), source: (usize, usize)) -> Option<Self> {
		let direction = (
			target.0 as i64 - source.0 as i64,
			target.1 as i64 - source.1 as i64,
		);
		DIRECTION_PRIORITY
			.iter()
			.find(|ord| ord.get_offset() == direction)
			.copied()
	}
}
