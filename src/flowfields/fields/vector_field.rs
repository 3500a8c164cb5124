//! A [VectorField] is an array of 8-bit values, one per grid node. The various bit values
//! associated with it indicate a direction of movement and flags to identify
//! what's a goal and what's pathable. A steering pipeline/character
//! controller should read and interpret a [VectorField] to provide movement.
//!
//! Each cell points at the neighbour with the lowest [IntegrationField] value, so following the directions cell by cell descends towards the goal. For a `3x3` grid with a goal in the centre:
//!
//! ```text
//!  _________________
//! |     |     |     |
//! | SE  |  S  | SW  |
//! |_____|_____|_____|
//! |     |     |     |
//! |  E  |  G  |  W  |
//! |_____|_____|_____|
//! |     |     |     |
//! | NE  |  N  | NW  |
//! |_____|_____|_____|
//! ```
//!
//! The lower 4 bits of a cell hold the direction, the upper 4 bits hold flags:
//!
//! ```text
//! 0b0100_0000 <- goal
//! 0b0001_0000 <- pathable, the cell was reached by the integration wavefront
//! 0b0000_1111 <- direction
//! ```
//!
//! A cell of `0` has no direction and isn't pathable, it was never reached (walled off, impassable or no goal has been set).
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Bit to indicate a northerly direction
const BITS_NORTH: u8 = 0b0000_0001;
/// Bit to indicate an easterly direction
const BITS_EAST: u8 = 0b0000_0010;
/// Bit to indicate a southerly direction
const BITS_SOUTH: u8 = 0b0000_0100;
/// Bit to indicate a westerly direction
const BITS_WEST: u8 = 0b0000_1000;
/// Bit to indicate a north-easterly direction
const BITS_NORTH_EAST: u8 = 0b0000_0011;
/// Bit to indicate a south-easterly direction
const BITS_SOUTH_EAST: u8 = 0b0000_0110;
/// Bit to indicate south-westerly direction
const BITS_SOUTH_WEST: u8 = 0b0000_1100;
/// Bit to indicate a north-westerly direction
const BITS_NORTH_WEST: u8 = 0b0000_1001;
/// Bit to indicate no direction
const BITS_ZERO: u8 = 0b0000_0000;
/// Mask of the direction bits
const BITS_DIRECTION: u8 = 0b0000_1111;
/// Flags a pathable field cell
const BITS_PATHABLE: u8 = 0b0001_0000;
/// Flags a field cell as being the goal
const BITS_GOAL: u8 = 0b0100_0000;

/// Convert an [Ordinal] to a bit representation
pub fn convert_ordinal_to_bits_dir(ordinal: Ordinal) -> u8 {
	match ordinal {
		Ordinal::North => BITS_NORTH,
		Ordinal::East => BITS_EAST,
		Ordinal::South => BITS_SOUTH,
		Ordinal::West => BITS_WEST,
		Ordinal::NorthEast => BITS_NORTH_EAST,
		Ordinal::SouthEast => BITS_SOUTH_EAST,
		Ordinal::SouthWest => BITS_SOUTH_WEST,
		Ordinal::NorthWest => BITS_NORTH_WEST,
		Ordinal::Zero => BITS_ZERO,
	}
}

#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorField(Vec<u8>);

impl Field<u8> for VectorField {
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

impl VectorField {
	/// Create a new [VectorField] of `size` cells with no direction
	pub fn new(size: usize) -> Self {
		VectorField(vec![BITS_ZERO; size])
	}
	/// Clear every cell back to no direction
	pub fn reset(&mut self) {
		self.0.iter_mut().for_each(|c| *c = BITS_ZERO);
	}
	/// Calculate the [VectorField] from an [IntegrationField]. Each reached cell points towards the connected neighbour with the strictly lowest integration value, neighbours are inspected in [DIRECTION_PRIORITY] order so the first one found wins a tie
	pub fn calculate(
		&mut self,
		grid: &GridGraph,
		integration_field: &IntegrationField,
	) -> Result<(), FlowFieldError> {
		if integration_field.get_field().len() != grid.len() {
			return Err(FlowFieldError::LayoutMismatch {
				expected: grid.len(),
				found: integration_field.get_field().len(),
			});
		}
		self.0.clear();
		self.0.resize(grid.len(), BITS_ZERO);
		for (index, current_cost) in integration_field.get_field().iter().enumerate() {
			if *current_cost == INT_UNREACHED {
				continue;
			}
			if *current_cost == 0 {
				self.0[index] = BITS_GOAL | BITS_PATHABLE;
				continue;
			}
			let mut cheapest_value = *current_cost;
			let mut cheapest_ordinal = Ordinal::Zero;
			for connection in grid.get_node_connections(index)? {
				let value = integration_field.get_field_cell_value(connection.get_to())?;
				if value >= cheapest_value {
					continue;
				}
				cheapest_value = value;
				cheapest_ordinal = connection.get_ordinal();
			}
			self.0[index] = BITS_PATHABLE | convert_ordinal_to_bits_dir(cheapest_ordinal);
		}
		Ok(())
	}
	/// Get the direction of movement out of a cell
	pub fn get_direction(&self, index: usize) -> Result<Ordinal, FlowFieldError> {
		Ok(get_ordinal_from_bits(self.get_field_cell_value(index)?))
	}
}

/// Can the cell be used to reach the goal
pub fn is_pathable(cell_value: u8) -> bool {
	cell_value & BITS_PATHABLE == BITS_PATHABLE
}
/// Is the cell the goal
pub fn is_goal(cell_value: u8) -> bool {
	cell_value & BITS_GOAL == BITS_GOAL
}
/// Decode the direction bits of a cell, unrecognised bits decode as [Ordinal::Zero]
pub fn get_ordinal_from_bits(cell_value: u8) -> Ordinal {
	match cell_value & BITS_DIRECTION {
		BITS_NORTH => Ordinal::North,
		BITS_EAST => Ordinal::East,
		BITS_SOUTH => Ordinal::South,
		BITS_WEST => Ordinal::West,
		BITS_NORTH_EAST => Ordinal::NorthEast,
		BITS_SOUTH_EAST => Ordinal::SouthEast,
		BITS_SOUTH_WEST => Ordinal::SouthWest,
		BITS_NORTH_WEST => Ordinal::NorthWest,
		_ => Ordinal::Zero,
	}
}
/// Decode the direction bits of a cell into a normalised world-space vector, north is `+y`
pub fn get_2d_direction_unit_vector_from_bits(cell_value: u8) -> Vec2 {
	let (x, y) = get_ordinal_from_bits(cell_value).get_offset();
	// rows grow towards -y so the row offset is flipped
	Vec2::new(x as f32, -y as f32).normalize_or_zero()
}
