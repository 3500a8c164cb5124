//! Terrain classification of grid nodes and the lookup table used to turn a
//! classification into a [crate::prelude::CostField] value.
//!
//! The table is total, every [TerrainType] maps to exactly one cost:
//!
//! ```text
//!  ___________________
//! | Terrain |  Cost   |
//! |_________|_________|
//! | Default |    1    |
//! | Mud     |    5    |
//! | Water   |   255   |
//! |_________|_________|
//! ```
//!
//! `255` is impassable. Integer codes read from disk which don't correspond to
//! a known terrain decode as [TerrainType::Default] and so cost `1`.
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Classification of the ground a grid node represents
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum TerrainType {
	/// Open ground
	#[default]
	Default,
	/// Difficult ground, traversable at a higher cost
	Mud,
	/// Blocking terrain
	Water,
}

impl TerrainType {
	/// Number of terrain variants, the length of a [TerrainCostTable]
	pub const COUNT: usize = 3;
	/// Every variant in code order
	pub const ALL: [TerrainType; TerrainType::COUNT] =
		[TerrainType::Default, TerrainType::Mud, TerrainType::Water];

	/// Decode a terrain from its integer representation, unrecognised codes become [TerrainType::Default]
	pub fn from_code(code: u8) -> Self {
		TerrainType::ALL
			.get(code as usize)
			.copied()
			.unwrap_or_default()
	}
	/// Integer representation used in `csv` terrain grids
	pub fn get_code(&self) -> u8 {
		*self as u8
	}
}

/// Lookup table of the cost for each [TerrainType]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainCostTable([u8; TerrainType::COUNT]);

impl Default for TerrainCostTable {
	fn default() -> Self {
		TerrainCostTable([DEFAULT_COST, 5, IMPASSABLE_COST])
	}
}

impl TerrainCostTable {
	/// Get the cost of a terrain
	pub fn get_cost(&self, terrain: TerrainType) -> u8 {
		self.0[terrain as usize]
	}
	/// Override the cost of a terrain. Costs are never below `1`, a `0` is raised to `1`
	pub fn set_cost(&mut self, terrain: TerrainType, cost: u8) {
		self.0[terrain as usize] = cost.max(DEFAULT_COST);
	}
	/// Is the terrain impassable under this table
	pub fn is_impassable(&self, terrain: TerrainType) -> bool {
		self.get_cost(terrain) == IMPASSABLE_COST
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn default_table_costs() {
		let table = TerrainCostTable::default();
		assert_eq!(1, table.get_cost(TerrainType::Default));
		assert_eq!(5, table.get_cost(TerrainType::Mud));
		assert_eq!(255, table.get_cost(TerrainType::Water));
	}
	#[test]
	fn table_is_total() {
		let table = TerrainCostTable::default();
		for terrain in TerrainType::ALL.iter() {
			let cost = table.get_cost(*terrain);
			assert!(cost >= 1);
		}
	}
	#[test]
	fn only_water_is_impassable() {
		let table = TerrainCostTable::default();
		let result: Vec<bool> = TerrainType::ALL
			.iter()
			.map(|t| table.is_impassable(*t))
			.collect();
		assert_eq!(vec![false, false, true], result);
	}
	#[test]
	fn zero_cost_is_raised() {
		let mut table = TerrainCostTable::default();
		table.set_cost(TerrainType::Mud, 0);
		assert_eq!(1, table.get_cost(TerrainType::Mud));
	}
	#[test]
	fn custom_cost() {
		let mut table = TerrainCostTable::default();
		table.set_cost(TerrainType::Water, 40);
		assert_eq!(40, table.get_cost(TerrainType::Water));
		assert!(!table.is_impassable(TerrainType::Water));
	}
	#[test]
	fn codes_round_trip() {
		for terrain in TerrainType::ALL.iter() {
			assert_eq!(*terrain, TerrainType::from_code(terrain.get_code()));
		}
	}
	#[test]
	fn unknown_code_is_default() {
		assert_eq!(TerrainType::Default, TerrainType::from_code(9));
		assert_eq!(TerrainType::Default, TerrainType::from_code(255));
	}
}
