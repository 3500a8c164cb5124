//! Errors raised when building a grid or accessing its fields
//!
//! Unreachable cells are not errors, they are represented in-band by
//! [crate::prelude::INT_UNREACHED] and [crate::prelude::Ordinal::Zero]. Likewise
//! asking for a goal of [crate::prelude::INVALID_NODE_INDEX] is a documented
//! no-op rather than a failure.

use thiserror::Error;

/// Failure modes of the grid, its fields and the loaders
#[derive(Debug, Error)]
pub enum FlowFieldError {
	/// A node index fell outside of `[0, len)`
	#[error("index out of bounds, asked for index {index} but the grid has {len} nodes")]
	IndexOutOfRange {
		/// The requested index
		index: usize,
		/// Number of nodes in the grid
		len: usize,
	},
	/// A grid needs at least one column and one row
	#[error("grid dimensions `({columns}, {rows})` are invalid, both must be greater than zero")]
	InvalidDimensions {
		/// Requested number of columns
		columns: usize,
		/// Requested number of rows
		rows: usize,
	},
	/// The world-space size of a cell must be a positive finite number
	#[error("cell size {0} is invalid, it must be positive and finite")]
	InvalidCellSize(f32),
	/// Terrain data loaded for a grid does not match its dimensions
	#[error("terrain layout holds {found} cells but the grid requires {expected}")]
	LayoutMismatch {
		/// `columns * rows` of the grid
		expected: usize,
		/// Number of terrain cells supplied
		found: usize,
	},
	/// A terrain value on disk could not be parsed as an integer code
	#[error("terrain code `{0}` could not be parsed")]
	InvalidTerrainCode(String),
	/// Failed to open a layout file
	#[error("failed opening layout file: {0}")]
	Io(#[from] std::io::Error),
	/// Failed deserialising a `ron` layout
	#[cfg(feature = "ron")]
	#[error("failed deserializing GridLayout: {0}")]
	Ron(#[from] ron::error::SpannedError),
	/// Failed reading a `csv` terrain grid
	#[cfg(feature = "csv")]
	#[error("failed reading terrain csv: {0}")]
	Csv(#[from] csv::Error),
}
