//! The kinds of fields used by the algorithm
//!
//! Every field is a flat array with one value per [crate::prelude::GridGraph]
//! node, addressed by node index.
//!

pub mod cost_field;
pub mod integration_field;
pub mod vector_field;

use crate::prelude::*;

/// Defines required access to field arrays
pub trait Field<T> {
	/// Get a reference to the field array
	fn get_field(&self) -> &[T];
	/// Retrieve a field cell value
	fn get_field_cell_value(&self, index: usize) -> Result<T, FlowFieldError>;
	/// Set a field cell to a value
	fn set_field_cell_value(&mut self, value: T, index: usize) -> Result<(), FlowFieldError>;
}

/// Produce the error for an index beyond the end of a field
pub(crate) fn out_of_range(index: usize, len: usize) -> FlowFieldError {
	FlowFieldError::IndexOutOfRange { index, len }
}
