//! `use bevy_flowfield_grid_plugin::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::flowfields::{
	fields::{cost_field::*, integration_field::*, vector_field::*, *},
	flow_field_path::*,
	grid::{terrain::*, *},
	utilities::*,
};

#[doc(hidden)]
pub use crate::{
	bundle::*,
	error::*,
	plugin::{goal_layer::*, terrain_layer::*, *},
};
