//! Defines the Bevy [Plugin] for FlowFieldGrid
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod goal_layer;
pub mod terrain_layer;

/// Ordering of the plugin systems, hosts editing terrain or choosing goals can schedule themselves around these
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum OrderingSet {
	/// Terrain edits are applied to the [GridGraph]
	Edit,
	/// Fields are rebuilt for new goals and edited terrain
	Calculate,
}

pub struct FlowFieldGridPlugin;

impl Plugin for FlowFieldGridPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<Ordinal>()
			.register_type::<TerrainType>()
			.register_type::<GridNode>()
			.register_type::<PathState>()
			.register_type::<IntegrationStrategy>()
			.add_event::<terrain_layer::EventUpdateTerrainCell>()
			.add_event::<terrain_layer::EventTerrainEdited>()
			.add_event::<goal_layer::EventSetGoal>()
			.configure_sets(Update, (OrderingSet::Edit, OrderingSet::Calculate).chain())
			.add_systems(
				Update,
				(
					terrain_layer::process_terrain_updates.in_set(OrderingSet::Edit),
					(
						terrain_layer::rebuild_fields_on_terrain_edit,
						goal_layer::process_goal_requests,
					)
						.chain()
						.in_set(OrderingSet::Calculate),
				),
			);
	}
}
