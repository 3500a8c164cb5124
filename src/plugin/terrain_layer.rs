//! Logic for handling changes to the terrain of a [GridGraph] which in turn
//! invalidates the fields of any [FlowFieldPath] built from it
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Used to change the terrain of a single node of every [GridGraph]
#[derive(Event, Debug, Clone, Copy)]
pub struct EventUpdateTerrainCell {
	/// Node to update
	index: usize,
	/// The terrain the node should become
	terrain: TerrainType,
}

impl EventUpdateTerrainCell {
	/// Create a new instance of [EventUpdateTerrainCell]
	pub fn new(index: usize, terrain: TerrainType) -> Self {
		EventUpdateTerrainCell { index, terrain }
	}
	pub fn get_index(&self) -> usize {
		self.index
	}
	pub fn get_terrain(&self) -> TerrainType {
		self.terrain
	}
}

/// Notifies that terrain has been edited and the fields need rebuilding. Sent by [process_terrain_updates], a host which edits a [GridGraph] directly should send it too
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct EventTerrainEdited;

/// Read [EventUpdateTerrainCell] and apply the terrain to each [GridGraph]
#[cfg(not(tarpaulin_include))]
pub fn process_terrain_updates(
	mut events: EventReader<EventUpdateTerrainCell>,
	mut query: Query<&mut GridGraph>,
	mut event_edited: EventWriter<EventTerrainEdited>,
) {
	// coalesce events so the fields are rebuilt once however many cells change
	let mut edited = false;
	for event in events.read() {
		for mut grid in query.iter_mut() {
			match grid.set_node_terrain(event.get_index(), event.get_terrain()) {
				Ok(()) => edited = true,
				Err(e) => warn!("Terrain update rejected: {}", e),
			}
		}
	}
	if edited {
		event_edited.write(EventTerrainEdited);
	}
}

/// Rebuild the fields of every [FlowFieldPath] when its terrain has been edited
#[cfg(not(tarpaulin_include))]
pub fn rebuild_fields_on_terrain_edit(
	mut events: EventReader<EventTerrainEdited>,
	mut query: Query<(&GridGraph, &mut FlowFieldPath)>,
) {
	if events.is_empty() {
		return;
	}
	events.clear();
	for (grid, mut path) in query.iter_mut() {
		if let Err(e) = path.on_terrain_edited(grid) {
			error!("Failed rebuilding fields after terrain edit: {}", e);
		}
	}
}
