//! Logic for choosing the goal a [FlowFieldPath] leads towards
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Request a new goal for every [FlowFieldPath]
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum EventSetGoal {
	/// Goal by node index, [INVALID_NODE_INDEX] clears the goal
	Index(usize),
	/// Goal at the node containing a world position, outside of the grid clears the goal
	WorldPosition(Vec2),
	/// Remove the goal
	Clear,
}

/// Read [EventSetGoal] and rebuild the fields for the new goal
#[cfg(not(tarpaulin_include))]
pub fn process_goal_requests(
	mut events: EventReader<EventSetGoal>,
	mut query: Query<(&GridGraph, &mut FlowFieldPath)>,
) {
	// only the latest request of a frame matters
	let Some(request) = events.read().last().copied() else {
		return;
	};
	for (grid, mut path) in query.iter_mut() {
		let result = match request {
			EventSetGoal::Index(index) => path.set_goal(grid, index),
			EventSetGoal::WorldPosition(position) => path.set_goal_at_world_position(grid, position),
			EventSetGoal::Clear => path.set_goal(grid, INVALID_NODE_INDEX),
		};
		if let Err(e) = result {
			warn!("Goal request {:?} rejected: {}", request, e);
		}
	}
}
