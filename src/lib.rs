//! This is a plugin for Bevy game engine to setup and handle the logic for calculating flow fields across a uniform grid
//!

pub mod bundle;
pub mod error;
pub mod flowfields;
pub mod plugin;

pub mod prelude;
