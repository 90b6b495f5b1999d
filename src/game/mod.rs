//! Game Module
//!
//! A small entity-component engine and the tank battle built on it.
//!
//! Key concepts:
//! - Entity: monotonic id naming a bag of components
//! - Component: plain data structs attached to entities
//! - World: type-keyed component storage plus a timed removal queue
//! - Session: which entity is the player, which level is running
//! - Systems: free functions run once per tick in a fixed order
//! - Event: per-tick reports from systems to the runtime

pub mod entity;
pub mod component;
pub mod world;
pub mod components;
pub mod session;
pub mod collision;
pub mod level;
pub mod prefabs;
pub mod event;
pub mod systems;
pub mod director;
pub mod runtime;

// Re-export main types
pub use entity::Entity;
pub use world::World;
pub use event::Events;
pub use session::Session;
pub use runtime::{GameRuntime, GameStatus, HudSnapshot};
