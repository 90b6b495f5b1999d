//! Simulation Systems
//!
//! Each system is a free function (or a small struct when it keeps local
//! state) that runs once per tick. The runtime calls them in a fixed
//! order; see `runtime::GameRuntime::tick`.
//!
//! Systems never fail. An entity missing a component it needs (usually
//! because an earlier system removed it this tick) is skipped.

pub mod movement;
pub mod shooting;
pub mod combat;
pub mod powerup;
pub mod spawn;
pub mod explosion;

pub use spawn::EnemySpawner;
