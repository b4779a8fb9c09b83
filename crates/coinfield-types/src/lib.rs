//! Shared type definitions for the Coinfield world.
//!
//! This crate is the single source of truth for all types used across
//! the Coinfield workspace. Types defined here flow downstream to
//! `TypeScript` via `ts-rs` for the rendering client.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identity wrappers (player account, transition record)
//! - [`grid`] -- World bounds, positions, and movement directions
//! - [`entities`] -- Canonical player and coin records
//! - [`actions`] -- Action requests, confirmations, and log records
//! - [`events`] -- Entity lifecycle notifications emitted by the sync layer
//! - [`snapshot`] -- The complete world state at one transition sequence point

pub mod actions;
pub mod entities;
pub mod events;
pub mod grid;
pub mod ids;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use actions::{Action, ActionRequest, Confirmation, TransitionRecord};
pub use entities::{Coin, Player};
pub use events::{EntityAttributes, EntityKey, EntityKind, SyncEvent};
pub use grid::{Direction, GridPos, WORLD_MAX, WORLD_MIN};
pub use ids::{PlayerId, TransitionId};
pub use snapshot::WorldSnapshot;
