//! Reactive synchronization layer for the Coinfield world.
//!
//! Mirrors authoritative snapshots into a locally rendered scene. The
//! layer holds only a read-only shadow of the last observed snapshot --
//! it never mutates canonical state.
//!
//! # Architecture
//!
//! - [`diff`] -- Pure diff over two immutable snapshots, producing
//!   typed `Enter`/`Update`/`Exit` events.
//! - [`observer`] -- The shadow-holding [`DeltaObserver`] and its
//!   channel-driven run loop.
//! - [`pool`] -- The [`EntityPool`]: entity keys to renderable handles
//!   with per-kind lifecycle hooks.
//!
//! # Flow
//!
//! ```text
//! gateway broadcast -> DeltaObserver::observe -> SyncEvent -> EntityPool
//! ```
//!
//! The observer reconciles from absolute state, so missed intermediate
//! snapshots coalesce safely, and a cold start replays every active
//! entity as an `Enter`.
//!
//! [`DeltaObserver`]: observer::DeltaObserver
//! [`EntityPool`]: pool::EntityPool
//! [`diff`]: diff::diff

pub mod diff;
pub mod observer;
pub mod pool;

// Re-export primary types at crate root.
pub use diff::diff;
pub use observer::{DeltaObserver, EventSink};
pub use pool::{EntityFactory, EntityPool};
