//! Authoritative state store and transition engine for the Coinfield
//! world.
//!
//! Every change to the world flows through here: a pure [`TransitionEngine`]
//! validates one action against the current [`WorldSnapshot`] and produces
//! the next snapshot or a typed rejection, the [`WorldStore`] owns the
//! canonical snapshot and the append-only [`TransitionLog`], and
//! [`persist`] writes the current snapshot to disk.
//!
//! # Architecture
//!
//! - [`transition`] -- The [`TransitionEngine`]: pure validate-and-apply.
//! - [`placement`] -- Deterministic coin placement (fixed or seeded).
//! - [`log`] -- The [`TransitionLog`]: append-only record of accepted
//!   transitions.
//! - [`store`] -- The [`WorldStore`]: canonical snapshot plus log, the
//!   single writer.
//! - [`persist`] -- JSON snapshot save/load.
//!
//! # Invariants
//!
//! 1. Every stored player position satisfies the world bounds on both
//!    axes at all times.
//! 2. A rejected action changes nothing -- the engine never yields
//!    intermediate states.
//! 3. Coin pickup is indivisible: the snapshot that moves a player onto
//!    an active coin already has the coin tombstoned and the purse
//!    incremented.
//!
//! [`WorldSnapshot`]: coinfield_types::WorldSnapshot
//! [`TransitionEngine`]: transition::TransitionEngine
//! [`TransitionLog`]: log::TransitionLog
//! [`WorldStore`]: store::WorldStore

pub mod log;
pub mod persist;
pub mod placement;
pub mod store;
pub mod transition;

// Re-export primary types at crate root.
pub use log::TransitionLog;
pub use persist::SnapshotStoreError;
pub use placement::CoinPlacement;
pub use store::WorldStore;
pub use transition::TransitionEngine;

use coinfield_types::{GridPos, PlayerId, WORLD_MAX, WORLD_MIN};

/// Rejection produced when an action fails validation.
///
/// A rejection always means the whole action was void: no partial
/// mutation is ever observable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// The action would place the player outside the valid grid.
    #[error(
        "position {attempted} for player {player} is outside the world \
         bounds [{WORLD_MIN}, {WORLD_MAX}] on at least one axis"
    )]
    OutOfBounds {
        /// The acting player.
        player: PlayerId,
        /// The position the action would have produced.
        attempted: GridPos,
    },

    /// A move was requested for a player that has never spawned.
    ///
    /// Reads of absent keys return `None`; only the mutating path
    /// rejects, because a move has no defined start position otherwise.
    #[error("player {player} has never spawned, cannot move")]
    UnknownPlayer {
        /// The acting player.
        player: PlayerId,
    },

    /// The snapshot sequence counter cannot advance.
    #[error("transition sequence overflow: cannot advance beyond u64::MAX")]
    SequenceOverflow,
}
