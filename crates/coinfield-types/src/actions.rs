//! Action request, confirmation, and transition log record types.
//!
//! An [`ActionRequest`] is what a client submits to the gateway; a
//! [`Confirmation`] is what it gets back once the sequencer has applied
//! the transition; a [`TransitionRecord`] is the append-only log entry
//! the engine writes for every accepted transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::grid::{Direction, GridPos};
use crate::ids::{PlayerId, TransitionId};

/// One of the three actions the transition engine understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Action {
    /// Place the acting player at a position, creating the record if
    /// this is the player's first spawn.
    Spawn {
        /// Target position.
        position: GridPos,
    },
    /// Step the acting player one cell in a direction. Picks up a coin
    /// at the destination atomically if one is active there.
    Move {
        /// Step direction.
        direction: Direction,
    },
    /// Assert the configured coin placement: every placement cell gets
    /// an active coin. Idempotent.
    GenerateCoins,
}

/// A submitted action together with the acting player's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActionRequest {
    /// The acting player.
    pub player: PlayerId,
    /// The requested action.
    pub action: Action,
}

impl ActionRequest {
    /// Build a request for the given player and action.
    pub const fn new(player: PlayerId, action: Action) -> Self {
        Self { player, action }
    }
}

/// Confirmation returned once a submitted action has been sequenced and
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Confirmation {
    /// Sequence number of the snapshot this transition produced.
    pub sequence: u64,
    /// Identifier of the transition log record.
    pub transition_id: TransitionId,
}

/// One entry in the append-only transition log.
///
/// Records are never modified or deleted; replaying them against an
/// empty snapshot reconstructs the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TransitionRecord {
    /// Unique record identifier (UUID v7, time-ordered).
    pub id: TransitionId,
    /// Sequence number of the snapshot this transition produced.
    pub sequence: u64,
    /// The acting player.
    pub player: PlayerId,
    /// The applied action.
    pub action: Action,
    /// Wall-clock time the record was appended.
    pub recorded_at: DateTime<Utc>,
}
