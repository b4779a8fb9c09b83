//! Sync notification types delivered to render-side consumers.
//!
//! The delta observer diffs consecutive snapshots and emits one
//! [`SyncEvent`] per changed entity key: `Enter` when an entity becomes
//! active, `Update` when an active entity's attributes change, `Exit`
//! when the active predicate stops holding (for coins: `exists` flips
//! to false -- the record itself is never deleted).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::entities::{Coin, Player};
use crate::grid::GridPos;
use crate::ids::PlayerId;

/// The kind of entity a sync event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum EntityKind {
    /// A player record.
    Player,
    /// A coin record.
    Coin,
}

/// The unique key of a tracked entity.
///
/// Players are keyed by account identity, coins by grid cell. The key
/// carries its kind structurally -- no string encoding or decoding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum EntityKey {
    /// Key of a player record.
    Player(PlayerId),
    /// Key of a coin record.
    Coin(GridPos),
}

impl EntityKey {
    /// Return the entity kind this key refers to.
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Player(_) => EntityKind::Player,
            Self::Coin(_) => EntityKind::Coin,
        }
    }
}

/// Renderable attributes carried by `Enter` and `Update` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum EntityAttributes {
    /// Attributes of a player.
    Player {
        /// Current grid position.
        position: GridPos,
        /// Coins collected so far.
        coins: u32,
    },
    /// Attributes of a coin.
    Coin {
        /// Grid cell the coin occupies.
        position: GridPos,
    },
}

impl EntityAttributes {
    /// Extract the renderable attributes of a player record.
    pub const fn of_player(player: &Player) -> Self {
        Self::Player {
            position: player.position,
            coins: player.coins,
        }
    }

    /// Extract the renderable attributes of a coin record.
    pub const fn of_coin(coin: &Coin) -> Self {
        Self::Coin {
            position: coin.position,
        }
    }
}

/// A single entity lifecycle notification.
///
/// Within one snapshot transition at most one event is emitted per key,
/// so an `Update` can never be observed before the `Enter` it depends
/// on. Events for different keys carry no ordering contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum SyncEvent {
    /// The entity became active (or was active at cold start).
    Enter {
        /// Entity key.
        key: EntityKey,
        /// Attributes at the moment of entry.
        attributes: EntityAttributes,
    },
    /// An active entity's attributes changed.
    Update {
        /// Entity key.
        key: EntityKey,
        /// The new attributes.
        attributes: EntityAttributes,
    },
    /// The entity's active predicate stopped holding.
    Exit {
        /// Entity key.
        key: EntityKey,
    },
}

impl SyncEvent {
    /// Return the key this event refers to.
    pub const fn key(&self) -> &EntityKey {
        match self {
            Self::Enter { key, .. } | Self::Update { key, .. } | Self::Exit { key } => key,
        }
    }

    /// Return the entity kind this event refers to.
    pub const fn kind(&self) -> EntityKind {
        self.key().kind()
    }
}
