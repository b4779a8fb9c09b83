//! Canonical entity records held by the world state store.
//!
//! Two entity kinds exist: [`Player`] (keyed by account identity) and
//! [`Coin`] (keyed by grid cell). Players persist for the process
//! lifetime once spawned; coins are tombstoned via their `exists` flag
//! rather than removed from the keyspace.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::grid::GridPos;
use crate::ids::PlayerId;

/// A player record in the authoritative state store.
///
/// Created on first `spawn`, mutated by `spawn` and `move`, never
/// deleted. The transition engine guarantees `position.in_bounds()`
/// for every stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Player {
    /// Account identity (entity key).
    pub id: PlayerId,
    /// Current grid position.
    pub position: GridPos,
    /// Number of coins collected. Never decreases.
    pub coins: u32,
}

impl Player {
    /// Create a freshly spawned player with an empty purse.
    pub const fn spawned(id: PlayerId, position: GridPos) -> Self {
        Self {
            id,
            position,
            coins: 0,
        }
    }
}

/// A coin record in the authoritative state store.
///
/// At most one coin record exists per grid cell. Pickup flips `exists`
/// to `false`; the record itself stays in the keyspace as a tombstone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Coin {
    /// Grid cell this coin occupies (entity key).
    pub position: GridPos,
    /// Whether the coin is currently collectible.
    pub exists: bool,
}

impl Coin {
    /// Create a collectible coin at the given cell.
    pub const fn placed(position: GridPos) -> Self {
        Self {
            position,
            exists: true,
        }
    }

    /// The active predicate: a coin counts as present for sync and
    /// render purposes only while `exists` is true.
    pub const fn active(&self) -> bool {
        self.exists
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_player_has_no_coins() {
        let player = Player::spawned(PlayerId::new("alice"), GridPos::new(3, -4));
        assert_eq!(player.coins, 0);
        assert_eq!(player.position, GridPos::new(3, -4));
    }

    #[test]
    fn tombstoned_coin_is_inactive() {
        let mut coin = Coin::placed(GridPos::new(1, 0));
        assert!(coin.active());
        coin.exists = false;
        assert!(!coin.active());
    }
}
