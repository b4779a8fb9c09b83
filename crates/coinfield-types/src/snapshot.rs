//! The world snapshot: complete state at one point in the transition
//! sequence.
//!
//! A [`WorldSnapshot`] is an immutable value from the engine's point of
//! view: applying an action produces a *new* snapshot, never a mutation
//! of the old one. The sync layer diffs two snapshots; the store swaps
//! them atomically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::entities::{Coin, Player};
use crate::grid::GridPos;
use crate::ids::PlayerId;

/// Complete state of all player and coin records.
///
/// `sequence` is 0 for the empty genesis snapshot and increments by one
/// per accepted transition. Coins are keyed by their cell in memory but
/// serialize as a flat list (each coin carries its position), so the
/// persisted layout has no encoded composite keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldSnapshot {
    /// Position of this snapshot in the transition sequence.
    pub sequence: u64,
    /// All player records, keyed by account identity.
    pub players: BTreeMap<PlayerId, Player>,
    /// All coin records (active and tombstoned), keyed by cell.
    #[serde(with = "coin_list")]
    #[ts(as = "Vec<Coin>")]
    pub coins: BTreeMap<GridPos, Coin>,
}

impl WorldSnapshot {
    /// The empty genesis snapshot (sequence 0, no entities).
    pub const fn genesis() -> Self {
        Self {
            sequence: 0,
            players: BTreeMap::new(),
            coins: BTreeMap::new(),
        }
    }

    /// Look up a player record. Absence is `None`, never an error.
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Look up the coin record at a cell. Absence is `None`, never an
    /// error; a tombstoned coin is still returned.
    pub fn coin_at(&self, position: GridPos) -> Option<&Coin> {
        self.coins.get(&position)
    }

    /// Iterate over the coins whose active predicate currently holds.
    pub fn active_coins(&self) -> impl Iterator<Item = &Coin> {
        self.coins.values().filter(|coin| coin.active())
    }
}

/// Serialize the coin map as a flat list and rebuild the keyed map on
/// deserialize. Each coin already carries its position, so the map keys
/// are redundant on the wire.
mod coin_list {
    use std::collections::BTreeMap;

    use serde::de::Deserializer;
    use serde::ser::Serializer;
    use serde::{Deserialize, Serialize};

    use crate::entities::Coin;
    use crate::grid::GridPos;

    /// Serialize map values in key order.
    pub fn serialize<S>(coins: &BTreeMap<GridPos, Coin>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let list: Vec<&Coin> = coins.values().collect();
        list.serialize(serializer)
    }

    /// Rebuild the map keyed by each coin's position.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<GridPos, Coin>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let list = Vec::<Coin>::deserialize(deserializer)?;
        Ok(list.into_iter().map(|coin| (coin.position, coin)).collect())
    }
}
