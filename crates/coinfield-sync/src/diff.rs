//! Pure diff over two immutable snapshots.
//!
//! The diff is the reactive core of the sync layer: given the
//! previously observed snapshot (the shadow) and the current one, it
//! computes the entity lifecycle events that turn the one scene into
//! the other. It reconciles from absolute state -- never from assumed
//! deltas -- so skipping any number of intermediate snapshots still
//! produces a correct result.

use coinfield_types::{Coin, EntityAttributes, EntityKey, SyncEvent, WorldSnapshot};

/// Compute the lifecycle events between `previous` and `current`.
///
/// `previous = None` is a cold start: every currently active entity is
/// replayed as an `Enter`.
///
/// Per key: absent-or-inactive before and active now is `Enter`; active
/// in both with changed attributes is `Update`; active before and
/// inactive now is `Exit`. Players are active whenever present (records
/// are never deleted); a coin is active while its `exists` flag holds.
///
/// At most one event is emitted per key, so same-key ordering is
/// trivially preserved. Across keys the output is deterministic --
/// players first, then coins, each in key order -- but consumers must
/// not rely on that order.
pub fn diff(previous: Option<&WorldSnapshot>, current: &WorldSnapshot) -> Vec<SyncEvent> {
    let mut events = Vec::new();

    for (id, player) in &current.players {
        let key = EntityKey::Player(id.clone());
        let attributes = EntityAttributes::of_player(player);
        match previous.and_then(|shadow| shadow.players.get(id)) {
            None => events.push(SyncEvent::Enter { key, attributes }),
            Some(observed) if observed != player => {
                events.push(SyncEvent::Update { key, attributes });
            }
            Some(_) => {}
        }
    }

    for (position, coin) in &current.coins {
        let was_active = previous
            .and_then(|shadow| shadow.coins.get(position))
            .is_some_and(Coin::active);
        let key = EntityKey::Coin(*position);
        match (was_active, coin.active()) {
            (false, true) => events.push(SyncEvent::Enter {
                key,
                attributes: EntityAttributes::of_coin(coin),
            }),
            (true, false) => events.push(SyncEvent::Exit { key }),
            // A coin's only attribute is its immutable position, so an
            // active-to-active pair can never produce an update.
            (true, true) | (false, false) => {}
        }
    }

    // Keys never leave the keyspace in the current design, but a
    // restored shadow may still hold entries the current snapshot lacks.
    if let Some(shadow) = previous {
        for (position, coin) in &shadow.coins {
            if coin.active() && !current.coins.contains_key(position) {
                events.push(SyncEvent::Exit {
                    key: EntityKey::Coin(*position),
                });
            }
        }
    }

    events
}
