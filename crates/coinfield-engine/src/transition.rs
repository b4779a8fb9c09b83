//! The pure transition engine: validate and apply one action.
//!
//! The engine retains no state between calls. It is given the current
//! snapshot and a request, and returns either the next snapshot or a
//! [`TransitionError`] -- in which case the input snapshot remains the
//! current state and nothing changed.
//!
//! # Design
//!
//! - **Pure**: the input snapshot is never mutated; a successful apply
//!   clones it and edits the clone.
//! - **All-or-nothing**: validation happens before any edit, so a
//!   rejection can never leave a partial state behind.
//! - **Atomic pickup**: moving onto an active coin tombstones the coin
//!   and increments the purse in the same returned snapshot. No
//!   observable state ever has one without the other.

use tracing::debug;

use coinfield_types::{Action, ActionRequest, Coin, Direction, GridPos, Player, WorldSnapshot};

use crate::TransitionError;
use crate::placement::CoinPlacement;

/// Validates and applies actions against world snapshots.
///
/// The only state an engine carries is its immutable rule set -- today
/// just the coin placement. Everything that varies per call comes in
/// through [`apply`].
///
/// [`apply`]: TransitionEngine::apply
#[derive(Debug, Clone, Default)]
pub struct TransitionEngine {
    placement: CoinPlacement,
}

impl TransitionEngine {
    /// Create an engine with the given coin placement.
    pub const fn new(placement: CoinPlacement) -> Self {
        Self { placement }
    }

    /// The placement `generateCoins` asserts.
    pub const fn placement(&self) -> &CoinPlacement {
        &self.placement
    }

    /// Validate `request` against `snapshot` and produce the next
    /// snapshot.
    ///
    /// # Errors
    ///
    /// - [`TransitionError::OutOfBounds`] if a spawn target or move
    ///   result lies outside the world on either axis.
    /// - [`TransitionError::UnknownPlayer`] if a move is requested for a
    ///   player that has never spawned.
    /// - [`TransitionError::SequenceOverflow`] if the sequence counter
    ///   cannot advance.
    pub fn apply(
        &self,
        snapshot: &WorldSnapshot,
        request: &ActionRequest,
    ) -> Result<WorldSnapshot, TransitionError> {
        let sequence = snapshot
            .sequence
            .checked_add(1)
            .ok_or(TransitionError::SequenceOverflow)?;

        let mut next = match &request.action {
            Action::Spawn { position } => Self::apply_spawn(snapshot, request, *position)?,
            Action::Move { direction } => Self::apply_move(snapshot, request, *direction)?,
            Action::GenerateCoins => self.apply_generate_coins(snapshot),
        };

        next.sequence = sequence;
        Ok(next)
    }

    /// Place the player, creating the record on first spawn.
    ///
    /// Spawn is bounds-checked exactly like move: the authoritative
    /// store never holds an out-of-bounds position.
    fn apply_spawn(
        snapshot: &WorldSnapshot,
        request: &ActionRequest,
        position: GridPos,
    ) -> Result<WorldSnapshot, TransitionError> {
        if !position.in_bounds() {
            return Err(TransitionError::OutOfBounds {
                player: request.player.clone(),
                attempted: position,
            });
        }

        let mut next = snapshot.clone();
        next.players
            .entry(request.player.clone())
            .and_modify(|player| player.position = position)
            .or_insert_with(|| Player::spawned(request.player.clone(), position));

        debug!(player = %request.player, %position, "player spawned");
        Ok(next)
    }

    /// Step the player one cell, picking up a coin at the destination
    /// if one is active there.
    fn apply_move(
        snapshot: &WorldSnapshot,
        request: &ActionRequest,
        direction: Direction,
    ) -> Result<WorldSnapshot, TransitionError> {
        let current = snapshot
            .player(&request.player)
            .ok_or_else(|| TransitionError::UnknownPlayer {
                player: request.player.clone(),
            })?;

        let attempted = current.position.step(direction);
        if !attempted.in_bounds() {
            return Err(TransitionError::OutOfBounds {
                player: request.player.clone(),
                attempted,
            });
        }

        // Validation is complete; from here on the action cannot fail.
        let mut next = snapshot.clone();

        let picked_up = match next.coins.get_mut(&attempted) {
            Some(coin) if coin.active() => {
                coin.exists = false;
                true
            }
            _ => false,
        };

        if let Some(player) = next.players.get_mut(&request.player) {
            player.position = attempted;
            if picked_up {
                player.coins = player.coins.saturating_add(1);
            }
        }

        debug!(
            player = %request.player,
            ?direction,
            position = %attempted,
            picked_up,
            "player moved"
        );
        Ok(next)
    }

    /// Assert an active coin at every placement cell.
    ///
    /// Idempotent: cells already holding an active coin are unchanged,
    /// tombstoned placement cells revive, and cells outside the
    /// placement are never touched.
    fn apply_generate_coins(&self, snapshot: &WorldSnapshot) -> WorldSnapshot {
        let mut next = snapshot.clone();
        for &cell in self.placement.cells() {
            next.coins.insert(cell, Coin::placed(cell));
        }

        debug!(cells = self.placement.len(), "coins generated");
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinfield_types::{PlayerId, WORLD_MAX};

    fn engine() -> TransitionEngine {
        TransitionEngine::new(CoinPlacement::fixed())
    }

    fn alice() -> PlayerId {
        PlayerId::new("alice")
    }

    fn spawn_at(x: i32, y: i32) -> ActionRequest {
        ActionRequest::new(
            alice(),
            Action::Spawn {
                position: GridPos::new(x, y),
            },
        )
    }

    fn move_toward(direction: Direction) -> ActionRequest {
        ActionRequest::new(alice(), Action::Move { direction })
    }

    /// Apply a request that must succeed, returning the next snapshot.
    fn must_apply(
        engine: &TransitionEngine,
        snapshot: &WorldSnapshot,
        request: &ActionRequest,
    ) -> WorldSnapshot {
        let result = engine.apply(snapshot, request);
        assert!(result.is_ok(), "unexpected rejection: {result:?}");
        result.unwrap_or_default()
    }

    #[test]
    fn spawn_creates_the_player_record() {
        let engine = engine();
        let next = must_apply(&engine, &WorldSnapshot::genesis(), &spawn_at(3, -4));

        let player = next.player(&alice());
        assert_eq!(
            player.map(|p| p.position),
            Some(GridPos::new(3, -4)),
        );
        assert_eq!(player.map(|p| p.coins), Some(0));
        assert_eq!(next.sequence, 1);
    }

    #[test]
    fn respawn_moves_without_resetting_the_purse() {
        let engine = engine();
        let mut snapshot = must_apply(&engine, &WorldSnapshot::genesis(), &spawn_at(0, 0));
        if let Some(player) = snapshot.players.get_mut(&alice()) {
            player.coins = 5;
        }

        let next = must_apply(&engine, &snapshot, &spawn_at(10, 10));
        assert_eq!(next.player(&alice()).map(|p| p.coins), Some(5));
        assert_eq!(
            next.player(&alice()).map(|p| p.position),
            Some(GridPos::new(10, 10)),
        );
    }

    #[test]
    fn spawn_out_of_bounds_is_rejected() {
        let engine = engine();
        let result = engine.apply(&WorldSnapshot::genesis(), &spawn_at(32, 0));
        assert_eq!(
            result,
            Err(TransitionError::OutOfBounds {
                player: alice(),
                attempted: GridPos::new(32, 0),
            }),
        );
    }

    #[test]
    fn move_adjusts_exactly_one_axis() {
        let engine = engine();
        let snapshot = must_apply(&engine, &WorldSnapshot::genesis(), &spawn_at(0, 0));
        let next = must_apply(&engine, &snapshot, &move_toward(Direction::Up));
        assert_eq!(
            next.player(&alice()).map(|p| p.position),
            Some(GridPos::new(0, -1)),
        );
    }

    #[test]
    fn move_at_the_east_edge_is_rejected_with_no_state_change() {
        let engine = engine();
        let snapshot = must_apply(&engine, &WorldSnapshot::genesis(), &spawn_at(WORLD_MAX, 5));

        let result = engine.apply(&snapshot, &move_toward(Direction::Right));
        assert_eq!(
            result,
            Err(TransitionError::OutOfBounds {
                player: alice(),
                attempted: GridPos::new(32, 5),
            }),
        );

        // The rejected action produced nothing; the prior snapshot is
        // untouched.
        assert_eq!(
            snapshot.player(&alice()).map(|p| p.position),
            Some(GridPos::new(WORLD_MAX, 5)),
        );
        assert_eq!(snapshot.sequence, 1);
    }

    #[test]
    fn move_by_an_unspawned_player_is_rejected() {
        let engine = engine();
        let result = engine.apply(&WorldSnapshot::genesis(), &move_toward(Direction::Down));
        assert_eq!(
            result,
            Err(TransitionError::UnknownPlayer { player: alice() }),
        );
    }

    #[test]
    fn pickup_is_one_indivisible_transition() {
        let engine = engine();
        let snapshot = must_apply(&engine, &WorldSnapshot::genesis(), &spawn_at(0, 0));
        let snapshot = must_apply(
            &engine,
            &snapshot,
            &ActionRequest::new(alice(), Action::GenerateCoins),
        );
        assert!(snapshot.coin_at(GridPos::new(1, 0)).is_some_and(Coin::active));

        let next = must_apply(&engine, &snapshot, &move_toward(Direction::Right));
        assert_eq!(next.player(&alice()).map(|p| p.coins), Some(1));
        assert!(!next.coin_at(GridPos::new(1, 0)).is_some_and(Coin::active));

        // The coin record is tombstoned, not deleted.
        assert!(next.coin_at(GridPos::new(1, 0)).is_some());
    }

    #[test]
    fn a_coin_is_picked_up_at_most_once() {
        let engine = engine();
        let snapshot = must_apply(&engine, &WorldSnapshot::genesis(), &spawn_at(0, 0));
        let snapshot = must_apply(
            &engine,
            &snapshot,
            &ActionRequest::new(alice(), Action::GenerateCoins),
        );
        let snapshot = must_apply(&engine, &snapshot, &move_toward(Direction::Right));
        let snapshot = must_apply(&engine, &snapshot, &move_toward(Direction::Left));
        let snapshot = must_apply(&engine, &snapshot, &move_toward(Direction::Right));

        // Back on (1, 0): the tombstone is still there, the purse did
        // not grow again.
        assert_eq!(snapshot.player(&alice()).map(|p| p.coins), Some(1));
        assert!(!snapshot.coin_at(GridPos::new(1, 0)).is_some_and(Coin::active));
    }

    #[test]
    fn generate_coins_is_idempotent() {
        let engine = engine();
        let generate = ActionRequest::new(alice(), Action::GenerateCoins);

        let once = must_apply(&engine, &WorldSnapshot::genesis(), &generate);
        let twice = must_apply(&engine, &once, &generate);

        let once_cells: Vec<_> = once.active_coins().map(|c| c.position).collect();
        let twice_cells: Vec<_> = twice.active_coins().map(|c| c.position).collect();
        assert_eq!(once_cells, twice_cells);
    }

    #[test]
    fn generate_coins_revives_only_placement_cells() {
        let engine = engine();
        let generate = ActionRequest::new(alice(), Action::GenerateCoins);

        let snapshot = must_apply(&engine, &WorldSnapshot::genesis(), &spawn_at(0, 0));
        let snapshot = must_apply(&engine, &snapshot, &generate);
        let snapshot = must_apply(&engine, &snapshot, &move_toward(Direction::Right));
        assert!(!snapshot.coin_at(GridPos::new(1, 0)).is_some_and(Coin::active));

        let regenerated = must_apply(&engine, &snapshot, &generate);
        assert!(
            regenerated
                .coin_at(GridPos::new(1, 0))
                .is_some_and(Coin::active)
        );
    }

    #[test]
    fn bounds_hold_for_every_sequence_of_moves() {
        let engine = engine();
        let mut snapshot = must_apply(&engine, &WorldSnapshot::genesis(), &spawn_at(30, -30));

        // Push hard against the corner from every direction; rejected
        // moves leave the snapshot as-is.
        let walk = [
            Direction::Right,
            Direction::Right,
            Direction::Right,
            Direction::Up,
            Direction::Up,
            Direction::Up,
            Direction::Down,
            Direction::Left,
        ];
        for direction in walk {
            if let Ok(next) = engine.apply(&snapshot, &move_toward(direction)) {
                snapshot = next;
            }
            let position = snapshot.player(&alice()).map(|p| p.position);
            assert!(position.is_some_and(GridPos::in_bounds));
        }
    }

    #[test]
    fn spawn_move_pickup_then_step_back() {
        let engine = engine();
        let snapshot = must_apply(&engine, &WorldSnapshot::genesis(), &spawn_at(0, 0));
        let snapshot = must_apply(
            &engine,
            &snapshot,
            &ActionRequest::new(alice(), Action::GenerateCoins),
        );

        let snapshot = must_apply(&engine, &snapshot, &move_toward(Direction::Right));
        assert_eq!(
            snapshot.player(&alice()).map(|p| p.position),
            Some(GridPos::new(1, 0)),
        );
        assert_eq!(snapshot.player(&alice()).map(|p| p.coins), Some(1));
        assert!(!snapshot.coin_at(GridPos::new(1, 0)).is_some_and(Coin::active));

        let snapshot = must_apply(&engine, &snapshot, &move_toward(Direction::Left));
        assert_eq!(
            snapshot.player(&alice()).map(|p| p.position),
            Some(GridPos::new(0, 0)),
        );
        assert_eq!(snapshot.player(&alice()).map(|p| p.coins), Some(1));
    }
}
