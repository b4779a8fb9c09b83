//! The world state store: exclusive owner of the canonical snapshot.
//!
//! All mutation flows through [`WorldStore::apply`]. The store runs the
//! pure engine against the current snapshot, and only on success swaps
//! the snapshot and appends to the log -- a rejection leaves both
//! exactly as they were.
//!
//! The store is logically single-writer: the sequencer in
//! `coinfield-gateway` owns one store on a dedicated task and applies
//! submissions strictly in arrival order, so the engine never observes
//! concurrent conflicting writes.

use tracing::info;

use coinfield_types::{ActionRequest, Coin, Confirmation, GridPos, Player, PlayerId, WorldSnapshot};

use crate::TransitionError;
use crate::log::TransitionLog;
use crate::transition::TransitionEngine;

/// Canonical world state plus its audit log.
#[derive(Debug)]
pub struct WorldStore {
    engine: TransitionEngine,
    current: WorldSnapshot,
    log: TransitionLog,
}

impl WorldStore {
    /// Create a store at the genesis snapshot.
    pub const fn new(engine: TransitionEngine) -> Self {
        Self {
            engine,
            current: WorldSnapshot::genesis(),
            log: TransitionLog::new(),
        }
    }

    /// Create a store resuming from a previously persisted snapshot.
    ///
    /// The log starts empty; it covers transitions applied by this
    /// process, not the snapshot's prior history.
    pub const fn resume(engine: TransitionEngine, snapshot: WorldSnapshot) -> Self {
        Self {
            engine,
            current: snapshot,
            log: TransitionLog::new(),
        }
    }

    /// Apply one action: validate against the current snapshot, swap in
    /// the next snapshot, and append a log record.
    ///
    /// # Errors
    ///
    /// Propagates the engine's [`TransitionError`] unchanged; on error
    /// neither the snapshot nor the log is touched.
    pub fn apply(&mut self, request: ActionRequest) -> Result<Confirmation, TransitionError> {
        let next = self.engine.apply(&self.current, &request)?;
        let sequence = next.sequence;
        self.current = next;
        let transition_id = self.log.append(sequence, request.player, request.action);

        info!(sequence, %transition_id, "transition applied");
        Ok(Confirmation {
            sequence,
            transition_id,
        })
    }

    /// The current canonical snapshot.
    pub const fn snapshot(&self) -> &WorldSnapshot {
        &self.current
    }

    /// Look up a player record. Absence is `None`, never an error.
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.current.player(id)
    }

    /// Look up the coin record at a cell. Absence is `None`, never an
    /// error.
    pub fn coin_at(&self, position: GridPos) -> Option<&Coin> {
        self.current.coin_at(position)
    }

    /// The append-only transition log.
    pub const fn log(&self) -> &TransitionLog {
        &self.log
    }
}
