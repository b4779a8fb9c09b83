//! The append-only transition log.
//!
//! Every accepted transition appends one [`TransitionRecord`]. Entries
//! are never modified or deleted, so the log is a complete audit trail:
//! replaying it against the genesis snapshot reconstructs the current
//! state.

use chrono::Utc;

use coinfield_types::{Action, PlayerId, TransitionId, TransitionRecord};

/// Append-only log of every accepted transition, in sequence order.
#[derive(Debug, Default)]
pub struct TransitionLog {
    /// All records, in insertion (= sequence) order.
    records: Vec<TransitionRecord>,
}

impl TransitionLog {
    /// Create a new empty log.
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Return the number of records in the log.
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Return whether the log has no records.
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record for an accepted transition and return its id.
    ///
    /// `sequence` is the sequence number of the snapshot the transition
    /// produced; the store passes it through after a successful apply.
    pub fn append(&mut self, sequence: u64, player: PlayerId, action: Action) -> TransitionId {
        let id = TransitionId::new();
        self.records.push(TransitionRecord {
            id,
            sequence,
            player,
            action,
            recorded_at: Utc::now(),
        });
        id
    }

    /// Return all records, in sequence order.
    pub fn all_records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// Return all records submitted by the given player, in sequence
    /// order.
    pub fn records_for_player(&self, player: &PlayerId) -> Vec<&TransitionRecord> {
        self.records
            .iter()
            .filter(|record| &record.player == player)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinfield_types::{Direction, GridPos};

    #[test]
    fn new_log_is_empty() {
        let log = TransitionLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn append_preserves_sequence_order() {
        let mut log = TransitionLog::new();
        log.append(
            1,
            PlayerId::new("alice"),
            Action::Spawn {
                position: GridPos::new(0, 0),
            },
        );
        log.append(
            2,
            PlayerId::new("bob"),
            Action::Move {
                direction: Direction::Up,
            },
        );

        let sequences: Vec<u64> = log.all_records().iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![1, 2]);
    }

    #[test]
    fn records_filter_by_player() {
        let mut log = TransitionLog::new();
        log.append(1, PlayerId::new("alice"), Action::GenerateCoins);
        log.append(
            2,
            PlayerId::new("bob"),
            Action::Move {
                direction: Direction::Left,
            },
        );
        log.append(
            3,
            PlayerId::new("alice"),
            Action::Move {
                direction: Direction::Down,
            },
        );

        let alice = PlayerId::new("alice");
        let records = log.records_for_player(&alice);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.player == alice));
    }
}
