//! The delta observer: shadow state plus the notification loop.
//!
//! The observer holds the last snapshot it has seen (the shadow), turns
//! each newly observed snapshot into lifecycle events via [`diff`], and
//! feeds them to an [`EventSink`]. It is driven by the gateway's
//! snapshot broadcast; if the channel lags and drops intermediate
//! snapshots, the observer simply diffs across the gap -- the diff
//! reconciles from absolute state, so coalescing is safe.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

use coinfield_types::{SyncEvent, WorldSnapshot};

use crate::diff::diff;

/// Consumer of lifecycle events, called on a single logical task.
///
/// The entity pool implements this; so can any render adapter binding.
pub trait EventSink {
    /// Handle one lifecycle event.
    fn handle_event(&mut self, event: &SyncEvent);
}

/// Shadow-holding observer that diffs each incoming snapshot against
/// the last one observed.
#[derive(Debug, Default)]
pub struct DeltaObserver {
    shadow: Option<WorldSnapshot>,
}

impl DeltaObserver {
    /// Create an observer with an empty shadow (cold start).
    pub const fn new() -> Self {
        Self { shadow: None }
    }

    /// Sequence number of the shadow, if any snapshot has been observed.
    pub fn observed_sequence(&self) -> Option<u64> {
        self.shadow.as_ref().map(|shadow| shadow.sequence)
    }

    /// Observe one snapshot: diff it against the shadow, replace the
    /// shadow, and return the resulting events.
    ///
    /// A snapshot at or before the shadow's sequence is stale (a
    /// duplicate or reordered delivery) and produces no events.
    pub fn observe(&mut self, snapshot: &WorldSnapshot) -> Vec<SyncEvent> {
        if let Some(shadow) = &self.shadow
            && shadow.sequence >= snapshot.sequence
        {
            debug!(
                shadow = shadow.sequence,
                received = snapshot.sequence,
                "stale snapshot ignored"
            );
            return Vec::new();
        }

        let events = diff(self.shadow.as_ref(), snapshot);
        self.shadow = Some(snapshot.clone());
        events
    }

    /// Drive the observer from a snapshot broadcast until the channel
    /// closes, dispatching every event to `sink`.
    ///
    /// Returns the sink so callers can inspect the final scene state.
    pub async fn run<S: EventSink>(
        mut self,
        mut receiver: broadcast::Receiver<WorldSnapshot>,
        mut sink: S,
    ) -> S {
        loop {
            match receiver.recv().await {
                Ok(snapshot) => {
                    for event in self.observe(&snapshot) {
                        sink.handle_event(&event);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    // Safe to coalesce: the next diff runs against
                    // whatever snapshot arrives, however far ahead.
                    debug!(skipped, "observer lagged, coalescing snapshots");
                }
                Err(RecvError::Closed) => {
                    debug!("snapshot channel closed, observer exiting");
                    return sink;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinfield_types::{Coin, GridPos, Player, PlayerId};

    fn snapshot_with_player(sequence: u64, x: i32, y: i32) -> WorldSnapshot {
        let id = PlayerId::new("alice");
        let mut snapshot = WorldSnapshot {
            sequence,
            ..WorldSnapshot::default()
        };
        snapshot.players.insert(
            id.clone(),
            Player {
                id,
                position: GridPos::new(x, y),
                coins: 0,
            },
        );
        snapshot
    }

    #[test]
    fn cold_start_replays_then_goes_quiet() {
        let mut observer = DeltaObserver::new();
        let snapshot = snapshot_with_player(1, 0, 0);

        let first = observer.observe(&snapshot);
        assert_eq!(first.len(), 1);
        assert!(matches!(first.first(), Some(SyncEvent::Enter { .. })));

        // Observing the identical snapshot again is stale.
        assert!(observer.observe(&snapshot).is_empty());
        assert_eq!(observer.observed_sequence(), Some(1));
    }

    #[test]
    fn stale_and_duplicate_snapshots_are_ignored() {
        let mut observer = DeltaObserver::new();
        let newer = snapshot_with_player(5, 1, 1);
        let older = snapshot_with_player(3, 0, 0);

        let _ = observer.observe(&newer);
        assert!(observer.observe(&older).is_empty());
        assert_eq!(observer.observed_sequence(), Some(5));
    }

    #[test]
    fn replay_from_cold_start_is_deterministic() {
        let sequence_of_snapshots = [
            snapshot_with_player(1, 0, 0),
            snapshot_with_player(2, 1, 0),
            snapshot_with_player(3, 1, 1),
        ];

        let mut first_run = Vec::new();
        let mut observer = DeltaObserver::new();
        for snapshot in &sequence_of_snapshots {
            first_run.extend(observer.observe(snapshot));
        }

        let mut second_run = Vec::new();
        let mut observer = DeltaObserver::new();
        for snapshot in &sequence_of_snapshots {
            second_run.extend(observer.observe(snapshot));
        }

        assert_eq!(first_run, second_run);
    }

    #[test]
    fn skipping_intermediate_snapshots_yields_the_same_final_state() {
        let first = snapshot_with_player(1, 0, 0);
        let mut last = snapshot_with_player(4, 3, 0);
        let position = GridPos::new(1, 0);
        last.coins.insert(
            position,
            Coin {
                position,
                exists: false,
            },
        );

        // Observer A sees every snapshot; observer B jumps 1 -> 4.
        let mut full = DeltaObserver::new();
        let _ = full.observe(&first);
        let _ = full.observe(&snapshot_with_player(2, 1, 0));
        let _ = full.observe(&snapshot_with_player(3, 2, 0));
        let _ = full.observe(&last);

        let mut coalesced = DeltaObserver::new();
        let _ = coalesced.observe(&first);
        let _ = coalesced.observe(&last);

        assert_eq!(full.observed_sequence(), coalesced.observed_sequence());
    }
}
