//! The in-process sequencer: a single-writer apply loop.
//!
//! [`LocalSequencer::start`] spawns a task that takes exclusive
//! ownership of the [`WorldStore`]. Submissions arrive on an mpsc
//! channel and are applied strictly in arrival order -- that channel
//! *is* the total order. Every accepted transition publishes the new
//! snapshot on a broadcast channel for the sync layer.
//!
//! Shutdown is by dropping: when the last [`SequencerHandle`] goes
//! away the command channel closes, the loop drains and exits, and the
//! join handle yields the store back (so a final snapshot can be
//! persisted).

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use coinfield_engine::{TransitionError, WorldStore};
use coinfield_types::{ActionRequest, Confirmation, WorldSnapshot};

use crate::{ActionGateway, GatewayError};

/// One queued submission: the request plus its reply slot.
struct Submission {
    request: ActionRequest,
    reply: oneshot::Sender<Result<Confirmation, TransitionError>>,
}

/// Factory for the in-process sequencing backend.
#[derive(Debug)]
pub struct LocalSequencer;

impl LocalSequencer {
    /// Start the apply loop on a new task.
    ///
    /// `capacity` bounds both the submission queue and the snapshot
    /// broadcast buffer. Returns a clone-able handle plus the join
    /// handle that yields the store once every handle has been dropped.
    pub fn start(store: WorldStore, capacity: usize) -> (SequencerHandle, JoinHandle<WorldStore>) {
        let (commands, receiver) = mpsc::channel::<Submission>(capacity.max(1));
        let (snapshots, _) = broadcast::channel::<WorldSnapshot>(capacity.max(1));

        let handle = SequencerHandle {
            commands,
            snapshots: snapshots.clone(),
        };
        let task = tokio::spawn(apply_loop(store, receiver, snapshots));

        (handle, task)
    }
}

/// Drain submissions in arrival order until the channel closes.
async fn apply_loop(
    mut store: WorldStore,
    mut receiver: mpsc::Receiver<Submission>,
    snapshots: broadcast::Sender<WorldSnapshot>,
) -> WorldStore {
    while let Some(submission) = receiver.recv().await {
        let result = store.apply(submission.request);

        if result.is_ok() {
            // A send error only means no subscriber is currently
            // listening; the authoritative state is unaffected.
            if snapshots.send(store.snapshot().clone()).is_err() {
                debug!("no snapshot subscribers, notification dropped");
            }
        }

        if submission.reply.send(result).is_err() {
            // The submitter stopped waiting. The transition (if
            // accepted) stands regardless.
            debug!("submitter dropped its confirmation receiver");
        }
    }

    debug!("sequencer channel closed, apply loop exiting");
    store
}

/// Clone-able client handle to the sequencer.
///
/// Implements [`ActionGateway`] for submissions and exposes the
/// snapshot broadcast for the sync layer.
#[derive(Debug, Clone)]
pub struct SequencerHandle {
    commands: mpsc::Sender<Submission>,
    snapshots: broadcast::Sender<WorldSnapshot>,
}

impl SequencerHandle {
    /// Subscribe to the stream of post-transition snapshots.
    ///
    /// A slow subscriber may observe a `Lagged` error and miss
    /// intermediate snapshots; the sync layer reconciles from absolute
    /// state, so coalescing is safe.
    pub fn subscribe(&self) -> broadcast::Receiver<WorldSnapshot> {
        self.snapshots.subscribe()
    }
}

impl ActionGateway for SequencerHandle {
    fn submit(
        &self,
        request: ActionRequest,
    ) -> impl Future<Output = Result<Confirmation, GatewayError>> + Send {
        let commands = self.commands.clone();
        async move {
            let (reply, confirmation) = oneshot::channel();
            let submission = Submission { request, reply };

            if commands.send(submission).await.is_err() {
                warn!("sequencer is no longer running");
                return Err(GatewayError::SubmissionFailed {
                    reason: "sequencer unavailable".to_owned(),
                });
            }

            match confirmation.await {
                Ok(result) => result.map_err(GatewayError::from),
                Err(_) => Err(GatewayError::SubmissionFailed {
                    reason: "confirmation channel closed before a reply arrived".to_owned(),
                }),
            }
        }
    }
}
