//! Action submission gateway for the Coinfield world.
//!
//! Clients never touch the world store directly: they submit an
//! [`ActionRequest`] through an [`ActionGateway`] and await a
//! [`Confirmation`]. The gateway's backing system totally orders all
//! submissions, so the transition engine only ever sees one fully
//! materialized snapshot at a time.
//!
//! This crate provides the in-process backing system: a
//! [`LocalSequencer`] that owns the [`WorldStore`] on a dedicated task
//! and applies submissions strictly in arrival order (see
//! [`sequencer`]). Remote backends (a consensus service, a chain
//! sequencer) would implement the same [`ActionGateway`] contract.
//!
//! Once a submission has been accepted by the sequencer it cannot be
//! retracted; a caller may only drop the confirmation future and not
//! wait for the outcome.
//!
//! [`WorldStore`]: coinfield_engine::WorldStore

pub mod sequencer;

pub use sequencer::{LocalSequencer, SequencerHandle};

use coinfield_engine::TransitionError;
use coinfield_types::{ActionRequest, Confirmation};

/// Errors surfaced to a submitting client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The transition engine rejected the action. The rejection is
    /// passed through unchanged; no state changed.
    #[error("action rejected: {source}")]
    Rejected {
        /// The engine's rejection.
        #[from]
        source: TransitionError,
    },

    /// The gateway could not deliver the action or obtain its
    /// confirmation. The core defines no retry policy; the caller
    /// decides whether to resubmit.
    #[error("submission failed: {reason}")]
    SubmissionFailed {
        /// Description of the delivery failure.
        reason: String,
    },
}

/// The abstract "submit action, await confirmation" contract.
///
/// Submissions may suspend for an unbounded but finite duration while
/// the backing system sequences and applies the action. Multiple
/// in-flight submissions from one client are allowed; the backing
/// system serializes them on arrival.
pub trait ActionGateway {
    /// Submit one action and await its confirmation or failure.
    fn submit(
        &self,
        request: ActionRequest,
    ) -> impl Future<Output = Result<Confirmation, GatewayError>> + Send;
}
