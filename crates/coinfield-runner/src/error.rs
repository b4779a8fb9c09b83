//! Error types for the runner binary.
//!
//! [`RunnerError`] is the top-level error type that wraps all possible
//! failure modes during startup, the demo session, and shutdown.

/// Top-level error for the runner binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: coinfield_client::ConfigError,
    },

    /// A submission was rejected or the sequencer went away.
    #[error("gateway error: {source}")]
    Gateway {
        /// The underlying gateway error.
        #[from]
        source: coinfield_gateway::GatewayError,
    },

    /// Snapshot load or save failed.
    #[error("snapshot store error: {source}")]
    Snapshot {
        /// The underlying persistence error.
        #[from]
        source: coinfield_engine::SnapshotStoreError,
    },

    /// A background task panicked or was cancelled.
    #[error("task error: {source}")]
    Task {
        /// The underlying join error.
        #[from]
        source: tokio::task::JoinError,
    },
}
