//! error types for wardgate-policy.

use thiserror::Error;

use wardgate_types::ConnectorId;

/// errors that can occur during policy compilation.
#[derive(Debug, Error)]
pub enum Error {
    /// the requested connector does not exist. surfaced to the caller
    /// without side effects; the core never retries.
    #[error("connector not found: {0}")]
    ConnectorNotFound(ConnectorId),

    /// the entity store could not be reached or a transaction aborted.
    /// the compile persisted nothing; the previously compiled policy
    /// stays in force and the caller may retry the whole compile.
    #[error("store unavailable: {0}")]
    Store(#[from] wardgate_db::Error),

    /// failed to serialise the canonical policy form for hashing.
    #[error("failed to serialise canonical policy: {0}")]
    Canonical(#[from] serde_json::Error),
}

/// result type for wardgate-policy operations.
pub type Result<T> = std::result::Result<T, Error>;
