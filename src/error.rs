//! Error types for transaction inspection

use std::time::Duration;

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, InspectError>;

/// Everything that can go wrong while inspecting a transaction
#[derive(Error, Debug)]
pub enum InspectError {
    /// Malformed or missing command-line input
    #[error("usage error: {0}")]
    Usage(String),

    /// No registered network matches the requested name
    #[error("network \"{name}\" not found (available: {available})")]
    NetworkNotFound { name: String, available: String },

    /// The transaction hash is unknown to the node
    #[error("transaction not found: {0}")]
    TransactionNotFound(String),

    /// Explorer API transport or non-success response
    #[error("explorer error: {0}")]
    Explorer(String),

    /// Payload is not a valid interface description, or call data does not match it
    #[error("decode error: {0}")]
    Decode(String),

    /// A read-only token accessor call failed
    #[error("call error: {0}")]
    Call(String),

    /// JSON-RPC transport or malformed node response
    #[error("rpc error: {0}")]
    Rpc(String),

    /// A network round trip exceeded its deadline
    #[error("{operation} timed out after {}s", .after.as_secs())]
    Timeout {
        operation: String,
        after: Duration,
    },

    /// Missing or invalid configuration for the selected network
    #[error("config error: {0}")]
    Config(String),
}

impl InspectError {
    /// Process exit code for this error kind
    pub fn exit_code(&self) -> i32 {
        match self {
            InspectError::Usage(_) => 1,
            InspectError::NetworkNotFound { .. } => 2,
            InspectError::TransactionNotFound(_) => 3,
            _ => 4,
        }
    }

    pub(crate) fn timeout(operation: impl Into<String>, after: Duration) -> Self {
        InspectError::Timeout {
            operation: operation.into(),
            after,
        }
    }
}

/// Run a future under a deadline, mapping expiry to [`InspectError::Timeout`]
pub(crate) async fn with_timeout<T, F>(operation: &str, after: Duration, fut: F) -> Result<T>
where
    F: std::future::Future<Output = Result<T>>,
{
    match tokio::time::timeout(after, fut).await {
        Ok(result) => result,
        Err(_) => Err(InspectError::timeout(operation, after)),
    }
}
