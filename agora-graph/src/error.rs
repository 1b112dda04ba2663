//! Error types for graph, index and network operations.

use crate::graph::NodeId;
use agora_core::PolicyError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A handle that does not belong to this graph.
    #[error("Unknown node: {0:?}")]
    UnknownNode(NodeId),

    #[error("User '{0}' already exists")]
    DuplicateName(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Invalid username: must not be empty")]
    InvalidName,

    #[error("Incorrect password")]
    InvalidCredentials,

    #[error("Incorrect recovery answer")]
    InvalidRecoveryAnswer,

    #[error("No pending request at position {ordinal} ({pending} pending)")]
    OrdinalOutOfRange { ordinal: usize, pending: usize },

    #[error("Cannot send a follow request to yourself")]
    SelfRequest,

    #[error("Weak password: {0}")]
    WeakPassword(#[from] PolicyError),
}

/// Failure loading a [`NetworkConfig`](crate::NetworkConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
