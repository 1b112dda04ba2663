//! Edge types for the social graph.
//!
//! Edges mirror the per-node queues: a pending follow request is one
//! `Requested` edge from requester to target, an accepted request is a pair
//! of `Connected` edges. The queues decide ordering; edges back path finding
//! and statistics.

use agora_core::Timestamp;
use serde::{Deserialize, Serialize};

/// The type of relationship between two users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Requester asked to follow target; not yet accepted.
    Requested,

    /// Accepted connection. Always present in both directions.
    Connected,
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Requested => "requested",
            Self::Connected => "connected",
        };
        write!(f, "{}", s)
    }
}

/// An edge in the social graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub kind: EdgeKind,

    /// When the request was sent or accepted.
    pub created: Timestamp,
}

impl Edge {
    /// Creates an edge stamped with the current time.
    pub fn new(kind: EdgeKind) -> Self {
        Self {
            kind,
            created: Timestamp::now(),
        }
    }
}

/// A simplified edge for export, with usernames instead of indexes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
}
