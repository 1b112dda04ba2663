//! Agora Graph - users, connections and lookup
//!
//! This crate manages the social graph: who is connected to whom, who is
//! waiting on a follow request, and how to find a user by name. It also
//! provides the [`SocialNetwork`] facade that front ends call into.
//!
//! # Architecture
//!
//! The graph uses petgraph as an arena of user nodes. Each node keeps
//! ordered queues of handles for:
//! - Accepted connections (symmetric, in acceptance order)
//! - Pending follow requests (in arrival order, accepted by 1-based ordinal)
//!
//! A binary search tree over usernames provides sorted listing and
//! lookup without scanning every node.
//!
//! # Example
//!
//! ```
//! use agora_graph::{NetworkConfig, SocialNetwork};
//!
//! let mut network = SocialNetwork::new(NetworkConfig::default());
//! let amy = network.signup("amy", "Secret12!", "Pet?", "rex", "Porto").unwrap();
//! let bob = network.signup("bob", "Secret12!", "Pet?", "tom", "Braga").unwrap();
//!
//! network.send_follow_request(amy, bob).unwrap();
//! network.accept_follow_request(bob, 1).unwrap();
//!
//! assert!(network.graph().is_connected(amy, bob));
//! assert_eq!(network.bfs(amy).unwrap(), vec!["amy", "bob"]);
//! ```

mod config;
mod edge;
mod error;
mod graph;
mod name_index;
mod network;
mod requests;
mod traversal;

pub use config::NetworkConfig;
pub use edge::{Edge, EdgeKind, GraphEdge};
pub use error::{ConfigError, GraphError, Result};
pub use graph::{GraphNode, GraphStats, NodeId, SocialGraph, Suggestion};
pub use name_index::NameTree;
pub use network::{LoginOutcome, SocialNetwork, TimelineEntry};
