//! Agora Core - building blocks for the social graph
//!
//! This crate holds everything a user profile is made of: the ordered
//! containers that back its logs, the profile record itself, timestamps and
//! the password policy. It knows nothing about the graph; see `agora-graph`
//! for connections, requests and lookup.
//!
//! # Example
//!
//! ```
//! use agora_core::{OrderedQueue, User};
//!
//! let mut user = User::new("alice", "Secret12!", "First pet?", "rex", "Lisbon");
//! user.create_post("hello");
//!
//! let mut queue = OrderedQueue::new();
//! queue.enqueue(1);
//! assert_eq!(queue.size(), 1);
//! ```

pub mod error;
pub mod policy;
pub mod queue;
pub mod stack;
pub mod time;
pub mod user;

pub use error::{ContainerError, PolicyError, TimestampError};
pub use policy::PasswordPolicy;
pub use queue::OrderedQueue;
pub use stack::OrderedStack;
pub use time::Timestamp;
pub use user::{Message, Notification, Post, User};
