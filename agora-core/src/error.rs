//! Error types for the core crate.

use thiserror::Error;

/// Errors raised by the ordered containers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// Pop, dequeue or peek on a container with no elements.
    #[error("{container} is empty")]
    Empty {
        /// Which container kind failed ("stack" or "queue").
        container: &'static str,
    },
}

/// A password that does not satisfy the configured policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("password must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    #[error("password must contain: {}", .missing.join(", "))]
    MissingClasses { missing: Vec<&'static str> },
}

/// A timestamp string that is not in `DD/MM/YYYY HH:MM` form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid timestamp '{input}': expected DD/MM/YYYY HH:MM")]
pub struct TimestampError {
    pub input: String,
}
