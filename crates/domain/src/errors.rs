//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for PermID client operations
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PermIdError {
    /// A parameter fell outside its legal set, or the input was
    /// structurally unusable (empty data, missing file). Raised before
    /// any network call is made.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Connection or timeout failure below the HTTP layer.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The endpoint answered a success status with an error page instead
    /// of structured data.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-success HTTP status. Carries the reason phrase and an excerpt
    /// of the response body.
    #[error("{reason}: {body}")]
    Application {
        /// Status reason phrase (e.g. "Internal Server Error").
        reason: String,
        /// Body excerpt, truncated for diagnostics.
        body: String,
    },

    /// A response payload could not be reshaped into the requested form.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Client construction or configuration failure.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invariant violation inside the client itself.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for PermID client operations
pub type Result<T> = std::result::Result<T, PermIdError>;
