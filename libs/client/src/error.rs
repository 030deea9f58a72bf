//! Custom error types for the client library

use thiserror::Error;

/// Custom error type for client-side flows
#[derive(Error, Debug)]
pub enum ClientError {
    /// Required draft fields are absent; no network call was made
    #[error("Missing required fields: {0:?}")]
    MissingFields(Vec<&'static str>),

    /// Comment text was empty after trimming; no network call was made
    #[error("Comment text is required")]
    EmptyComment,

    /// The triggering control is disabled while a request is in flight
    #[error("A request is already in flight")]
    RequestInFlight,

    /// An authenticated call was attempted without a bearer token
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Media upload failed
    #[error("Upload failed: {0}")]
    Upload(String),

    /// The API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Network-level failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}
