use thiserror::Error;

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur while talking to the remote gateway
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Gateway fetch or action failed
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Session setup with the remote API failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Entity id not known to the gateway
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    /// Invalid or unexpected response from the remote API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
