//! Error types for authentication operations

/// Errors that can occur while building signed requests
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid API credentials (empty key, malformed secret)
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Request body could not be serialized for signing
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
