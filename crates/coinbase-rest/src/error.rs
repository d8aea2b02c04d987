//! Error types for REST API operations
//!
//! API error responses and transport failures are not errors here: they are
//! returned as [`NormalizedResponse`](crate::NormalizedResponse) variants.
//! [`RestError`] covers failures of the client itself, plus the two variants
//! produced by [`NormalizedResponse::into_result`](crate::NormalizedResponse::into_result).

use coinbase_auth::AuthError;

use crate::response::TransportError;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Credential or signing input error, raised before any network call
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body is neither JSON nor a plain-text success
    #[error("Malformed response (HTTP {status}): {body}")]
    MalformedResponse {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Well-formed response whose shape the endpoint does not expect
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// API returned an error message
    #[error("API error: {0}")]
    Api(String),

    /// Request never completed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Invalid historical time range
    #[error("Invalid time range: {0}")]
    InvalidRange(String),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl RestError {
    /// Whether the error happened before anything was sent
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            Self::Auth(_)
                | Self::AuthRequired
                | Self::Http(_)
                | Self::InvalidRange(_)
                | Self::InvalidParameter(_)
        )
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::TransportErrorKind;

    #[test]
    fn test_auth_error_converts() {
        let err: RestError = AuthError::InvalidCredentials("bad secret".to_string()).into();
        assert!(err.is_client_side());
        assert!(err.to_string().contains("bad secret"));
    }

    #[test]
    fn test_transport_error_display() {
        let err: RestError = TransportError::new(TransportErrorKind::Timeout, "30s elapsed").into();
        assert!(!err.is_client_side());
        assert_eq!(err.to_string(), "timeout error: 30s elapsed");
    }

    #[test]
    fn test_unexpected_response_display() {
        let err = RestError::UnexpectedResponse("candles: expected an array".to_string());
        assert!(!err.is_client_side());
        assert_eq!(err.to_string(), "Unexpected response: candles: expected an array");
    }

    #[test]
    fn test_malformed_display() {
        let err = RestError::MalformedResponse {
            status: 502,
            body: "<html>Bad Gateway</html>".to_string(),
        };
        assert!(err.to_string().contains("HTTP 502"));
    }
}
