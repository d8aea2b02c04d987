//! Response normalization
//!
//! Every dispatch ends in exactly one [`NormalizedResponse`] variant. API
//! error messages and transport failures are data the caller branches on.

use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{RestError, RestResult};

/// What went wrong before a response body was available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// DNS, connection refused, TLS handshake
    Connect,
    /// Request exceeded the configured timeout
    Timeout,
    /// Request could not be built or sent (invalid header, redirect limit)
    Request,
    /// Response body could not be read
    Body,
    /// Call was cancelled by the caller
    Cancelled,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::Request => "request",
            Self::Body => "body",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// A failed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct TransportError {
    /// Failure category
    pub kind: TransportErrorKind,
    /// Human-readable description
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Error for a call abandoned through its cancellation token
    pub fn cancelled() -> Self {
        Self::new(TransportErrorKind::Cancelled, "request cancelled")
    }

    /// Classify a reqwest failure
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_body() || err.is_decode() {
            TransportErrorKind::Body
        } else {
            TransportErrorKind::Request
        };

        Self::new(kind, err.to_string())
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == TransportErrorKind::Cancelled
    }
}

/// Uniform outcome of a dispatched request
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedResponse {
    /// Parsed JSON body
    Success(Value),
    /// Server reported an error through its `message` field
    ApiError(String),
    /// The HTTP exchange did not complete
    TransportError(TransportError),
}

impl NormalizedResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Borrow the success value, if any
    pub fn success(&self) -> Option<&Value> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Convert into a `Result` so callers can use `?`
    pub fn into_result(self) -> RestResult<Value> {
        match self {
            Self::Success(value) => Ok(value),
            Self::ApiError(message) => Err(RestError::Api(message)),
            Self::TransportError(err) => Err(RestError::Transport(err)),
        }
    }
}

/// Classify a completed HTTP exchange
///
/// - a JSON object with a `message` field is an API error
/// - other JSON is a success
/// - a non-JSON body with a success status is wrapped as `[raw_text]`
/// - an empty body with a success status is `null`
/// - anything else is a [`RestError::MalformedResponse`]
pub fn classify_response(status: StatusCode, body: &str) -> RestResult<NormalizedResponse> {
    let trimmed = body.trim();

    if trimmed.is_empty() {
        return if status.is_success() {
            Ok(NormalizedResponse::Success(Value::Null))
        } else {
            Err(malformed(status, body))
        };
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => match value.get("message") {
            Some(message) => Ok(NormalizedResponse::ApiError(message_text(message))),
            None => Ok(NormalizedResponse::Success(value)),
        },
        Err(_) if status.is_success() => Ok(NormalizedResponse::Success(Value::Array(vec![
            Value::String(body.to_string()),
        ]))),
        Err(_) => Err(malformed(status, body)),
    }
}

fn message_text(message: &Value) -> String {
    match message {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn malformed(status: StatusCode, body: &str) -> RestError {
    RestError::MalformedResponse {
        status: status.as_u16(),
        body: body.to_string(),
    }
}
