//! Request description passed to the dispatcher

use chrono::{DateTime, Utc};
use coinbase_auth::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::{RestError, RestResult};
use crate::params::QueryParams;

/// One REST call, built fresh per request
///
/// # Example
///
/// ```
/// use coinbase_rest::{QueryParams, RequestSpec};
///
/// let request = RequestSpec::get("fills")
///     .with_query(QueryParams::new().with("product_id", "BTC-USD"));
///
/// assert!(!request.is_public);
/// ```
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// Endpoint path without leading slash (e.g. "accounts")
    pub endpoint: String,
    /// HTTP method
    pub method: Method,
    /// Public calls carry no authentication headers
    pub is_public: bool,
    /// Query parameters
    pub query: QueryParams,
    /// JSON body, sent and signed for POST only
    pub body: Option<Value>,
    /// Signing timestamp; the current instant is captured when absent
    pub timestamp: Option<DateTime<Utc>>,
}

impl RequestSpec {
    /// Create a private (signed) request
    pub fn private(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            is_public: false,
            query: QueryParams::new(),
            body: None,
            timestamp: None,
        }
    }

    /// Create a public (unsigned) request
    pub fn public(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            is_public: true,
            ..Self::private(method, endpoint)
        }
    }

    /// Private GET
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::private(Method::Get, endpoint)
    }

    /// Private POST
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::private(Method::Post, endpoint)
    }

    /// Private DELETE
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::private(Method::Delete, endpoint)
    }

    /// Set query parameters
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Set a JSON body
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize a typed value as the JSON body
    pub fn with_json<T: Serialize>(self, body: &T) -> RestResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| RestError::InvalidParameter(format!("body serialization: {}", e)))?;
        Ok(self.with_body(value))
    }

    /// Pin the signing timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
