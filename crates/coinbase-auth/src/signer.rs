//! Request signing
//!
//! A [`RequestSigner`] is bound to one request: it carries the single
//! timestamp that goes into both the `CB-ACCESS-TIMESTAMP` header and the
//! signature payload. It never reads the clock.

use std::fmt;

use crate::credentials::Credentials;
use crate::error::{AuthError, AuthResult};

/// HTTP methods accepted by the Coinbase Exchange REST API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    /// Uppercase method name as it appears in the signature payload
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry (and sign) a body
    pub fn has_body(&self) -> bool {
        matches!(self, Method::Post)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the exact string that is HMAC-signed
///
/// `timestamp + METHOD + "/" + endpoint + body`, with an empty body for
/// methods that carry none.
pub fn signature_payload(timestamp: &str, method: Method, endpoint: &str, body: &str) -> String {
    let endpoint = endpoint.trim_start_matches('/');
    let body = if method.has_body() { body } else { "" };

    let mut payload =
        String::with_capacity(timestamp.len() + 7 + endpoint.len() + 1 + body.len());
    payload.push_str(timestamp);
    payload.push_str(method.as_str());
    payload.push('/');
    payload.push_str(endpoint);
    payload.push_str(body);
    payload
}

/// Serialize a structured body to the JSON string that is both signed and sent
///
/// Call once per request and reuse the result for the signature and the wire
/// body. Key order follows `serde_json`'s map and is not part of the
/// contract. An absent body is the empty string.
pub fn serialize_body(body: Option<&serde_json::Value>) -> AuthResult<String> {
    match body {
        Some(value) => serde_json::to_string(value).map_err(AuthError::Serialize),
        None => Ok(String::new()),
    }
}

/// Request signer for building authenticated requests
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    method: Method,
    endpoint: String,
    timestamp: String,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer
    ///
    /// # Arguments
    /// * `credentials` - Credentials to sign with
    /// * `timestamp` - Epoch seconds captured once for this request
    /// * `method` - HTTP method
    /// * `endpoint` - Endpoint path without leading slash
    pub fn new(
        credentials: &'a Credentials,
        timestamp: i64,
        method: Method,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            method,
            endpoint: endpoint.into(),
            timestamp: timestamp.to_string(),
        }
    }

    /// Value for the `CB-ACCESS-TIMESTAMP` header
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Value for the `CB-ACCESS-KEY` header
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Value for the `CB-ACCESS-PASSPHRASE` header
    pub fn passphrase(&self) -> &str {
        self.credentials.passphrase()
    }

    /// Payload that [`sign`](Self::sign) will HMAC for the given body
    pub fn payload(&self, body: &str) -> String {
        signature_payload(&self.timestamp, self.method, &self.endpoint, body)
    }

    /// Sign the request with the given serialized body
    pub fn sign(&self, body: &str) -> String {
        self.credentials
            .sign(&self.timestamp, self.method, &self.endpoint, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn creds() -> Credentials {
        Credentials::new("key", "c2VjcmV0LWtleS1ieXRlcw==", "pass").unwrap()
    }

    #[test]
    fn test_payload_layout() {
        let payload = signature_payload("1415398768", Method::Post, "orders", r#"{"a":1}"#);
        assert_eq!(payload, r#"1415398768POST/orders{"a":1}"#);
    }

    #[test]
    fn test_payload_adds_single_leading_slash() {
        assert_eq!(
            signature_payload("1", Method::Get, "accounts/abc/ledger", ""),
            "1GET/accounts/abc/ledger"
        );
        assert_eq!(
            signature_payload("1", Method::Get, "/accounts", ""),
            "1GET/accounts"
        );
    }

    #[test]
    fn test_payload_drops_body_for_get_and_delete() {
        assert_eq!(signature_payload("1", Method::Get, "fills", "{}"), "1GET/fills");
        assert_eq!(
            signature_payload("1", Method::Delete, "orders", "{}"),
            "1DELETE/orders"
        );
    }

    #[test]
    fn test_serialize_body_round_trips() {
        let body = json!({"side": "buy", "price": "1.0", "product_id": "BTC-USD"});
        let serialized = serialize_body(Some(&body)).unwrap();

        assert_eq!(serde_json::from_str::<serde_json::Value>(&serialized).unwrap(), body);
        assert_eq!(serialize_body(Some(&body)).unwrap(), serialized);
        assert_eq!(serialize_body(None).unwrap(), "");
    }

    #[test]
    fn test_signer_threads_one_timestamp() {
        let creds = creds();
        let signer = RequestSigner::new(&creds, 1_700_000_000, Method::Get, "accounts");

        assert_eq!(signer.timestamp(), "1700000000");
        assert_eq!(signer.payload(""), "1700000000GET/accounts");
        assert_eq!(
            signer.sign(""),
            creds.sign("1700000000", Method::Get, "accounts", "")
        );
        assert_eq!(signer.api_key(), "key");
        assert_eq!(signer.passphrase(), "pass");
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert!(Method::Post.has_body());
        assert!(!Method::Get.has_body());
    }
}
