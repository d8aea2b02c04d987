//! Common test utilities for integration tests
//!
//! Clients here point at a local mock server and sign with a fixed secret so
//! signatures can be recomputed independently.

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, TimeZone, Utc};
use coinbase_rest::{ClientConfig, CoinbaseRestClient, Credentials};
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub const API_KEY: &str = "test-api-key";
pub const PASSPHRASE: &str = "test-passphrase";
/// base64("secret-key-bytes")
pub const API_SECRET: &str = "c2VjcmV0LWtleS1ieXRlcw==";
pub const RAW_SECRET: &[u8] = b"secret-key-bytes";

/// Epoch seconds used for pinned-timestamp requests
pub const FIXED_EPOCH: i64 = 1_700_000_000;

pub fn fixed_timestamp() -> DateTime<Utc> {
    Utc.timestamp_opt(FIXED_EPOCH, 0).unwrap()
}

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY, API_SECRET, PASSPHRASE).unwrap()
}

/// Authenticated client against the mock server
pub fn private_client(base_url: &str) -> CoinbaseRestClient {
    CoinbaseRestClient::with_config(
        ClientConfig::new()
            .with_base_url(base_url)
            .with_credentials(credentials())
            .with_timeout(5),
    )
    .unwrap()
}

/// Unauthenticated client against the mock server
pub fn public_client(base_url: &str) -> CoinbaseRestClient {
    CoinbaseRestClient::with_config(ClientConfig::new().with_base_url(base_url).with_timeout(5))
        .unwrap()
}

/// HMAC-SHA256 of `payload` with the raw test secret, base64 encoded
pub fn expected_signature(payload: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(RAW_SECRET).unwrap();
    mac.update(payload.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}
