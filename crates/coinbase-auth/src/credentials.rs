//! API credentials for Coinbase Exchange
//!
//! Implements HMAC-SHA256 signing as required by the `CB-ACCESS-SIGN` header.
//!
//! # Security
//!
//! Secrets are stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretBox, SecretString};
use sha2::Sha256;
use tracing::debug;

use crate::error::{AuthError, AuthResult};
use crate::signer::{signature_payload, Method};

type HmacSha256 = Hmac<Sha256>;

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "COINBASE_API_KEY";
/// Environment variable holding the base64 API secret
pub const API_SECRET_VAR: &str = "COINBASE_API_SECRET";
/// Environment variable holding the API passphrase
pub const API_PASSPHRASE_VAR: &str = "COINBASE_API_PASSPHRASE";

/// API credentials for authenticated requests
///
/// The secret is decoded once at construction, so a malformed secret is
/// rejected before any request is built. Secret and passphrase are zeroized
/// when the Credentials are dropped.
pub struct Credentials {
    /// API key (public)
    api_key: String,
    /// API secret (decoded from base64, zeroized on drop)
    secret: SecretBox<Vec<u8>>,
    /// Passphrase chosen when the key was created
    passphrase: SecretString,
}

impl Credentials {
    /// Create new credentials
    ///
    /// # Arguments
    /// * `api_key` - Your Coinbase Exchange API key
    /// * `api_secret` - Your API secret (base64 encoded string)
    /// * `passphrase` - The passphrase set for this key
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidCredentials`] if the key is empty or the
    /// secret is not valid base64.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl AsRef<str>,
        passphrase: impl Into<String>,
    ) -> AuthResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }

        let secret_str = api_secret.as_ref().trim();
        if secret_str.is_empty() {
            return Err(AuthError::InvalidCredentials("API secret is empty".to_string()));
        }

        let decoded = BASE64.decode(secret_str).map_err(|e| {
            AuthError::InvalidCredentials(format!("Invalid base64 API secret: {}", e))
        })?;

        Ok(Self {
            api_key,
            secret: SecretBox::new(Box::new(decoded)),
            passphrase: SecretString::from(passphrase.into()),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `COINBASE_API_KEY`, `COINBASE_API_SECRET` and
    /// `COINBASE_API_PASSPHRASE` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = env_var(API_KEY_VAR)?;
        let api_secret = env_var(API_SECRET_VAR)?;
        let passphrase = env_var(API_PASSPHRASE_VAR)?;

        debug!("Loaded Coinbase credentials from environment");
        Self::new(api_key, api_secret, passphrase)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the passphrase for the `CB-ACCESS-PASSPHRASE` header
    pub fn passphrase(&self) -> &str {
        self.passphrase.expose_secret()
    }

    /// Sign a request for the Coinbase Exchange API
    ///
    /// Signature algorithm:
    /// 1. payload = timestamp + METHOD + "/" + endpoint + body
    /// 2. HMAC-SHA256(decoded_secret, payload)
    /// 3. Base64 encode result
    ///
    /// GET and DELETE requests are signed with an empty body whatever `body`
    /// holds. The query string is never part of the payload.
    ///
    /// # Arguments
    /// * `timestamp` - The exact value sent in `CB-ACCESS-TIMESTAMP`
    /// * `method` - HTTP method
    /// * `endpoint` - Endpoint path without leading slash (e.g. "orders")
    /// * `body` - Serialized JSON body, empty if none
    pub fn sign(&self, timestamp: &str, method: Method, endpoint: &str, body: &str) -> String {
        self.sign_payload(&signature_payload(timestamp, method, endpoint, body))
    }

    /// HMAC-SHA256 an already assembled payload and base64 encode the digest
    pub fn sign_payload(&self, payload: &str) -> String {
        // expose_secret() provides controlled access to the key
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret())
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());

        BASE64.encode(mac.finalize().into_bytes())
    }
}

fn env_var(name: &str) -> AuthResult<String> {
    std::env::var(name).map_err(|_| AuthError::EnvVarNotSet(name.to_string()))
}

impl Clone for Credentials {
    /// Clone credentials (creates new secret containers with the same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            secret: SecretBox::new(Box::new(self.secret.expose_secret().clone())),
            passphrase: SecretString::from(self.passphrase.expose_secret().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible = self
            .api_key
            .char_indices()
            .nth(8)
            .map_or(self.api_key.as_str(), |(idx, _)| &self.api_key[..idx]);

        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", visible))
            .field("secret", &"[REDACTED]")
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}
