//! Credentials and request signing for the Coinbase Exchange REST API
//!
//! Private endpoints are authenticated with four headers:
//! `CB-ACCESS-KEY`, `CB-ACCESS-TIMESTAMP`, `CB-ACCESS-PASSPHRASE` and
//! `CB-ACCESS-SIGN`. The signature is a base64 HMAC-SHA256 over
//! `timestamp + METHOD + "/" + endpoint + body`, keyed with the decoded
//! API secret.
//!
//! # Example
//!
//! ```no_run
//! use coinbase_auth::{Credentials, Method, RequestSigner};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load credentials from environment
//!     let creds = Credentials::from_env()?;
//!
//!     // One timestamp per request, used for header and signature alike
//!     let signer = RequestSigner::new(&creds, 1_700_000_000, Method::Get, "accounts");
//!     println!("CB-ACCESS-SIGN: {}", signer.sign(""));
//!
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;
mod signer;

pub use credentials::{Credentials, API_KEY_VAR, API_PASSPHRASE_VAR, API_SECRET_VAR};
pub use error::{AuthError, AuthResult};
pub use signer::{serialize_body, signature_payload, Method, RequestSigner};
