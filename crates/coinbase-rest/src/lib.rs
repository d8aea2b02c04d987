//! REST API client for the Coinbase Exchange
//!
//! This crate signs, dispatches and normalizes calls to the Coinbase Exchange
//! REST API.
//!
//! # Features
//!
//! - **Market Data**: Products, order book, trades, stats, ticker, candles
//! - **Accounts**: Balances, holds, ledger, transfers, wallets
//! - **Trading**: Place, list and cancel orders, fills, fees
//! - **Profiles**: List, inspect and create profiles
//!
//! # Responses
//!
//! Every call returns a [`NormalizedResponse`]: `Success` with the parsed
//! JSON, `ApiError` with the server's message, or `TransportError` when the
//! exchange could not be reached. `Err` is reserved for failures of the
//! client itself (missing credentials, malformed responses, bad input).
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Requests are signed with
//! HMAC-SHA256 over `timestamp + METHOD + "/" + endpoint + body`; the same
//! timestamp is sent in `CB-ACCESS-TIMESTAMP`.
//!
//! # Example
//!
//! ```no_run
//! use coinbase_rest::{ClientConfig, CoinbaseRestClient, NormalizedResponse, QueryParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = CoinbaseRestClient::new()?;
//!     match client.products().get_ticker("BTC-USD").await? {
//!         NormalizedResponse::Success(ticker) => println!("BTC-USD: {}", ticker),
//!         NormalizedResponse::ApiError(message) => eprintln!("API error: {}", message),
//!         NormalizedResponse::TransportError(err) => eprintln!("{}", err),
//!     }
//!
//!     // Private endpoints (auth required)
//!     let auth_client = CoinbaseRestClient::with_config(ClientConfig::from_env()?.sandbox())?;
//!     let open = auth_client
//!         .orders()?
//!         .list_orders(QueryParams::new().with("status", ["open", "pending"]))
//!         .await?
//!         .into_result()?;
//!     println!("Open orders: {}", open);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Rate Limiting
//!
//! The client neither retries nor throttles. Callers that issue many requests
//! must pace them to the exchange's limits themselves.

pub mod client;
pub mod dispatch;
pub mod endpoints;
pub mod error;
pub mod params;
pub mod prelude;
pub mod range;
pub mod request;
pub mod response;
pub mod time;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, CoinbaseRestClient, Environment};
pub use coinbase_auth::{Credentials, Method};
pub use dispatch::Dispatcher;
pub use endpoints::products::CandleQuery;
pub use error::{RestError, RestResult};
pub use params::{ParamValue, QueryParams};
pub use range::{TimeRange, TimeRangeChunks, MAX_CANDLES_PER_REQUEST};
pub use request::RequestSpec;
pub use response::{classify_response, NormalizedResponse, TransportError, TransportErrorKind};
pub use time::{format_timestamp, format_timestamp_now};
pub use types::{OrderRequest, OrderSide, OrderType, TimeInForce};

// Re-export for cancellable dispatch
pub use tokio_util::sync::CancellationToken;
