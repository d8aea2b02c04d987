//! Re-exports for convenience
//!
//! Import everything you need with:
//! ```
//! use coinbase_rest::prelude::*;
//! ```

// Client
pub use crate::client::{ClientConfig, CoinbaseRestClient, Environment};
pub use crate::dispatch::Dispatcher;

// Requests
pub use crate::endpoints::products::CandleQuery;
pub use crate::params::{ParamValue, QueryParams};
pub use crate::range::{TimeRange, TimeRangeChunks};
pub use crate::request::RequestSpec;
pub use crate::types::{OrderRequest, OrderSide, OrderType, TimeInForce};

// Responses and errors
pub use crate::error::{RestError, RestResult};
pub use crate::response::{NormalizedResponse, TransportError, TransportErrorKind};

// Timestamps
pub use crate::time::{format_timestamp, format_timestamp_now};

// Auth
pub use coinbase_auth::{Credentials, Method};

// Cancellation
pub use tokio_util::sync::CancellationToken;

// Decimal for prices/sizes
pub use rust_decimal::Decimal;
