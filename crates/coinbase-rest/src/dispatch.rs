//! Request dispatcher
//!
//! Assembles headers, signs private calls, performs the HTTP exchange and
//! normalizes the outcome. Nothing is retried and no state is kept between
//! calls besides the immutable credentials.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use coinbase_auth::{serialize_body, Credentials, Method, RequestSigner};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::client::ClientConfig;
use crate::error::{RestError, RestResult};
use crate::request::RequestSpec;
use crate::response::{classify_response, NormalizedResponse, TransportError, TransportErrorKind};

/// API key header
pub const CB_ACCESS_KEY: &str = "CB-ACCESS-KEY";
/// Signature header
pub const CB_ACCESS_SIGN: &str = "CB-ACCESS-SIGN";
/// Epoch seconds header, identical to the signed timestamp
pub const CB_ACCESS_TIMESTAMP: &str = "CB-ACCESS-TIMESTAMP";
/// Passphrase header
pub const CB_ACCESS_PASSPHRASE: &str = "CB-ACCESS-PASSPHRASE";

const JSON: &str = "application/json";

/// Sends [`RequestSpec`]s and returns [`NormalizedResponse`]s
#[derive(Clone)]
pub struct Dispatcher {
    http_client: Client,
    base_url: String,
    credentials: Option<Arc<Credentials>>,
}

impl Dispatcher {
    /// Build a dispatcher from client configuration
    pub fn new(config: &ClientConfig) -> RestResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .http1_only()
            .user_agent(config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.environment.base_url(),
            credentials: config.credentials.clone().map(Arc::new),
        })
    }

    /// Base URL requests are sent to (always ends with `/`)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the dispatcher can sign private calls
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Full URL for an endpoint and its query parameters
    pub fn url_for(&self, request: &RequestSpec) -> RestResult<String> {
        Ok(format!(
            "{}{}{}",
            self.base_url,
            request.endpoint.trim_start_matches('/'),
            request.query.to_query_string()?
        ))
    }

    /// Dispatch a request
    ///
    /// # Errors
    /// Fails before any network call if a private request is made without
    /// credentials, if the body cannot be serialized, or if the query cannot
    /// be encoded. Fails after the call if the response is malformed. API
    /// errors and transport failures are returned as
    /// [`NormalizedResponse`] variants.
    #[instrument(
        skip(self, request),
        fields(method = %request.method, endpoint = %request.endpoint, public = request.is_public)
    )]
    pub async fn dispatch(&self, request: RequestSpec) -> RestResult<NormalizedResponse> {
        let builder = self.prepare(&request)?;
        self.execute(builder).await
    }

    /// Dispatch a request that can be abandoned through `cancel`
    ///
    /// A cancelled call yields a `TransportError` of kind
    /// [`TransportErrorKind::Cancelled`].
    #[instrument(
        skip(self, request, cancel),
        fields(method = %request.method, endpoint = %request.endpoint, public = request.is_public)
    )]
    pub async fn dispatch_with_cancel(
        &self,
        request: RequestSpec,
        cancel: &CancellationToken,
    ) -> RestResult<NormalizedResponse> {
        let builder = self.prepare(&request)?;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Request cancelled");
                Ok(NormalizedResponse::TransportError(TransportError::cancelled()))
            }
            outcome = self.execute(builder) => outcome,
        }
    }

    /// Build the HTTP request: URL, headers, signature and body
    fn prepare(&self, request: &RequestSpec) -> RestResult<RequestBuilder> {
        let endpoint = request.endpoint.trim_start_matches('/');
        let url = self.url_for(request)?;

        // Serialized once: these exact bytes are signed and sent
        let body = if request.method.has_body() {
            serialize_body(request.body.as_ref())?
        } else {
            String::new()
        };

        let mut builder = self
            .http_client
            .request(http_method(request.method), &url)
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON);

        if !request.is_public {
            let credentials = self.credentials.as_deref().ok_or(RestError::AuthRequired)?;

            // Captured once for both the header and the signature
            let timestamp = request.timestamp.unwrap_or_else(Utc::now).timestamp();
            let signer = RequestSigner::new(credentials, timestamp, request.method, endpoint);

            builder = builder
                .header(CB_ACCESS_KEY, signer.api_key())
                .header(CB_ACCESS_TIMESTAMP, signer.timestamp())
                .header(CB_ACCESS_PASSPHRASE, signer.passphrase())
                .header(CB_ACCESS_SIGN, signer.sign(&body));
        }

        if request.method.has_body() {
            builder = builder.body(body);
        }

        debug!("Making request to {}", url);
        Ok(builder)
    }

    async fn execute(&self, builder: RequestBuilder) -> RestResult<NormalizedResponse> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                let err = TransportError::from_reqwest(&err);
                warn!(kind = %err.kind, "Request failed: {}", err.message);
                return Ok(NormalizedResponse::TransportError(err));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!("Failed to read response body: {}", err);
                return Ok(NormalizedResponse::TransportError(TransportError::new(
                    TransportErrorKind::Body,
                    err.to_string(),
                )));
            }
        };

        debug!(status = status.as_u16(), bytes = body.len(), "Received response");
        classify_response(status, &body)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Default `User-Agent` header
pub const DEFAULT_USER_AGENT: &str = concat!("coinbase-rest/", env!("CARGO_PKG_VERSION"));

fn http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Delete => reqwest::Method::DELETE,
    }
}
