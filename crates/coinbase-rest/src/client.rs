//! Main REST client implementation

use coinbase_auth::{AuthError, Credentials};
use tracing::{debug, info};

use crate::dispatch::Dispatcher;
use crate::endpoints::{
    AccountEndpoints, FeeEndpoints, OrderEndpoints, ProductEndpoints, ProfileEndpoints,
    UserEndpoints, WalletEndpoints,
};
use crate::error::{RestError, RestResult};
use crate::request::RequestSpec;
use crate::response::NormalizedResponse;

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default maximum number of redirects followed
const DEFAULT_MAX_REDIRECTS: usize = 10;

const PRODUCTION_URL: &str = "https://api.exchange.coinbase.com/";
const SANDBOX_URL: &str = "https://api-public.sandbox.exchange.coinbase.com/";

/// Environment variable selecting the sandbox (`1` or `true`)
pub const SANDBOX_VAR: &str = "COINBASE_SANDBOX";
/// Environment variable overriding the base URL
pub const BASE_URL_VAR: &str = "COINBASE_BASE_URL";

/// Which API deployment requests go to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Live exchange
    #[default]
    Production,
    /// Public sandbox
    Sandbox,
    /// Any other base URL (proxies, mock servers)
    Custom(String),
}

impl Environment {
    /// Base URL, always ending with `/`
    pub fn base_url(&self) -> String {
        let url = match self {
            Self::Production => PRODUCTION_URL,
            Self::Sandbox => SANDBOX_URL,
            Self::Custom(url) => url.as_str(),
        };

        if url.ends_with('/') {
            url.to_string()
        } else {
            format!("{}/", url)
        }
    }
}

/// Coinbase Exchange REST API client
///
/// Provides access to both public and private endpoints.
///
/// # Example
///
/// ```no_run
/// use coinbase_rest::{ClientConfig, CoinbaseRestClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = CoinbaseRestClient::new()?;
///     let ticker = client.products().get_ticker("BTC-USD").await?;
///     println!("{:?}", ticker);
///
///     // With authentication for private endpoints
///     let auth_client = CoinbaseRestClient::with_config(ClientConfig::from_env()?)?;
///     let accounts = auth_client.accounts()?.list_accounts().await?;
///     println!("{:?}", accounts);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CoinbaseRestClient {
    dispatcher: Dispatcher,
}

impl CoinbaseRestClient {
    /// Create a new production client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new production client with credentials
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let dispatcher = Dispatcher::new(&config)?;

        info!(
            base_url = dispatcher.base_url(),
            authenticated = dispatcher.has_credentials(),
            "Created Coinbase REST client"
        );

        Ok(Self { dispatcher })
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.dispatcher.has_credentials()
    }

    /// The underlying dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Dispatch a hand-built request
    pub async fn dispatch(&self, request: RequestSpec) -> RestResult<NormalizedResponse> {
        self.dispatcher.dispatch(request).await
    }

    // ========================================================================
    // Public Endpoints
    // ========================================================================

    /// Get product (market data) endpoints
    pub fn products(&self) -> ProductEndpoints<'_> {
        ProductEndpoints::new(&self.dispatcher)
    }

    // ========================================================================
    // Private Endpoints
    // ========================================================================

    fn require_credentials(&self) -> RestResult<&Dispatcher> {
        if self.dispatcher.has_credentials() {
            Ok(&self.dispatcher)
        } else {
            Err(RestError::AuthRequired)
        }
    }

    /// Get account endpoints (requires credentials)
    pub fn accounts(&self) -> RestResult<AccountEndpoints<'_>> {
        Ok(AccountEndpoints::new(self.require_credentials()?))
    }

    /// Get wallet endpoints (requires credentials)
    pub fn wallets(&self) -> RestResult<WalletEndpoints<'_>> {
        Ok(WalletEndpoints::new(self.require_credentials()?))
    }

    /// Get fee endpoints (requires credentials)
    pub fn fees(&self) -> RestResult<FeeEndpoints<'_>> {
        Ok(FeeEndpoints::new(self.require_credentials()?))
    }

    /// Get order endpoints (requires credentials)
    pub fn orders(&self) -> RestResult<OrderEndpoints<'_>> {
        Ok(OrderEndpoints::new(self.require_credentials()?))
    }

    /// Get profile endpoints (requires credentials)
    pub fn profiles(&self) -> RestResult<ProfileEndpoints<'_>> {
        Ok(ProfileEndpoints::new(self.require_credentials()?))
    }

    /// Get user endpoints (requires credentials)
    pub fn users(&self) -> RestResult<UserEndpoints<'_>> {
        Ok(UserEndpoints::new(self.require_credentials()?))
    }
}

impl std::fmt::Debug for CoinbaseRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinbaseRestClient")
            .field("base_url", &self.dispatcher.base_url())
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Target deployment
    pub environment: Environment,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum redirects followed per request
    pub max_redirects: usize,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            environment: Environment::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the environment
    ///
    /// Credentials come from `COINBASE_API_KEY`, `COINBASE_API_SECRET` and
    /// `COINBASE_API_PASSPHRASE`; when none of them is set the client is
    /// public-only. `COINBASE_SANDBOX=1` selects the sandbox and
    /// `COINBASE_BASE_URL` overrides the base URL entirely.
    ///
    /// # Errors
    /// Returns an error if credentials are partially set or the secret is
    /// not valid base64.
    pub fn from_env() -> RestResult<Self> {
        let mut config = Self::new();

        match Credentials::from_env() {
            Ok(credentials) => config.credentials = Some(credentials),
            Err(AuthError::EnvVarNotSet(var)) if !any_credential_var_set() => {
                debug!("{} not set, using public endpoints only", var);
            }
            Err(err) => return Err(err.into()),
        }

        if let Ok(url) = std::env::var(BASE_URL_VAR) {
            config.environment = Environment::Custom(url);
        } else if std::env::var(SANDBOX_VAR).is_ok_and(|v| is_truthy(&v)) {
            config.environment = Environment::Sandbox;
        }

        Ok(config)
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the target deployment
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Use the public sandbox
    pub fn sandbox(self) -> Self {
        self.with_environment(Environment::Sandbox)
    }

    /// Use a custom base URL
    pub fn with_base_url(self, url: impl Into<String>) -> Self {
        self.with_environment(Environment::Custom(url.into()))
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the redirect limit
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

fn any_credential_var_set() -> bool {
    [
        coinbase_auth::API_KEY_VAR,
        coinbase_auth::API_SECRET_VAR,
        coinbase_auth::API_PASSPHRASE_VAR,
    ]
    .iter()
    .any(|var| std::env::var(var).is_ok())
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}
