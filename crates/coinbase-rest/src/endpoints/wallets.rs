//! Wallet (Coinbase account) endpoints
//!
//! These endpoints require authentication.

use tracing::instrument;

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::request::RequestSpec;
use crate::response::NormalizedResponse;

/// Wallets held on the linked Coinbase account
pub struct WalletEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> WalletEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// List wallets available for transfers
    #[instrument(skip(self))]
    pub async fn list_wallets(&self) -> RestResult<NormalizedResponse> {
        self.dispatcher
            .dispatch(RequestSpec::get("coinbase-accounts"))
            .await
    }

    /// Generate a one-time crypto deposit address for a wallet
    ///
    /// # Arguments
    /// * `account_id` - Wallet (Coinbase account) ID
    #[instrument(skip(self))]
    pub async fn generate_address(&self, account_id: &str) -> RestResult<NormalizedResponse> {
        self.dispatcher
            .dispatch(RequestSpec::post(format!(
                "coinbase-accounts/{}/addresses",
                account_id
            )))
            .await
    }
}
