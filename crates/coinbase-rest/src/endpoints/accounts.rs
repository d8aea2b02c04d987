//! Private account endpoints
//!
//! These endpoints require authentication.

use tracing::{debug, instrument};

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::params::QueryParams;
use crate::request::RequestSpec;
use crate::response::NormalizedResponse;

/// Trading accounts of the profile the API key belongs to
pub struct AccountEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// List trading accounts and their balances
    #[instrument(skip(self))]
    pub async fn list_accounts(&self) -> RestResult<NormalizedResponse> {
        debug!("Fetching accounts");
        self.dispatcher.dispatch(RequestSpec::get("accounts")).await
    }

    /// Get a single account
    ///
    /// # Arguments
    /// * `account_id` - Account ID
    #[instrument(skip(self))]
    pub async fn get_account(&self, account_id: &str) -> RestResult<NormalizedResponse> {
        self.dispatcher
            .dispatch(RequestSpec::get(format!("accounts/{}", account_id)))
            .await
    }

    /// List holds placed on an account for open orders or withdrawals
    ///
    /// # Arguments
    /// * `account_id` - Account ID
    /// * `params` - Pagination (`before`, `after`, `limit`)
    #[instrument(skip(self, params))]
    pub async fn get_holds(
        &self,
        account_id: &str,
        params: QueryParams,
    ) -> RestResult<NormalizedResponse> {
        self.dispatcher
            .dispatch(RequestSpec::get(format!("accounts/{}/holds", account_id)).with_query(params))
            .await
    }

    /// List account activity (ledger entries)
    ///
    /// # Arguments
    /// * `account_id` - Account ID
    /// * `params` - Filters and pagination (`start_date`, `end_date`, `before`, `after`, `limit`)
    #[instrument(skip(self, params))]
    pub async fn get_ledger(
        &self,
        account_id: &str,
        params: QueryParams,
    ) -> RestResult<NormalizedResponse> {
        self.dispatcher
            .dispatch(
                RequestSpec::get(format!("accounts/{}/ledger", account_id)).with_query(params),
            )
            .await
    }

    /// List deposits and withdrawals for an account
    ///
    /// # Arguments
    /// * `account_id` - Account ID
    /// * `params` - Filters and pagination (`type`, `before`, `after`, `limit`)
    #[instrument(skip(self, params))]
    pub async fn get_transfers(
        &self,
        account_id: &str,
        params: QueryParams,
    ) -> RestResult<NormalizedResponse> {
        self.dispatcher
            .dispatch(
                RequestSpec::get(format!("accounts/{}/transfers", account_id)).with_query(params),
            )
            .await
    }
}
