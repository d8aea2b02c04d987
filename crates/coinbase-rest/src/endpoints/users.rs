//! User endpoints

use tracing::instrument;

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::request::RequestSpec;
use crate::response::NormalizedResponse;

pub struct UserEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> UserEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Payment method limits for a user
    ///
    /// # Arguments
    /// * `user_id` - User ID
    #[instrument(skip(self))]
    pub async fn get_exchange_limits(&self, user_id: &str) -> RestResult<NormalizedResponse> {
        self.dispatcher
            .dispatch(RequestSpec::get(format!("users/{}/exchange-limits", user_id)))
            .await
    }
}
