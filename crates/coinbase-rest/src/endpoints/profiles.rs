//! Profile endpoints
//!
//! These endpoints require authentication.

use serde_json::json;
use tracing::instrument;

use crate::dispatch::Dispatcher;
use crate::error::{RestError, RestResult};
use crate::params::QueryParams;
use crate::request::RequestSpec;
use crate::response::NormalizedResponse;

/// Portfolios (profiles) of the user
pub struct ProfileEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> ProfileEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// List profiles
    ///
    /// # Arguments
    /// * `active` - Only active (or only inactive) profiles when set
    #[instrument(skip(self))]
    pub async fn list_profiles(&self, active: Option<bool>) -> RestResult<NormalizedResponse> {
        let query = QueryParams::new().with("active", active);
        self.dispatcher
            .dispatch(RequestSpec::get("profiles").with_query(query))
            .await
    }

    /// Get a single profile
    #[instrument(skip(self))]
    pub async fn get_profile(&self, profile_id: &str) -> RestResult<NormalizedResponse> {
        self.dispatcher
            .dispatch(RequestSpec::get(format!("profiles/{}", profile_id)))
            .await
    }

    /// Create a new profile
    ///
    /// # Arguments
    /// * `name` - Profile name
    #[instrument(skip(self))]
    pub async fn create_profile(&self, name: &str) -> RestResult<NormalizedResponse> {
        if name.trim().is_empty() {
            return Err(RestError::InvalidParameter(
                "profile name must not be empty".to_string(),
            ));
        }

        self.dispatcher
            .dispatch(RequestSpec::post("profiles").with_body(json!({ "name": name })))
            .await
    }
}
