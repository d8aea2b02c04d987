//! Fee endpoint

use tracing::instrument;

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::request::RequestSpec;
use crate::response::NormalizedResponse;

pub struct FeeEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> FeeEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Current maker/taker fee rates and 30-day trailing volume
    #[instrument(skip(self))]
    pub async fn get_fees(&self) -> RestResult<NormalizedResponse> {
        self.dispatcher.dispatch(RequestSpec::get("fees")).await
    }
}
