//! Order management endpoints
//!
//! These endpoints require authentication.

use tracing::{debug, instrument};

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::params::QueryParams;
use crate::request::RequestSpec;
use crate::response::NormalizedResponse;
use crate::types::OrderRequest;

/// Default page size when listing orders
pub const DEFAULT_ORDER_LIMIT: u32 = 100;

/// Order management endpoints
pub struct OrderEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> OrderEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// List orders
    ///
    /// `limit` defaults to 100 and `status` to `all` when not supplied.
    ///
    /// # Arguments
    /// * `params` - Filters (`product_id`, `status`, `sortedBy`, `before`, `after`, `limit`)
    #[instrument(skip(self, params))]
    pub async fn list_orders(&self, mut params: QueryParams) -> RestResult<NormalizedResponse> {
        params.set_default("limit", DEFAULT_ORDER_LIMIT);
        params.set_default("status", ["all"]);

        self.dispatcher
            .dispatch(RequestSpec::get("orders").with_query(params))
            .await
    }

    /// Get a single order by exchange ID
    ///
    /// # Arguments
    /// * `order_id` - Order ID (or `client:<client_oid>`)
    /// * `params` - Extra filters (`market_type`)
    #[instrument(skip(self, params))]
    pub async fn get_order(
        &self,
        order_id: &str,
        params: QueryParams,
    ) -> RestResult<NormalizedResponse> {
        self.dispatcher
            .dispatch(RequestSpec::get(format!("orders/{}", order_id)).with_query(params))
            .await
    }

    /// Place a new order
    ///
    /// # Arguments
    /// * `order` - Order request with all parameters
    #[instrument(skip(self, order), fields(product_id = %order.product_id, side = %order.side, order_type = %order.order_type))]
    pub async fn create_order(&self, order: &OrderRequest) -> RestResult<NormalizedResponse> {
        debug!(
            "Placing {} {} order on {}",
            order.side, order.order_type, order.product_id
        );

        let request = RequestSpec::post("orders").with_json(order)?;
        self.dispatcher.dispatch(request).await
    }

    /// Cancel a single order
    ///
    /// # Arguments
    /// * `order_id` - Order ID (or `client:<client_oid>`)
    /// * `product_id` - Optional product, speeds up the lookup
    #[instrument(skip(self))]
    pub async fn cancel_order(
        &self,
        order_id: &str,
        product_id: Option<&str>,
    ) -> RestResult<NormalizedResponse> {
        let query = QueryParams::new().with("product_id", product_id);
        self.dispatcher
            .dispatch(RequestSpec::delete(format!("orders/{}", order_id)).with_query(query))
            .await
    }

    /// Cancel all open orders
    ///
    /// # Arguments
    /// * `product_id` - Only cancel orders for this product when set
    #[instrument(skip(self))]
    pub async fn cancel_all_orders(
        &self,
        product_id: Option<&str>,
    ) -> RestResult<NormalizedResponse> {
        let query = QueryParams::new().with("product_id", product_id);
        self.dispatcher
            .dispatch(RequestSpec::delete("orders").with_query(query))
            .await
    }

    /// List fills
    ///
    /// # Arguments
    /// * `params` - Filters (`order_id`, `product_id`, `before`, `after`, `limit`)
    #[instrument(skip(self, params))]
    pub async fn list_fills(&self, params: QueryParams) -> RestResult<NormalizedResponse> {
        self.dispatcher
            .dispatch(RequestSpec::get("fills").with_query(params))
            .await
    }
}
