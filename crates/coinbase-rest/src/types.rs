//! Request body types

use rust_decimal::Decimal;
use serde::Serialize;

// ============================================================================
// Order Types
// ============================================================================

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Limit order
    Limit,
    /// Market order
    Market,
    /// Stop order
    Stop,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Limit => write!(f, "limit"),
            Self::Market => write!(f, "market"),
            Self::Stop => write!(f, "stop"),
        }
    }
}

/// Time in force for limit orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeInForce {
    /// Good till cancelled
    #[serde(rename = "GTC")]
    GoodTillCancelled,
    /// Good till time (requires `cancel_after`)
    #[serde(rename = "GTT")]
    GoodTillTime,
    /// Immediate or cancel
    #[serde(rename = "IOC")]
    ImmediateOrCancel,
    /// Fill or kill
    #[serde(rename = "FOK")]
    FillOrKill,
}

impl std::fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GoodTillCancelled => write!(f, "GTC"),
            Self::GoodTillTime => write!(f, "GTT"),
            Self::ImmediateOrCancel => write!(f, "IOC"),
            Self::FillOrKill => write!(f, "FOK"),
        }
    }
}

/// Body of a new order
///
/// Decimal fields serialize as strings, the format the exchange expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
    /// Product, e.g. "BTC-USD"
    pub product_id: String,
    /// Order side
    pub side: OrderSide,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Amount in base currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Decimal>,
    /// Price per base unit (limit orders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Amount of quote currency to use (market orders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funds: Option<Decimal>,
    /// Time in force
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    /// Cancel after `min`, `hour` or `day` (GTT only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_after: Option<String>,
    /// Only provide liquidity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_only: Option<bool>,
    /// Client-generated order ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_oid: Option<String>,
    /// Self-trade prevention flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stp: Option<String>,
    /// Profile the order is placed on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
}

impl OrderRequest {
    fn base(product_id: impl Into<String>, side: OrderSide, order_type: OrderType) -> Self {
        Self {
            product_id: product_id.into(),
            side,
            order_type,
            size: None,
            price: None,
            funds: None,
            time_in_force: None,
            cancel_after: None,
            post_only: None,
            client_oid: None,
            stp: None,
            profile_id: None,
        }
    }

    /// Create a limit order
    pub fn limit(
        product_id: impl Into<String>,
        side: OrderSide,
        size: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            size: Some(size),
            price: Some(price),
            ..Self::base(product_id, side, OrderType::Limit)
        }
    }

    /// Create a market order sized in base currency
    pub fn market(product_id: impl Into<String>, side: OrderSide, size: Decimal) -> Self {
        Self {
            size: Some(size),
            ..Self::base(product_id, side, OrderType::Market)
        }
    }

    /// Create a market order sized in quote currency
    pub fn market_funds(product_id: impl Into<String>, side: OrderSide, funds: Decimal) -> Self {
        Self {
            funds: Some(funds),
            ..Self::base(product_id, side, OrderType::Market)
        }
    }

    /// Set time in force
    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    /// Set post-only
    pub fn post_only(mut self) -> Self {
        self.post_only = Some(true);
        self
    }

    /// Set client order ID
    pub fn with_client_oid(mut self, client_oid: impl Into<String>) -> Self {
        self.client_oid = Some(client_oid.into());
        self
    }

    /// Place on a specific profile
    pub fn with_profile(mut self, profile_id: impl Into<String>) -> Self {
        self.profile_id = Some(profile_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_limit_order_body() {
        let order = OrderRequest::limit("BTC-USD", OrderSide::Buy, dec!(0.01), dec!(25000.50))
            .with_time_in_force(TimeInForce::GoodTillCancelled)
            .post_only();

        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!({
                "product_id": "BTC-USD",
                "side": "buy",
                "type": "limit",
                "size": "0.01",
                "price": "25000.50",
                "time_in_force": "GTC",
                "post_only": true,
            })
        );
    }

    #[test]
    fn test_market_funds_body_omits_unset_fields() {
        let order = OrderRequest::market_funds("ETH-USD", OrderSide::Sell, dec!(100));
        let value = serde_json::to_value(&order).unwrap();

        assert_eq!(value["type"], "market");
        assert_eq!(value["funds"], "100");
        assert!(value.get("size").is_none());
        assert!(value.get("price").is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(OrderSide::Sell.to_string(), "sell");
        assert_eq!(OrderType::Stop.to_string(), "stop");
        assert_eq!(TimeInForce::FillOrKill.to_string(), "FOK");
    }
}
