//! Integration tests for resource endpoints

mod common;

use chrono::{TimeZone, Utc};
use common::*;
use coinbase_rest::{
    format_timestamp, NormalizedResponse, OrderRequest, OrderSide, QueryParams, RestError,
    TimeRange,
};
use mockito::Matcher;
use rust_decimal_macros::dec;
use serde_json::json;

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn test_list_orders_defaults() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/orders".to_string()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "100".into()),
            Matcher::UrlEncoded("status".into(), "all".into()),
        ]))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = private_client(&server.url());
    let response = client
        .orders()
        .unwrap()
        .list_orders(QueryParams::new())
        .await
        .unwrap();

    assert!(response.is_success());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_orders_keeps_caller_filters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/orders".to_string()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "5".into()),
            Matcher::UrlEncoded("status".into(), "open".into()),
            Matcher::UrlEncoded("status".into(), "pending".into()),
        ]))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = private_client(&server.url());
    let params = QueryParams::new()
        .with("status", ["open", "pending"])
        .with("limit", 5u32);
    let response = client.orders().unwrap().list_orders(params).await.unwrap();

    assert!(response.is_success());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_order_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/orders")
        .match_body(Matcher::Json(json!({
            "product_id": "BTC-USD",
            "side": "buy",
            "type": "limit",
            "size": "0.01",
            "price": "25000.50",
        })))
        .with_status(200)
        .with_body(r#"{"id":"d0c5340b-6d6c-49d9-b567-48c4bfca13d2","status":"pending"}"#)
        .create_async()
        .await;

    let client = private_client(&server.url());
    let order = OrderRequest::limit("BTC-USD", OrderSide::Buy, dec!(0.01), dec!(25000.50));
    let response = client.orders().unwrap().create_order(&order).await.unwrap();

    assert_eq!(response.success().unwrap()["status"], "pending");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cancel_all_for_product() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", Matcher::Regex(r"^/orders".to_string()))
        .match_query(Matcher::UrlEncoded("product_id".into(), "ETH-USD".into()))
        .with_status(200)
        .with_body(r#"["144c6f8e-713f-4682-8435-5280fbe8b2b4"]"#)
        .create_async()
        .await;

    let client = private_client(&server.url());
    let response = client
        .orders()
        .unwrap()
        .cancel_all_orders(Some("ETH-USD"))
        .await
        .unwrap();

    assert_eq!(
        response,
        NormalizedResponse::Success(json!(["144c6f8e-713f-4682-8435-5280fbe8b2b4"]))
    );
    mock.assert_async().await;
}

// =============================================================================
// Accounts and Profiles
// =============================================================================

#[tokio::test]
async fn test_account_ledger_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/accounts/acc-1/ledger".to_string()))
        .match_query(Matcher::UrlEncoded("limit".into(), "10".into()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = private_client(&server.url());
    let response = client
        .accounts()
        .unwrap()
        .get_ledger("acc-1", QueryParams::new().with("limit", 10u32))
        .await
        .unwrap();

    assert!(response.is_success());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_address_is_post() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/coinbase-accounts/wallet-1/addresses")
        .with_status(200)
        .with_body(r#"{"address":"0x5ad5769cd04681FeD900BCE3DDc877B50E83d469"}"#)
        .create_async()
        .await;

    let client = private_client(&server.url());
    let response = client
        .wallets()
        .unwrap()
        .generate_address("wallet-1")
        .await
        .unwrap();

    assert!(response.is_success());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_profile_rejects_empty_name() {
    let client = private_client("http://127.0.0.1:1");
    let result = client.profiles().unwrap().create_profile("  ").await;
    assert!(matches!(result, Err(RestError::InvalidParameter(_))));
}

// =============================================================================
// Market Data
// =============================================================================

#[tokio::test]
async fn test_order_book_level() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/products/BTC-USD/book".to_string()))
        .match_query(Matcher::UrlEncoded("level".into(), "2".into()))
        .with_status(200)
        .with_body(r#"{"sequence":3,"bids":[],"asks":[]}"#)
        .create_async()
        .await;

    let client = public_client(&server.url());
    let response = client
        .products()
        .get_order_book("BTC-USD", Some(2))
        .await
        .unwrap();

    assert!(response.is_success());
    mock.assert_async().await;

    let invalid = client.products().get_order_book("BTC-USD", Some(4)).await;
    assert!(matches!(invalid, Err(RestError::InvalidParameter(_))));
}

fn candle_window_mock_query(start: i64, end: i64) -> Matcher {
    let start = Utc.timestamp_opt(start, 0).unwrap();
    let end = Utc.timestamp_opt(end, 0).unwrap();
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("start".into(), format_timestamp(&start)),
        Matcher::UrlEncoded("end".into(), format_timestamp(&end)),
        Matcher::UrlEncoded("granularity".into(), "60".into()),
    ])
}

#[tokio::test]
async fn test_candles_range_is_chunked_and_merged() {
    let mut server = mockito::Server::new_async().await;
    let path = || Matcher::Regex(r"^/products/BTC-USD/candles".to_string());

    // Each window answers newest first and repeats its boundary bucket
    let windows = [
        (0, 18_000, r#"[[18000,1,2,1,2,5],[60,1,2,1,2,5],[0,1,2,1,2,5]]"#),
        (18_000, 36_000, r#"[[36000,1,2,1,2,5],[18000,1,2,1,2,5]]"#),
        (36_000, 54_000, r#"[[54000,1,2,1,2,5],[36000,1,2,1,2,5]]"#),
        (54_000, 60_000, r#"[[60000,1,2,1,2,5],[54000,1,2,1,2,5]]"#),
    ];

    let mut mocks = Vec::new();
    for (start, end, body) in windows {
        let mock = server
            .mock("GET", path())
            .match_query(candle_window_mock_query(start, end))
            .with_status(200)
            .with_body(body)
            .expect(1)
            .create_async()
            .await;
        mocks.push(mock);
    }

    let range = TimeRange::new(
        Utc.timestamp_opt(0, 0).unwrap(),
        Utc.timestamp_opt(60_000, 0).unwrap(),
        60,
    )
    .unwrap();

    let client = public_client(&server.url());
    let candles = client
        .products()
        .get_candles_range("BTC-USD", &range)
        .await
        .unwrap()
        .into_result()
        .unwrap();

    let times: Vec<i64> = candles
        .as_array()
        .unwrap()
        .iter()
        .map(|candle| candle[0].as_i64().unwrap())
        .collect();
    assert_eq!(times, vec![0, 60, 18_000, 36_000, 54_000, 60_000]);

    for mock in mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_candles_range_stops_at_first_failure() {
    let mut server = mockito::Server::new_async().await;
    let path = || Matcher::Regex(r"^/products/BTC-USD/candles".to_string());

    let first = server
        .mock("GET", path())
        .match_query(candle_window_mock_query(0, 18_000))
        .with_status(200)
        .with_body("[[0,1,2,1,2,5]]")
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", path())
        .match_query(candle_window_mock_query(18_000, 36_000))
        .with_status(400)
        .with_body(r#"{"message":"granularity too small for the requested time range"}"#)
        .expect(1)
        .create_async()
        .await;
    let rest = server
        .mock("GET", path())
        .match_query(candle_window_mock_query(36_000, 54_000))
        .expect(0)
        .create_async()
        .await;

    let range = TimeRange::new(
        Utc.timestamp_opt(0, 0).unwrap(),
        Utc.timestamp_opt(60_000, 0).unwrap(),
        60,
    )
    .unwrap();

    let client = public_client(&server.url());
    let response = client
        .products()
        .get_candles_range("BTC-USD", &range)
        .await
        .unwrap();

    assert_eq!(
        response,
        NormalizedResponse::ApiError("granularity too small for the requested time range".into())
    );
    first.assert_async().await;
    second.assert_async().await;
    rest.assert_async().await;
}

#[tokio::test]
async fn test_candles_range_rejects_non_array_window() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/products/BTC-USD/candles".to_string()))
        .match_query(candle_window_mock_query(0, 600))
        .with_status(200)
        .with_body(r#"{"candles":[]}"#)
        .create_async()
        .await;

    let range = TimeRange::new(
        Utc.timestamp_opt(0, 0).unwrap(),
        Utc.timestamp_opt(600, 0).unwrap(),
        60,
    )
    .unwrap();

    let client = public_client(&server.url());
    let result = client.products().get_candles_range("BTC-USD", &range).await;

    match result {
        Err(RestError::UnexpectedResponse(message)) => {
            assert!(message.contains("non-array"));
            assert!(!message.contains("HTTP"));
        }
        other => panic!("Expected UnexpectedResponse, got {:?}", other),
    }
    mock.assert_async().await;
}
