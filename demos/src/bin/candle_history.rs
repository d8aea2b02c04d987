//! Demo 3: Candle History
//!
//! Showcases: range chunking, multi-request candle fetch
//!
//! Run: cargo run --bin candle_history -- BTC-USD 3600

use chrono::{Duration, Utc};
use colored::*;
use coinbase_rest::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(65).cyan());
    println!("{}", "  CANDLE HISTORY".cyan().bold());
    println!("{}", "  Coinbase Exchange - Chunked Range Fetch".cyan());
    println!("{}", "═".repeat(65).cyan());
    println!();

    let mut args = std::env::args().skip(1);
    let product = args.next().unwrap_or_else(|| "BTC-USD".to_string());
    let granularity: u32 = args.next().and_then(|g| g.parse().ok()).unwrap_or(3600);

    let end = Utc::now();
    let range = TimeRange::new(end - Duration::days(30), end, granularity)?;
    let windows = range.chunks().count();

    println!(
        "{} {} over 30 days at {}s: {} buckets in {} requests\n",
        "✓".green(),
        product.yellow(),
        granularity,
        range.bucket_count(),
        windows
    );

    let candles = client_candles(&product, &range).await?;

    println!(
        "  {:>26}  {:>12}  {:>12}  {:>14}",
        "TIME".white().bold(),
        "LOW".white().bold(),
        "HIGH".white().bold(),
        "VOLUME".white().bold()
    );
    println!("  {}", "─".repeat(70));

    for candle in candles.iter().rev().take(10) {
        let time = candle[0]
            .as_i64()
            .and_then(|t| chrono::DateTime::from_timestamp(t, 0))
            .map(|t| format_timestamp(&t))
            .unwrap_or_default();
        println!(
            "  {:>26}  {:>12}  {:>12}  {:>14}",
            time.dimmed(),
            candle[1],
            candle[2],
            candle[5]
        );
    }

    println!("\n{} Fetched {} candles.", "✓".green(), candles.len());
    Ok(())
}

async fn client_candles(
    product: &str,
    range: &TimeRange,
) -> Result<Vec<serde_json::Value>, Box<dyn std::error::Error>> {
    let client = CoinbaseRestClient::new()?;
    let candles = client
        .products()
        .get_candles_range(product, range)
        .await?
        .into_result()?;

    Ok(candles.as_array().cloned().unwrap_or_default())
}
