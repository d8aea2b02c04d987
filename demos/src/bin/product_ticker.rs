//! Demo 1: Product Ticker
//!
//! Showcases: public market data, response normalization
//!
//! Run: cargo run --bin product_ticker -- BTC-USD ETH-USD

use colored::*;
use coinbase_rest::prelude::*;
use std::str::FromStr;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(65).cyan());
    println!("{}", "  PRODUCT TICKER".cyan().bold());
    println!("{}", "  Coinbase Exchange - Public Market Data".cyan());
    println!("{}", "═".repeat(65).cyan());
    println!();

    let mut products: Vec<String> = std::env::args().skip(1).collect();
    if products.is_empty() {
        products = vec!["BTC-USD".to_string(), "ETH-USD".to_string()];
    }

    let client = CoinbaseRestClient::new()?;

    println!(
        "  {:>10}  {:>14}  {:>14}  {:>14}",
        "PRODUCT".white().bold(),
        "BID".white().bold(),
        "ASK".white().bold(),
        "SPREAD".white().bold()
    );
    println!("  {}", "─".repeat(58));

    for product in &products {
        match client.products().get_ticker(product).await? {
            NormalizedResponse::Success(ticker) => {
                let bid = decimal_field(&ticker, "bid");
                let ask = decimal_field(&ticker, "ask");
                let spread = match (bid, ask) {
                    (Some(bid), Some(ask)) => format!("{:.2}", ask - bid),
                    _ => "-".to_string(),
                };
                println!(
                    "  {:>10}  {:>14}  {:>14}  {:>14}",
                    product.yellow(),
                    bid.map(|b| b.to_string()).unwrap_or_default(),
                    ask.map(|a| a.to_string()).unwrap_or_default(),
                    spread.green()
                );
            }
            NormalizedResponse::ApiError(message) => {
                println!("  {:>10}  {} {}", product.yellow(), "✗".red(), message);
            }
            NormalizedResponse::TransportError(err) => {
                println!("  {:>10}  {} {}", product.yellow(), "✗".red(), err);
            }
        }
    }

    println!("\n{} Done.", "✓".green());
    Ok(())
}

fn decimal_field(value: &serde_json::Value, field: &str) -> Option<Decimal> {
    value
        .get(field)
        .and_then(|v| v.as_str())
        .and_then(|s| Decimal::from_str(s).ok())
}
