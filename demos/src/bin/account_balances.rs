//! Demo 2: Account Balances
//!
//! Showcases: signed requests, credentials from the environment, sandbox
//!
//! Run: COINBASE_API_KEY=... COINBASE_API_SECRET=... COINBASE_API_PASSPHRASE=... \
//!      COINBASE_SANDBOX=1 cargo run --bin account_balances

use colored::*;
use coinbase_rest::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(65).cyan());
    println!("{}", "  ACCOUNT BALANCES".cyan().bold());
    println!("{}", "  Coinbase Exchange - Authenticated Requests".cyan());
    println!("{}", "═".repeat(65).cyan());
    println!();

    let client = CoinbaseRestClient::with_config(ClientConfig::from_env()?)?;
    if !client.has_credentials() {
        println!("{} No credentials in the environment", "✗".red());
        return Ok(());
    }

    let accounts = client.accounts()?.list_accounts().await?.into_result()?;

    println!(
        "  {:>8}  {:>20}  {:>20}",
        "CURRENCY".white().bold(),
        "BALANCE".white().bold(),
        "AVAILABLE".white().bold()
    );
    println!("  {}", "─".repeat(52));

    for account in accounts.as_array().into_iter().flatten() {
        let field = |name: &str| account[name].as_str().unwrap_or("-").to_string();
        if field("balance").trim_start_matches(['0', '.']).is_empty() {
            continue;
        }
        println!(
            "  {:>8}  {:>20}  {:>20}",
            field("currency").yellow(),
            field("balance"),
            field("available").green()
        );
    }

    let fees = client.fees()?.get_fees().await?;
    if let Some(fees) = fees.success() {
        println!(
            "\n  {} maker {} / taker {}",
            "Fees:".dimmed(),
            fees["maker_fee_rate"].as_str().unwrap_or("-"),
            fees["taker_fee_rate"].as_str().unwrap_or("-")
        );
    }

    println!("\n{} Done.", "✓".green());
    Ok(())
}
