use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use common::{init_logging, BotConfig, ConfigError, LogConfig, DEFAULT_CONFIG_PATH};
use execution_core::TimeInForce;
use futures_rest::FuturesRestClient;
use rust_decimal::Decimal;
use tracing::{error, info};
use twap::TwapExecutor;

/// Simplified USDT-M futures bot (testnet by default).
#[derive(Parser, Debug)]
#[command(name = "futures-bot", version, about)]
struct Cli {
    /// Path to the JSON config file; environment variables are used when it is missing.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Also append logs to this file.
    #[arg(long, global = true, default_value = "bot.log")]
    log_file: PathBuf,

    /// Disable the log file.
    #[arg(long, global = true)]
    no_log_file: bool,

    /// Emit JSON logs on the console.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place a market order.
    Market {
        symbol: String,
        side: String,
        quantity: Decimal,
        #[arg(long)]
        reduce_only: bool,
    },
    /// Place a limit order.
    Limit {
        symbol: String,
        side: String,
        quantity: Decimal,
        price: Decimal,
        #[arg(long, alias = "timeInForce", default_value = "GTC")]
        time_in_force: TimeInForce,
        #[arg(long)]
        reduce_only: bool,
    },
    /// Place a TWAP (series of market orders).
    Twap {
        symbol: String,
        side: String,
        quantity: Decimal,
        #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
        slices: i64,
        /// Seconds between slices.
        #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
        interval: i64,
    },
    /// Look up an order by exchange order ID.
    Order { symbol: String, order_id: u64 },
    /// Show futures account balances.
    Balance,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = init_logging(&LogConfig {
        file: (!cli.no_log_file).then(|| cli.log_file.clone()),
        json: cli.json_logs,
        ..LogConfig::default()
    });

    let config = match BotConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!(
                error = %e,
                config = %cli.config.display(),
                "{}",
                config_failure_message(&e)
            );
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{:#}", e), "Command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &BotConfig) -> anyhow::Result<()> {
    let client = FuturesRestClient::from_config(config).context("failed to build client")?;
    info!(base_url = %client.base_url(), "Client ready");

    match command {
        Command::Market {
            symbol,
            side,
            quantity,
            reduce_only,
        } => {
            let symbol = FuturesRestClient::validate_symbol(&symbol)?;
            let side = FuturesRestClient::validate_side(&side)?;
            let response = client
                .place_market_order(&symbol, side, quantity, reduce_only)
                .await
                .context("market order failed")?;
            println!("Market order result: {}", pretty(&response));
        }
        Command::Limit {
            symbol,
            side,
            quantity,
            price,
            time_in_force,
            reduce_only,
        } => {
            let symbol = FuturesRestClient::validate_symbol(&symbol)?;
            let side = FuturesRestClient::validate_side(&side)?;
            let response = client
                .place_limit_order(&symbol, side, quantity, price, time_in_force, reduce_only)
                .await
                .context("limit order failed")?;
            println!("Limit order result: {}", pretty(&response));
        }
        Command::Twap {
            symbol,
            side,
            quantity,
            slices,
            interval,
        } => {
            let executor = TwapExecutor::new(&client, &symbol, &side, quantity, slices, interval)?;
            let outcomes = executor.execute().await;
            println!("TWAP results:");
            for outcome in &outcomes {
                println!("{}", outcome);
            }
        }
        Command::Order { symbol, order_id } => {
            let response = client
                .get_order(&symbol, order_id)
                .await
                .context("order lookup failed")?;
            println!("Order: {}", pretty(&response));
        }
        Command::Balance => {
            let response = client
                .get_account_balance()
                .await
                .context("balance lookup failed")?;
            println!("Balance: {}", pretty(&response));
        }
    }

    Ok(())
}

fn config_failure_message(err: &ConfigError) -> String {
    match err {
        ConfigError::MissingCredential(_) => {
            "API key/secret not found. Fill the config file or set API_KEY and API_SECRET."
                .to_string()
        }
        other => format!("Failed to load config: {}", other),
    }
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
