//! eda-runner: prints the full fraud analysis report to stdout.
//!
//! Usage:
//!   eda-runner --transactions transaction_fraud_data.parquet --currency historical_currency_exchange.parquet
//!   eda-runner --synthetic 20000 --seed 7
//!   eda-runner --config report.json

use anyhow::{Context, Result};
use fraud_eda_core::{config::ReportConfig, engine::ReportEngine};
use std::env;
use std::io::{self, BufWriter};
use std::path::Path;

const DEFAULT_TRANSACTIONS: &str = "transaction_fraud_data.parquet";
const DEFAULT_CURRENCY: &str = "historical_currency_exchange.parquet";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let transactions = flag_value(&args, "--transactions").unwrap_or(DEFAULT_TRANSACTIONS);
    let currency = flag_value(&args, "--currency").unwrap_or(DEFAULT_CURRENCY);
    let synthetic = flag_value(&args, "--synthetic")
        .map(|v| v.parse::<usize>())
        .transpose()
        .context("--synthetic expects a row count")?;
    let seed = parse_arg(&args, "--seed", 42u64);

    let config = match flag_value(&args, "--config") {
        Some(path) => ReportConfig::load(Path::new(path))?,
        None => ReportConfig::default(),
    };

    let engine = match synthetic {
        Some(rows) => {
            log::info!("Generating {rows} synthetic transactions (seed {seed})");
            ReportEngine::synthetic(rows, seed, config)
        }
        None => {
            println!("Loading data...");
            let engine = ReportEngine::load(Path::new(transactions), Path::new(currency), config)
                .with_context(|| format!("Failed to load {transactions} / {currency}"))?;
            println!(
                "Transactions: {} rows, {} columns",
                engine.dataset.transactions.len(),
                engine.dataset.transactions.profile.width()
            );
            println!(
                "Exchange rates: {} rows, {} columns",
                engine.dataset.rates.len(),
                engine.dataset.rates.profile.width()
            );
            println!("Data loaded.");
            println!();
            engine
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    engine.run(&mut out)?;
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    flag_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
