//! Stock analyzer CLI
//!
//! Runs one analysis of a stock symbol with a hosted assistant and saves the
//! chart it produces.
//!
//! # Usage
//!
//! ```bash
//! # Required settings (or put them in a .env file)
//! export OPENAI_API_KEY="sk-..."
//! export ALPHAVANTAGE_API_KEY="..."
//! export ALPHAVANTAGE_BASE_URL="https://www.alphavantage.co/query"
//!
//! cargo run --bin stock-analyzer -- --symbol CRM
//! ```

use analyzer_stock::{
    AnalysisRequest, DEFAULT_IMAGE_PATH, DEFAULT_INTERVAL, DEFAULT_SYMBOL, StockAnalyzer,
};
use analyzer_utils::AppConfig;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "stock-analyzer")]
#[command(about = "Analyze a stock's time series with a hosted assistant", long_about = None)]
struct Args {
    /// Stock ticker symbol
    #[arg(short, long, default_value = DEFAULT_SYMBOL)]
    symbol: String,

    /// Time series interval (intraday, daily, weekly, monthly)
    #[arg(short, long, default_value = DEFAULT_INTERVAL)]
    interval: String,

    /// Where to write the generated chart
    #[arg(long, default_value = DEFAULT_IMAGE_PATH)]
    image_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    analyzer_utils::init_tracing();

    let args = Args::parse();
    let config = AppConfig::from_env()?;

    info!("Starting analysis of {} ({})", args.symbol, args.interval);

    let analyzer = StockAnalyzer::from_config(&config)?;
    let report = analyzer
        .run(&AnalysisRequest {
            symbol: args.symbol,
            interval: args.interval,
            image_path: args.image_path,
        })
        .await?;

    info!(
        "Analysis finished in {:.6} s (run {}, {} tool rounds)",
        report.elapsed.as_secs_f64(),
        report.run_id,
        report.tool_rounds
    );

    Ok(())
}
