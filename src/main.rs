//! Command-line interface for the IPTV ad log generator.
//!
//! # Usage Examples
//!
//! ```bash
//! # Persistent scheduler mode, config auto-created on first run
//! iptv-ad-log-generator
//!
//! # One generate-write-prune cycle with 500 records, then exit
//! iptv-ad-log-generator --once --count 500
//!
//! # Custom configuration file
//! iptv-ad-log-generator --config ./my_config.json
//! ```

use clap::Parser;
use iptv_ad_log_generator::{config::AppConfig, run_cycle, scheduler, DEFAULT_RECORD_COUNT};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "iptv-ad-log-generator")]
#[command(about = "Generates synthetic IPTV ad-impression logs as CSV files")]
#[command(long_about = None)]
struct Cli {
    /// Path to the JSON configuration file (created with defaults if missing)
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Run a single cycle and exit instead of starting the scheduler
    #[arg(long)]
    once: bool,

    /// Number of records to generate per cycle
    #[arg(long)]
    count: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)?;
    let count = cli.count.unwrap_or(DEFAULT_RECORD_COUNT);
    let mut rng = StdRng::from_os_rng();

    if cli.once {
        let outcome = run_cycle(&config, count, &mut rng)?;
        tracing::info!(
            "One-shot cycle complete: {} records at {}",
            outcome.rows_written,
            outcome.path.display()
        );
        return Ok(());
    }

    let interval: scheduler::ScheduleInterval = match config.schedule_interval.parse() {
        Ok(interval) => interval,
        Err(e) => {
            tracing::error!("{e}; scheduler not started");
            return Err(e.into());
        }
    };

    scheduler::run_scheduler(interval, || run_cycle(&config, count, &mut rng).map(|_| ())).await
}
