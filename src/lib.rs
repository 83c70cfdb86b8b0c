//! Synthetic IPTV ad-impression log generation.
//!
//! Periodically synthesizes simulated ad-impression records and writes them
//! as timestamped CSV files, keeping only a bounded number of the most
//! recent output files. Intended as a synthetic-telemetry feed for testing
//! downstream pipelines.
//!
//! One cycle is synthesize → write → prune:
//!
//! - [`generator`] draws a batch of random records from the configured
//!   reference lists, sorted by timestamp.
//! - [`writer`] serializes the batch to a UTF-8-BOM CSV file under the
//!   configured output directory.
//! - [`retention`] deletes matching files beyond the configured keep count,
//!   oldest first by modification time.
//!
//! [`scheduler`] repeats the cycle on the configured cadence until the
//! process is interrupted; one-shot mode runs a single cycle instead.
//!
//! # CLI Usage
//!
//! ```bash
//! # Run the scheduler with the default config.json (created if missing)
//! iptv-ad-log-generator
//!
//! # Single cycle with an explicit record count
//! iptv-ad-log-generator --once --count 500
//!
//! # Alternate configuration file
//! iptv-ad-log-generator --config /etc/iptv/adlog.json
//! ```

use anyhow::Context;
use chrono::Local;
use rand::Rng;
use tracing::info;

pub mod config;
pub mod generator;
pub mod record;
pub mod retention;
pub mod scheduler;
pub mod writer;

use config::AppConfig;
use writer::WriteOutcome;

/// Records generated per cycle when no explicit count is given.
pub const DEFAULT_RECORD_COUNT: usize = 10_000;

/// Run one generate → write → prune cycle.
///
/// The reference time for both synthesis and the output filename is taken
/// once at the start of the cycle. Write and prune failures surface to the
/// caller; the scheduler's per-cycle guard logs them and keeps going.
pub fn run_cycle(
    config: &AppConfig,
    count: usize,
    rng: &mut impl Rng,
) -> anyhow::Result<WriteOutcome> {
    let now = Local::now().naive_local();

    let records = generator::synthesize(count, config, now, rng);
    let outcome = writer::write_batch(&records, config, now).context("Failed to write ad log")?;
    let pruned = retention::prune(
        &config.output_directory,
        &config.file_prefix,
        config.max_files_to_keep,
    )
    .context("Failed to prune old ad logs")?;

    if pruned.deleted > 0 || pruned.failed > 0 {
        info!(
            "Retention pass: kept {} files, deleted {}, {} failed",
            pruned.matched - pruned.deleted,
            pruned.deleted,
            pruned.failed
        );
    }

    Ok(outcome)
}
