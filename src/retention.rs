//! Retention pruning of generated CSV files.

use anyhow::Context;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Counters from a prune pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct PruneOutcome {
    /// Files matching the `<prefix>_*.csv` pattern.
    pub matched: usize,
    /// Files deleted.
    pub deleted: usize,
    /// Deletions that failed (logged, not fatal).
    pub failed: usize,
}

/// Delete matching files beyond the `max_files` most recently modified.
///
/// Only regular files named `<prefix>_*.csv` directly inside `dir` are
/// considered. Ordering is by modification time, newest first; equal mtimes
/// fall back to descending filename order so the outcome is deterministic.
/// A missing directory is a no-op. Individual deletion failures are logged
/// and counted without aborting the rest of the batch.
pub fn prune(dir: &Path, prefix: &str, max_files: usize) -> anyhow::Result<PruneOutcome> {
    let mut outcome = PruneOutcome::default();
    if !dir.exists() {
        return Ok(outcome);
    }

    let name_prefix = format!("{prefix}_");
    let mut files: Vec<(SystemTime, String, PathBuf)> = Vec::new();

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list output directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !file_name.starts_with(&name_prefix) || !file_name.ends_with(".csv") {
            continue;
        }
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        let mtime = metadata.modified()?;
        files.push((mtime, file_name, entry.path()));
    }
    outcome.matched = files.len();

    files.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));

    for (_, _, path) in files.into_iter().skip(max_files) {
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!("Deleted old log file {}", path.display());
                outcome.deleted += 1;
            }
            Err(e) => {
                warn!("Failed to delete {}: {e}", path.display());
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}
