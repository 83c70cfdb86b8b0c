//! CSV emission of record batches.
//!
//! Output files are UTF-8 with a byte-order marker so spreadsheet tools pick
//! up the encoding of the Korean field values.

use crate::config::AppConfig;
use crate::record::{AdImpressionRecord, CSV_HEADER};
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Buffer size for CSV writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Timestamp format embedded in generated filenames.
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Errors that can occur while writing a batch.
#[derive(Error, Debug)]
pub enum WriterError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result of a successful batch write.
#[derive(Debug, Clone)]
pub struct WriteOutcome {
    /// Path of the generated file.
    pub path: PathBuf,
    /// Number of data rows written (header excluded).
    pub rows_written: u64,
    /// Output file size in bytes.
    pub file_size_bytes: u64,
}

/// Write `records` to `<output_directory>/<file_prefix>_<now>.csv`.
///
/// The output directory is created if missing. The header row is always
/// emitted, even for an empty batch, so downstream consumers can rely on the
/// schema being present. Rows appear in input order. Failures propagate to
/// the caller; the cycle guard decides what happens next.
pub fn write_batch(
    records: &[AdImpressionRecord],
    config: &AppConfig,
    now: NaiveDateTime,
) -> Result<WriteOutcome, WriterError> {
    std::fs::create_dir_all(&config.output_directory)?;

    let filename = format!(
        "{}_{}.csv",
        config.file_prefix,
        now.format(FILENAME_TIMESTAMP_FORMAT)
    );
    let path = config.output_directory.join(filename);

    let file = File::create(&path)?;
    let mut buf_writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
    buf_writer.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(buf_writer);
    writer.write_record(&CSV_HEADER)?;
    for record in records {
        writer.write_record(record.to_csv_record())?;
    }
    writer.flush()?;
    drop(writer);

    let file_size_bytes = std::fs::metadata(&path)?.len();
    info!(
        "Created CSV file {} ({} records, {} bytes)",
        path.display(),
        records.len(),
        file_size_bytes
    );

    Ok(WriteOutcome {
        path,
        rows_written: records.len() as u64,
        file_size_bytes,
    })
}
