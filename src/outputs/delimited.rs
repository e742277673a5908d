//! CSV output.
//!
//! The header is always written, so an empty dataset still produces a valid
//! file with the four columns.

use crate::error::{Result, ScrapeError};
use crate::models::ExtractedRecord;
use csv::WriterBuilder;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

pub const HEADER: [&str; 4] = ["Section", "Type", "Content", "URL"];

/// Render records as CSV bytes.
pub fn to_csv_bytes(records: &[ExtractedRecord]) -> std::result::Result<Vec<u8>, csv::Error> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.into_inner().map_err(|e| e.into_error().into())
}

/// Write `records` to a CSV file at `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_csv(records: &[ExtractedRecord], path: &Path) -> Result<()> {
    let display = path.display().to_string();
    let bytes = to_csv_bytes(records).map_err(|e| ScrapeError::sink(&display, e))?;
    fs::write(path, bytes).await.map_err(|e| ScrapeError::sink(&display, e))?;
    info!(rows = records.len(), "Wrote CSV");
    Ok(())
}
