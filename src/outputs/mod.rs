//! Dataset sinks.
//!
//! - [`delimited`]: CSV rows with header `Section,Type,Content,URL`
//! - [`json`]: a pretty-printed array of the same records
//!
//! Both write the whole dataset in one go; a failure surfaces as
//! [`ScrapeError::SinkWrite`](crate::error::ScrapeError::SinkWrite).

pub mod delimited;
pub mod json;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::models::ExtractedRecord;
use std::path::Path;

/// Write `records` to `path` in the requested format.
pub async fn write_dataset(records: &[ExtractedRecord], path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => delimited::write_csv(records, path).await,
        OutputFormat::Json => json::write_json(records, path).await,
    }
}
