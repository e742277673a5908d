//! JSON output.
//!
//! Records are written as a pretty-printed array using the same field names
//! as the CSV header.

use crate::error::{Result, ScrapeError};
use crate::models::ExtractedRecord;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Write `records` to a JSON file at `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_json(records: &[ExtractedRecord], path: &Path) -> Result<()> {
    let display = path.display().to_string();
    let json = serde_json::to_string_pretty(records).map_err(|e| ScrapeError::sink(&display, e))?;
    fs::write(path, json).await.map_err(|e| ScrapeError::sink(&display, e))?;
    info!(records = records.len(), "Wrote JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecordType, Section};

    #[tokio::test]
    async fn test_write_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("home.json");
        let records = vec![
            ExtractedRecord::text(Section::Banner, RecordType::H1, "Welcome"),
            ExtractedRecord::image("Logo", "https://x.test/logo.png"),
        ];
        write_json(&records, &path).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["Section"], "Banner");
        assert_eq!(value[0]["Type"], "H1");
        assert_eq!(value[1]["URL"], "https://x.test/logo.png");

        let back: Vec<ExtractedRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, records);
    }
}
