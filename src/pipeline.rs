//! The scrape pipeline: render, parse, extract.
//!
//! A run is a single pass with no retries. The renderer is the only step that
//! can fail; once markup is available extraction always produces a dataset,
//! possibly empty.

use crate::config::Settings;
use crate::error::Result;
use crate::extract::{self, RegionRules};
use crate::models::Dataset;
use crate::renderers::{RenderRequest, Renderer};
use scraper::Html;
use tracing::{info, instrument};

/// Render the configured page with `renderer` and extract its dataset.
#[instrument(level = "info", skip_all, fields(url = %settings.base_url))]
pub async fn run<R: Renderer>(renderer: &R, settings: &Settings, rules: &RegionRules) -> Result<Dataset> {
    let request = RenderRequest::from_settings(settings)?;
    let markup = renderer.render(&request).await?;

    let document = Html::parse_document(&markup);
    let dataset = extract::extract_all(&document, &settings.base_url, rules);
    info!(records = dataset.len(), "Extraction complete");
    Ok(dataset)
}
