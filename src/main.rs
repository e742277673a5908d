//! # CLIK Home Scraper
//!
//! Extracts the structured content of a single rendered web page and writes
//! it as a flat table, one row per link, heading, paragraph or image.
//!
//! ## Usage
//!
//! ```sh
//! clik_home_scraper -o "DVA Website Home.csv"
//! ```
//!
//! ## Architecture
//!
//! A run is one straight pipeline:
//! 1. **Rendering**: fetch the page and wait for it to be ready ([`renderers`])
//! 2. **Extraction**: locate each page region and apply its rules ([`extract`])
//! 3. **Merging**: concatenate regions in a fixed order
//! 4. **Output**: write the dataset as CSV or JSON ([`outputs`])
//!
//! Rendering and output failures abort the run. Regions missing from the page
//! only produce fewer rows.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod extract;
mod models;
mod outputs;
mod pipeline;
mod renderers;
mod utils;

use cli::Cli;
use config::ScrapeConfig;
use extract::{RegionRules, section_counts};
use renderers::PageRenderer;
use utils::ensure_writable_parent;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("clik_home_scraper starting up");

    // Parse CLI and resolve configuration
    let args = Cli::parse();
    let config = ScrapeConfig::load(&args)?;
    let settings = config.settings()?;
    let rules = RegionRules::from_config(&config)?;
    debug!(?settings, headings = rules.headings.len(), "Resolved configuration");

    // Early check: ensure the output location is writable
    if let Err(e) = ensure_writable_parent(&settings.output_path).await {
        error!(
            path = %settings.output_path.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    // ---- Render and extract ----
    let renderer = PageRenderer::for_kind(settings.renderer, settings.render_timeout)?;
    let dataset = match pipeline::run(&renderer, &settings, &rules).await {
        Ok(dataset) => dataset,
        Err(e) => {
            if e.is_render_failure() {
                error!(error = %e, url = %settings.base_url, "Page could not be rendered; nothing extracted");
            } else {
                error!(error = %e, url = %settings.base_url, "Scrape failed");
            }
            return Err(e.into());
        }
    };
    drop(renderer);

    for (section, count) in section_counts(&dataset) {
        info!(%section, count, "Records per section");
    }

    // ---- Output ----
    if let Err(e) = outputs::write_dataset(&dataset, &settings.output_path, settings.format).await {
        error!(error = %e, "Failed to write dataset");
        return Err(e.into());
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        records = dataset.len(),
        path = %settings.output_path.display(),
        "Execution complete"
    );

    Ok(())
}
