//! Run configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! command-line flags (which may themselves come from environment variables).
//!
//! ```yaml
//! base_url: https://clik.dva.gov.au/
//! render_timeout_secs: 10
//! output_path: DVA Website Home.csv
//! format: csv
//! renderer: http
//! ready_selector: body
//! banner_selector: div.site-banner-outter.bg-with-image
//! headings:
//!   - section: important_notice
//!     label: Important Notice
//!     matcher: substring
//!   - section: libraries
//!     label: CLIK Libraries
//!     matcher: exact
//! ```

use crate::cli::Cli;
use crate::error::{Result, ScrapeError};
use crate::models::Section;
use clap::ValueEnum;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://clik.dva.gov.au/";
pub const DEFAULT_OUTPUT_PATH: &str = "DVA Website Home.csv";
pub const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 10;
pub const MAX_RENDER_TIMEOUT_SECS: u64 = 24 * 60 * 60;

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Which renderer produces the page markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Plain HTTP fetch of the initial markup
    #[default]
    Http,
    /// Headless Chrome (requires the `browser` feature)
    Browser,
}

/// How a heading's text is compared against its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Matcher {
    Exact,
    Substring,
}

impl Matcher {
    /// Case-sensitive comparison of trimmed heading text against `label`.
    pub fn matches(&self, text: &str, label: &str) -> bool {
        match self {
            Matcher::Exact => text.trim() == label,
            Matcher::Substring => text.contains(label),
        }
    }
}

/// A region located by "first heading whose text matches, then the next block".
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HeadingRule {
    pub section: Section,
    pub label: String,
    pub matcher: Matcher,
    /// Heading element to search, e.g. `h2`.
    #[serde(default = "default_heading_tag")]
    pub tag: String,
    /// Element name of the content block following the heading.
    #[serde(default = "default_block_tag")]
    pub block: String,
}

fn default_heading_tag() -> String {
    "h2".to_string()
}

fn default_block_tag() -> String {
    "div".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub render_timeout_secs: u64,
    pub output_path: String,
    pub format: OutputFormat,
    pub renderer: RendererKind,
    pub ready_selector: String,
    pub banner_selector: String,
    pub headings: Vec<HeadingRule>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            render_timeout_secs: DEFAULT_RENDER_TIMEOUT_SECS,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            format: OutputFormat::Csv,
            renderer: RendererKind::Http,
            ready_selector: "body".to_string(),
            banner_selector: "div.site-banner-outter.bg-with-image".to_string(),
            headings: vec![
                HeadingRule {
                    section: Section::ImportantNotice,
                    label: "Important Notice".to_string(),
                    matcher: Matcher::Substring,
                    tag: default_heading_tag(),
                    block: default_block_tag(),
                },
                HeadingRule {
                    section: Section::Libraries,
                    label: "CLIK Libraries".to_string(),
                    matcher: Matcher::Exact,
                    tag: default_heading_tag(),
                    block: default_block_tag(),
                },
            ],
        }
    }
}

/// Validated run settings derived from a [`ScrapeConfig`].
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: Url,
    pub render_timeout: Duration,
    pub output_path: PathBuf,
    pub format: OutputFormat,
    pub renderer: RendererKind,
    pub ready_selector: String,
}

impl ScrapeConfig {
    /// Read a YAML config file. Keys left out keep their defaults.
    #[instrument(level = "info")]
    pub fn from_file(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ScrapeError::Config(format!("cannot read {path}: {e}")))?;
        let config = Self::from_yaml(&raw)?;
        info!(path, "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).map_err(|e| ScrapeError::Config(format!("invalid config: {e}")))
    }

    /// Defaults, overlaid with the config file named on the command line, overlaid with flags.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match cli.config.as_deref() {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(v) = &cli.base_url {
            self.base_url = v.clone();
        }
        if let Some(v) = &cli.output {
            self.output_path = v.clone();
        }
        if let Some(v) = cli.timeout_secs {
            self.render_timeout_secs = v;
        }
        if let Some(v) = cli.format {
            self.format = v;
        }
        if let Some(v) = cli.renderer {
            self.renderer = v;
        }
        if let Some(v) = &cli.ready_selector {
            self.ready_selector = v.clone();
        }
    }

    /// Validate the values that do not concern region extraction.
    pub fn settings(&self) -> Result<Settings> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| ScrapeError::Config(format!("invalid base_url {:?}: {e}", self.base_url)))?;
        if self.render_timeout_secs == 0 || self.render_timeout_secs > MAX_RENDER_TIMEOUT_SECS {
            return Err(ScrapeError::Config(format!(
                "render_timeout_secs must be between 1 and {MAX_RENDER_TIMEOUT_SECS}"
            )));
        }
        Selector::parse(&self.ready_selector).map_err(|e| {
            ScrapeError::Config(format!("invalid ready_selector {:?}: {e}", self.ready_selector))
        })?;
        Ok(Settings {
            base_url,
            render_timeout: Duration::from_secs(self.render_timeout_secs),
            output_path: PathBuf::from(&self.output_path),
            format: self.format,
            renderer: self.renderer,
            ready_selector: self.ready_selector.clone(),
        })
    }
}
