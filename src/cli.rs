//! Command-line interface definitions.
//!
//! Every option is optional: anything left unset falls back to the YAML
//! config file (when given) and then to the built-in defaults in
//! [`crate::config::ScrapeConfig`].

use crate::config::{OutputFormat, RendererKind};
use clap::Parser;

/// Command-line arguments for the page scraper.
///
/// # Examples
///
/// ```sh
/// # Scrape the default page into the default CSV file
/// clik_home_scraper
///
/// # Another page, JSON output, longer render wait
/// clik_home_scraper -b https://example.org/ -o out/home.json --format json -t 30
///
/// # Render with headless Chrome (requires the `browser` feature)
/// clik_home_scraper --renderer browser --ready-selector "main"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Page to scrape; relative links are resolved against it
    #[arg(short, long, env = "SCRAPE_BASE_URL")]
    pub base_url: Option<String>,

    /// Output file path
    #[arg(short, long, env = "SCRAPE_OUTPUT")]
    pub output: Option<String>,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Seconds to wait for the page to render before giving up
    #[arg(short, long)]
    pub timeout_secs: Option<u64>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// How the page is rendered
    #[arg(long, value_enum)]
    pub renderer: Option<RendererKind>,

    /// CSS selector that must be present before the page counts as rendered
    #[arg(long)]
    pub ready_selector: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_are_unset() {
        let cli = Cli::parse_from(["clik_home_scraper"]);
        assert!(cli.output.is_none());
        assert!(cli.timeout_secs.is_none());
        assert!(cli.format.is_none());
        assert!(cli.renderer.is_none());
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "clik_home_scraper",
            "--base-url",
            "https://x.test/",
            "--output",
            "./out.json",
            "--format",
            "json",
            "--renderer",
            "browser",
            "--ready-selector",
            "main",
        ]);

        assert_eq!(cli.base_url.as_deref(), Some("https://x.test/"));
        assert_eq!(cli.output.as_deref(), Some("./out.json"));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.renderer, Some(RendererKind::Browser));
        assert_eq!(cli.ready_selector.as_deref(), Some("main"));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["clik_home_scraper", "-o", "/tmp/home.csv", "-t", "25", "-c", "cfg.yaml"]);

        assert_eq!(cli.output.as_deref(), Some("/tmp/home.csv"));
        assert_eq!(cli.timeout_secs, Some(25));
        assert_eq!(cli.config.as_deref(), Some("cfg.yaml"));
    }
}
