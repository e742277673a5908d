//! Error types for a scrape run.
//!
//! Only failures that abort the run are represented here. A region that cannot
//! be located, or a reference that cannot be resolved to an absolute URL, is
//! not an error: extraction degrades to zero records or the raw string and
//! logs what happened.

use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Fatal failures of a single scrape run.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The page did not become ready within the configured timeout.
    #[error("rendering {url} timed out after {}s", .timeout.as_secs_f64())]
    RenderTimeout { url: String, timeout: Duration },

    /// The page could not be fetched or rendered.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid configuration (bad URL, bad selector, unreadable config file).
    #[error("configuration error: {0}")]
    Config(String),

    /// The dataset could not be persisted.
    #[error("failed to write dataset to {path}: {source}")]
    SinkWrite {
        path: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl ScrapeError {
    pub fn sink(path: impl Into<String>, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        ScrapeError::SinkWrite {
            path: path.into(),
            source: source.into(),
        }
    }

    /// True for errors raised before any extraction took place.
    pub fn is_render_failure(&self) -> bool {
        matches!(self, ScrapeError::RenderTimeout { .. } | ScrapeError::Render(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_timeout_message() {
        let e = ScrapeError::RenderTimeout {
            url: "https://x.test/".into(),
            timeout: Duration::from_secs(10),
        };
        assert_eq!(e.to_string(), "rendering https://x.test/ timed out after 10s");
        assert!(e.is_render_failure());
    }

    #[test]
    fn test_sink_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e = ScrapeError::sink("out.csv", io);
        assert!(e.to_string().contains("out.csv"));
        assert!(e.source().is_some());
        assert!(!e.is_render_failure());
    }
}
