//! Page renderers.
//!
//! A renderer turns a URL into the markup of the page once a readiness
//! condition holds. It is the only step of a run that touches the network,
//! and the only one that can time out.
//!
//! | Renderer | Module | Feature | Notes |
//! |----------|--------|---------|-------|
//! | HTTP | [`http`] | default | Initial server markup, no script execution |
//! | Headless Chrome | `browser` | `browser` | Full render; browser released when the call returns |
//!
//! Renderers are passed into [`crate::pipeline::run`] explicitly; nothing is
//! held in process-wide state.

#[cfg(feature = "browser")]
pub mod browser;
pub mod http;

use crate::config::{RendererKind, Settings};
use crate::error::{Result, ScrapeError};
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

/// The condition a rendered page must meet before its markup is used.
#[derive(Debug, Clone)]
pub struct ReadyCondition {
    css: String,
    selector: Selector,
}

impl ReadyCondition {
    /// Ready once an element matching `css` is present.
    pub fn element_present(css: &str) -> Result<Self> {
        let selector = Selector::parse(css)
            .map_err(|e| ScrapeError::Config(format!("invalid ready selector {css:?}: {e}")))?;
        Ok(Self {
            css: css.to_string(),
            selector,
        })
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn is_met(&self, markup: &str) -> bool {
        Html::parse_document(markup).select(&self.selector).next().is_some()
    }
}

/// What to render and how long to wait for it.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub url: Url,
    pub ready: ReadyCondition,
    pub timeout: Duration,
}

impl RenderRequest {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            url: settings.base_url.clone(),
            ready: ReadyCondition::element_present(&settings.ready_selector)?,
            timeout: settings.render_timeout,
        })
    }

    pub fn timed_out(&self) -> ScrapeError {
        ScrapeError::RenderTimeout {
            url: self.url.to_string(),
            timeout: self.timeout,
        }
    }
}

/// Produces rendered page markup.
pub trait Renderer {
    /// Render `request.url` and return its markup once `request.ready` holds.
    ///
    /// Fails with [`ScrapeError::RenderTimeout`] if that does not happen
    /// within `request.timeout`, or [`ScrapeError::Render`] if the page cannot
    /// be fetched at all.
    async fn render(&self, request: &RenderRequest) -> Result<String>;
}

/// The renderer selected by configuration.
pub enum PageRenderer {
    Http(http::HttpRenderer),
    #[cfg(feature = "browser")]
    Browser(browser::BrowserRenderer),
}

impl PageRenderer {
    pub fn for_kind(kind: RendererKind, timeout: Duration) -> Result<Self> {
        match kind {
            RendererKind::Http => Ok(PageRenderer::Http(http::HttpRenderer::new(timeout)?)),
            #[cfg(feature = "browser")]
            RendererKind::Browser => Ok(PageRenderer::Browser(browser::BrowserRenderer::default())),
            #[cfg(not(feature = "browser"))]
            RendererKind::Browser => Err(ScrapeError::Config(
                "the browser renderer requires building with `--features browser`".into(),
            )),
        }
    }
}

impl Renderer for PageRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<String> {
        match self {
            PageRenderer::Http(r) => r.render(request).await,
            #[cfg(feature = "browser")]
            PageRenderer::Browser(r) => r.render(request).await,
        }
    }
}
