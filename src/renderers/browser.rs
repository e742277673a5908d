//! Headless Chrome renderer.
//!
//! Launches a fresh browser for each render, waits for the ready selector,
//! and returns the page content. The browser process is owned by the
//! blocking task and shut down when the task returns, on success or failure.

use super::{RenderRequest, Renderer};
use crate::error::{Result, ScrapeError};
use headless_chrome::util::Timeout;
use headless_chrome::{Browser, LaunchOptions};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Extra time allowed for browser start-up on top of the page timeout.
const LAUNCH_GRACE: Duration = Duration::from_secs(20);

/// Page timeout plus start-up grace, saturating instead of overflowing.
fn launch_budget(timeout: Duration) -> Duration {
    timeout.saturating_add(LAUNCH_GRACE)
}

#[derive(Debug, Clone, Default)]
pub struct BrowserRenderer;

impl Renderer for BrowserRenderer {
    #[instrument(level = "info", skip_all, fields(url = %request.url))]
    async fn render(&self, request: &RenderRequest) -> Result<String> {
        let url = request.url.to_string();
        let css = request.ready.css().to_string();
        let timeout = request.timeout;

        let task = tokio::task::spawn_blocking(move || render_blocking(&url, &css, timeout));
        let html = match tokio::time::timeout(launch_budget(timeout), task).await {
            Err(_) => return Err(request.timed_out()),
            Ok(Err(join)) => return Err(ScrapeError::Render(format!("render task failed: {join}"))),
            Ok(Ok(Err(ScrapeError::RenderTimeout { .. }))) => return Err(request.timed_out()),
            Ok(Ok(result)) => result?,
        };

        info!(bytes = html.len(), "Rendered page");
        Ok(html)
    }
}

fn render_blocking(url: &str, css: &str, timeout: Duration) -> Result<String> {
    let render_err = |what: &str, e: &dyn std::fmt::Display| ScrapeError::Render(format!("{what}: {e}"));

    let options = LaunchOptions::default_builder()
        .headless(true)
        .sandbox(false)
        .idle_browser_timeout(launch_budget(timeout))
        .build()
        .map_err(|e| render_err("invalid launch options", &e))?;
    let browser = Browser::new(options).map_err(|e| render_err("failed to launch browser", &e))?;
    debug!("Browser launched");

    let tab = browser.new_tab().map_err(|e| render_err("failed to open tab", &e))?;
    tab.set_default_timeout(timeout);
    tab.navigate_to(url).map_err(|e| render_err("navigation failed", &e))?;
    tab.wait_for_element(css).map_err(|e| {
        if e.downcast_ref::<Timeout>().is_some() {
            ScrapeError::RenderTimeout {
                url: url.to_string(),
                timeout,
            }
        } else {
            render_err("waiting for ready selector failed", &e)
        }
    })?;

    let html = tab.get_content().map_err(|e| render_err("failed to read page content", &e))?;
    drop(tab);
    drop(browser);
    debug!("Browser released");
    Ok(html)
}
