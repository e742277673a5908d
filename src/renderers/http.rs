//! Plain HTTP renderer.
//!
//! Fetches the page's initial markup with `reqwest`. No scripts run, so the
//! readiness condition is checked against the server response as delivered.

use super::{RenderRequest, Renderer};
use crate::error::{Result, ScrapeError};
use reqwest::Client;
use std::time::Duration;
use tracing::{info, instrument, warn};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ScrapeError::Render(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Renderer for HttpRenderer {
    #[instrument(level = "info", skip_all, fields(url = %request.url))]
    async fn render(&self, request: &RenderRequest) -> Result<String> {
        let fetch = async {
            let response = self
                .client
                .get(request.url.clone())
                .send()
                .await?
                .error_for_status()?;
            response.text().await
        };

        let body = match tokio::time::timeout(request.timeout, fetch).await {
            Err(_) => return Err(request.timed_out()),
            Ok(Err(e)) if e.is_timeout() => return Err(request.timed_out()),
            Ok(Err(e)) => {
                warn!(error = %e, "Fetch failed");
                return Err(ScrapeError::Render(e.to_string()));
            }
            Ok(Ok(body)) => body,
        };

        if !request.ready.is_met(&body) {
            return Err(ScrapeError::Render(format!(
                "page never matched ready selector {:?}",
                request.ready.css()
            )));
        }

        info!(bytes = body.len(), "Fetched page markup");
        Ok(body)
    }
}
