// src/fetch/mod.rs
use reqwest::blocking::Client;
use std::{fs, path::Path, time::Duration};
use tracing::{info, instrument};
use url::Url;

use crate::config::Config;
use crate::error::{Result, ScrapeError};

pub mod render;
pub mod retry;

pub use render::RenderOptions;
pub use retry::{get_with_retry, Fetched, RetryPolicy};

/// Something that can hand back the fully rendered HTML of a page.
pub trait PageSource {
    fn fetch_rendered(&self, url: &Url) -> Result<String>;
}

/// GET with retries, then render the page in headless Chrome.
pub struct BrowserPageSource {
    client: Client,
    retry: RetryPolicy,
    render: RenderOptions,
}

impl BrowserPageSource {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .cookie_store(true)
            .build()
            .map_err(|source| ScrapeError::Http {
                url: config.url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            retry: RetryPolicy {
                max_attempts: config.max_attempts,
                initial_backoff: Duration::from_millis(config.retry_backoff_ms),
                allow_failed_status: config.allow_failed_status,
            },
            render: RenderOptions {
                timeout: Duration::from_secs(config.render_timeout_secs),
                wait_for: config.row_selector.to_css(),
            },
        })
    }

    fn get_once(&self, url: &Url) -> Result<Fetched> {
        let http_err = |source: reqwest::Error| ScrapeError::Http {
            url: url.to_string(),
            source,
        };
        let resp = self.client.get(url.clone()).send().map_err(http_err)?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(http_err)?;
        Ok(Fetched { status, body })
    }
}

impl PageSource for BrowserPageSource {
    #[instrument(level = "info", skip(self, url), fields(url = %url))]
    fn fetch_rendered(&self, url: &Url) -> Result<String> {
        info!("fetching site HTML");
        let fetched = get_with_retry(url.as_str(), &self.retry, |_| self.get_once(url))?;
        info!(status = fetched.status, bytes = fetched.body.len(), "response received");

        // the raw body lacks the script-built rows; the browser loads the URL again
        render::render_page(url.as_str(), &self.render).map_err(|e| ScrapeError::Render {
            url: url.to_string(),
            reason: format!("{:#}", e),
        })
    }
}

/// Serves HTML that was rendered elsewhere (a saved page or a fixture).
pub struct StaticPageSource {
    html: String,
}

impl StaticPageSource {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let html = fs::read_to_string(path).map_err(|source| ScrapeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = html.len(), "loaded rendered HTML from file");
        Ok(Self::new(html))
    }
}

impl PageSource for StaticPageSource {
    fn fetch_rendered(&self, _url: &Url) -> Result<String> {
        Ok(self.html.clone())
    }
}
