// src/fetch/render.rs
//! Headless Chrome rendering. The page's scripts build the proxy table
//! client-side, so the raw HTTP body has headings but no rows.

use anyhow::{anyhow, Context, Result};
use headless_chrome::{Browser, LaunchOptions};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub timeout: Duration,
    /// CSS selector that signals the scripts have populated the table.
    pub wait_for: String,
}

fn launch_browser(timeout: Duration) -> Result<Browser> {
    // Chrome's sandbox needs privileges most containers don't grant
    let in_container = std::env::var("PROXYSCRAPE_CONTAINER").is_ok()
        || Path::new("/.dockerenv").exists();
    let chrome_path = std::env::var("CHROME_PATH").ok().map(PathBuf::from);
    debug!(in_container, chrome_path = ?chrome_path, "launching headless chrome");

    let options = LaunchOptions::default_builder()
        .headless(true)
        .sandbox(!in_container)
        .path(chrome_path)
        .idle_browser_timeout(timeout.max(Duration::from_secs(30)))
        .build()
        .map_err(|e| anyhow!("Failed to build Chrome launch options: {}", e))?;

    Browser::new(options).context("Failed to launch headless Chrome")
}

/// Load `url` in a fresh headless browser and return the DOM after scripts ran.
pub fn render_page(url: &str, opts: &RenderOptions) -> Result<String> {
    info!(%url, "rendering page, this might take some time");
    let browser = launch_browser(opts.timeout)?;

    let tab = browser.new_tab().context("Failed to create browser tab")?;
    tab.set_default_timeout(opts.timeout);

    tab.navigate_to(url)
        .with_context(|| format!("Failed to navigate to {}", url))?;
    tab.wait_until_navigated()
        .with_context(|| format!("Page failed to load for {}", url))?;

    match tab.wait_for_element_with_custom_timeout(&opts.wait_for, opts.timeout) {
        Ok(_) => debug!(selector = %opts.wait_for, "rendered content present"),
        Err(e) => warn!(
            selector = %opts.wait_for,
            error = %e,
            "rendered content did not appear, capturing page as is"
        ),
    }

    let html = tab
        .get_content()
        .with_context(|| format!("Failed to get page content for {}", url))?;
    info!(bytes = html.len(), "page rendered");
    Ok(html)
}
