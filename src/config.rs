// src/config.rs
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};
use tracing::debug;
use url::Url;

use crate::error::{Result, ScrapeError};

pub const DEFAULT_URL: &str = "https://cool-proxy.net";
pub const DEFAULT_OUTPUT: &str = "scrape.csv";

/// A tag name plus an optional class the element must carry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagSelector {
    pub tag: String,
    #[serde(default)]
    pub class: Option<String>,
}

impl TagSelector {
    pub fn new(tag: &str, class: Option<&str>) -> Self {
        Self {
            tag: tag.to_string(),
            class: class.map(str::to_string),
        }
    }

    /// CSS form, used when waiting on the rendered page.
    pub fn to_css(&self) -> String {
        match &self.class {
            Some(class) => format!("{}.{}", self.tag, class),
            None => self.tag.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub url: String,
    pub output: PathBuf,
    pub timeout_secs: u64,
    pub max_attempts: u32,
    pub retry_backoff_ms: u64,
    /// Keep going with the last response once every attempt came back non-success.
    pub allow_failed_status: bool,
    pub render_timeout_secs: u64,
    pub user_agent: String,
    pub exclude_headings: Vec<String>,
    pub header_selector: TagSelector,
    pub row_selector: TagSelector,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            timeout_secs: 30,
            max_attempts: 3,
            retry_backoff_ms: 1000,
            allow_failed_status: false,
            render_timeout_secs: 30,
            user_agent: format!("proxyscrape/{}", env!("CARGO_PKG_VERSION")),
            exclude_headings: vec!["Flag".to_string()],
            header_selector: TagSelector::new("th", Some("tHeader")),
            row_selector: TagSelector::new("tr", Some("proxy-row")),
        }
    }
}

impl Config {
    /// Load a YAML file; any field left out keeps its default.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");
        let text = fs::read_to_string(path).map_err(|source| ScrapeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
            .map_err(|e| ScrapeError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| ScrapeError::Config(e.to_string()))
    }

    pub fn target_url(&self) -> Result<Url> {
        Url::parse(&self.url).map_err(|e| ScrapeError::Config(format!("url {:?}: {}", self.url, e)))
    }

    pub fn validate(&self) -> Result<()> {
        self.target_url()?;
        if self.max_attempts == 0 {
            return Err(ScrapeError::Config("max_attempts must be at least 1".into()));
        }
        for (field, sel) in [
            ("header_selector", &self.header_selector),
            ("row_selector", &self.row_selector),
        ] {
            if sel.tag.trim().is_empty() {
                return Err(ScrapeError::Config(format!("{}.tag cannot be empty", field)));
            }
        }
        Ok(())
    }
}
