// src/cli.rs
use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;

#[derive(Parser, Debug)]
#[command(name = "proxyscrape")]
#[command(about = "Scrape the proxy table from a JavaScript-rendered page into a CSV file")]
#[command(version)]
pub struct Cli {
    /// Page to scrape
    #[arg(long, env = "PROXYSCRAPE_URL")]
    pub url: Option<String>,

    /// Output CSV path (default: scrape.csv)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// YAML config file; flags given on the command line take precedence
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Heading to leave out of the output; repeat for several (default: Flag)
    #[arg(long = "exclude", value_name = "LABEL")]
    pub exclude: Vec<String>,

    /// Parse an already rendered HTML file instead of fetching the page
    #[arg(long, value_name = "PATH")]
    pub from_file: Option<PathBuf>,

    /// Carry on with the last response when every attempt returns a non-success status
    #[arg(long)]
    pub allow_failed_status: bool,

    /// Number of GET attempts before giving up
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Verbose logging (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Defaults, then the YAML file, then command-line flags.
    pub fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_yaml_file(path)?,
            None => Config::default(),
        };

        if let Some(url) = self.url {
            config.url = url;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if !self.exclude.is_empty() {
            config.exclude_headings = self.exclude;
        }
        if self.allow_failed_status {
            config.allow_failed_status = true;
        }
        if let Some(n) = self.max_attempts {
            config.max_attempts = n;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
