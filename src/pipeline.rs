// src/pipeline.rs
use scraper::Html;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, ScrapeError};
use crate::extract::{extract_values, get_headings, scrape_with, ProxyTable};
use crate::fetch::PageSource;
use crate::output::write_to_csv;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub columns: usize,
    pub rows: usize,
}

/// Parse rendered HTML into a table whose rows all match the heading count.
pub fn extract_table(html: &str, config: &Config) -> Result<ProxyTable> {
    let document = Html::parse_document(html);

    info!("fetching table headings");
    let headings = get_headings(&document, &config.header_selector, &config.exclude_headings);
    if headings.is_empty() {
        return Err(ScrapeError::NoHeadings);
    }
    debug!(?headings, "schema");

    info!("fetching table rows");
    let row_elements = scrape_with(&document, &config.row_selector);
    if row_elements.is_empty() {
        warn!(selector = %config.row_selector.to_css(), "no data rows found");
    }

    info!(rows = row_elements.len(), "extracting values from table rows");
    let mut rows = Vec::with_capacity(row_elements.len());
    for (idx, row) in row_elements.iter().enumerate() {
        let values = extract_values(row);
        if values.len() != headings.len() {
            return Err(ScrapeError::SchemaMismatch {
                row: idx,
                expected: headings.len(),
                found: values.len(),
            });
        }
        rows.push(values);
    }

    Ok(ProxyTable { headings, rows })
}

/// fetch → render → parse → extract → write. Nothing is written unless every row validates.
pub fn run(source: &dyn PageSource, config: &Config) -> Result<RunSummary> {
    config.validate()?;
    let url = config.target_url()?;

    let html = source.fetch_rendered(&url)?;
    let table = extract_table(&html, config)?;

    write_to_csv(&table.headings, &table.rows, &config.output)?;
    info!(path = %config.output.display(), "done");

    Ok(RunSummary {
        output: config.output.clone(),
        columns: table.headings.len(),
        rows: table.rows.len(),
    })
}
