// src/extract/mod.rs
use scraper::{ElementRef, Html};
use tracing::{debug, trace};

use crate::config::TagSelector;

pub mod row;

pub use row::{extract_values, is_rating_image, rating_code, RATING_IMAGE_CLASSES};

/// Headings plus every data row, already checked against each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTable {
    pub headings: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Every element named `tag` (optionally also carrying `class`), in document order.
pub fn scrape<'a>(document: &'a Html, tag: &str, class: Option<&str>) -> Vec<ElementRef<'a>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name().eq_ignore_ascii_case(tag))
        .filter(|el| match class {
            Some(class) => el.value().classes().any(|c| c == class),
            None => true,
        })
        .collect()
}

/// Same as [`scrape`], driven by a configured selector.
pub fn scrape_with<'a>(document: &'a Html, selector: &TagSelector) -> Vec<ElementRef<'a>> {
    scrape(document, &selector.tag, selector.class.as_deref())
}

/// Trimmed text of every header cell, minus anything in `exclude`.
pub fn get_headings(document: &Html, selector: &TagSelector, exclude: &[String]) -> Vec<String> {
    let cells = scrape_with(document, selector);
    debug!(cells = cells.len(), selector = %selector.to_css(), "header cells found");

    cells
        .into_iter()
        .map(|cell| cell_text(&cell))
        .filter(|text| {
            let keep = !exclude.iter().any(|e| e == text);
            if !keep {
                trace!(heading = %text, "excluded");
            }
            keep
        })
        .collect()
}

/// All descendant text of `el`, concatenated and trimmed.
pub(crate) fn cell_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
