// src/extract/row.rs
use scraper::ElementRef;
use std::collections::BTreeSet;
use tracing::trace;

use super::cell_text;

/// Class set a rating image must carry, exactly. Supersets and subsets do not count.
pub const RATING_IMAGE_CLASSES: &[&str] = &["ng-scope"];

/// Values of one table row, in document order.
///
/// - `td`: trimmed text, skipped when empty.
/// - `img`: the rating code, when [`is_rating_image`] holds and `alt` is non-empty.
/// - anything else: ignored.
pub fn extract_values(row: &ElementRef<'_>) -> Vec<String> {
    let mut values = Vec::new();

    // descendants() yields the row itself first
    for child in row.descendants().skip(1).filter_map(ElementRef::wrap) {
        match child.value().name() {
            "td" => {
                let text = cell_text(&child);
                if text.is_empty() {
                    continue;
                }
                values.push(text);
            }
            "img" => {
                if !is_rating_image(&child) {
                    trace!(class = ?child.value().attr("class"), "img skipped");
                    continue;
                }
                if let Some(code) = child.value().attr("alt").and_then(rating_code) {
                    values.push(code);
                }
            }
            _ => {}
        }
    }

    values
}

/// True when the element's class set equals [`RATING_IMAGE_CLASSES`].
/// An element with no class attribute never matches.
pub fn is_rating_image(el: &ElementRef<'_>) -> bool {
    if el.value().attr("class").is_none() {
        return false;
    }
    let classes: BTreeSet<&str> = el.value().classes().collect();
    let wanted: BTreeSet<&str> = RATING_IMAGE_CLASSES.iter().copied().collect();
    classes == wanted
}

/// First character of an `alt` text, or `None` when it is empty.
pub fn rating_code(alt: &str) -> Option<String> {
    alt.chars().next().map(String::from)
}
