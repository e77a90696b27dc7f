// src/output.rs
use csv::Writer;
use std::{fs::File, path::Path};
use tracing::{debug, info};

use crate::error::{Result, ScrapeError};

/// Create (or truncate) `path` and write the heading row followed by every data row.
pub fn write_to_csv<P: AsRef<Path>>(headings: &[String], rows: &[Vec<String>], path: P) -> Result<()> {
    let path = path.as_ref();
    info!(path = %path.display(), rows = rows.len(), "writing output");

    let csv_err = |source: csv::Error| ScrapeError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|source| ScrapeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(headings).map_err(csv_err)?;
    for row in rows {
        wtr.write_record(row).map_err(csv_err)?;
    }

    wtr.flush().map_err(|source| ScrapeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "output flushed");
    Ok(())
}
