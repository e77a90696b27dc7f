use anyhow::Result;
use csv::ReaderBuilder;
use proxyscrape::{
    config::Config,
    error::ScrapeError,
    fetch::{PageSource, StaticPageSource},
    pipeline,
};
use std::cell::Cell;
use tempfile::tempdir;
use url::Url;

const RENDERED: &str = include_str!("fixtures/cool_proxy.html");

/// Counts how often the pipeline asks for the page.
struct CountingSource {
    inner: StaticPageSource,
    calls: Cell<u32>,
}

impl PageSource for CountingSource {
    fn fetch_rendered(&self, url: &Url) -> proxyscrape::error::Result<String> {
        self.calls.set(self.calls.get() + 1);
        assert_eq!(url.as_str(), "https://cool-proxy.net/");
        self.inner.fetch_rendered(url)
    }
}

fn config_in(dir: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.output = dir.join("scrape.csv");
    config
}

#[test]
fn rendered_page_becomes_csv() -> Result<()> {
    let tmp = tempdir()?;
    let config = config_in(tmp.path());
    let source = CountingSource {
        inner: StaticPageSource::new(RENDERED),
        calls: Cell::new(0),
    };

    let summary = pipeline::run(&source, &config)?;

    assert_eq!(source.calls.get(), 1);
    assert_eq!(summary.columns, 8);
    assert_eq!(summary.rows, 3);

    let mut rdr = ReaderBuilder::new().from_path(&config.output)?;
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    assert_eq!(
        headers,
        vec![
            "IP Address",
            "Port",
            "Country",
            "Rating",
            "Working",
            "Response time",
            "Speed",
            "Last check"
        ]
    );

    let rows: Vec<Vec<String>> = rdr
        .records()
        .map(|r| r.map(|rec| rec.iter().map(str::to_string).collect()))
        .collect::<Result<_, _>>()?;
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[0],
        vec!["104.248.63.15", "30588", "United States", "A", "97%", "0.512", "1234", "2 min ago"]
    );
    assert_eq!(rows[1][2], "Korea, Republic of");
    assert_eq!(rows[1][3], "C");
    assert_eq!(rows[2][0], "46.101.112.78");
    assert_eq!(rows[2][3], "B");
    Ok(())
}

#[test]
fn keeping_the_flag_column_breaks_the_schema() {
    let tmp = tempdir().unwrap();
    let mut config = config_in(tmp.path());
    config.exclude_headings.clear();

    let err = pipeline::run(&StaticPageSource::new(RENDERED), &config).unwrap_err();

    assert!(matches!(
        err,
        ScrapeError::SchemaMismatch {
            row: 0,
            expected: 9,
            found: 8
        }
    ));
    assert!(!config.output.exists());
}

#[test]
fn unrendered_page_has_no_schema() {
    let tmp = tempdir().unwrap();
    let config = config_in(tmp.path());
    let shell = r#"<html><body><div ng-controller="ProxyListController"></div></body></html>"#;

    let err = pipeline::run(&StaticPageSource::new(shell), &config).unwrap_err();

    assert!(matches!(err, ScrapeError::NoHeadings));
    assert_eq!(err.exit_code(), 5);
    assert!(!config.output.exists());
}

#[test]
fn same_html_gives_same_table() -> Result<()> {
    let config = Config::default();
    let first = pipeline::extract_table(RENDERED, &config)?;
    let second = pipeline::extract_table(RENDERED, &config)?;
    assert_eq!(first, second);
    Ok(())
}
