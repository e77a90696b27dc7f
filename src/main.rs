use clap::Parser;
use proxyscrape::{
    cli::Cli,
    error::ScrapeError,
    fetch::{BrowserPageSource, PageSource, StaticPageSource},
    pipeline,
};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .init();
    info!("startup");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: Cli) -> Result<(), ScrapeError> {
    let from_file = cli.from_file.clone();

    // ─── 2) configure ────────────────────────────────────────────────
    let config = cli.into_config()?;

    // ─── 3) pick the page source ─────────────────────────────────────
    let source: Box<dyn PageSource> = match from_file {
        Some(path) => Box::new(StaticPageSource::from_file(path)?),
        None => Box::new(BrowserPageSource::new(&config)?),
    };

    // ─── 4) fetch → extract → write ──────────────────────────────────
    let summary = pipeline::run(source.as_ref(), &config)?;
    info!(
        path = %summary.output.display(),
        columns = summary.columns,
        rows = summary.rows,
        "all done"
    );
    Ok(())
}
