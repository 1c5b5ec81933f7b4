use anyhow::Result;
use clap::Parser;
use pact_export::{ExportFormat, ReqwestClient, ScrapeOptionsBuilder, Scraper, SiteConfig};
use std::{path::PathBuf, process::ExitCode};
use tracing_subscriber::EnvFilter;

/// Export ECHA PACT search results as csv, xml or xls.
#[derive(Debug, Parser)]
#[command(name = "pact-export", version)]
struct Cli {
    /// File type to export
    #[arg(long, value_enum, required_unless_present = "all")]
    filetype: Option<ExportFormat>,

    /// Export every supported file type, one after another
    #[arg(long, conflicts_with = "filetype")]
    all: bool,

    /// Reuse (or create) a local copy of the form page
    #[arg(long)]
    cached: bool,

    #[arg(long, default_value = "main.html")]
    cache_file: PathBuf,

    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// JSON file overriding the site settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let site = match &cli.config {
        Some(path) => SiteConfig::from_file(path)?,
        None => SiteConfig::default(),
    };
    let options = ScrapeOptionsBuilder::default()
        .use_cache(cli.cached)
        .cache_file(cli.cache_file)
        .output_dir(cli.output_dir)
        .build()?;

    let mut scraper = Scraper::new(ReqwestClient::new()?, site, options);

    let results = match cli.filetype {
        Some(format) if !cli.all => vec![(format, scraper.export(format).await)],
        _ => scraper.export_all().await,
    };

    let failed: Vec<ExportFormat> = results
        .iter()
        .filter(|(_, result)| result.is_err())
        .map(|(format, _)| *format)
        .collect();
    if failed.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::error!("Export failed for: {failed:?}");
        Ok(ExitCode::FAILURE)
    }
}
