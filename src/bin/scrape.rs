//! CLI that extracts records from one HTML page and prints them as JSON.
//!
//! Reads the page from `--html` or stdin. With `--output-dir` the JSON is
//! written below `<dir>/%Y/%m/` instead of stdout.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use rs_tagscrape::{can_extract, dom, extract, fileutils, load_config, scraper, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Extract structured records from an HTML page.
#[derive(Parser)]
#[command(name = "scrape")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file (.yaml, .yml, .json, .jsonl)
    #[arg(short, long)]
    config: PathBuf,

    /// HTML file to read (default: stdin)
    #[arg(long)]
    html: Option<PathBuf>,

    /// Write results below this directory instead of stdout
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Extract even when the page fails validation
    #[arg(long)]
    skip_validation: bool,
}

/// Exit code for a page that fails its validation checks.
const EXIT_INVALID_PAGE: u8 = 2;

fn read_html(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => Ok(fs::read(path)?),
        None => {
            let mut html = Vec::new();
            io::stdin().read_to_end(&mut html)?;
            Ok(html)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = load_config(&cli.config)?;
    let doc = dom::parse_bytes(&read_html(cli.html.as_ref())?);

    if !cli.skip_validation && !can_extract(&doc, &config) {
        warn!("page failed validation, nothing extracted");
        return Ok(ExitCode::from(EXIT_INVALID_PAGE));
    }

    let data = extract(&doc, &config)?;
    let json = scraper::to_json_pretty(&data)?;

    match &cli.output_dir {
        Some(root) => {
            let path = fileutils::make_output_path(root, Utc::now().naive_utc(), ".json")?;
            fs::write(&path, json)?;
            info!(path = %path.display(), groups = data.len(), "wrote results");
        }
        None => println!("{json}"),
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    // Initialize tracing with WARN level by default, respecting RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
