use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use postal_common::observability::{LogConfig, init_logging};
use postal_config::{PostalConfig, PostalConfigLoader};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use wiring::{Input, build_extractor};
mod wiring;

/// Find the first US postal address on a web page.
#[derive(Parser, Debug)]
#[command(name = "postal", author, version, about, long_about = None)]
struct Cli {
    /// Page to fetch; prompted for on stdin when omitted
    url: Option<String>,

    /// Read markup from a local file instead of fetching
    #[arg(long, value_name = "PATH", conflicts_with_all = ["url", "text_file"])]
    html_file: Option<PathBuf>,

    /// Read plain text from a local file instead of fetching
    #[arg(long, value_name = "PATH", conflicts_with = "url")]
    text_file: Option<PathBuf>,

    /// Extra configuration file, merged over the default locations
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Words per candidate window
    #[arg(long, value_parser = parse_positive)]
    window_size: Option<usize>,

    /// Cap on concurrently running matchers
    #[arg(long, value_parser = parse_positive)]
    max_in_flight: Option<usize>,

    /// Duplicate logs to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_positive(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".into()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl Cli {
    /// Command-line flags win over every configuration source.
    fn apply_overrides(&self, cfg: &mut PostalConfig) {
        if let Some(window_size) = self.window_size {
            cfg.engine.window_size = window_size;
        }
        if self.max_in_flight.is_some() {
            cfg.engine.max_in_flight = self.max_in_flight;
        }
        if self.verbose {
            cfg.logging.stderr = true;
        }
    }

    fn input(&self) -> Option<Input> {
        if let Some(path) = &self.html_file {
            return Some(Input::HtmlFile(path.clone()));
        }
        if let Some(path) = &self.text_file {
            return Some(Input::TextFile(path.clone()));
        }
        self.url.clone().map(Input::Url)
    }
}

async fn prompt_for_url() -> Result<Input> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Enter url: ").await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("reading url from stdin")?;
    Ok(Input::Url(line.trim().to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins over files, flags win over env)
    let mut loader = PostalConfigLoader::new().with_default_locations();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    let mut cfg = loader.load().context("loading configuration")?;
    cli.apply_overrides(&mut cfg);

    let log_path = init_logging(LogConfig {
        app_name: "postal",
        log_dir: cfg.logging.directory.clone(),
        emit_stderr: cfg.logging.stderr,
        format: cfg.logging.format,
        default_filter: cfg.logging.filter.clone(),
    })?;
    tracing::debug!(log_path = %log_path.display(), ?cfg, "postal starting");

    let extractor = build_extractor(&cfg)?;
    let input = match cli.input() {
        Some(input) => input,
        None => prompt_for_url().await?,
    };

    let found = wiring::run(&extractor, input).await?;
    match found {
        Some(address) => println!("{address}"),
        None => println!(),
    }
    Ok(())
}
