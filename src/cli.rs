//! CLI parsing and orchestration. Parses args, runs collect -> extract -> JSON output. Maps
//! errors to exit codes.

use crate::config;
use crate::formats::{write_records, write_records_to_path, FormatError, OutputFormat};
use crate::harvest::{harvest, resolved_links, HarvestOptions};
use crate::scraper::{HttpClient, ResourceKind, ScraperError};
use chrono::Datelike;
use clap::Parser;
use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CLI error carrying exit code and message.
#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Scraper(#[from] ScraperError),

    #[error("{0}")]
    Format(#[from] FormatError),
}

impl CliRunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliRunError::InvalidInput(_) => 1,
            CliRunError::Scraper(_) => 2,
            CliRunError::Format(_) => 3,
        }
    }
}

/// Write the top-level error, and with `verbose` its cause chain, to `out` (stderr in `main`).
/// Goes straight to the writer so the report survives any log filter.
pub fn write_error_report<W: Write>(e: &CliRunError, verbose: bool, mut out: W) {
    let _ = writeln!(out, "{}", e);
    if verbose {
        let mut source = std::error::Error::source(e);
        while let Some(s) = source {
            let _ = writeln!(out, "  cause: {}", s);
            source = s.source();
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "cslscrape")]
#[command(about = "Harvest events, news or library pages from a CS Library CMS site as JSON")]
#[command(
    after_help = "Config file keys (base_url, output_dir, user_agent, timeout_secs, format) are read from ./cslscrape.toml or the user config dir. CLI flags override config. Set RUST_LOG to tune logging."
)]
pub struct Args {
    /// Site base URL, e.g. https://bibliotek.example.se (overrides config base_url).
    pub url: Option<String>,

    /// Resource kind: events, news, or libraries.
    #[arg(short, long, value_parser = parse_kind)]
    pub kind: ResourceKind,

    /// Calendar year to walk for events. Default: current year.
    #[arg(long)]
    pub year: Option<i32>,

    /// Print the collected detail-page URLs, one per line, and stop.
    #[arg(long)]
    pub links_only: bool,

    /// Output path, or - for stdout. Default: {output_dir}/{kind}.{ext}.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: json or jsonl (overrides config).
    #[arg(long, value_parser = parse_format)]
    pub format: Option<OutputFormat>,

    /// Extract at most this many detail pages.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Log and skip detail pages that fail to load instead of aborting.
    #[arg(long)]
    pub skip_failed: bool,

    /// HTTP User-Agent (overrides config).
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Request timeout in seconds (overrides config; default 30).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Suppress progress output (errors only).
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug logging and verbose error chain.
    #[arg(long)]
    pub verbose: bool,
}

impl Args {
    /// Default log filter for these flags. RUST_LOG still wins.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

fn parse_kind(s: &str) -> Result<ResourceKind, String> {
    match s.to_lowercase().as_str() {
        "events" | "event" => Ok(ResourceKind::Events),
        "news" => Ok(ResourceKind::News),
        "libraries" | "library" => Ok(ResourceKind::Libraries),
        _ => Err(format!(
            "Invalid --kind value: '{}'. Use events, news, or libraries.",
            s
        )),
    }
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_lowercase().as_str() {
        "json" => Ok(OutputFormat::Json),
        "jsonl" | "ndjson" => Ok(OutputFormat::JsonLines),
        _ => Err(format!(
            "Invalid --format value: '{}'. Use json or jsonl.",
            s
        )),
    }
}

/// Ensure output path parent exists.
fn validate_output_path(path: &Path) -> Result<(), CliRunError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(CliRunError::InvalidInput(format!(
                "Cannot write output: {}: parent directory does not exist.",
                path.display()
            )));
        }
    }
    Ok(())
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Entry point for the CLI. Returns Ok(()) on success; Err with exit code and message on failure.
pub fn run(args: &Args) -> Result<(), CliRunError> {
    let config = config::load_config().map_err(CliRunError::InvalidInput)?;

    let base_url = args
        .url
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.base_url.clone()))
        .ok_or_else(|| {
            CliRunError::InvalidInput(
                "No site URL given. Pass a base URL, e.g. https://bibliotek.example.se, or set base_url in the config file.".to_string(),
            )
        })?;

    let format = match args.format {
        Some(f) => f,
        None => match config.as_ref().and_then(|c| c.format.as_deref()) {
            Some(s) => parse_format(s).map_err(CliRunError::InvalidInput)?,
            None => OutputFormat::Json,
        },
    };
    let timeout_secs = args
        .timeout
        .or_else(|| config.as_ref().and_then(|c| c.timeout_secs))
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    let user_agent = args
        .user_agent
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.user_agent.clone()));
    let year = args.year.unwrap_or_else(|| chrono::Local::now().year());

    let mut builder = HttpClient::builder().timeout_secs(timeout_secs);
    if let Some(ua) = user_agent {
        builder = builder.user_agent(ua);
    }
    let mut client = builder
        .build()
        .map_err(|e| CliRunError::InvalidInput(format!("Failed to create HTTP client: {}", e)))?;

    if args.links_only {
        let links = resolved_links(&mut client, args.kind, &base_url, year)?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for link in &links {
            writeln!(out, "{}", link).map_err(FormatError::from)?;
        }
        return Ok(());
    }

    let output_path = match &args.output {
        Some(p) => p.clone(),
        None => {
            let dir = config
                .as_ref()
                .and_then(|c| c.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            dir.join(format!("{}.{}", args.kind.as_str(), format.extension()))
        }
    };
    if !is_stdout(&output_path) {
        validate_output_path(&output_path)?;
    }

    let progress_state: RefCell<Option<indicatif::ProgressBar>> = RefCell::new(None);
    let progress_cb = |n: usize, total: usize| {
        if total == 0 {
            return;
        }
        let mut state = progress_state.borrow_mut();
        let pb = state.get_or_insert_with(|| {
            let bar = indicatif::ProgressBar::new(total as u64);
            if let Ok(style) = indicatif::ProgressStyle::default_bar()
                .template("{spinner} {msg} [{bar:40}] {pos}/{len} ({elapsed})")
            {
                bar.set_style(style.progress_chars("█▉▊▋▌▍▎▏ "));
            }
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        });
        pb.set_position(n as u64);
        pb.set_message(format!("Fetching page {}/{}", n, total));
    };
    let progress: Option<&dyn Fn(usize, usize)> = if args.quiet { None } else { Some(&progress_cb) };

    let options = HarvestOptions {
        year,
        limit: args.limit,
        skip_failed: args.skip_failed,
        progress,
    };
    let result = harvest(&mut client, args.kind, &base_url, &options);

    if let Some(pb) = progress_state.borrow_mut().take() {
        pb.disable_steady_tick();
        pb.finish_and_clear();
    }
    let records = result?;

    if is_stdout(&output_path) {
        write_records(&records, format, std::io::stdout().lock())?;
    } else {
        write_records_to_path(&records, format, &output_path)?;
        log::info!(
            "Wrote {} record(s) to {}",
            records.len(),
            output_path.display()
        );
    }
    Ok(())
}
