//! aeoscan: AEO Readiness Scanner CLI

use aeoscan::analyzer::{aggregate_stats, ScanEngine};
use aeoscan::config::{load_config, starter_config, Config, CONFIG_FILENAME};
use aeoscan::fetcher::HttpFetcher;
use aeoscan::leads::{JsonlLeadStore, LeadRecord, LeadRecorder, LeadStore, WebhookLeadStore};
use aeoscan::reporter::{ConsoleReporter, JsonReporter};
use aeoscan::ScanReport;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_INIT_THRESHOLD: u8 = 70;

/// aeoscan: how ready is a web page to be read and cited by AI answer engines?
#[derive(Parser, Debug)]
#[command(name = "aeoscan")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// URL(s) to scan, including the http:// or https:// scheme
    #[arg(required = true)]
    urls: Vec<String>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Minimum score threshold (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<u8>,

    /// Quiet mode (one line per URL)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output and debug logging
    #[arg(long, short)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Path to config file (default: search .aeoscanrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Contact (e.g. email) to record alongside each score
    #[arg(long, value_name = "ID")]
    contact: Option<String>,

    /// Append captured leads to this JSON Lines file
    #[arg(long, value_name = "PATH")]
    lead_store: Option<String>,

    /// POST captured leads as JSON to this endpoint
    #[arg(long, value_name = "URL")]
    lead_webhook: Option<String>,

    /// Number of parallel scans (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .aeoscanrc.json with sensible defaults
    Init {
        /// Minimum score threshold (e.g. 70)
        #[arg(long)]
        threshold: Option<u8>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "aeoscan=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second init (e.g. in-process tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }
    init_logging(args.verbose);

    if let Some(cmd) = args.command {
        match cmd {
            Commands::Init { threshold, dir } => {
                return run_init(threshold, dir.as_deref());
            }
        }
    }

    let urls = validate_urls(&args.urls)?;

    // Load config (CLI flags override config file)
    let work_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_config(&work_dir, args.config.as_deref())?.merge_with_cli(
        args.threshold,
        args.lead_store.clone(),
        args.lead_webhook.clone(),
    );

    // Set up parallel processing
    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let recorder = build_lead_recorder(args.contact.as_deref(), &config, args.quiet);

    let engine =
        ScanEngine::new(HttpFetcher::new(config.user_agent.as_deref())).with_config(&config);
    let reports: Vec<ScanReport> = if urls.len() == 1 {
        vec![engine.scan(&urls[0])]
    } else {
        engine.scan_many(&urls)
    };
    let scanned_at = chrono::Utc::now();
    let reports: Vec<ScanReport> = reports.into_iter().map(|r| r.stamped(scanned_at)).collect();
    let stats = aggregate_stats(&reports);

    // Output results
    if args.json {
        let reporter = JsonReporter::new().pretty();
        if reports.len() == 1 {
            println!("{}", reporter.report(&reports[0]));
        } else {
            println!("{}", reporter.report_with_summary(&reports, &stats));
        }
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for report in &reports {
            reporter.report_quiet(report);
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }
        if args.no_color {
            reporter = reporter.without_colors();
        }

        if reports.len() == 1 {
            reporter.report(&reports[0]);
        } else {
            reporter.report_many(&reports, &stats);
        }
    }

    // Leads are written only after the report is on screen
    if let (Some(recorder), Some(contact)) = (recorder, args.contact.as_deref()) {
        for report in reports.iter().filter(|r| !r.is_failure()) {
            recorder.submit(LeadRecord::new(contact, &report.url, report.score.value));
        }
        recorder.finish();
    }

    if reports.iter().any(ScanReport::is_failure) {
        return Ok(ExitCode::from(2));
    }

    // Check threshold (config or CLI)
    if let Some(threshold) = config.threshold {
        let score = if reports.len() == 1 {
            reports[0].score.value
        } else {
            stats.average_score.value
        };

        if score < threshold {
            if !args.quiet && !args.json {
                eprintln!(
                    "\n{}: Score {} is below threshold {}",
                    "Failed".red().bold(),
                    score,
                    threshold
                );
            }
            return Ok(ExitCode::from(1));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// URLs must parse and use http or https
fn validate_urls(raw: &[String]) -> Result<Vec<String>> {
    raw.iter()
        .map(|input| {
            let trimmed = input.trim();
            let parsed =
                Url::parse(trimmed).with_context(|| format!("Invalid URL '{}'", trimmed))?;
            match parsed.scheme() {
                "http" | "https" if parsed.host_str().is_some() => Ok(trimmed.to_string()),
                "http" | "https" => anyhow::bail!("Invalid URL '{}': missing host", trimmed),
                other => anyhow::bail!(
                    "Invalid URL '{}': scheme '{}' is not supported (use http or https)",
                    trimmed,
                    other
                ),
            }
        })
        .collect()
}

fn build_lead_recorder(contact: Option<&str>, config: &Config, quiet: bool) -> Option<LeadRecorder> {
    if contact.is_none() {
        return None;
    }

    let mut stores: Vec<Box<dyn LeadStore>> = Vec::new();
    if let Some(path) = &config.leads.path {
        stores.push(Box::new(JsonlLeadStore::new(path)));
    }
    if let Some(endpoint) = &config.leads.webhook {
        stores.push(Box::new(WebhookLeadStore::new(endpoint.as_str())));
    }

    if stores.is_empty() {
        if !quiet {
            eprintln!(
                "{}: --contact given but no lead store configured (use --lead-store or --lead-webhook)",
                "Warning".yellow()
            );
        }
        return None;
    }
    Some(LeadRecorder::spawn(stores))
}

fn run_init(threshold: Option<u8>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let threshold_value = threshold.unwrap_or(DEFAULT_INIT_THRESHOLD);
    std::fs::write(&config_path, starter_config(threshold_value))
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!(
        "{}: Created {} with threshold={}",
        "Done".green().bold(),
        config_path.display(),
        threshold_value
    );
    Ok(ExitCode::SUCCESS)
}
