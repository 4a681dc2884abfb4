// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Harava - Content Discovery Engine
 * Standalone CLI for authorized web content discovery
 *
 * Features:
 * - Per-target auto-calibration against soft-404 noise
 * - User-Agent rotation, method fuzzing, 401/403 bypass probes
 * - Filename mutation hunting for backup artifacts
 * - Secret and WAF detection on every finding
 * - Recursive directory expansion with bounded depth
 * - JSON and HTML reporting
 *
 * (c) 2026 Bountyy Oy
 */

use anyhow::Result;
use clap::Parser;
use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;
use tracing::{error, info};

use harava_scanner::config::{self, ScanConfig};
use harava_scanner::engine::ScanEngine;
use harava_scanner::progress;
use harava_scanner::reporting;
use harava_scanner::wordlist::load_wordlist;

/// Harava - context-aware HTTP content discovery for authorized testing
#[derive(Parser)]
#[command(name = "harava")]
#[command(author = "Bountyy Oy <info@bountyy.fi>")]
#[command(version = "1.0.0")]
#[command(about = "Context-aware content discovery. Calibrated, recursive, Rust.", long_about = None)]
struct Cli {
    /// Target URL (or pipe targets via stdin, one per line)
    #[arg(short = 'u', long = "url")]
    url: Option<String>,

    /// Wordlist path
    #[arg(short = 'w', long = "wordlist")]
    wordlist: Option<PathBuf>,

    /// Number of concurrent workers
    #[arg(short = 't', long = "threads", default_value_t = config::DEFAULT_WORKERS)]
    threads: usize,

    /// Extensions, comma-separated (e.g. php,html,txt)
    #[arg(short = 'x', long = "extensions")]
    extensions: Option<String>,

    /// Custom header "Name: Value" (repeatable)
    #[arg(short = 'H', long = "header")]
    header: Vec<String>,

    /// Request timeout in seconds
    #[arg(long = "timeout", default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Recursive scanning depth (0 = disabled)
    #[arg(long = "depth", default_value_t = 0)]
    depth: u32,

    /// Log every probed URL
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// JSON output file
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// HTML report file
    #[arg(long = "html")]
    html: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    progress::print_banner();

    let targets = match gather_targets(&cli) {
        Ok(targets) => targets,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let config = ScanConfig {
        wordlist: cli.wordlist.clone().unwrap_or_default(),
        threads: cli.threads,
        extensions: cli
            .extensions
            .as_deref()
            .map(config::parse_extensions)
            .unwrap_or_default(),
        timeout_secs: cli.timeout,
        max_depth: cli.depth,
        verbose: cli.verbose,
        output: cli.output.clone(),
        html_report: cli.html.clone(),
        custom_headers: config::parse_headers(&cli.header),
    };

    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    let words = match load_wordlist(&config.wordlist) {
        Ok(words) => words,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    info!("loaded {} wordlist entries", words.len());

    progress::print_scan_config(&config, &targets, words.len());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .thread_name("harava-worker")
        .enable_all()
        .build()?;

    runtime.block_on(run_scan(config, targets, words))
}

async fn run_scan(config: ScanConfig, targets: Vec<String>, words: Vec<String>) -> Result<()> {
    let verbose = config.verbose;
    let output = config.output.clone();
    let html_report = config.html_report.clone();

    let engine = ScanEngine::new(config)?;
    let stats = engine.stats();

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let reporter = if !verbose {
        Some(tokio::spawn(progress::progress_reporter(
            stats.clone(),
            shutdown_rx,
        )))
    } else {
        None
    };

    let findings = engine
        .run(targets, words, move |finding| {
            if !verbose {
                progress::print_finding(finding);
            }
        })
        .await;

    let _ = shutdown_tx.send(true);
    if let Some(reporter) = reporter {
        let _ = reporter.await;
    }

    progress::print_summary(&stats);

    // Report failures are reported but never fail a finished scan.
    if let Some(path) = &output {
        match reporting::json::save(&findings, path) {
            Ok(()) => info!("results saved to {}", path.display()),
            Err(e) => error!("{:#}", e),
        }
    }
    if let Some(path) = &html_report {
        match reporting::html::save(&findings, path) {
            Ok(()) => info!("HTML report saved to {}", path.display()),
            Err(e) => error!("{:#}", e),
        }
    }

    Ok(())
}

/// Collect targets from stdin (multi-target mode) or the -u flag.
fn gather_targets(cli: &Cli) -> harava_scanner::errors::ScanResult<Vec<String>> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        let lines: Vec<String> = stdin.lock().lines().map_while(|line| line.ok()).collect();
        let targets = config::normalize_targets(&lines)?;
        info!("loaded {} targets from stdin", targets.len());
        return Ok(targets);
    }

    match &cli.url {
        Some(url) => Ok(vec![config::normalize_target(url)?]),
        None => Err(harava_scanner::errors::ScanError::NoTargets),
    }
}
