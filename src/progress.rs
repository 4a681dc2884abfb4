// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Terminal Output
 * Banner, live result lines, progress ticker and summary rendering.
 * Every ANSI escape in the binary lives here; the engine stays headless.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::config::ScanConfig;
use crate::stats::ScanStats;
use crate::types::Finding;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";
const NEON_GREEN: &str = "\x1b[1;92m";
const NEON_CYAN: &str = "\x1b[1;96m";
const MAGENTA: &str = "\x1b[1;95m";
const ORANGE: &str = "\x1b[38;5;208m";

/// Interval between status line refreshes
const PROGRESS_TICK: Duration = Duration::from_millis(500);

pub fn print_banner() {
    print!("{}", NEON_GREEN);
    println!("   __ __");
    println!("  / // /__ ________ __  _____ _");
    println!(" / _  / _ `/ __/ _ `/ |/ / _ `/");
    println!("/_//_/\\_,_/_/  \\_,_/|___/\\_,_/");
    print!("{}", RESET);
    println!();
    print!("{}{}", BOLD, WHITE);
    println!("      Content Discovery Engine");
    print!("{}{}", RESET, CYAN);
    println!("       v1.0 - (c) 2026 Bountyy Oy");
    print!("{}", RESET);
    println!();
}

pub fn print_scan_config(config: &ScanConfig, targets: &[String], word_count: usize) {
    println!("{}{}scan configuration{}", ORANGE, BOLD, RESET);
    if targets.len() == 1 {
        println!("  target:      {}{}{}", BOLD, targets[0], RESET);
    } else {
        println!("  targets:     {}{} hosts{}", BOLD, targets.len(), RESET);
    }
    println!("  wordlist:    {} entries", word_count);
    println!("  workers:     {}", config.threads);
    if !config.extensions.is_empty() {
        println!("  extensions:  {}", config.extensions.join(", "));
    }
    if config.max_depth > 0 {
        println!("  recursion:   enabled (depth {})", config.max_depth);
    }
    if !config.custom_headers.is_empty() {
        println!("  headers:     {} configured", config.custom_headers.len());
    }
    println!("  timeout:     {}s", config.timeout_secs);
    println!();
}

/// Render one finding as a status-colored result line.
pub fn print_finding(finding: &Finding) {
    let color = match finding.status {
        200..=299 => NEON_GREEN,
        300..=399 => BLUE,
        400..=499 => RED,
        500..=599 => YELLOW,
        _ => WHITE,
    };

    let mut markers = String::new();
    if let Some(server) = &finding.server {
        markers.push_str(&format!(" {}[{}]{}", CYAN, server, RESET));
    }
    if let Some(powered_by) = &finding.powered_by {
        markers.push_str(&format!(" {}[{}]{}", CYAN, powered_by, RESET));
    }
    if finding.method != "GET" && finding.method != "GET+BYPASS" {
        markers.push_str(&format!(" {}[{}]{}", MAGENTA, finding.method, RESET));
    }
    if finding.critical {
        markers.push_str(&format!(" {}{}[CRITICAL]{}", ORANGE, BOLD, RESET));
    }
    if let Some(waf) = &finding.waf_detected {
        markers.push_str(&format!(" {}{}[WAF: {}]{}", MAGENTA, BOLD, waf, RESET));
    }
    if finding.secret_found {
        markers.push_str(&format!(
            " {}{}[{}]{}",
            RED,
            BOLD,
            finding.secret_types.join(", "),
            RESET
        ));
    }

    println!(
        "{}{}{:<4}{} | {}{:<8}{} | {}{}{}{}",
        color, BOLD, finding.status, RESET, color, finding.size, RESET, color, finding.url, RESET,
        markers
    );
}

/// Periodic single-line status renderer. Samples the shared counters every
/// 500ms and exits when the cancellation channel fires.
pub async fn progress_reporter(stats: Arc<ScanStats>, mut shutdown_rx: watch::Receiver<bool>) {
    let mut ticker = tokio::time::interval(PROGRESS_TICK);
    loop {
        tokio::select! {
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    return;
                }
            }
            _ = ticker.tick() => {
                let snap = stats.snapshot();
                print!(
                    "\r{}[{:>5.1}%] | {:>5.0} req/s | found {} | secrets {} | waf {} | errors {}{}",
                    NEON_CYAN,
                    snap.progress_percent(),
                    snap.requests_per_sec(),
                    snap.found,
                    snap.secrets,
                    snap.waf_hits,
                    snap.errors,
                    RESET
                );
                let _ = std::io::stdout().flush();
            }
        }
    }
}

pub fn print_summary(stats: &ScanStats) {
    let snap = stats.snapshot();
    println!();
    println!();
    println!("{}{}scan complete{}", NEON_GREEN, BOLD, RESET);
    println!("  requests:    {}", snap.processed);
    println!("  findings:    {}{}{}", NEON_GREEN, snap.found, RESET);
    println!("  secrets:     {}{}{}", RED, snap.secrets, RESET);
    println!("  waf hits:    {}{}{}", MAGENTA, snap.waf_hits, RESET);
    println!("  errors:      {}", snap.errors);
    println!("  duration:    {:.2}s", snap.elapsed_secs);
    println!("  req/s:       {:.2}", snap.requests_per_sec());
    println!();
}
