// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Scan Configuration
 * Normalization and validation of user-supplied scan parameters
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::collections::HashMap;
use std::path::PathBuf;
use url::Url;

use crate::errors::{ScanError, ScanResult};

/// Default number of concurrent workers
pub const DEFAULT_WORKERS: usize = 50;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Everything the engine needs to run one scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub wordlist: PathBuf,
    /// Worker pool size
    pub threads: usize,
    /// Extensions, each normalized to start with `.`
    pub extensions: Vec<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum recursion depth; 0 disables the recursion controller
    pub max_depth: u32,
    /// Log every probed URL
    pub verbose: bool,
    pub output: Option<PathBuf>,
    pub html_report: Option<PathBuf>,
    pub custom_headers: HashMap<String, String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            wordlist: PathBuf::new(),
            threads: DEFAULT_WORKERS,
            extensions: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_depth: 0,
            verbose: false,
            output: None,
            html_report: None,
            custom_headers: HashMap::new(),
        }
    }
}

impl ScanConfig {
    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> ScanResult<()> {
        if self.wordlist.as_os_str().is_empty() {
            return Err(ScanError::Configuration("wordlist is required (-w)".into()));
        }
        if !self.wordlist.exists() {
            return Err(ScanError::Configuration(format!(
                "wordlist file not found: {}",
                self.wordlist.display()
            )));
        }
        if self.threads == 0 {
            return Err(ScanError::Configuration(
                "thread count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Split a comma-separated extension list and prepend the dot where missing.
pub fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(|ext| {
            if ext.starts_with('.') {
                ext.to_string()
            } else {
                format!(".{}", ext)
            }
        })
        .collect()
}

/// Parse repeated `-H "Name: Value"` flags into a header map.
/// Malformed entries (no colon) are dropped.
pub fn parse_headers(raw: &[String]) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    for entry in raw {
        if let Some((name, value)) = entry.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if !name.is_empty() {
                headers.insert(name.to_string(), value.to_string());
            }
        }
    }
    headers
}

/// Prefix scheme-less targets with `http://` and verify the result parses
/// as an absolute http(s) URL.
pub fn normalize_target(raw: &str) -> ScanResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScanError::InvalidTarget(raw.to_string()));
    }

    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let parsed =
        Url::parse(&with_scheme).map_err(|_| ScanError::InvalidTarget(raw.to_string()))?;
    if parsed.host_str().is_none() {
        return Err(ScanError::InvalidTarget(raw.to_string()));
    }

    Ok(with_scheme.trim_end_matches('/').to_string())
}

/// Normalize a batch of target lines (from -u or stdin), skipping blanks
/// and `#` comments.
pub fn normalize_targets(lines: &[String]) -> ScanResult<Vec<String>> {
    let mut targets = Vec::new();
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        targets.push(normalize_target(trimmed)?);
    }
    if targets.is_empty() {
        return Err(ScanError::NoTargets);
    }
    Ok(targets)
}
