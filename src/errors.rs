// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Scanner Error Types
 * Fatal configuration and I/O errors with thiserror
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort the scan before any probe is sent.
///
/// Per-request transport failures are deliberately NOT part of this
/// taxonomy: they are counted and suppressed at task granularity by the
/// worker pool and never abort a running scan.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Invalid or incomplete configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No targets were supplied via -u or stdin
    #[error("no targets specified (use -u or pipe targets via stdin)")]
    NoTargets,

    /// Wordlist file could not be read
    #[error("failed to read wordlist {path}: {source}")]
    Wordlist {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Target URL failed to parse even after scheme inference
    #[error("invalid target URL: {0}")]
    InvalidTarget(String),
}

pub type ScanResult<T> = Result<T, ScanError>;
