// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Core Scan Types
 * Tasks, response signatures and findings shared across the engine
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use serde::{Deserialize, Serialize};

use crate::http_client::ProbeResponse;
use crate::waf;

/// A unit of pending work: probe `<target>/<path>`.
///
/// `path` carries no leading slash. Seed tasks start at depth 1; the
/// recursion controller increments the depth when it expands a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub target: String,
    pub path: String,
    pub depth: u32,
}

impl Task {
    pub fn new(target: impl Into<String>, path: impl Into<String>, depth: u32) -> Self {
        Self {
            target: target.into(),
            path: path.into(),
            depth,
        }
    }

    /// Full request URL with exactly one slash between target and path.
    pub fn url(&self) -> String {
        format!(
            "{}/{}",
            self.target.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

/// Shape profile of a response, used for negative-baseline filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSignature {
    pub status: u16,
    pub size: usize,
    pub word_count: usize,
    pub line_count: usize,
}

impl ResponseSignature {
    pub fn of(status: u16, body: &str) -> Self {
        Self {
            status,
            size: body.len(),
            word_count: body.split_whitespace().count(),
            line_count: body.matches('\n').count() + 1,
        }
    }
}

/// A surfaced scan result.
///
/// Serialized to snake_case JSON with empty optional fields omitted, so a
/// report round-trips without noise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Finding {
    pub url: String,
    pub status: u16,
    pub size: usize,
    pub word_count: usize,
    pub line_count: usize,
    pub critical: bool,
    /// Request method, or `GET+BYPASS` for bypass-derived findings
    pub method: String,
    /// RFC3339 discovery timestamp
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub powered_by: Option<String>,
    pub user_agent: String,
    pub secret_found: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secret_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waf_detected: Option<String>,
    /// Reproduction command for the exact request that produced this finding
    pub curl_command: String,
}

impl Finding {
    /// Build a finding draft from a probe response.
    ///
    /// Secret flags start empty; callers run the secret scanner only for
    /// the response classes where it applies (200 and 2xx secondary hits).
    pub fn from_probe(
        url: impl Into<String>,
        method: impl Into<String>,
        user_agent: &str,
        response: &ProbeResponse,
        curl_command: String,
    ) -> Self {
        let signature = response.signature();
        Self {
            url: url.into(),
            status: signature.status,
            size: signature.size,
            word_count: signature.word_count,
            line_count: signature.line_count,
            critical: false,
            method: method.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            server: response.header("server"),
            powered_by: response.header("x-powered-by"),
            user_agent: user_agent.to_string(),
            secret_found: false,
            secret_types: Vec::new(),
            waf_detected: waf::detect_waf(response).map(str::to_string),
            curl_command,
        }
    }

    /// Record secret scanner output, keeping the flag and list consistent.
    pub fn set_secrets(&mut self, types: Vec<String>) {
        if !types.is_empty() {
            self.secret_found = true;
            self.secret_types = types;
        }
    }
}
