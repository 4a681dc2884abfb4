// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use anyhow::{Context, Result};
use std::path::Path;

use crate::types::Finding;

/// Render the findings as a pretty-printed top-level JSON array.
pub fn render(findings: &[Finding]) -> Result<String> {
    serde_json::to_string_pretty(findings).context("Failed to serialize findings")
}

/// Write the JSON report to disk. Failures here are reported by the caller
/// but never abort the run.
pub fn save(findings: &[Finding], path: &Path) -> Result<()> {
    let json = render(findings)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON report to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_is_array() {
        assert_eq!(render(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_render_parses_back() {
        let findings = vec![Finding {
            url: "http://target.example/admin".to_string(),
            status: 200,
            size: 128,
            word_count: 12,
            line_count: 4,
            critical: false,
            method: "GET".to_string(),
            timestamp: "2026-01-05T10:00:00+00:00".to_string(),
            server: Some("nginx".to_string()),
            powered_by: None,
            user_agent: "Mozilla/5.0".to_string(),
            secret_found: false,
            secret_types: Vec::new(),
            waf_detected: None,
            curl_command: String::new(),
        }];

        let parsed: Vec<Finding> = serde_json::from_str(&render(&findings).unwrap()).unwrap();
        assert_eq!(parsed, findings);
    }
}
