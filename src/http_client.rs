// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Probe Client
 * Single-request HTTP execution with User-Agent rotation
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::{Context, Result};
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Method};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::types::ResponseSignature;

/// Realistic browser User-Agents rotated per probe to avoid trivial
/// fingerprinting of the scanner
pub const USER_AGENTS: &[&str] = &[
    // Chrome on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    // Chrome on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    // Firefox on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    // Safari on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    // Chrome on Linux
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    // Edge on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Edge/120.0.0.0",
    // Firefox on Ubuntu
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
    // Firefox on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
    // Chrome 119 on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    // Safari on iOS
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1",
];

/// Draw a User-Agent uniformly at random from the pool.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::rng();
    USER_AGENTS[rng.random_range(0..USER_AGENTS.len())]
}

/// Maximum response body size (10MB) to prevent memory exhaustion
const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Idle connections are recycled after this many seconds
const POOL_IDLE_TIMEOUT_SECS: u64 = 30;

/// Structured record of a single probe response.
///
/// Header names are lowercased on insertion; the body is held only for the
/// duration of the owning task's pipeline.
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ProbeResponse {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers.get(&name.to_lowercase()).cloned()
    }

    /// Names of cookies the server attempted to set.
    pub fn cookie_names(&self) -> Vec<String> {
        self.headers
            .get("set-cookie")
            .map(|raw| {
                raw.split(',')
                    .filter_map(|cookie| cookie.split(';').next())
                    .filter_map(|pair| pair.split('=').next())
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn signature(&self) -> ResponseSignature {
        ResponseSignature::of(self.status_code, &self.body)
    }
}

/// Shared HTTP client for all probe traffic.
///
/// Redirects are never followed: 3xx statuses are themselves a signal the
/// classifier relies on for directory detection.
#[derive(Clone)]
pub struct ProbeClient {
    client: Arc<Client>,
    custom_headers: Arc<HashMap<String, String>>,
}

impl ProbeClient {
    /// Build a client with a pool sized for `worker_count` concurrent
    /// probes and the user's per-request timeout.
    pub fn new(
        timeout_secs: u64,
        worker_count: usize,
        custom_headers: HashMap<String, String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .pool_max_idle_per_host(worker_count * 2)
            .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client: Arc::new(client),
            custom_headers: Arc::new(custom_headers),
        })
    }

    /// Execute a single probe with the given method and User-Agent.
    pub async fn probe(
        &self,
        url: &str,
        method: Method,
        user_agent: &str,
    ) -> Result<ProbeResponse> {
        self.probe_with_extra(url, method, user_agent, &[]).await
    }

    /// Execute a probe with additional headers applied after the user's
    /// custom headers, so the extras win on collision. Used by the bypass
    /// module for its forged-origin header set.
    pub async fn probe_with_extra(
        &self,
        url: &str,
        method: Method,
        user_agent: &str,
        extra_headers: &[(&str, String)],
    ) -> Result<ProbeResponse> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);
        for (name, value) in self.custom_headers.iter() {
            insert_header(&mut headers, name, value);
        }
        for (name, value) in extra_headers {
            insert_header(&mut headers, name, value);
        }

        let response = self
            .client
            .request(method, url)
            .headers(headers)
            .send()
            .await?;

        let status_code = response.status().as_u16();
        let headers_map = {
            let headers = response.headers();
            let mut map = HashMap::with_capacity(headers.len());
            for (k, v) in headers.iter() {
                if let Ok(value_str) = v.to_str() {
                    map.insert(k.as_str().to_string(), value_str.to_string());
                }
            }
            map
        };

        // Full body read: the signature needs exact size/word/line counts
        let body_bytes = response.bytes().await?;
        let body = if body_bytes.len() > MAX_BODY_SIZE {
            String::from_utf8_lossy(&body_bytes[..MAX_BODY_SIZE]).to_string()
        } else {
            String::from_utf8_lossy(&body_bytes).to_string()
        };

        Ok(ProbeResponse {
            status_code,
            headers: headers_map,
            body,
        })
    }

    /// Reproduction command for a finding, including the user's headers.
    pub fn curl_command(&self, url: &str, method: &str, user_agent: &str) -> String {
        let mut cmd = format!(r#"curl -X {} "{}" -H "User-Agent: {}""#, method, url, user_agent);
        for (name, value) in self.custom_headers.iter() {
            cmd.push_str(&format!(r#" -H "{}: {}""#, name, value));
        }
        cmd
    }
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) {
    match (
        HeaderName::from_bytes(name.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => warn!("skipping invalid header: {}", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_user_agent_from_pool() {
        for _ in 0..50 {
            let ua = random_user_agent();
            assert!(USER_AGENTS.contains(&ua));
        }
    }

    #[test]
    fn test_cookie_name_extraction() {
        let mut headers = HashMap::new();
        headers.insert(
            "set-cookie".to_string(),
            "BIGipServerpool=1234; path=/; HttpOnly".to_string(),
        );
        let response = ProbeResponse {
            status_code: 200,
            headers,
            body: String::new(),
        };
        assert_eq!(response.cookie_names(), vec!["BIGipServerpool".to_string()]);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("server".to_string(), "nginx".to_string());
        let response = ProbeResponse {
            status_code: 200,
            headers,
            body: String::new(),
        };
        assert_eq!(response.header("Server").as_deref(), Some("nginx"));
    }

    #[test]
    fn test_curl_command_includes_custom_headers() {
        let mut custom = HashMap::new();
        custom.insert("Authorization".to_string(), "Bearer token123".to_string());
        let client = ProbeClient::new(10, 50, custom).unwrap();
        let cmd = client.curl_command("http://target.example/admin", "GET", "Mozilla/5.0");
        assert!(cmd.starts_with("curl -X GET"));
        assert!(cmd.contains(r#"-H "Authorization: Bearer token123""#));
    }
}
