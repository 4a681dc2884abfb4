// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - HTTP Method Fuzzer
 * Retries 405 responses with alternative request methods
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use reqwest::Method;
use std::sync::Arc;
use tracing::debug;

use crate::http_client::ProbeClient;
use crate::secrets::detect_secrets;
use crate::types::Finding;

/// Methods attempted, in order, when the primary GET is rejected with 405
const ALTERNATIVE_METHODS: &[Method] = &[Method::POST, Method::PUT, Method::DELETE, Method::PATCH];

pub struct MethodFuzzer {
    client: Arc<ProbeClient>,
}

impl MethodFuzzer {
    pub fn new(client: Arc<ProbeClient>) -> Self {
        Self { client }
    }

    /// Try each alternative method against a 405 URL; stop at the first
    /// that returns 200, 201 or 204 and surface it as a critical finding.
    /// The triggering 405 itself is never reported.
    pub async fn run(&self, url: &str, user_agent: &str) -> Option<Finding> {
        for method in ALTERNATIVE_METHODS {
            let response = match self.client.probe(url, method.clone(), user_agent).await {
                Ok(response) => response,
                Err(e) => {
                    debug!("method fuzz {} failed for {}: {}", method, url, e);
                    continue;
                }
            };

            if matches!(response.status_code, 200 | 201 | 204) {
                debug!("{} accepted on {} ({})", method, url, response.status_code);

                let mut finding = Finding::from_probe(
                    url,
                    method.as_str(),
                    user_agent,
                    &response,
                    self.client.curl_command(url, method.as_str(), user_agent),
                );
                finding.critical = true;
                finding.set_secrets(detect_secrets(&response.body));
                return Some(finding);
            }
        }

        None
    }
}
