// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - WAF Fingerprinter
 * Detects protective intermediaries from response headers and cookies
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::http_client::ProbeResponse;

/// A protective-intermediary signature: any populated field that matches
/// identifies the product.
struct WafSignature {
    name: &'static str,
    server_header: Option<&'static str>,
    custom_header: Option<&'static str>,
    cookie_pattern: Option<&'static str>,
}

/// Detection table. Order is authoritative: the first matching signature
/// wins on ambiguous responses.
const WAF_SIGNATURES: &[WafSignature] = &[
    WafSignature {
        name: "Cloudflare",
        server_header: Some("cloudflare"),
        custom_header: None,
        cookie_pattern: Some("__cfduid"),
    },
    WafSignature {
        name: "AWS WAF",
        server_header: None,
        custom_header: Some("x-amz-cf-id"),
        cookie_pattern: None,
    },
    WafSignature {
        name: "Akamai",
        server_header: Some("akamaighost"),
        custom_header: None,
        cookie_pattern: None,
    },
    WafSignature {
        name: "Imperva",
        server_header: None,
        custom_header: Some("x-iinfo"),
        cookie_pattern: None,
    },
    WafSignature {
        name: "F5 BigIP",
        server_header: None,
        custom_header: None,
        cookie_pattern: Some("BIGipServer"),
    },
    WafSignature {
        name: "Sucuri",
        server_header: Some("sucuri"),
        custom_header: None,
        cookie_pattern: None,
    },
    WafSignature {
        name: "StackPath",
        server_header: Some("stackpath"),
        custom_header: None,
        cookie_pattern: None,
    },
    WafSignature {
        name: "Wordfence",
        server_header: None,
        custom_header: Some("x-wf-"),
        cookie_pattern: None,
    },
];

/// Fingerprint the protective intermediary in front of a response, if any.
///
/// Matching is case-insensitive across the `Server` header value, every
/// response header name, and the names of cookies the server set.
pub fn detect_waf(response: &ProbeResponse) -> Option<&'static str> {
    let server = response
        .header("server")
        .map(|s| s.to_lowercase())
        .unwrap_or_default();
    let cookie_names = response.cookie_names();

    for sig in WAF_SIGNATURES {
        if let Some(pattern) = sig.server_header {
            if server.contains(pattern) {
                return Some(sig.name);
            }
        }
        if let Some(pattern) = sig.custom_header {
            if response
                .headers
                .keys()
                .any(|name| name.to_lowercase().contains(pattern))
            {
                return Some(sig.name);
            }
        }
        if let Some(pattern) = sig.cookie_pattern {
            let pattern_lower = pattern.to_lowercase();
            if cookie_names
                .iter()
                .any(|name| name.to_lowercase().contains(&pattern_lower))
            {
                return Some(sig.name);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with(headers: &[(&str, &str)]) -> ProbeResponse {
        ProbeResponse {
            status_code: 200,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: String::new(),
        }
    }

    #[test]
    fn test_cloudflare_server_header() {
        let response = response_with(&[("server", "cloudflare")]);
        assert_eq!(detect_waf(&response), Some("Cloudflare"));
    }

    #[test]
    fn test_cloudflare_case_insensitive() {
        let response = response_with(&[("server", "CloudFlare")]);
        assert_eq!(detect_waf(&response), Some("Cloudflare"));
    }

    #[test]
    fn test_aws_waf_custom_header() {
        let response = response_with(&[("x-amz-cf-id", "abc123")]);
        assert_eq!(detect_waf(&response), Some("AWS WAF"));
    }

    #[test]
    fn test_akamai_server_header() {
        let response = response_with(&[("server", "AkamaiGHost")]);
        assert_eq!(detect_waf(&response), Some("Akamai"));
    }

    #[test]
    fn test_imperva_header() {
        let response = response_with(&[("x-iinfo", "9-12345")]);
        assert_eq!(detect_waf(&response), Some("Imperva"));
    }

    #[test]
    fn test_f5_bigip_cookie() {
        let response = response_with(&[("set-cookie", "BIGipServerpool_web=1234; path=/")]);
        assert_eq!(detect_waf(&response), Some("F5 BigIP"));
    }

    #[test]
    fn test_wordfence_header_prefix() {
        let response = response_with(&[("x-wf-block", "1")]);
        assert_eq!(detect_waf(&response), Some("Wordfence"));
    }

    #[test]
    fn test_table_order_breaks_ties() {
        // Cloudflare server header beats the AWS custom header: it comes
        // first in the table.
        let response = response_with(&[("server", "cloudflare"), ("x-amz-cf-id", "abc")]);
        assert_eq!(detect_waf(&response), Some("Cloudflare"));
    }

    #[test]
    fn test_unprotected_response() {
        let response = response_with(&[("server", "nginx/1.24.0")]);
        assert_eq!(detect_waf(&response), None);
    }
}
