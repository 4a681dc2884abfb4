// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Response Classifier
 * Calibration matching, interest and directory judgments
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::types::ResponseSignature;

/// Relative size tolerance when comparing a response against a calibration
/// signature with the same status
const SIZE_TOLERANCE: f64 = 0.05;

/// True when the response matches one of the target's negative baselines:
/// same status and body size within 5% of the signature's.
///
/// Signatures with a zero-byte body never match; an empty baseline carries
/// no shape information to filter on.
pub fn matches_signature(response: &ResponseSignature, signatures: &[ResponseSignature]) -> bool {
    for sig in signatures {
        if response.status != sig.status || sig.size == 0 {
            continue;
        }
        let diff = response.size.abs_diff(sig.size) as f64 / sig.size as f64;
        if diff < SIZE_TOLERANCE {
            return true;
        }
    }
    false
}

/// Statuses worth surfacing: all of [200, 400) plus the access-denied pair
/// 401/403 that the bypass module follows up on.
pub fn is_interesting(status: u16) -> bool {
    (200..400).contains(&status) || status == 401 || status == 403
}

/// Directory heuristic: redirect or forbidden statuses, or a trailing slash
/// in the probed URL.
pub fn is_directory(status: u16, url: &str) -> bool {
    matches!(status, 301 | 302 | 403) || url.ends_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(status: u16, size: usize) -> ResponseSignature {
        ResponseSignature {
            status,
            size,
            word_count: 0,
            line_count: 1,
        }
    }

    #[test]
    fn test_matches_within_tolerance() {
        let baselines = vec![sig(404, 1500)];
        assert!(matches_signature(&sig(404, 1500), &baselines));
        assert!(matches_signature(&sig(404, 1570), &baselines));
        assert!(matches_signature(&sig(404, 1430), &baselines));
    }

    #[test]
    fn test_no_match_outside_tolerance() {
        let baselines = vec![sig(404, 1500)];
        assert!(!matches_signature(&sig(404, 1580), &baselines));
        assert!(!matches_signature(&sig(404, 100), &baselines));
    }

    #[test]
    fn test_no_match_on_different_status() {
        let baselines = vec![sig(404, 1500)];
        assert!(!matches_signature(&sig(200, 1500), &baselines));
    }

    #[test]
    fn test_empty_baseline_never_matches() {
        let baselines = vec![sig(404, 0)];
        assert!(!matches_signature(&sig(404, 0), &baselines));
        assert!(!matches_signature(&sig(404, 10), &baselines));
    }

    #[test]
    fn test_empty_signature_set() {
        assert!(!matches_signature(&sig(404, 1500), &[]));
    }

    #[test]
    fn test_interesting_statuses() {
        assert!(is_interesting(200));
        assert!(is_interesting(204));
        assert!(is_interesting(301));
        assert!(is_interesting(302));
        assert!(is_interesting(399));
        assert!(is_interesting(401));
        assert!(is_interesting(403));

        assert!(!is_interesting(400));
        assert!(!is_interesting(404));
        assert!(!is_interesting(405));
        assert!(!is_interesting(500));
        assert!(!is_interesting(199));
    }

    #[test]
    fn test_directory_heuristic() {
        assert!(is_directory(301, "http://t.example/images"));
        assert!(is_directory(302, "http://t.example/images"));
        assert!(is_directory(403, "http://t.example/admin"));
        assert!(is_directory(200, "http://t.example/images/"));
        assert!(!is_directory(200, "http://t.example/logo.png"));
        assert!(!is_directory(404, "http://t.example/missing"));
    }
}
