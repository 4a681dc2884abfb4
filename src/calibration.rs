// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Auto-Calibration
 * Learns each target's negative-response fingerprint before dispatch
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use rand::Rng;
use reqwest::Method;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::http_client::{random_user_agent, ProbeClient};
use crate::types::ResponseSignature;

/// Calibration signatures per target, written once before any task is
/// dispatched and read-only afterwards.
pub type CalibrationTable = HashMap<String, Vec<ResponseSignature>>;

/// Path prefixes for the three negative probes; distinct shapes catch
/// servers that special-case certain path styles
const CALIBRATION_PREFIXES: &[&str] = &["harava_calibration", "random_nonexistent", "test_404_path"];

/// Probe three random non-existent paths on a target and record the
/// signatures of whatever comes back. Transport failures shrink the set
/// silently; an empty set disables baseline filtering for the target.
pub async fn calibrate_target(client: &ProbeClient, target: &str) -> Vec<ResponseSignature> {
    info!("calibrating {}", target);

    let mut signatures = Vec::with_capacity(CALIBRATION_PREFIXES.len());
    for prefix in CALIBRATION_PREFIXES {
        let salt: u32 = rand::rng().random_range(0..1_000_000);
        let url = format!("{}/{}_{}", target.trim_end_matches('/'), prefix, salt);

        match client.probe(&url, Method::GET, random_user_agent()).await {
            Ok(response) => signatures.push(response.signature()),
            Err(e) => debug!("calibration probe failed for {}: {}", url, e),
        }
    }

    debug!(
        "calibration for {} captured {} signatures",
        target,
        signatures.len()
    );
    signatures
}

/// Calibrate every target up front and publish the immutable table.
pub async fn build_calibration_table(client: &ProbeClient, targets: &[String]) -> CalibrationTable {
    let mut table = CalibrationTable::with_capacity(targets.len());
    for target in targets {
        let signatures = calibrate_target(client, target).await;
        table.insert(target.clone(), signatures);
    }
    table
}
