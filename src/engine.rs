// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Scan Engine
 * Worker pool, task scheduling and recursive discovery
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::Result;
use reqwest::Method;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, watch, Notify};
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::bypass::BypassModule;
use crate::calibration::{build_calibration_table, CalibrationTable};
use crate::classifier;
use crate::config::ScanConfig;
use crate::http_client::{random_user_agent, ProbeClient};
use crate::method_fuzzer::MethodFuzzer;
use crate::secrets::detect_secrets;
use crate::stats::ScanStats;
use crate::types::{Finding, Task};

/// Consecutive transport failures on one worker before it backs off
const MAX_CONSECUTIVE_ERRORS: u32 = 5;

/// Cool-down applied by a worker after hitting the error threshold
const ERROR_BACKOFF: Duration = Duration::from_secs(2);

/// The scanning engine: turns targets × wordlist into classified findings.
///
/// Headless by construction; all terminal rendering lives in the progress
/// module and is fed through the `on_finding` callback and shared stats.
pub struct ScanEngine {
    shared: Arc<EngineShared>,
}

struct EngineShared {
    config: ScanConfig,
    client: Arc<ProbeClient>,
    stats: Arc<ScanStats>,
    bypass: BypassModule,
    method_fuzzer: MethodFuzzer,
    /// Directories already expanded, per target. One mutex covers the whole
    /// map; the critical section is a single check-and-set.
    scanned_dirs: Mutex<HashMap<String, HashSet<String>>>,
    /// Tasks dispatched but not yet fully processed, including pending
    /// directory expansions. Zero after seeding means the scan is drained.
    outstanding: AtomicU64,
    idle: Notify,
}

impl EngineShared {
    fn task_done(&self) {
        if self.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.idle.notify_waiters();
        }
    }

    async fn emit(&self, finding: Finding, result_tx: &mpsc::Sender<Finding>) {
        if finding.secret_found {
            self.stats.incr_secrets();
        }
        if finding.waf_detected.is_some() {
            self.stats.incr_waf_hits();
        }
        let _ = result_tx.send(finding).await;
    }
}

impl ScanEngine {
    pub fn new(config: ScanConfig) -> Result<Self> {
        let client = Arc::new(ProbeClient::new(
            config.timeout_secs,
            config.threads,
            config.custom_headers.clone(),
        )?);

        Ok(Self {
            shared: Arc::new(EngineShared {
                bypass: BypassModule::new(client.clone()),
                method_fuzzer: MethodFuzzer::new(client.clone()),
                config,
                client,
                stats: Arc::new(ScanStats::new()),
                scanned_dirs: Mutex::new(HashMap::new()),
                outstanding: AtomicU64::new(0),
                idle: Notify::new(),
            }),
        })
    }

    pub fn stats(&self) -> Arc<ScanStats> {
        self.shared.stats.clone()
    }

    /// Run a full scan over the given targets and wordlist.
    ///
    /// Calibration completes for every target before the first task is
    /// dispatched. `on_finding` is invoked by the result sink as findings
    /// arrive, in no particular order.
    pub async fn run<F>(&self, targets: Vec<String>, words: Vec<String>, on_finding: F) -> Vec<Finding>
    where
        F: Fn(&Finding) + Send + 'static,
    {
        let shared = self.shared.clone();
        let words = Arc::new(words);

        let calibrations =
            Arc::new(build_calibration_table(&shared.client, &targets).await);

        let initial_total =
            targets.len() * words.len() * (1 + shared.config.extensions.len());
        shared.stats.add_total(initial_total as u64);
        info!(
            "dispatching {} initial tasks across {} workers",
            initial_total, shared.config.threads
        );

        let capacity = shared.config.threads * 2;
        let (task_tx, task_rx) = mpsc::channel::<Task>(capacity);
        let task_rx = Arc::new(tokio::sync::Mutex::new(task_rx));
        let (result_tx, mut result_rx) = mpsc::channel::<Finding>(capacity);
        let (new_task_tx, new_task_rx) = mpsc::channel::<Task>(capacity);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        // Result sink: unordered collector feeding the reporting adapters.
        let sink = tokio::spawn(async move {
            let mut findings = Vec::new();
            while let Some(finding) = result_rx.recv().await {
                on_finding(&finding);
                findings.push(finding);
            }
            findings
        });

        // Recursion controller, inert unless a depth was requested.
        let controller = if shared.config.max_depth > 0 {
            Some(tokio::spawn(recursion_controller(
                shared.clone(),
                new_task_rx,
                task_tx.clone(),
                words.clone(),
            )))
        } else {
            None
        };

        let mut workers = JoinSet::new();
        for _ in 0..shared.config.threads {
            workers.spawn(worker_loop(
                shared.clone(),
                calibrations.clone(),
                task_rx.clone(),
                result_tx.clone(),
                new_task_tx.clone(),
                shutdown_rx.clone(),
            ));
        }
        drop(result_tx);
        drop(new_task_tx);

        // Seed: one task per word, plus one per (word, extension) pair.
        // Runs concurrently with consumption; bounded sends give
        // back-pressure when the pool is saturated.
        for target in &targets {
            for word in words.iter() {
                self.dispatch(&task_tx, Task::new(target.clone(), word.clone(), 1))
                    .await;
                for ext in &shared.config.extensions {
                    self.dispatch(
                        &task_tx,
                        Task::new(target.clone(), format!("{}{}", word, ext), 1),
                    )
                    .await;
                }
            }
        }
        drop(task_tx);

        // Wait for every dispatched task, including recursive expansions,
        // to settle.
        loop {
            let notified = shared.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if shared.outstanding.load(Ordering::Acquire) == 0 {
                break;
            }
            notified.await;
        }

        // Shutdown: stop the workers, which closes the new-task channel,
        // which stops the controller; the sink drains once the last
        // result sender is gone.
        let _ = shutdown_tx.send(true);
        while workers.join_next().await.is_some() {}
        if let Some(controller) = controller {
            let _ = controller.await;
        }

        sink.await.unwrap_or_default()
    }

    async fn dispatch(&self, task_tx: &mpsc::Sender<Task>, task: Task) {
        self.shared.outstanding.fetch_add(1, Ordering::AcqRel);
        if task_tx.send(task).await.is_err() {
            self.shared.task_done();
        }
    }
}

/// One worker: pulls tasks, drives the probe pipeline, feeds the sink and
/// the recursion controller.
async fn worker_loop(
    shared: Arc<EngineShared>,
    calibrations: Arc<CalibrationTable>,
    task_rx: Arc<tokio::sync::Mutex<mpsc::Receiver<Task>>>,
    result_tx: mpsc::Sender<Finding>,
    new_task_tx: mpsc::Sender<Task>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut consecutive_errors = 0u32;

    loop {
        if *shutdown_rx.borrow() {
            break;
        }
        let task = {
            let mut rx = task_rx.lock().await;
            tokio::select! {
                task = rx.recv() => task,
                _ = shutdown_rx.changed() => None,
            }
        };
        let Some(task) = task else { break };

        process_task(
            &shared,
            &calibrations,
            task,
            &result_tx,
            &new_task_tx,
            &mut consecutive_errors,
        )
        .await;
        shared.task_done();
    }
}

async fn process_task(
    shared: &EngineShared,
    calibrations: &CalibrationTable,
    task: Task,
    result_tx: &mpsc::Sender<Finding>,
    new_task_tx: &mpsc::Sender<Task>,
    consecutive_errors: &mut u32,
) {
    let url = task.url();
    if shared.config.verbose {
        info!("testing {}", url);
    } else {
        debug!("testing {}", url);
    }

    let user_agent = random_user_agent();
    let response = shared.client.probe(&url, Method::GET, user_agent).await;
    shared.stats.incr_processed();

    let response = match response {
        Ok(response) => response,
        Err(e) => {
            shared.stats.incr_errors();
            debug!("probe failed for {}: {}", url, e);

            *consecutive_errors += 1;
            if *consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                debug!("error streak reached, backing off {:?}", ERROR_BACKOFF);
                tokio::time::sleep(ERROR_BACKOFF).await;
                *consecutive_errors = 0;
            }
            return;
        }
    };
    *consecutive_errors = 0;

    let signatures = calibrations
        .get(&task.target)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    // Responses shaped like the target's negative baseline are noise.
    if classifier::matches_signature(&response.signature(), signatures) {
        return;
    }

    if response.status_code == 405 {
        if let Some(finding) = shared.method_fuzzer.run(&url, user_agent).await {
            shared.stats.incr_found();
            shared.emit(finding, result_tx).await;
        }
    }

    if !classifier::is_interesting(response.status_code) {
        return;
    }
    shared.stats.incr_found();

    let mut finding = Finding::from_probe(
        &url,
        "GET",
        user_agent,
        &response,
        shared.client.curl_command(&url, "GET", user_agent),
    );
    if response.status_code == 200 && !response.body.is_empty() {
        finding.set_secrets(detect_secrets(&response.body));
    }

    if matches!(response.status_code, 401 | 403) {
        for bypass_finding in shared.bypass.run(&task, user_agent, signatures).await {
            shared.emit(bypass_finding, result_tx).await;
        }
    }

    if shared.config.max_depth > 0
        && task.depth < shared.config.max_depth
        && classifier::is_directory(response.status_code, &url)
    {
        debug!("directory candidate {} at depth {}", url, task.depth);
        let dir = Task::new(task.target.clone(), task.path.clone(), task.depth + 1);
        shared.outstanding.fetch_add(1, Ordering::AcqRel);
        if new_task_tx.send(dir).await.is_err() {
            shared.task_done();
        }
    }

    shared.emit(finding, result_tx).await;
}

/// Single consumer of the new-task channel: dedupes discovered directories
/// per target and fans them back out across the wordlist and extensions.
async fn recursion_controller(
    shared: Arc<EngineShared>,
    mut new_task_rx: mpsc::Receiver<Task>,
    task_tx: mpsc::Sender<Task>,
    words: Arc<Vec<String>>,
) {
    while let Some(dir) = new_task_rx.recv().await {
        let dir_key = dir.path.trim_end_matches('/').to_string();

        let admitted = {
            let mut dirs = shared.scanned_dirs.lock().unwrap();
            let seen = dirs.entry(dir.target.clone()).or_default();
            dir.depth <= shared.config.max_depth && seen.insert(dir_key.clone())
        };

        if admitted {
            debug!("expanding directory {}/{}", dir.target, dir_key);
            for word in words.iter() {
                expand(&shared, &task_tx, &dir, format!("{}/{}", dir_key, word)).await;
                for ext in &shared.config.extensions {
                    expand(
                        &shared,
                        &task_tx,
                        &dir,
                        format!("{}/{}{}", dir_key, word, ext),
                    )
                    .await;
                }
            }
        }

        shared.task_done();
    }
}

async fn expand(shared: &EngineShared, task_tx: &mpsc::Sender<Task>, dir: &Task, path: String) {
    shared.stats.add_total(1);
    shared.outstanding.fetch_add(1, Ordering::AcqRel);
    let task = Task::new(dir.target.clone(), path, dir.depth);
    if task_tx.send(task).await.is_err() {
        shared.task_done();
    }
}
