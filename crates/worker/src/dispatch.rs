//! The job dispatch loop.
//!
//! One cycle is poll → decode → execute. Cycles run strictly one after
//! another on a single task; the only suspension points are the HTTP
//! calls and the external commands, and each step's completion gates the
//! next. There is deliberately no timeout on any of them -- a stuck
//! download or tool run is the host supervisor's problem.
//!
//! Failure semantics: every failure ends the *current* cycle only, is
//! logged with its cause, and never escapes as a panic or error. The one
//! self-rescheduling path is an empty queue, which retries after a fixed
//! backoff. A transport or pipeline failure ends the loop instead and
//! leaves the restart to whatever supervises the process.

use std::time::{Duration, Instant};

use mapant_client::api::MapantApi;
use mapant_core::config::WorkerConfig;
use mapant_core::job::{self, Job};

use crate::lidar::LidarPipeline;
use crate::{pyramid, render};

/// Fixed backoff before polling again after the queue runs empty.
pub const NO_JOB_RETRY_DELAY: Duration = Duration::from_secs(120);

/// Outcome of one poll-decode-execute cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A job was consumed; poll again immediately.
    Completed,
    /// The queue is empty; poll again after the backoff delay.
    NoJobLeft,
    /// A step failed; the cycle ended without scheduling a retry.
    Aborted,
}

/// Owns one poll-execute cycle at a time plus the backoff policy.
pub struct Dispatcher {
    pub api: MapantApi,
    pub lidar: LidarPipeline,
    pub retry_delay: Duration,
}

impl Dispatcher {
    /// Build a dispatcher from the worker configuration. The API client
    /// and the pipeline share one HTTP connection pool.
    pub fn new(config: &WorkerConfig) -> Self {
        let http = reqwest::Client::new();
        Self {
            api: MapantApi::with_client(http.clone(), config),
            lidar: LidarPipeline::new(http),
            retry_delay: NO_JOB_RETRY_DELAY,
        }
    }

    /// Run cycles until one aborts.
    ///
    /// The empty-queue backoff is a sequential sleep between cycles, so
    /// at most one retry is ever pending -- rescheduling cannot stack.
    pub async fn run(&self) {
        loop {
            match self.run_cycle().await {
                CycleOutcome::Completed => {}
                CycleOutcome::NoJobLeft => {
                    tracing::info!(
                        delay_secs = self.retry_delay.as_secs(),
                        "No job left, retrying after backoff",
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                CycleOutcome::Aborted => {
                    tracing::warn!("Dispatch cycle aborted, stopping the loop");
                    return;
                }
            }
        }
    }

    /// Perform one poll-decode-execute cycle.
    ///
    /// Infallible by type: every failure is logged and folded into the
    /// returned outcome here, at the cycle boundary.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let raw = match self.api.next_job().await {
            Ok(raw) => raw,
            Err(error) => {
                tracing::error!(%error, "Failed to call the 'next-job' dispatch endpoint");
                return CycleOutcome::Aborted;
            }
        };

        let job = match job::decode(raw) {
            Ok(job) => job,
            Err(error) => {
                tracing::error!(%error, "Unrecognized dispatch response");
                return CycleOutcome::Aborted;
            }
        };

        self.execute(job).await
    }

    /// Hand a decoded job to its pipeline. The match is exhaustive over
    /// every job kind, so adding a variant forces a decision here.
    async fn execute(&self, job: Job) -> CycleOutcome {
        match job {
            Job::NoJobLeft => CycleOutcome::NoJobLeft,

            Job::Lidar { x, y, tile_url } => {
                tracing::info!(x, y, "Handling lidar job");
                let start = Instant::now();

                match self.lidar.run(x, y, &tile_url).await {
                    Ok(artifact) => {
                        tracing::info!(
                            x,
                            y,
                            archive = %artifact.archive_path.display(),
                            elapsed_ms = start.elapsed().as_millis() as u64,
                            "Lidar job done",
                        );
                        CycleOutcome::Completed
                    }
                    Err(error) => {
                        tracing::error!(x, y, %error, "Lidar job failed");
                        CycleOutcome::Aborted
                    }
                }
            }

            Job::Render { x, y } => {
                render::render_step(x, y);
                CycleOutcome::Completed
            }

            Job::Pyramid { x, y, z } => {
                pyramid::pyramid_step(x, y, z);
                CycleOutcome::Completed
            }
        }
    }
}
