//! Lidar pipeline: fetch the raw tile, run the processing tool over it,
//! and package the result.
//!
//! One run produces a [`TileArtifact`] on local storage. Uploading or
//! cleaning up artifacts is not this worker's job.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::time::Instant;

use mapant_client::transfer::{self, TransferError};
use mapant_core::naming;

use crate::process::{self, ExecutionResult, SpawnError};

/// Command name of the external geometric-data processing tool.
pub const PROCESSING_TOOL: &str = "cassini";

/// Command name of the archiver.
pub const ARCHIVER: &str = "tar";

/// Directory holding downloaded raw tiles.
pub const LIDAR_FILES_DIR: &str = "lidar-files";

/// Directory holding processed tile output and archives.
pub const LIDAR_STEP_DIR: &str = "lidar-step";

/// Output of a successful lidar run: the processed file directory and the
/// compressed archive built from it.
#[derive(Debug)]
pub struct TileArtifact {
    pub output_dir: PathBuf,
    pub archive_path: PathBuf,
}

/// Errors aborting a lidar run. Each step short-circuits the steps after
/// it.
#[derive(Debug, thiserror::Error)]
pub enum LidarError {
    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Spawn(#[from] SpawnError),

    /// The command ran but exited non-zero.
    #[error("'{command}' exited with code {exit_code:?}: {stderr}")]
    Tool {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The lidar processing pipeline.
///
/// `work_root` anchors the on-disk layout (`lidar-files/`, `lidar-step/`)
/// and defaults to the process working directory. The command names are
/// plain fields so a deployment can swap in a wrapper (e.g. a container
/// runtime entry point) without touching the pipeline.
pub struct LidarPipeline {
    pub http: reqwest::Client,
    pub work_root: PathBuf,
    pub processing_tool: String,
    pub archiver: String,
}

impl LidarPipeline {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            work_root: PathBuf::from("."),
            processing_tool: PROCESSING_TOOL.to_string(),
            archiver: ARCHIVER.to_string(),
        }
    }

    /// Run the full pipeline for one tile: download, process, archive.
    ///
    /// Directory creation is idempotent; pre-existing content is never
    /// deleted.
    pub async fn run(&self, x: i32, y: i32, tile_url: &str) -> Result<TileArtifact, LidarError> {
        let lidar_files_dir = self.work_root.join(LIDAR_FILES_DIR);
        let lidar_step_dir = self.work_root.join(LIDAR_STEP_DIR);

        tokio::fs::create_dir_all(&lidar_files_dir).await?;
        tokio::fs::create_dir_all(&lidar_step_dir).await?;

        let tile_name = naming::tile_dir_name(x, y);
        let input_path = lidar_files_dir.join(naming::filename_from_url(tile_url));
        let output_dir = lidar_step_dir.join(&tile_name);
        let archive_path = lidar_step_dir.join(format!("{tile_name}.tar.bz2"));

        tracing::info!(tile = %tile_name, url = tile_url, "Downloading raw tile");
        let start = Instant::now();
        transfer::download(&self.http, tile_url, &input_path).await?;
        tracing::info!(
            tile = %tile_name,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Raw tile downloaded",
        );

        tracing::info!(tile = %tile_name, "Processing lidar step");
        let start = Instant::now();
        let result = process::run(
            &self.processing_tool,
            &[
                OsStr::new("lidar"),
                input_path.as_os_str(),
                OsStr::new("-o"),
                output_dir.as_os_str(),
            ],
        )
        .await?;
        ensure_success(&self.processing_tool, result)?;
        tracing::info!(
            tile = %tile_name,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Lidar step processed",
        );

        tracing::info!(tile = %tile_name, "Compressing resulting files");
        let start = Instant::now();
        let result = process::run(
            &self.archiver,
            &[
                OsStr::new("-cjf"),
                archive_path.as_os_str(),
                OsStr::new("-C"),
                output_dir.as_os_str(),
                OsStr::new("."),
            ],
        )
        .await?;
        ensure_success(&self.archiver, result)?;
        tracing::info!(
            tile = %tile_name,
            archive = %archive_path.display(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Resulting files compressed",
        );

        Ok(TileArtifact {
            output_dir,
            archive_path,
        })
    }
}

/// Turn a non-zero exit into a [`LidarError::Tool`] carrying the stderr
/// tail for diagnostics.
fn ensure_success(command: &str, result: ExecutionResult) -> Result<(), LidarError> {
    if result.success() {
        Ok(())
    } else {
        Err(LidarError::Tool {
            command: command.to_string(),
            exit_code: result.exit_code,
            stderr: result.stderr_lossy(),
        })
    }
}
