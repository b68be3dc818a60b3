//! Worker configuration loaded from environment variables.
//!
//! | Variable               | Required | Default              | Description                          |
//! |------------------------|----------|----------------------|--------------------------------------|
//! | `MAPANT_API_WORKER_ID` | yes      | --                   | Identifier of this worker node       |
//! | `MAPANT_API_TOKEN`     | yes      | --                   | Secret token authenticating the node |
//! | `MAPANT_API_BASE_URL`  | no       | `https://mapant.fr`  | Base URL of the mapant API           |
//!
//! Configuration is read once at startup into an immutable [`WorkerConfig`]
//! and passed down to the dispatch loop; nothing reads the environment after
//! that point.

/// Default production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://mapant.fr";

/// Identity of this worker node, used to authenticate every poll request.
///
/// The dispatch endpoint expects the bearer value `{worker_id}.{token}`.
#[derive(Debug, Clone)]
pub struct WorkerCredentials {
    pub worker_id: String,
    pub token: String,
}

impl WorkerCredentials {
    /// The value of the `Authorization: Bearer …` header.
    pub fn bearer(&self) -> String {
        format!("{}.{}", self.worker_id, self.token)
    }
}

/// Immutable process-wide configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub credentials: WorkerCredentials,
    /// Base API URL without a trailing slash.
    pub base_url: String,
}

/// Startup configuration errors. Fatal: the process must not begin a
/// dispatch cycle without credentials.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
}

impl WorkerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let worker_id = std::env::var("MAPANT_API_WORKER_ID")
            .map_err(|_| ConfigError::Missing("MAPANT_API_WORKER_ID"))?;

        let token = std::env::var("MAPANT_API_TOKEN")
            .map_err(|_| ConfigError::Missing("MAPANT_API_TOKEN"))?;

        let base_url =
            std::env::var("MAPANT_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        Ok(Self::new(worker_id, token, base_url))
    }

    /// Build a configuration from explicit values. The base URL is
    /// normalized so joining endpoint paths never produces `//`.
    pub fn new(worker_id: String, token: String, base_url: String) -> Self {
        Self {
            credentials: WorkerCredentials { worker_id, token },
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}
