//! Scheduler configuration.

use std::path::{Path, PathBuf};

use ap_types::{config_error, ApResult, SchedulerError};
use serde::{Deserialize, Serialize};

/// Environment variable holding the worker count.
pub const WORKERS_ENV: &str = "ANNEALPOOL_WORKERS";
/// Environment variable holding the completion log path.
pub const LOG_ENV: &str = "ANNEALPOOL_LOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Number of worker threads evaluating candidates.
    pub worker_count: usize,

    /// Where to write the completion log, if anywhere.
    #[serde(default)]
    pub completion_log: Option<PathBuf>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            worker_count: 4,
            completion_log: None,
        }
    }
}

impl SchedulerConfig {
    pub fn with_worker_count(mut self, n: usize) -> Self {
        self.worker_count = n;
        self
    }

    pub fn with_completion_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.completion_log = Some(path.into());
        self
    }

    /// Defaults overridden by `ANNEALPOOL_WORKERS` / `ANNEALPOOL_LOG`.
    pub fn from_env() -> ApResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> ApResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(WORKERS_ENV) {
            config.worker_count = raw
                .trim()
                .parse()
                .map_err(|e| config_error!("{WORKERS_ENV}={raw:?} is not a worker count: {e}"))?;
        }
        if let Some(path) = lookup(LOG_ENV).filter(|p| !p.is_empty()) {
            config.completion_log = Some(PathBuf::from(path));
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ApResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.worker_count == 0 {
            return Err(SchedulerError::InvalidWorkerCount {
                worker_count: self.worker_count,
            });
        }
        Ok(())
    }
}
