//! Snapshot loader with retry on parse failure

use crate::error::{CoreError, LoadError, LoadReport};
use crate::models::DashboardSnapshot;
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Loader for dashboard snapshot JSON files
pub struct SnapshotLoader {
    /// Maximum retry attempts
    max_retries: u32,
    /// Delay between retries
    retry_delay: Duration,
}

impl Default for SnapshotLoader {
    fn default() -> Self {
        Self {
            max_retries: 2,
            retry_delay: Duration::from_millis(100),
        }
    }
}

impl SnapshotLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retries(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    /// Load a snapshot, retrying parse failures
    ///
    /// The exporter rewrites the file on every refresh, so a read can land
    /// mid-write. A missing file is returned immediately.
    pub async fn load(&self, path: &Path) -> Result<DashboardSnapshot, CoreError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                debug!(attempt, "Retrying snapshot load after delay");
                sleep(self.retry_delay).await;
            }

            match self.try_load(path).await {
                Ok(snapshot) => return Ok(snapshot),
                Err(e @ CoreError::FileNotFound { .. }) => return Err(e),
                Err(e) => {
                    warn!(attempt, error = %e, "Snapshot load attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CoreError::FileNotFound {
            path: path.to_path_buf(),
        }))
    }

    async fn try_load(&self, path: &Path) -> Result<DashboardSnapshot, CoreError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CoreError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CoreError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        serde_json::from_str(&content).map_err(|e| CoreError::JsonParse {
            path: path.to_path_buf(),
            message: e.to_string(),
            source: e,
        })
    }

    /// Load and audit, recording every problem in `report`
    pub async fn load_graceful(
        &self,
        path: &Path,
        report: &mut LoadReport,
    ) -> Option<DashboardSnapshot> {
        match self.load(path).await {
            Ok(snapshot) => {
                report.snapshot_loaded = true;
                snapshot.audit(report);
                debug!(
                    projects = snapshot.projects.len(),
                    tasks = snapshot.tasks.len(),
                    sprints = snapshot.sprints.len(),
                    "Snapshot loaded"
                );
                Some(snapshot)
            }
            Err(e) => {
                report.add_error(LoadError::from_core_error("snapshot", &e));
                None
            }
        }
    }
}
