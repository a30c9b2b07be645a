//! Dashboard configuration
//!
//! Read from `<config_dir>/sprintboard/config.toml` unless a path is given.
//! Every field has a default, so an empty or missing file is valid.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::metrics::DeadlineWindows;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Window for the "upcoming deadlines" card
    pub upcoming_window_days: u32,
    /// Window for the "due today/tomorrow" card
    pub due_soon_window_days: u32,
    /// How far back the activity feed looks
    pub activity_window_days: u32,
    /// Maximum entries in the activity feed
    pub activity_limit: usize,
    /// Seconds between refreshes in watch mode
    pub refresh_interval_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            upcoming_window_days: 3,
            due_soon_window_days: 1,
            activity_window_days: 3,
            activity_limit: 10,
            refresh_interval_secs: 30,
        }
    }
}

impl DashboardConfig {
    /// `<config_dir>/sprintboard/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sprintboard").join(CONFIG_FILE))
    }

    /// Load from an explicit path or the default location
    ///
    /// A missing file yields defaults. A file that exists but does not
    /// parse, or holds out-of-range values, is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, CoreError> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => return Ok(Self::default()),
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(CoreError::FileRead { path, source: e }),
        };

        let config = Self::from_toml(&content).map_err(|e| CoreError::TomlParse {
            path: path.clone(),
            message: e.message().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let zero_field = [
            ("upcoming_window_days", self.upcoming_window_days == 0),
            ("due_soon_window_days", self.due_soon_window_days == 0),
            ("activity_window_days", self.activity_window_days == 0),
            ("activity_limit", self.activity_limit == 0),
            ("refresh_interval_secs", self.refresh_interval_secs == 0),
        ]
        .into_iter()
        .find_map(|(name, is_zero)| is_zero.then_some(name));

        if let Some(name) = zero_field {
            return Err(CoreError::InvalidConfig {
                message: format!("{} must be greater than zero", name),
            });
        }

        if self.due_soon_window_days > self.upcoming_window_days {
            return Err(CoreError::InvalidConfig {
                message: "due_soon_window_days cannot exceed upcoming_window_days".to_string(),
            });
        }

        Ok(())
    }

    pub fn deadline_windows(&self) -> DeadlineWindows {
        DeadlineWindows {
            upcoming: Duration::days(self.upcoming_window_days as i64),
            due_soon: Duration::days(self.due_soon_window_days as i64),
        }
    }

    pub fn activity_window(&self) -> Duration {
        Duration::days(self.activity_window_days as i64)
    }
}
