//! Sprint model and daily burndown samples

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SprintStatus {
    Planned,
    Active,
    Completed,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "de::timestamp_opt")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::timestamp_opt")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::lenient_count")]
    pub total_points: u32,
    #[serde(default, deserialize_with = "de::lenient_count")]
    pub completed_points: u32,
    /// Explicit value from the backend; derived when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_points: Option<u32>,
    #[serde(default, alias = "active", deserialize_with = "de::null_default")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "de::null_default")]
    pub status: SprintStatus,
}

impl Sprint {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_points(mut self, completed: u32, total: u32) -> Self {
        self.completed_points = completed;
        self.total_points = total;
        self
    }

    pub fn with_status(mut self, status: SprintStatus) -> Self {
        self.status = status;
        self.is_active = status == SprintStatus::Active;
        self
    }

    /// Supplied remaining points, else `total - completed` (floored at zero)
    pub fn remaining_points(&self) -> u32 {
        self.remaining_points
            .unwrap_or_else(|| self.total_points.saturating_sub(self.completed_points))
    }
}

/// One observed day of a sprint: the label and the points still open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurndownSample {
    pub day: String,
    /// Negative values from the backend are clamped to zero
    #[serde(deserialize_with = "de::lenient_count")]
    pub remaining: u32,
}

impl BurndownSample {
    pub fn new(day: impl Into<String>, remaining: u32) -> Self {
        Self {
            day: day.into(),
            remaining,
        }
    }

    /// Samples labelled "Day 1", "Day 2", ... from a plain list of values
    pub fn daily(remaining: &[u32]) -> Vec<Self> {
        remaining
            .iter()
            .enumerate()
            .map(|(i, &r)| Self::new(format!("Day {}", i + 1), r))
            .collect()
    }
}
