//! Project model as returned by the `/projects` endpoint

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;

/// Lifecycle status of a project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Active,
    Completed,
    OnHold,
    Planned,
    /// Any value outside the recognized set
    #[default]
    #[serde(other)]
    Unknown,
}

impl ProjectStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::OnHold => "On Hold",
            ProjectStatus::Planned => "Planned",
            ProjectStatus::Unknown => "Unknown",
        }
    }
}

/// A project with its task and membership counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub status: ProjectStatus,
    #[serde(default, deserialize_with = "de::lenient_count")]
    pub total_tasks: u32,
    #[serde(default, deserialize_with = "de::lenient_count")]
    pub completed_tasks: u32,
    /// Absent or null counts as zero members
    #[serde(default, deserialize_with = "de::lenient_count")]
    pub member_count: u32,
    #[serde(default, deserialize_with = "de::timestamp_opt")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::timestamp_opt")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint_count: Option<u32>,
}

impl Project {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_tasks(mut self, completed: u32, total: u32) -> Self {
        self.completed_tasks = completed;
        self.total_tasks = total;
        self
    }

    pub fn with_members(mut self, members: u32) -> Self {
        self.member_count = members;
        self
    }

    /// True when the counters violate `completed <= total`
    pub fn has_inconsistent_counts(&self) -> bool {
        self.completed_tasks > self.total_tasks
    }
}
