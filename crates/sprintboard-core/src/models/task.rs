//! Task model as returned by the `/tasks` endpoint

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;
use super::user::UserRef;

/// Workflow status of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    ToDo,
    InProgress,
    ReadyForTesting,
    InTesting,
    BugFound,
    TestPassed,
    Done,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }

    /// Waiting for or undergoing QA
    pub fn is_testing(&self) -> bool {
        matches!(self, TaskStatus::InTesting | TaskStatus::ReadyForTesting)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "TO_DO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::ReadyForTesting => "READY_FOR_TESTING",
            TaskStatus::InTesting => "IN_TESTING",
            TaskStatus::BugFound => "BUG_FOUND",
            TaskStatus::TestPassed => "TEST_PASSED",
            TaskStatus::Done => "DONE",
            TaskStatus::Unknown => "UNKNOWN",
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TaskPriority {
    pub fn is_high(&self) -> bool {
        matches!(self, TaskPriority::High | TaskPriority::Critical)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::High => "HIGH",
            TaskPriority::Critical => "CRITICAL",
            TaskPriority::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "de::null_default")]
    pub status: TaskStatus,
    #[serde(default, deserialize_with = "de::null_default")]
    pub priority: TaskPriority,
    #[serde(default, deserialize_with = "de::timestamp_opt")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint_name: Option<String>,
    #[serde(default, deserialize_with = "de::timestamp_opt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_updated_at(mut self, updated: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated);
        self
    }

    pub fn with_assignee(mut self, assignee: UserRef) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Display name of the assignee, "Unassigned" when absent
    pub fn assignee_name(&self) -> &str {
        self.assignee
            .as_ref()
            .and_then(|a| a.full_name.as_deref())
            .unwrap_or("Unassigned")
    }
}
