//! Recent activity feed
//!
//! Lists the most recently updated tasks as "task updated" entries.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::{Task, TaskPriority, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub task_id: u64,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub timestamp: DateTime<Utc>,
    pub user: String,
}

/// Tasks updated after `now - window`, newest first, capped at `limit`
///
/// Tasks without an `updatedAt` never appear. Ties keep input order.
pub fn recent_activity(
    tasks: &[Task],
    now: DateTime<Utc>,
    window: Duration,
    limit: usize,
) -> Vec<ActivityEntry> {
    let cutoff = now - window;

    let mut recent: Vec<(&Task, DateTime<Utc>)> = tasks
        .iter()
        .filter_map(|task| task.updated_at.map(|ts| (task, ts)))
        .filter(|(_, ts)| *ts > cutoff)
        .collect();
    recent.sort_by(|a, b| b.1.cmp(&a.1));

    recent
        .into_iter()
        .take(limit)
        .map(|(task, ts)| ActivityEntry {
            task_id: task.id,
            title: format!("Task \"{}\" updated", task.title),
            description: format!("Status changed to {}", task.status.as_str()),
            status: task.status,
            priority: task.priority,
            timestamp: ts,
            user: task.assignee_name().to_string(),
        })
        .collect()
}
