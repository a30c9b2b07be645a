//! Chart bucketizers
//!
//! Group tasks by status and priority for the distribution charts, and
//! projects into progress and workload rows for the bar/line charts.

use serde::Serialize;

use super::deadlines::ProgressTier;
use super::{truncate_label, whole_percent};
use crate::models::{Project, Task, TaskPriority, TaskStatus};

/// Max label length on the project progress chart
pub const PROGRESS_LABEL_CHARS: usize = 15;
/// Max label length on the team workload chart
pub const WORKLOAD_LABEL_CHARS: usize = 12;

/// Palette slot for a chart slice; the renderer maps it to a theme color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorKey {
    Primary,
    Success,
    Warning,
    Danger,
    Purple,
    Gray,
}

impl ColorKey {
    /// Default hex value for renderers without a theme
    pub fn hex(&self) -> &'static str {
        match self {
            ColorKey::Primary => "#3b82f6",
            ColorKey::Success => "#10b981",
            ColorKey::Warning => "#f59e0b",
            ColorKey::Danger => "#ef4444",
            ColorKey::Purple => "#8b5cf6",
            ColorKey::Gray => "#6b7280",
        }
    }
}

/// A labeled count for one slice/bar of a distribution chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub label: &'static str,
    pub count: usize,
    pub color_key: ColorKey,
}

/// Status buckets in display order. TEST_PASSED has no slice.
const STATUS_BUCKETS: [(TaskStatus, &str, ColorKey); 6] = [
    (TaskStatus::ToDo, "To Do", ColorKey::Gray),
    (TaskStatus::InProgress, "In Progress", ColorKey::Primary),
    (TaskStatus::ReadyForTesting, "Ready for Testing", ColorKey::Purple),
    (TaskStatus::InTesting, "In Testing", ColorKey::Warning),
    (TaskStatus::Done, "Done", ColorKey::Success),
    (TaskStatus::BugFound, "Bug Found", ColorKey::Danger),
];

const PRIORITY_BUCKETS: [(TaskPriority, &str, ColorKey); 4] = [
    (TaskPriority::Critical, "Critical", ColorKey::Danger),
    (TaskPriority::High, "High", ColorKey::Warning),
    (TaskPriority::Medium, "Medium", ColorKey::Primary),
    (TaskPriority::Low, "Low", ColorKey::Success),
];

fn bucketize<K: PartialEq + Copy>(
    keys: impl Iterator<Item = K>,
    layout: &[(K, &'static str, ColorKey)],
) -> Vec<Bucket> {
    let mut counts = vec![0usize; layout.len()];
    for key in keys {
        if let Some(slot) = layout.iter().position(|(k, _, _)| *k == key) {
            counts[slot] += 1;
        }
    }

    layout
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(&(_, label, color_key), count)| Bucket {
            label,
            count,
            color_key,
        })
        .collect()
}

/// Task counts per status, empty buckets omitted
///
/// Tasks with a status outside the charted set are not counted.
pub fn bucket_by_status(tasks: &[Task]) -> Vec<Bucket> {
    bucketize(tasks.iter().map(|t| t.status), &STATUS_BUCKETS)
}

/// Task counts per priority (Critical first), empty buckets omitted
pub fn bucket_by_priority(tasks: &[Task]) -> Vec<Bucket> {
    bucketize(tasks.iter().map(|t| t.priority), &PRIORITY_BUCKETS)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgressRow {
    pub project_id: u64,
    /// Chart label, truncated
    pub name: String,
    pub full_name: String,
    pub completion_percent: u32,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub tier: ProgressTier,
}

/// One completion row per project, in input order
pub fn project_progress_rows(projects: &[Project]) -> Vec<ProjectProgressRow> {
    projects
        .iter()
        .map(|project| {
            let completion_percent = whole_percent(
                project.completed_tasks as u64,
                project.total_tasks as u64,
            );
            ProjectProgressRow {
                project_id: project.id,
                name: truncate_label(&project.name, PROGRESS_LABEL_CHARS),
                full_name: project.name.clone(),
                completion_percent,
                total_tasks: project.total_tasks,
                completed_tasks: project.completed_tasks,
                tier: ProgressTier::from_percent(completion_percent),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamWorkloadRow {
    pub project_id: u64,
    pub project: String,
    pub members: u32,
    pub tasks: u32,
    pub avg_tasks_per_member: u32,
}

/// Average tasks per member for every staffed project
///
/// Projects without members are left out entirely.
pub fn team_workload_rows(projects: &[Project]) -> Vec<TeamWorkloadRow> {
    projects
        .iter()
        .filter(|p| p.member_count > 0)
        .map(|project| TeamWorkloadRow {
            project_id: project.id,
            project: truncate_label(&project.name, WORKLOAD_LABEL_CHARS),
            members: project.member_count,
            tasks: project.total_tasks,
            avg_tasks_per_member: (project.total_tasks as f64 / project.member_count as f64)
                .round() as u32,
        })
        .collect()
}
