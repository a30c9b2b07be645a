//! Materialized dashboard input
//!
//! The fetch layer merges the `/user/profile`, `/projects`, `/tasks` and
//! `/sprints` responses (plus any per-sprint daily burndown samples) into
//! one snapshot before handing it to the metrics engine.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::{BurndownSample, Project, Sprint, SprintStatus, Task, UserProfile};
use crate::error::LoadReport;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub sprints: Vec<Sprint>,
    /// Daily samples keyed by sprint id
    #[serde(default)]
    pub burndown: BTreeMap<u64, Vec<BurndownSample>>,
}

impl DashboardSnapshot {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.tasks.is_empty() && self.sprints.is_empty()
    }

    pub fn sprint(&self, id: u64) -> Option<&Sprint> {
        self.sprints.iter().find(|s| s.id == id)
    }

    /// Samples recorded for a sprint (empty when none were fetched)
    pub fn samples_for(&self, sprint_id: u64) -> &[BurndownSample] {
        self.burndown
            .get(&sprint_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sprints whose status is ACTIVE
    pub fn active_sprints(&self) -> impl Iterator<Item = &Sprint> {
        self.sprints
            .iter()
            .filter(|s| s.status == SprintStatus::Active)
    }

    /// Record tolerated data anomalies as warnings
    ///
    /// Nothing here rejects the snapshot; the metrics engine copes with all
    /// of these, but they usually point at a stale or buggy backend.
    pub fn audit(&self, report: &mut LoadReport) {
        for project in self.projects.iter().filter(|p| p.has_inconsistent_counts()) {
            tracing::warn!(
                project = project.id,
                completed = project.completed_tasks,
                total = project.total_tasks,
                "Completed tasks exceed total"
            );
            report.add_warning(
                "projects",
                format!(
                    "Project {} ({}) reports {} completed of {} tasks",
                    project.id, project.name, project.completed_tasks, project.total_tasks
                ),
            );
        }

        let sprint_ids: HashSet<u64> = self.sprints.iter().map(|s| s.id).collect();
        for sprint_id in self.burndown.keys().filter(|id| !sprint_ids.contains(id)) {
            report.add_warning(
                "burndown",
                format!("Samples recorded for unknown sprint {}", sprint_id),
            );
        }

        let mut seen = HashSet::new();
        for task in &self.tasks {
            if !seen.insert(task.id) {
                report.add_warning("tasks", format!("Duplicate task id {}", task.id));
            }
        }

        report.projects_loaded = self.projects.len();
        report.tasks_loaded = self.tasks.len();
        report.sprints_loaded = self.sprints.len();
    }
}
