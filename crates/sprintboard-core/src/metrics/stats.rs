//! Summary statistics for the dashboard cards
//!
//! Aggregates projects and tasks into completion rates, deadline counts,
//! team load and testing counters.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::Rate;
use crate::models::{Project, ProjectStatus, Task, TaskStatus};

/// Look-ahead windows for the deadline cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineWindows {
    pub upcoming: Duration,
    pub due_soon: Duration,
}

impl Default for DeadlineWindows {
    fn default() -> Self {
        Self {
            upcoming: Duration::days(3),
            due_soon: Duration::days(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCounts {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    pub completion_rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    /// HIGH and CRITICAL
    pub high_priority: usize,
    pub completion_rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineCounts {
    pub upcoming: usize,
    pub due_today_tomorrow: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamLoad {
    pub total_members: u64,
    pub projects_per_member: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestingCounts {
    /// IN_TESTING plus READY_FOR_TESTING
    pub in_testing: usize,
    pub bugs_found: usize,
}

/// Derived dashboard statistics, rebuilt on every call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub projects: ProjectCounts,
    pub tasks: TaskCounts,
    pub deadlines: DeadlineCounts,
    pub team: TeamLoad,
    pub testing: TestingCounts,
}

/// Compute dashboard statistics with the default 3-day / 1-day windows
///
/// `now` is injected so results are reproducible.
pub fn compute_stats(projects: &[Project], tasks: &[Task], now: DateTime<Utc>) -> DashboardStats {
    compute_stats_with(projects, tasks, now, DeadlineWindows::default())
}

/// Compute dashboard statistics with explicit deadline windows
///
/// # Graceful Degradation
/// - Empty collections: all counts and rates are zero
/// - Tasks without a due date: not counted in either deadline bucket
/// - Unknown statuses/priorities: counted in totals only
pub fn compute_stats_with(
    projects: &[Project],
    tasks: &[Task],
    now: DateTime<Utc>,
    windows: DeadlineWindows,
) -> DashboardStats {
    tracing::debug!(
        projects = projects.len(),
        tasks = tasks.len(),
        "Computing dashboard stats"
    );

    let completed_projects = projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Completed)
        .count();
    let active_projects = projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Active)
        .count();
    let total_members: u64 = projects.iter().map(|p| p.member_count as u64).sum();

    let mut task_counts = TaskCounts {
        total: tasks.len(),
        completed: 0,
        in_progress: 0,
        high_priority: 0,
        completion_rate: Rate::zero(),
    };
    let mut deadlines = DeadlineCounts {
        upcoming: 0,
        due_today_tomorrow: 0,
    };
    let mut testing = TestingCounts {
        in_testing: 0,
        bugs_found: 0,
    };

    let upcoming_end = now + windows.upcoming;
    let due_soon_end = now + windows.due_soon;

    for task in tasks {
        match task.status {
            TaskStatus::Done => task_counts.completed += 1,
            TaskStatus::InProgress => task_counts.in_progress += 1,
            TaskStatus::BugFound => testing.bugs_found += 1,
            status if status.is_testing() => testing.in_testing += 1,
            _ => {}
        }

        if task.priority.is_high() {
            task_counts.high_priority += 1;
        }

        // Open tasks with a due date inside [now, now + window]
        let Some(due) = task.due_date else {
            continue;
        };
        if task.status.is_done() || due < now {
            continue;
        }
        if due <= upcoming_end {
            deadlines.upcoming += 1;
        }
        if due <= due_soon_end {
            deadlines.due_today_tomorrow += 1;
        }
    }

    task_counts.completion_rate = Rate::percent(task_counts.completed, task_counts.total);

    DashboardStats {
        projects: ProjectCounts {
            total: projects.len(),
            completed: completed_projects,
            active: active_projects,
            completion_rate: Rate::percent(completed_projects, projects.len()),
        },
        tasks: task_counts,
        deadlines,
        team: TeamLoad {
            total_members,
            projects_per_member: Rate::ratio(projects.len() as f64, total_members as f64),
        },
        testing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskPriority;

    fn now() -> DateTime<Utc> {
        "2025-05-12T09:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_deadline_bounds_are_inclusive() {
        let tasks = vec![
            Task::new(1, "now").with_due_date(now()),
            Task::new(2, "edge of due soon").with_due_date(now() + Duration::days(1)),
            Task::new(3, "edge of upcoming").with_due_date(now() + Duration::days(3)),
            Task::new(4, "past upcoming").with_due_date(now() + Duration::days(3) + Duration::seconds(1)),
            Task::new(5, "overdue").with_due_date(now() - Duration::seconds(1)),
        ];

        let stats = compute_stats(&[], &tasks, now());
        assert_eq!(stats.deadlines.upcoming, 3);
        assert_eq!(stats.deadlines.due_today_tomorrow, 2);
    }

    #[test]
    fn test_done_tasks_have_no_deadline() {
        let tasks = vec![Task::new(1, "shipped")
            .with_status(TaskStatus::Done)
            .with_due_date(now() + Duration::hours(2))];

        let stats = compute_stats(&[], &tasks, now());
        assert_eq!(stats.deadlines.upcoming, 0);
        assert_eq!(stats.deadlines.due_today_tomorrow, 0);
    }

    #[test]
    fn test_custom_windows() {
        let tasks = vec![Task::new(1, "next week").with_due_date(now() + Duration::days(6))];
        let windows = DeadlineWindows {
            upcoming: Duration::days(7),
            due_soon: Duration::days(2),
        };

        let stats = compute_stats_with(&[], &tasks, now(), windows);
        assert_eq!(stats.deadlines.upcoming, 1);
        assert_eq!(stats.deadlines.due_today_tomorrow, 0);
    }

    #[test]
    fn test_status_and_priority_counters() {
        let tasks = vec![
            Task::new(1, "a").with_status(TaskStatus::InProgress).with_priority(TaskPriority::Critical),
            Task::new(2, "b").with_status(TaskStatus::ReadyForTesting).with_priority(TaskPriority::High),
            Task::new(3, "c").with_status(TaskStatus::InTesting).with_priority(TaskPriority::Low),
            Task::new(4, "d").with_status(TaskStatus::BugFound),
            Task::new(5, "e").with_status(TaskStatus::TestPassed),
            Task::new(6, "f").with_status(TaskStatus::Unknown),
        ];

        let stats = compute_stats(&[], &tasks, now());
        assert_eq!(stats.tasks.total, 6);
        assert_eq!(stats.tasks.in_progress, 1);
        assert_eq!(stats.tasks.high_priority, 2);
        assert_eq!(stats.testing.in_testing, 2);
        assert_eq!(stats.testing.bugs_found, 1);
        assert_eq!(stats.tasks.completed, 0);
    }

    #[test]
    fn test_team_load() {
        let projects = vec![
            Project::new(1, "a").with_members(3),
            Project::new(2, "b").with_members(1),
            Project::new(3, "c"),
        ];

        let stats = compute_stats(&projects, &[], now());
        assert_eq!(stats.team.total_members, 4);
        // 3 projects / 4 members = 0.75 -> 0.8
        assert_eq!(stats.team.projects_per_member.value(), 0.8);
    }

    #[test]
    fn test_project_counts() {
        let projects = vec![
            Project::new(1, "a").with_status(ProjectStatus::Completed),
            Project::new(2, "b").with_status(ProjectStatus::Active),
            Project::new(3, "c").with_status(ProjectStatus::OnHold),
        ];

        let stats = compute_stats(&projects, &[], now());
        assert_eq!(stats.projects.completed, 1);
        assert_eq!(stats.projects.active, 1);
        assert_eq!(stats.projects.completion_rate.to_string(), "33.3");
    }
}
