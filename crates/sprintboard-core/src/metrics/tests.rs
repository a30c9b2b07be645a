//! Unit tests for the metrics module

use super::*;
use chrono::Duration;

use crate::models::{
    BurndownSample, Project, ProjectStatus, Sprint, SprintStatus, Task, TaskPriority, TaskStatus,
};

const STATUSES: [TaskStatus; 7] = [
    TaskStatus::ToDo,
    TaskStatus::InProgress,
    TaskStatus::ReadyForTesting,
    TaskStatus::InTesting,
    TaskStatus::BugFound,
    TaskStatus::TestPassed,
    TaskStatus::Done,
];

const PRIORITIES: [TaskPriority; 4] = [
    TaskPriority::Low,
    TaskPriority::Medium,
    TaskPriority::High,
    TaskPriority::Critical,
];

fn now() -> DateTime<Utc> {
    "2025-05-12T09:00:00Z".parse().unwrap()
}

/// Generate tasks cycling through every status and priority
fn generate_test_tasks(count: usize) -> Vec<Task> {
    (0..count)
        .map(|i| {
            let mut task = Task::new(i as u64, format!("task-{}", i))
                .with_status(STATUSES[i % STATUSES.len()])
                .with_priority(PRIORITIES[i % PRIORITIES.len()])
                .with_updated_at(now() - Duration::hours(i as i64));
            if i % 3 == 0 {
                task = task.with_due_date(now() + Duration::hours(i as i64 * 6));
            }
            task
        })
        .collect()
}

fn generate_test_projects(count: usize) -> Vec<Project> {
    (0..count)
        .map(|i| {
            let status = match i % 4 {
                0 => ProjectStatus::Active,
                1 => ProjectStatus::Completed,
                2 => ProjectStatus::OnHold,
                _ => ProjectStatus::Planned,
            };
            Project::new(i as u64, format!("Project number {}", i))
                .with_status(status)
                .with_tasks(i as u32, (i as u32) * 2)
                .with_members((i % 3) as u32)
        })
        .collect()
}

fn snapshot() -> DashboardSnapshot {
    let mut snapshot = DashboardSnapshot {
        projects: generate_test_projects(8),
        tasks: generate_test_tasks(40),
        ..Default::default()
    };
    snapshot.sprints = vec![
        Sprint::new(1, "Sprint 1")
            .with_points(20, 20)
            .with_status(SprintStatus::Completed),
        Sprint::new(2, "Sprint 2")
            .with_points(5, 20)
            .with_status(SprintStatus::Active),
        Sprint::new(3, "Sprint 3").with_status(SprintStatus::Active),
    ];
    snapshot
        .burndown
        .insert(1, BurndownSample::daily(&[20, 10, 0]));
    snapshot
        .burndown
        .insert(2, BurndownSample::daily(&[20, 19, 18, 16, 15]));
    snapshot
}

// ============================================================================
// Rate helpers
// ============================================================================

#[test]
fn test_rate_zero_denominator() {
    assert_eq!(Rate::percent(5, 0).value(), 0.0);
    assert_eq!(Rate::ratio(5.0, 0.0).value(), 0.0);
    assert!(!Rate::percent(0, 0).value().is_nan());
}

#[test]
fn test_rate_display_one_decimal() {
    assert_eq!(Rate::percent(4, 10).to_string(), "40.0");
    assert_eq!(Rate::percent(2, 3).to_string(), "66.7");
    assert_eq!(Rate::zero().to_string(), "0.0");
}

#[test]
fn test_rate_serializes_as_string() {
    let json = serde_json::to_string(&Rate::percent(1, 8)).unwrap();
    assert_eq!(json, "\"12.5\"");
}

#[test]
fn test_whole_percent() {
    assert_eq!(whole_percent(0, 0), 0);
    assert_eq!(whole_percent(1, 2), 50);
    assert_eq!(whole_percent(2, 3), 67);
    assert_eq!(whole_percent(12, 10), 120);
}

#[test]
fn test_truncate_label_multibyte() {
    assert_eq!(truncate_label("Équipe données 2025", 6), "Équipe...");
    assert_eq!(truncate_label("exactly-fifteen", 15), "exactly-fifteen");
}

// ============================================================================
// Stats over generated data
// ============================================================================

#[test]
fn test_stats_counts_match_generators() {
    let tasks = generate_test_tasks(70);
    let stats = compute_stats(&[], &tasks, now());

    // 70 tasks over 7 statuses -> 10 each
    assert_eq!(stats.tasks.total, 70);
    assert_eq!(stats.tasks.completed, 10);
    assert_eq!(stats.tasks.in_progress, 10);
    assert_eq!(stats.testing.in_testing, 20);
    assert_eq!(stats.testing.bugs_found, 10);
    assert_eq!(stats.tasks.completion_rate.to_string(), "14.3");
}

#[test]
fn test_stats_do_not_mutate_inputs() {
    let tasks = generate_test_tasks(10);
    let projects = generate_test_projects(4);
    let before = serde_json::to_string(&tasks).unwrap();

    let _ = compute_stats(&projects, &tasks, now());
    assert_eq!(serde_json::to_string(&tasks).unwrap(), before);
}

// ============================================================================
// Dashboard view
// ============================================================================

#[test]
fn test_view_only_active_sprints_with_samples() {
    let view = DashboardView::compute(&snapshot(), now(), &DashboardConfig::default());

    // Sprint 1 is completed, sprint 3 has no samples
    assert_eq!(view.burndowns.len(), 1);
    assert_eq!(view.burndowns[0].summary.sprint_id, 2);
    assert_eq!(view.burndowns[0].summary.percent_complete, 25);
}

#[test]
fn test_view_flags_sprint_at_risk() {
    let view = DashboardView::compute(&snapshot(), now(), &DashboardConfig::default());

    // Sprint 2 day 3: 18 remaining vs 10 ideal
    let at_risk: Vec<_> = view.sprints_at_risk().map(|s| s.sprint_id).collect();
    assert_eq!(at_risk, vec![2]);
}

#[test]
fn test_view_respects_activity_limit() {
    let config = DashboardConfig {
        activity_limit: 4,
        ..Default::default()
    };
    let view = DashboardView::compute(&snapshot(), now(), &config);

    assert_eq!(view.recent_activity.len(), 4);
    assert_eq!(view.recent_activity[0].task_id, 0);
}

#[test]
fn test_view_is_idempotent() {
    let snapshot = snapshot();
    let config = DashboardConfig::default();

    let first = DashboardView::compute(&snapshot, now(), &config);
    let second = DashboardView::compute(&snapshot, now(), &config);
    assert_eq!(first, second);
}

#[test]
fn test_view_of_empty_snapshot() {
    let view = DashboardView::compute(
        &DashboardSnapshot::default(),
        now(),
        &DashboardConfig::default(),
    );

    assert_eq!(view.stats.tasks.total, 0);
    assert!(view.status_buckets.is_empty());
    assert!(view.priority_buckets.is_empty());
    assert!(view.project_progress.is_empty());
    assert!(view.team_workload.is_empty());
    assert!(view.burndowns.is_empty());
}

#[test]
fn test_view_json_shape() {
    let view = DashboardView::compute(&snapshot(), now(), &DashboardConfig::default());
    let json = serde_json::to_value(&view).unwrap();

    assert!(json["stats"]["tasks"]["completionRate"].is_string());
    assert!(json["stats"]["deadlines"]["dueTodayTomorrow"].is_number());
    assert_eq!(json["statusBuckets"][0]["colorKey"], "gray");
    assert!(json["burndowns"][0]["summary"]["atRisk"].as_bool().unwrap());
}
