//! Output formatting for CLI commands
//!
//! Each view model renders either as a comfy-table for humans or as
//! pretty JSON for scripts.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use serde::Serialize;
use sprintboard_core::metrics::{
    ActivityEntry, Bucket, Burndown, DashboardStats, DeadlineUrgency, ProjectProgressRow,
    TeamWorkloadRow, days_left,
};

/// Output format selected by `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

/// Parse `--now`, falling back to the wall clock
pub fn resolve_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => sprintboard_core::models::de::parse_timestamp(raw)
            .with_context(|| format!("Invalid --now timestamp: {}", raw)),
        None => Ok(Utc::now()),
    }
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}

fn new_table(headers: &[&str], no_color: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }
    table
}

// ============================================================================
// Formatters
// ============================================================================

pub fn format_stats(stats: &DashboardStats) -> String {
    let lines = [
        format!(
            "Projects:         {} total, {} active, {} completed ({}%)",
            stats.projects.total,
            stats.projects.active,
            stats.projects.completed,
            stats.projects.completion_rate
        ),
        format!(
            "Tasks:            {} total, {} in progress, {} done ({}%)",
            stats.tasks.total,
            stats.tasks.in_progress,
            stats.tasks.completed,
            stats.tasks.completion_rate
        ),
        format!("  High priority:  {}", stats.tasks.high_priority),
        format!("Upcoming (3d):    {}", stats.deadlines.upcoming),
        format!("Due today/tmrw:   {}", stats.deadlines.due_today_tomorrow),
        format!(
            "Team:             {} members, {} projects/member",
            stats.team.total_members, stats.team.projects_per_member
        ),
        format!("In testing:       {}", stats.testing.in_testing),
        format!("Bugs found:       {}", stats.testing.bugs_found),
    ];
    lines.join("\n")
}

pub fn format_buckets(title: &str, buckets: &[Bucket], no_color: bool) -> String {
    if buckets.is_empty() {
        return format!("{}: no tasks available", title);
    }

    let mut table = new_table(&[title, "Count", "Color"], no_color);
    for bucket in buckets {
        table.add_row(Row::from(vec![
            bucket.label.to_string(),
            bucket.count.to_string(),
            bucket.color_key.hex().to_string(),
        ]));
    }
    table.to_string()
}

pub fn format_progress(rows: &[ProjectProgressRow], no_color: bool) -> String {
    if rows.is_empty() {
        return "No projects available".to_string();
    }

    let mut table = new_table(&["Project", "Done", "Total", "Completion"], no_color);
    for row in rows {
        table.add_row(Row::from(vec![
            row.name.clone(),
            row.completed_tasks.to_string(),
            row.total_tasks.to_string(),
            format!("{}% {}", row.completion_percent, progress_bar(row.completion_percent)),
        ]));
    }
    table.to_string()
}

pub fn format_workload(rows: &[TeamWorkloadRow], no_color: bool) -> String {
    if rows.is_empty() {
        return "No team data available".to_string();
    }

    let mut table = new_table(&["Project", "Members", "Tasks", "Avg/member"], no_color);
    for row in rows {
        table.add_row(Row::from(vec![
            row.project.clone(),
            row.members.to_string(),
            row.tasks.to_string(),
            row.avg_tasks_per_member.to_string(),
        ]));
    }
    table.to_string()
}

pub fn format_burndown(burndown: &Burndown, no_color: bool) -> String {
    let summary = &burndown.summary;
    let mut out = vec![
        format!("{} Burndown", summary.name),
        format!(
            "Points: {} total, {} completed, {} remaining ({}%)",
            summary.total_points,
            summary.completed_points,
            summary.remaining_points,
            summary.percent_complete
        ),
    ];

    if burndown.is_empty() {
        out.push("No burndown data recorded".to_string());
    } else {
        let mut table = new_table(&["Day", "Remaining", "Ideal"], no_color);
        for point in &burndown.series {
            let remaining = if point.is_behind() && !no_color {
                Cell::new(point.remaining).fg(Color::Yellow)
            } else {
                Cell::new(point.remaining)
            };
            table.add_row(Row::from(vec![
                Cell::new(&point.day),
                remaining,
                Cell::new(format!("{:.1}", point.ideal)),
            ]));
        }
        out.push(table.to_string());
    }

    if summary.at_risk {
        out.push(
            "Sprint at risk: the burndown trend is behind the ideal line. \
             Consider addressing blockers or adjusting scope."
                .to_string(),
        );
    }

    out.join("\n")
}

pub fn format_activity(
    entries: &[ActivityEntry],
    now: DateTime<Utc>,
    no_color: bool,
) -> String {
    if entries.is_empty() {
        return "No recent activity".to_string();
    }

    let mut table = new_table(&["When", "Task", "Status", "Priority", "User"], no_color);
    for entry in entries {
        table.add_row(Row::from(vec![
            format_age(now - entry.timestamp),
            ellipsize(&entry.title, 48),
            entry.status.as_str().to_string(),
            entry.priority.as_str().to_string(),
            entry.user.clone(),
        ]));
    }
    table.to_string()
}

/// Upcoming-deadline lines for `overview`
pub fn format_deadline(title: &str, due: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    format!("{:<40} {}", ellipsize(title, 40), deadline_label(due, now))
}

/// "Overdue by 2d", "Due in 1d", "No due date"
pub fn deadline_label(due: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let days = days_left(due, now);
    match (DeadlineUrgency::from_days_left(days), days) {
        (DeadlineUrgency::NoDueDate, _) | (_, None) => "No due date".to_string(),
        (DeadlineUrgency::Overdue, Some(d)) => format!("Overdue by {}d", -d),
        (_, Some(0)) => "Due today".to_string(),
        (urgency, Some(d)) => format!("Due in {}d ({})", d, urgency.label()),
    }
}

// ============================================================================
// Utilities
// ============================================================================

fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) / 10) as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(10 - filled))
}

fn format_age(age: chrono::Duration) -> String {
    if age.num_days() > 0 {
        format!("{}d ago", age.num_days())
    } else if age.num_hours() > 0 {
        format!("{}h ago", age.num_hours())
    } else if age.num_minutes() > 0 {
        format!("{}m ago", age.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Fit `s` into `width` columns, ending in "…" when cut
fn ellipsize(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

// ============================================================================
// Tests
// ============================================================================
