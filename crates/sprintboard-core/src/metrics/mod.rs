//! Dashboard metrics engine
//!
//! Pure, synchronous transforms from entity collections to view models:
//! summary statistics, burndown series, chart buckets and activity feed.
//! Nothing here reads the clock or touches I/O; callers pass `now` in and
//! re-invoke on their own schedule.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::config::DashboardConfig;
use crate::models::DashboardSnapshot;

pub mod activity;
pub mod buckets;
pub mod burndown;
pub mod deadlines;
pub mod stats;

#[cfg(test)]
mod tests;

pub use activity::{ActivityEntry, recent_activity};
pub use buckets::{
    Bucket, ColorKey, ProjectProgressRow, TeamWorkloadRow, bucket_by_priority, bucket_by_status,
    project_progress_rows, team_workload_rows,
};
pub use burndown::{Burndown, BurndownPoint, SprintSummary, build_burndown, ideal_remaining};
pub use deadlines::{DeadlineUrgency, ProgressTier, days_left, deadline_urgency};
pub use stats::{DashboardStats, DeadlineWindows, compute_stats, compute_stats_with};

/// A rate rounded to one decimal place
///
/// Displays and serializes as `"40.0"`; zero whenever the denominator was.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Rate(f64);

impl Rate {
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// `part / whole * 100`
    pub fn percent(part: usize, whole: usize) -> Self {
        if whole == 0 {
            return Self::zero();
        }
        Self(round_one_decimal(part as f64 / whole as f64 * 100.0))
    }

    /// `numerator / denominator`, zero for a non-positive denominator
    pub fn ratio(numerator: f64, denominator: f64) -> Self {
        if denominator <= 0.0 {
            return Self::zero();
        }
        Self(round_one_decimal(numerator / denominator))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl Serialize for Rate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `round(part / whole * 100)`, 0 when `whole` is 0
pub fn whole_percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

/// Truncate to `max` chars, appending "..." when anything was cut
pub fn truncate_label(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        name.chars().take(max).collect::<String>() + "..."
    }
}

/// Every view model the dashboard page renders, computed in one pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub status_buckets: Vec<Bucket>,
    pub priority_buckets: Vec<Bucket>,
    pub project_progress: Vec<ProjectProgressRow>,
    pub team_workload: Vec<TeamWorkloadRow>,
    pub recent_activity: Vec<ActivityEntry>,
    /// One entry per active sprint with recorded samples
    pub burndowns: Vec<Burndown>,
    pub computed_at: DateTime<Utc>,
}

impl DashboardView {
    pub fn compute(
        snapshot: &DashboardSnapshot,
        now: DateTime<Utc>,
        config: &DashboardConfig,
    ) -> Self {
        let burndowns = snapshot
            .active_sprints()
            .filter_map(|sprint| {
                let samples = snapshot.samples_for(sprint.id);
                (!samples.is_empty()).then(|| build_burndown(sprint, samples))
            })
            .collect();

        Self {
            stats: compute_stats_with(
                &snapshot.projects,
                &snapshot.tasks,
                now,
                config.deadline_windows(),
            ),
            status_buckets: bucket_by_status(&snapshot.tasks),
            priority_buckets: bucket_by_priority(&snapshot.tasks),
            project_progress: project_progress_rows(&snapshot.projects),
            team_workload: team_workload_rows(&snapshot.projects),
            recent_activity: recent_activity(
                &snapshot.tasks,
                now,
                config.activity_window(),
                config.activity_limit,
            ),
            burndowns,
            computed_at: now,
        }
    }

    /// Sprints currently flagged at risk
    pub fn sprints_at_risk(&self) -> impl Iterator<Item = &SprintSummary> {
        self.burndowns
            .iter()
            .map(|b| &b.summary)
            .filter(|s| s.at_risk)
    }
}
