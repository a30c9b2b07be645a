//! Sprint burndown series
//!
//! Pairs each daily sample of remaining points with the ideal linear decay
//! from the sprint's total points down to zero on the final day.

use serde::Serialize;

use super::whole_percent;
use crate::models::{BurndownSample, Sprint};

/// Minimum series length before the at-risk check applies
const RISK_MIN_POINTS: usize = 4;
/// Offset from the end of the series of the point the at-risk check reads
const RISK_LOOKBACK: usize = 3;

/// One day of the burndown chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BurndownPoint {
    pub day: String,
    /// Actual remaining points
    pub remaining: u32,
    /// Target remaining points on a straight line to zero
    pub ideal: f64,
}

impl BurndownPoint {
    pub fn is_behind(&self) -> bool {
        self.remaining as f64 > self.ideal
    }
}

/// Sprint header figures shown above the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintSummary {
    pub sprint_id: u64,
    pub name: String,
    pub total_points: u32,
    pub completed_points: u32,
    pub remaining_points: u32,
    pub percent_complete: u32,
    pub at_risk: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Burndown {
    pub summary: SprintSummary,
    pub series: Vec<BurndownPoint>,
}

impl Burndown {
    /// No samples recorded; the renderer shows its "no data" state
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Ideal remaining points at day `index` of `days`
///
/// Linear from `total` at index 0 to 0 at index `days - 1`; a single-day
/// (or empty) sprint stays at `total`.
pub fn ideal_remaining(total: u32, index: usize, days: usize) -> f64 {
    if days <= 1 {
        return total as f64;
    }
    total as f64 * (1.0 - index as f64 / (days - 1) as f64)
}

/// Build the burndown series and summary for a sprint
///
/// The series has exactly one point per sample. An empty sample list
/// yields an empty series; the summary is still filled in.
///
/// The sprint is flagged at risk when points remain, the series has more
/// than three points, and the third-from-last point is above the ideal
/// line.
pub fn build_burndown(sprint: &Sprint, samples: &[BurndownSample]) -> Burndown {
    let days = samples.len();
    let series: Vec<BurndownPoint> = samples
        .iter()
        .enumerate()
        .map(|(i, sample)| BurndownPoint {
            day: sample.day.clone(),
            remaining: sample.remaining,
            ideal: ideal_remaining(sprint.total_points, i, days),
        })
        .collect();

    let remaining_points = sprint.remaining_points();
    let at_risk = remaining_points > 0
        && series.len() >= RISK_MIN_POINTS
        && series[series.len() - RISK_LOOKBACK].is_behind();

    if at_risk {
        tracing::debug!(sprint = sprint.id, "Sprint burndown behind ideal trend");
    }

    Burndown {
        summary: SprintSummary {
            sprint_id: sprint.id,
            name: sprint.name.clone(),
            total_points: sprint.total_points,
            completed_points: sprint.completed_points,
            remaining_points,
            percent_complete: whole_percent(
                sprint.completed_points as u64,
                sprint.total_points as u64,
            ),
            at_risk,
        },
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprint_15() -> Sprint {
        Sprint::new(15, "Sprint 15").with_points(85, 120)
    }

    #[test]
    fn test_ideal_line_endpoints() {
        assert_eq!(ideal_remaining(120, 0, 14), 120.0);
        assert_eq!(ideal_remaining(120, 13, 14), 0.0);
        assert_eq!(ideal_remaining(20, 2, 5), 10.0);
    }

    #[test]
    fn test_single_sample_stays_at_total() {
        let burndown = build_burndown(&sprint_15(), &BurndownSample::daily(&[120]));
        assert_eq!(burndown.series.len(), 1);
        assert_eq!(burndown.series[0].ideal, 120.0);
        assert!(!burndown.summary.at_risk);
    }

    #[test]
    fn test_empty_samples() {
        let burndown = build_burndown(&sprint_15(), &[]);
        assert!(burndown.is_empty());
        assert_eq!(burndown.summary.percent_complete, 71);
        assert_eq!(burndown.summary.remaining_points, 35);
        assert!(!burndown.summary.at_risk);
    }

    #[test]
    fn test_two_week_sprint_at_risk() {
        let remaining = [120, 118, 105, 98, 85, 84, 70, 55, 48, 38, 30, 20, 12, 0];
        let burndown = build_burndown(&sprint_15(), &BurndownSample::daily(&remaining));

        assert_eq!(burndown.series.len(), 14);
        assert_eq!(burndown.series[0].day, "Day 1");
        // Day 12: 20 remaining vs ~18.5 ideal
        assert!(burndown.summary.at_risk);
    }

    #[test]
    fn test_short_series_never_at_risk() {
        let sprint = Sprint::new(1, "Short").with_points(0, 20);
        let burndown = build_burndown(&sprint, &BurndownSample::daily(&[20, 20, 20]));
        assert!(!burndown.summary.at_risk);
    }

    #[test]
    fn test_finished_sprint_not_at_risk() {
        let sprint = Sprint::new(1, "Done").with_points(20, 20);
        let burndown = build_burndown(&sprint, &BurndownSample::daily(&[20, 20, 20, 20, 20]));
        assert!(!burndown.summary.at_risk);
    }

    #[test]
    fn test_zero_point_sprint() {
        let sprint = Sprint::new(1, "Empty");
        let burndown = build_burndown(&sprint, &BurndownSample::daily(&[0, 0, 0, 0, 0]));
        assert_eq!(burndown.summary.percent_complete, 0);
        assert!(burndown.series.iter().all(|p| p.ideal == 0.0));
        assert!(!burndown.summary.at_risk);
    }
}
