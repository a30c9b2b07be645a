//! Due-date urgency and progress tiers for task and project cards

use chrono::{DateTime, Utc};
use serde::Serialize;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Whole days until `due`, rounded up; `None` without a due date
///
/// Anything due later today counts as 0 or 1 depending on the remaining
/// fraction, and a deadline passed by less than a full day is still 0.
pub fn days_left(due: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<i64> {
    let due = due?;
    let millis = (due - now).num_milliseconds() as f64;
    Some((millis / MILLIS_PER_DAY).ceil() as i64)
}

/// Urgency band driving the due-date badge color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DeadlineUrgency {
    Overdue,
    /// Today or tomorrow
    DueSoon,
    /// Within three days
    Upcoming,
    Later,
    NoDueDate,
}

impl DeadlineUrgency {
    pub fn from_days_left(days: Option<i64>) -> Self {
        match days {
            None => DeadlineUrgency::NoDueDate,
            Some(d) if d < 0 => DeadlineUrgency::Overdue,
            Some(d) if d <= 1 => DeadlineUrgency::DueSoon,
            Some(d) if d <= 3 => DeadlineUrgency::Upcoming,
            Some(_) => DeadlineUrgency::Later,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeadlineUrgency::Overdue => "Overdue",
            DeadlineUrgency::DueSoon => "Due soon",
            DeadlineUrgency::Upcoming => "Upcoming",
            DeadlineUrgency::Later => "Later",
            DeadlineUrgency::NoDueDate => "No due date",
        }
    }
}

pub fn deadline_urgency(due: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DeadlineUrgency {
    DeadlineUrgency::from_days_left(days_left(due, now))
}

/// Progress bar band for a completion percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgressTier {
    /// 80% and up
    Excellent,
    /// 60-79%
    Good,
    /// 40-59%
    Fair,
    Behind,
}

impl ProgressTier {
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            80.. => ProgressTier::Excellent,
            60..=79 => ProgressTier::Good,
            40..=59 => ProgressTier::Fair,
            _ => ProgressTier::Behind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2025-05-12T09:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_days_left_rounds_up() {
        assert_eq!(days_left(Some(now() + Duration::hours(1)), now()), Some(1));
        assert_eq!(days_left(Some(now() + Duration::hours(25)), now()), Some(2));
        assert_eq!(days_left(Some(now()), now()), Some(0));
        assert_eq!(days_left(None, now()), None);
    }

    #[test]
    fn test_recently_passed_deadline_is_not_overdue() {
        let due = now() - Duration::hours(2);
        assert_eq!(days_left(Some(due), now()), Some(0));
        assert_eq!(deadline_urgency(Some(due), now()), DeadlineUrgency::DueSoon);
    }

    #[test]
    fn test_urgency_bands() {
        let at = |days: i64| deadline_urgency(Some(now() + Duration::days(days)), now());
        assert_eq!(at(-2), DeadlineUrgency::Overdue);
        assert_eq!(at(1), DeadlineUrgency::DueSoon);
        assert_eq!(at(3), DeadlineUrgency::Upcoming);
        assert_eq!(at(4), DeadlineUrgency::Later);
        assert_eq!(deadline_urgency(None, now()), DeadlineUrgency::NoDueDate);
    }

    #[test]
    fn test_progress_tiers() {
        assert_eq!(ProgressTier::from_percent(100), ProgressTier::Excellent);
        assert_eq!(ProgressTier::from_percent(80), ProgressTier::Excellent);
        assert_eq!(ProgressTier::from_percent(79), ProgressTier::Good);
        assert_eq!(ProgressTier::from_percent(40), ProgressTier::Fair);
        assert_eq!(ProgressTier::from_percent(0), ProgressTier::Behind);
    }
}
