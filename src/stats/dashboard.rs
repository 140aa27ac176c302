//! Dashboard view model
//!
//! Turns a `StatsResponse` into what the home page renders: heatmap calendar
//! points, headline counters, weekly-goal progress and achievements.
//!
//! Heatmap levels use a fixed bucketing rule, `min(count / 2, 4)`. They are
//! not normalized against the user's busiest day.

use crate::stats::aggregate::{DailySession, StatsResponse};
use serde::Serialize;
use std::collections::BTreeMap;

/// Weekly study goal in hours
pub const WEEKLY_GOAL_HOURS: f64 = 25.0;

/// Highest heatmap intensity
pub const MAX_LEVEL: u8 = 4;

/// Heatmap intensity for a day with `count` sessions
pub fn heatmap_level(count: u32) -> u8 {
    (count / 2).min(MAX_LEVEL as u32) as u8
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalendarData {
    pub count: u32,
    /// Seconds
    pub duration: u64,
    pub details: String,
}

/// One cell of the contribution calendar
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalendarDataPoint {
    pub level: u8,
    pub data: CalendarData,
}

impl CalendarDataPoint {
    pub fn from_day(day: &DailySession) -> Self {
        let minutes = (day.total_duration as f64 / 60.0).round() as u64;
        Self {
            level: heatmap_level(day.count),
            data: CalendarData {
                count: day.count,
                duration: day.total_duration,
                details: format!("{} study sessions ({} minutes)", day.count, minutes),
            },
        }
    }
}

/// Calendar points keyed by `YYYY-MM-DD`; `null` days get no point
pub fn calendar_points(
    days: &BTreeMap<String, Option<DailySession>>,
) -> BTreeMap<String, CalendarDataPoint> {
    days.iter()
        .filter_map(|(date, day)| {
            day.as_ref()
                .map(|day| (date.clone(), CalendarDataPoint::from_day(day)))
        })
        .collect()
}

/// Streak counters plus the raw day map
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudyStats {
    pub current_streak: u32,
    pub best_streak: u32,
    pub total_days: usize,
    pub study_sessions: BTreeMap<String, Option<DailySession>>,
}

/// Derived headline figures
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_study_hours: f64,
    /// Unclamped percentage of the weekly goal
    pub weekly_progress: f64,
    pub total_sessions: u32,
}

impl DashboardSummary {
    pub fn from_days(days: &BTreeMap<String, Option<DailySession>>) -> Self {
        let (total_seconds, total_sessions) = days
            .values()
            .flatten()
            .fold((0u64, 0u32), |(secs, count), d| {
                (
                    secs.saturating_add(d.total_duration),
                    count.saturating_add(d.count),
                )
            });
        let total_study_hours = total_seconds as f64 / 3600.0;

        Self {
            total_study_hours,
            weekly_progress: total_study_hours / WEEKLY_GOAL_HOURS * 100.0,
            total_sessions,
        }
    }

    /// Value for the progress ring, clamped to `[0, 100]`
    pub fn ring_progress(&self) -> f64 {
        self.weekly_progress.clamp(0.0, 100.0)
    }

    /// Percentage text next to the ring. May exceed 100.
    pub fn progress_percent(&self) -> i64 {
        self.weekly_progress.round() as i64
    }

    /// Hours averaged over a 52 week year, one decimal place
    pub fn average_weekly_hours(&self) -> f64 {
        (self.total_study_hours / 52.0 * 10.0).round() / 10.0
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Achievement {
    pub title: &'static str,
    pub description: &'static str,
    pub earned: bool,
}

/// Achievement badges, in display order
pub fn achievements(stats: &StudyStats, total_study_hours: f64) -> Vec<Achievement> {
    vec![
        Achievement {
            title: "Week Warrior",
            description: "7+ day streak achieved",
            earned: stats.current_streak >= 7,
        },
        Achievement {
            title: "Time Master",
            description: "50+ hours completed",
            earned: total_study_hours >= 50.0,
        },
        Achievement {
            title: "Monthly Champion",
            description: "30+ active study days",
            earned: stats.total_days >= 30,
        },
        Achievement {
            title: "Streak Legend",
            description: "14+ day streak mastery",
            earned: stats.best_streak >= 14,
        },
    ]
}

/// Direction of a trend badge
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn from_value(value: f64) -> Self {
        if value > 0.0 {
            Trend::Up
        } else if value < 0.0 {
            Trend::Down
        } else {
            Trend::Neutral
        }
    }
}

/// Everything the home page shows
///
/// `Dashboard::default()` is the zero state shown before the first load and
/// kept when a load fails.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub calendar: BTreeMap<String, CalendarDataPoint>,
    pub stats: StudyStats,
    pub summary: DashboardSummary,
}

impl Dashboard {
    pub fn from_response(response: StatsResponse) -> Self {
        let calendar = calendar_points(&response.study_sessions);
        let summary = DashboardSummary::from_days(&response.study_sessions);

        Self {
            calendar,
            stats: StudyStats {
                current_streak: response.current_streak,
                best_streak: response.best_streak,
                total_days: response.study_sessions.len(),
                study_sessions: response.study_sessions,
            },
            summary,
        }
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        achievements(&self.stats, self.summary.total_study_hours)
    }

    /// Number of achievements earned; zero shows the "Start Your Journey" state
    pub fn earned_count(&self) -> usize {
        self.achievements().iter().filter(|a| a.earned).count()
    }
}
