//! Study statistics
//!
//! - **aggregate**: sessions → per-day buckets, streaks (server side)
//! - **dashboard**: per-day buckets → heatmap, summary, achievements (page side)

pub mod aggregate;
pub mod dashboard;

pub use aggregate::{
    best_streak, compute_stats, current_streak, group_by_day, DailySession, StatsResponse,
    DAY_KEY_FORMAT,
};
pub use dashboard::{
    achievements, calendar_points, heatmap_level, Achievement, CalendarData, CalendarDataPoint,
    Dashboard, DashboardSummary, StudyStats, Trend, WEEKLY_GOAL_HOURS,
};
