//! Per-day session aggregation and streak computation
//!
//! Builds the `GET /api/users/stats` payload from raw study sessions:
//! sessions are bucketed by UTC calendar day (`YYYY-MM-DD`), and streaks are
//! computed over the set of days that have at least one session.

use crate::storage::StudySession;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Day key format used by the stats map
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// All sessions recorded on one calendar day
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailySession {
    #[serde(default)]
    pub count: u32,
    /// Seconds
    #[serde(default)]
    pub total_duration: u64,
    #[serde(default)]
    pub sessions: Vec<StudySession>,
}

/// Response body of `GET /api/users/stats`
///
/// Every field is optional on the wire so that partial responses still
/// parse; missing streaks read as zero. A `null` day is kept as `None`: it
/// counts as a study day but draws nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(default)]
    pub study_sessions: BTreeMap<String, Option<DailySession>>,
    #[serde(default)]
    pub total_study_hours: f64,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub best_streak: u32,
    #[serde(default)]
    pub last_study_date: Option<String>,
}

/// Bucket sessions by the UTC day they started on
pub fn group_by_day(sessions: &[StudySession]) -> BTreeMap<String, DailySession> {
    let mut days: BTreeMap<String, DailySession> = BTreeMap::new();

    for session in sessions {
        let key = session.study_date().format(DAY_KEY_FORMAT).to_string();
        let day = days.entry(key).or_default();
        day.count = day.count.saturating_add(1);
        day.total_duration = day.total_duration.saturating_add(session.duration);
        day.sessions.push(session.clone());
    }

    days
}

/// Consecutive study days ending today, or ending yesterday if today has
/// nothing yet. Zero if neither day has a session.
pub fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut cursor = if days.contains(&today) {
        today
    } else {
        let yesterday = today - Duration::days(1);
        if !days.contains(&yesterday) {
            return 0;
        }
        yesterday
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }

    streak
}

/// Longest run of consecutive study days ever
pub fn best_streak(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for &day in days {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        previous = Some(day);
    }

    best
}

/// Build the stats payload for a user's sessions as of `today`
pub fn compute_stats(sessions: &[StudySession], today: NaiveDate) -> StatsResponse {
    let grouped = group_by_day(sessions);

    let days: BTreeSet<NaiveDate> = sessions.iter().map(StudySession::study_date).collect();
    let total_seconds = grouped
        .values()
        .fold(0u64, |acc, d| acc.saturating_add(d.total_duration));

    let current = current_streak(&days, today);
    // A streak still running today can never exceed the longest one
    let best = best_streak(&days).max(current);

    StatsResponse {
        total_study_hours: total_seconds as f64 / 3600.0,
        current_streak: current,
        best_streak: best,
        last_study_date: days
            .iter()
            .next_back()
            .map(|d| d.format(DAY_KEY_FORMAT).to_string()),
        study_sessions: grouped.into_iter().map(|(k, v)| (k, Some(v))).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session_on(y: i32, m: u32, d: u32, minutes: i64) -> StudySession {
        let start = Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap();
        StudySession::new(start, start + Duration::minutes(minutes), "pomodoro")
    }

    fn day_set(dates: &[NaiveDate]) -> BTreeSet<NaiveDate> {
        dates.iter().copied().collect()
    }

    #[test]
    fn test_group_by_day() {
        let sessions = vec![
            session_on(2024, 1, 1, 10),
            session_on(2024, 1, 1, 20),
            session_on(2024, 1, 2, 25),
        ];
        let days = group_by_day(&sessions);

        assert_eq!(days.len(), 2);
        let first = &days["2024-01-01"];
        assert_eq!(first.count, 2);
        assert_eq!(first.total_duration, 1800);
        assert_eq!(first.sessions.len(), 2);
        assert_eq!(days["2024-01-02"].total_duration, 1500);
    }

    #[test]
    fn test_current_streak_counts_back_from_today() {
        let today = date(2024, 3, 10);
        let days = day_set(&[date(2024, 3, 8), date(2024, 3, 9), date(2024, 3, 10)]);
        assert_eq!(current_streak(&days, today), 3);
    }

    #[test]
    fn test_current_streak_allows_yesterday() {
        let today = date(2024, 3, 10);
        let days = day_set(&[date(2024, 3, 8), date(2024, 3, 9)]);
        assert_eq!(current_streak(&days, today), 2);
    }

    #[test]
    fn test_current_streak_broken() {
        let today = date(2024, 3, 10);
        let days = day_set(&[date(2024, 3, 7), date(2024, 3, 8)]);
        assert_eq!(current_streak(&days, today), 0);
        assert_eq!(current_streak(&BTreeSet::new(), today), 0);
    }

    #[test]
    fn test_best_streak_finds_longest_run() {
        let days = day_set(&[
            date(2024, 1, 30),
            date(2024, 1, 31),
            date(2024, 2, 1),
            date(2024, 2, 5),
            date(2024, 2, 6),
        ]);
        assert_eq!(best_streak(&days), 3);
        assert_eq!(best_streak(&BTreeSet::new()), 0);
    }

    #[test]
    fn test_compute_stats() {
        let sessions = vec![
            session_on(2024, 3, 9, 30),
            session_on(2024, 3, 10, 60),
            session_on(2024, 3, 10, 30),
        ];
        let stats = compute_stats(&sessions, date(2024, 3, 10));

        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.best_streak, 2);
        assert!((stats.total_study_hours - 2.0).abs() < f64::EPSILON);
        assert_eq!(stats.last_study_date.as_deref(), Some("2024-03-10"));
        assert_eq!(stats.study_sessions["2024-03-10"].as_ref().unwrap().count, 2);
    }

    #[test]
    fn test_huge_durations_saturate() {
        let start = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        let mut sessions = Vec::new();
        for _ in 0..3 {
            let mut s = StudySession::new(start, start + Duration::minutes(1), "pomodoro");
            s.duration = i64::MAX as u64;
            sessions.push(s);
        }

        let days = group_by_day(&sessions);
        assert_eq!(days["2024-03-10"].total_duration, u64::MAX);
        assert_eq!(days["2024-03-10"].count, 3);

        let stats = compute_stats(&sessions, date(2024, 3, 10));
        assert!(stats.total_study_hours > 0.0);
    }

    #[test]
    fn test_compute_stats_empty() {
        let stats = compute_stats(&[], date(2024, 3, 10));
        assert_eq!(stats, StatsResponse::default());
        assert!(stats.last_study_date.is_none());
    }

    #[test]
    fn test_partial_response_defaults() {
        let json = r#"{"studySessions": {"2024-01-01": {"count": 3, "totalDuration": 1800}}}"#;
        let stats: StatsResponse = serde_json::from_str(json).unwrap();

        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.best_streak, 0);
        assert!(stats.study_sessions["2024-01-01"]
            .as_ref()
            .unwrap()
            .sessions
            .is_empty());
    }

    #[test]
    fn test_null_day_entry_parses() {
        let json = r#"{"studySessions": {
            "2024-01-01": {"count": 2, "totalDuration": 600},
            "2024-01-02": null
        }, "currentStreak": 2}"#;
        let stats: StatsResponse = serde_json::from_str(json).unwrap();

        assert_eq!(stats.study_sessions.len(), 2);
        assert!(stats.study_sessions["2024-01-02"].is_none());
        assert_eq!(stats.current_streak, 2);
    }
}
