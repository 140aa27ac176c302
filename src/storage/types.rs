//! Core record types for the MindMentor study store
//!
//! These are the persisted entities and, with camelCase field names, the JSON
//! shapes the dashboard pages exchange with the API:
//! - `StudySession`: one completed timer interval
//! - `Note` / `NoteBlock`: rich notes stored as a block list
//! - `PdfDocument`: an uploaded PDF's metadata
//! - `CuratedResource` / `ResourceLink`: a curated set of links for one topic
//! - `StudyPlan` / `PlanWeek`: a generated multi-week plan
//! - `User`: profile data

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Generate a new record identifier.
///
/// UUIDv7 strings sort lexicographically by creation time, which the plan
/// list relies on when ordering by `_id`.
pub fn new_record_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// One completed timed study interval
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    /// Length in seconds
    pub duration: u64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Free-form label ("pomodoro", "deep-work", ...)
    pub mode: String,
}

impl StudySession {
    /// Create a session whose duration is derived from its bounds
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>, mode: impl Into<String>) -> Self {
        let duration = (end_time - start_time).num_seconds().max(0) as u64;
        Self {
            duration,
            start_time,
            end_time,
            mode: mode.into(),
        }
    }

    /// Calendar day (UTC) the session is credited to
    pub fn study_date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }
}

/// A single block of note content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteBlock {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

impl NoteBlock {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            content: content.into(),
        }
    }
}

/// A note with optional parent for nesting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: Vec<NoteBlock>,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(title: impl Into<String>, content: Vec<NoteBlock>, parent_id: Option<String>) -> Self {
        Self {
            id: new_record_id(),
            title: title.into(),
            content,
            parent_id,
            updated_at: Utc::now(),
        }
    }

    /// Plain text shown in the editor: the first block, or empty
    pub fn text(&self) -> &str {
        self.content.first().map(|b| b.content.as_str()).unwrap_or("")
    }
}

/// Metadata for an uploaded PDF
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PdfDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub page_count: u32,
    #[serde(default)]
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

/// Kind of curated link
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Documentation,
    Video,
    Course,
    Practice,
    Community,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Documentation => write!(f, "documentation"),
            ResourceKind::Video => write!(f, "video"),
            ResourceKind::Course => write!(f, "course"),
            ResourceKind::Practice => write!(f, "practice"),
            ResourceKind::Community => write!(f, "community"),
        }
    }
}

/// One link inside a curated set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceLink {
    pub title: String,
    pub url: String,
    pub kind: ResourceKind,
    #[serde(default)]
    pub description: String,
}

/// Curated resources for a topic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CuratedResource {
    #[serde(rename = "_id")]
    pub id: String,
    pub topic: String,
    pub resources: Vec<ResourceLink>,
    pub created_at: DateTime<Utc>,
}

/// One week of a study plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanWeek {
    pub week: u32,
    pub focus: String,
    pub tasks: Vec<String>,
    pub hours: u32,
}

/// A generated study plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    #[serde(rename = "_id")]
    pub id: String,
    pub subject: String,
    #[serde(default)]
    pub goal: Option<String>,
    pub hours_per_week: u32,
    pub weeks: Vec<PlanWeek>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl StudyPlan {
    /// Total hours across all weeks
    pub fn total_hours(&self) -> u32 {
        self.weeks.iter().map(|w| w.hours).sum()
    }
}

/// User profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_session_duration_from_bounds() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 10, 25, 0).unwrap();
        let session = StudySession::new(start, end, "pomodoro");

        assert_eq!(session.duration, 1500);
        assert_eq!(session.study_date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        // Reversed bounds never produce a negative duration
        let backwards = StudySession::new(end, start, "pomodoro");
        assert_eq!(backwards.duration, 0);
    }

    #[test]
    fn test_session_wire_format() {
        let json = r#"{
            "duration": 1800,
            "startTime": "2024-01-01T09:00:00.000Z",
            "endTime": "2024-01-01T09:30:00.000Z",
            "mode": "focus"
        }"#;
        let session: StudySession = serde_json::from_str(json).unwrap();
        assert_eq!(session.duration, 1800);
        assert_eq!(session.mode, "focus");

        let out = serde_json::to_string(&session).unwrap();
        assert!(out.contains("\"startTime\""));
        assert!(out.contains("\"endTime\""));
    }

    #[test]
    fn test_note_text_uses_first_block() {
        let note = Note::new(
            "Week 1",
            vec![NoteBlock::text("first"), NoteBlock::text("second")],
            None,
        );
        assert_eq!(note.text(), "first");

        let empty = Note::new("Empty", vec![], None);
        assert_eq!(empty.text(), "");

        let json = serde_json::to_string(&note).unwrap();
        assert!(json.contains("\"_id\""));
        assert!(json.contains("\"type\":\"text\""));
        assert!(json.contains("\"parentId\":null"));
    }

    #[test]
    fn test_record_ids_sort_by_creation() {
        let first = new_record_id();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = new_record_id();
        assert!(second > first);
    }

    #[test]
    fn test_plan_total_hours() {
        let plan = StudyPlan {
            id: new_record_id(),
            subject: "Rust".to_string(),
            goal: None,
            hours_per_week: 6,
            weeks: vec![
                PlanWeek { week: 1, focus: "Basics".into(), tasks: vec![], hours: 6 },
                PlanWeek { week: 2, focus: "Traits".into(), tasks: vec![], hours: 6 },
            ],
            active: true,
            created_at: Utc::now(),
        };
        assert_eq!(plan.total_hours(), 12);
    }
}
