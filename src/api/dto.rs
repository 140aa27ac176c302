//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! Field names are camelCase to match what the dashboard pages send and read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{CuratedResource, NoteBlock, StudyPlan};

// ============================================
// SESSION DTOs
// ============================================

/// Body of `POST /api/sessions`, sent when the timer completes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    /// Seconds studied
    pub duration: u64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub mode: String,
}

// ============================================
// NOTE DTOs
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub title: String,
    #[serde(default)]
    pub content: Vec<NoteBlock>,
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<NoteBlock>>,
}

// ============================================
// PDF DTOs
// ============================================

/// Query string of `DELETE /api/pdf?id=`
#[derive(Debug, Deserialize)]
pub struct PdfDeleteQuery {
    pub id: String,
}

// ============================================
// RESOURCE DTOs
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResourcesRequest {
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesResponse {
    pub resources: Vec<CuratedResource>,
}

// ============================================
// STUDY PLAN DTOs
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanRequest {
    pub subject: String,
    #[serde(default)]
    pub goal: Option<String>,
    pub hours_per_week: u32,
    pub weeks: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlansResponse {
    pub plans: Vec<StudyPlan>,
}

// ============================================
// SHARED DTOs
// ============================================

/// Reply to resource and plan deletion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl DeleteResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}

/// Bare `{success}` acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

// ============================================
// PROFILE DTOs
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRequest {
    pub name: String,
    pub email: String,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy or unhealthy
    pub status: String,
    /// Storage status
    pub storage: String,
    /// Open WebSocket connections
    pub connections: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
