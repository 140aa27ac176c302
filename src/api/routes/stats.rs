//! Study Statistics and Session Routes
//!
//! - GET /api/users/stats - Per-day sessions, hours and streaks
//! - POST /api/sessions - Record a completed timer session

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::SessionRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::CurrentUser;
use crate::api::state::AppState;
use crate::stats::{compute_stats, StatsResponse};
use crate::storage::StudySession;
use crate::websocket::WsEvent;

/// Longest accepted session mode label
pub const MAX_MODE_LEN: usize = 50;

/// Longest accepted session, in seconds
pub const MAX_SESSION_SECS: u64 = 24 * 60 * 60;

/// GET /api/users/stats
///
/// Aggregates every recorded session for the user relative to today (UTC).
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> ApiResult<Json<StatsResponse>> {
    let user_id = user.0.clone();
    let sessions = state
        .db(move |store| store.sessions_for_user(&user_id))
        .await?;

    let today = Utc::now().date_naive();
    let stats = compute_stats(&sessions, today);

    tracing::debug!(
        user_id = %user.id(),
        sessions = sessions.len(),
        current_streak = stats.current_streak,
        "Computed study stats"
    );

    Ok(Json(stats))
}

/// POST /api/sessions
///
/// Store a finished session and announce it to dashboard listeners.
pub async fn record_session(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(req): Json<SessionRequest>,
) -> ApiResult<(StatusCode, Json<StudySession>)> {
    validate_session(&req)?;

    let session = StudySession {
        duration: req.duration,
        start_time: req.start_time,
        end_time: req.end_time,
        mode: req.mode.trim().to_string(),
    };

    let user_id = user.0.clone();
    let stored = session.clone();
    state
        .db(move |store| store.insert_session(&user_id, &stored))
        .await?;

    tracing::info!(
        user_id = %user.id(),
        duration = session.duration,
        mode = %session.mode,
        "Study session recorded"
    );

    state
        .hub
        .publish(WsEvent::session_completed(user.id(), &session));

    Ok((StatusCode::CREATED, Json(session)))
}

fn validate_session(req: &SessionRequest) -> ApiResult<()> {
    if req.duration == 0 {
        return Err(ApiError::Validation(
            "duration must be greater than 0".to_string(),
        ));
    }

    if req.end_time < req.start_time {
        return Err(ApiError::Validation(
            "endTime must not be before startTime".to_string(),
        ));
    }

    if req.duration > MAX_SESSION_SECS {
        return Err(ApiError::Validation(format!(
            "duration must be at most {} seconds",
            MAX_SESSION_SECS
        )));
    }

    // Whole seconds between the bounds, rounded up so sub-second jitter in
    // client timestamps is tolerated
    let elapsed_ms = (req.end_time - req.start_time).num_milliseconds();
    let elapsed_secs = u64::try_from(elapsed_ms).unwrap_or(0).div_ceil(1000);
    if req.duration > elapsed_secs {
        return Err(ApiError::Validation(
            "duration must not exceed the time between startTime and endTime".to_string(),
        ));
    }

    let mode = req.mode.trim();
    if mode.is_empty() {
        return Err(ApiError::Validation("mode is required".to_string()));
    }
    if mode.chars().count() > MAX_MODE_LEN {
        return Err(ApiError::Validation(format!(
            "mode must be at most {} characters",
            MAX_MODE_LEN
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn request(duration: u64, minutes: i64, mode: &str) -> SessionRequest {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        SessionRequest {
            duration,
            start_time: start,
            end_time: start + Duration::minutes(minutes),
            mode: mode.to_string(),
        }
    }

    #[test]
    fn test_validate_session() {
        assert!(validate_session(&request(1500, 25, "pomodoro")).is_ok());

        assert!(validate_session(&request(0, 25, "pomodoro")).is_err());
        assert!(validate_session(&request(1500, -5, "pomodoro")).is_err());
        assert!(validate_session(&request(1500, 25, "   ")).is_err());
        assert!(validate_session(&request(1500, 25, &"m".repeat(51))).is_err());
    }

    #[test]
    fn test_validate_session_duration_bounds() {
        // Longer than the interval it claims to cover
        assert!(validate_session(&request(1501, 25, "pomodoro")).is_err());
        assert!(validate_session(&request(u64::MAX, 25, "pomodoro")).is_err());
        assert!(validate_session(&request(i64::MAX as u64, 60 * 24 * 365, "pomodoro")).is_err());

        // Paused time makes the interval longer than the duration
        assert!(validate_session(&request(1500, 40, "pomodoro")).is_ok());
        assert!(validate_session(&request(MAX_SESSION_SECS, 60 * 24, "focus")).is_ok());
        assert!(validate_session(&request(MAX_SESSION_SECS + 1, 60 * 25, "focus")).is_err());
    }

    #[test]
    fn test_validate_session_tolerates_subsecond_jitter() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::milliseconds(500);
        let req = SessionRequest {
            duration: 1500,
            start_time: start,
            end_time: start + Duration::milliseconds(1_499_900),
            mode: "pomodoro".to_string(),
        };
        assert!(validate_session(&req).is_ok());
    }
}
