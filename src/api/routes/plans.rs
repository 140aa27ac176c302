//! Study Plan Routes
//!
//! - GET /api/study-plans - Active plans, newest id first
//! - POST /api/study-plans - Generate and store a plan
//! - DELETE /api/study-plans/:id - Deactivate a plan

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{CreatePlanRequest, DeleteResponse, PlansResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::CurrentUser;
use crate::api::routes::resources::enforce_rate_limit;
use crate::api::state::AppState;
use crate::curation::{normalize_subject, validate_plan_request, PlanRequest};
use crate::storage::{new_record_id, StudyPlan};
use crate::websocket::{ChangeKind, WsEvent};

/// GET /api/study-plans
pub async fn list_plans(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> ApiResult<Json<PlansResponse>> {
    let plans = state.db(move |store| store.list_active_plans(&user.0)).await?;
    Ok(Json(PlansResponse { plans }))
}

/// POST /api/study-plans
pub async fn create_plan(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(req): Json<CreatePlanRequest>,
) -> ApiResult<(StatusCode, Json<StudyPlan>)> {
    let request = PlanRequest {
        subject: normalize_subject(&req.subject)?,
        goal: req
            .goal
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty()),
        hours_per_week: req.hours_per_week,
        weeks: req.weeks,
    };

    // Invalid requests must not consume the rate limit
    validate_plan_request(&request)?;
    enforce_rate_limit(&state, user.id())?;

    let weeks = state.planner.generate(&request).await?;
    let plan = StudyPlan {
        id: new_record_id(),
        subject: request.subject,
        goal: request.goal,
        hours_per_week: request.hours_per_week,
        weeks,
        active: true,
        created_at: Utc::now(),
    };

    let stored = plan.clone();
    let user_id = user.0.clone();
    state
        .db(move |store| store.insert_plan(&user_id, &stored))
        .await?;

    tracing::info!(
        user_id = %user.id(),
        plan_id = %plan.id,
        subject = %plan.subject,
        weeks = plan.weeks.len(),
        planner = state.planner.name(),
        "Study plan created"
    );

    state
        .hub
        .publish(WsEvent::plans_changed(user.id(), ChangeKind::Created, &plan.id));

    Ok((StatusCode::CREATED, Json(plan)))
}

/// DELETE /api/study-plans/:id
///
/// Soft delete: the plan stays stored but is no longer listed.
pub async fn delete_plan(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let user_id = user.0.clone();
    let target = id.clone();
    let deactivated = state
        .db(move |store| store.deactivate_plan(&user_id, &target))
        .await?;

    if !deactivated {
        return Err(ApiError::NotFound(format!("Study plan '{}' not found", id)));
    }

    tracing::info!(user_id = %user.id(), plan_id = %id, "Study plan deactivated");

    state
        .hub
        .publish(WsEvent::plans_changed(user.id(), ChangeKind::Deleted, &id));

    Ok(Json(DeleteResponse::ok("Study plan deactivated successfully.")))
}
