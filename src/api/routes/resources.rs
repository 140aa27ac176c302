//! Curated Resource Routes
//!
//! - GET /api/resources - List curated sets, newest first
//! - POST /api/resources - Curate a set for a subject
//! - DELETE /api/resources/:id - Delete a set

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{CreateResourcesRequest, DeleteResponse, ResourcesResponse};
use crate::api::error::{ApiError, ApiResult, RESOURCE_EXISTS};
use crate::api::extract::CurrentUser;
use crate::api::state::AppState;
use crate::curation::{normalize_subject, retry_after_secs};
use crate::storage::{new_record_id, CuratedResource, StorageError};
use crate::websocket::{ChangeKind, WsEvent};

/// GET /api/resources
pub async fn list_resources(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> ApiResult<Json<ResourcesResponse>> {
    let resources = state.db(move |store| store.list_resources(&user.0)).await?;
    Ok(Json(ResourcesResponse { resources }))
}

/// POST /api/resources
///
/// 409 `RESOURCE_EXISTS` when the user already has a set for the subject or
/// another request is curating it, 429 when the curation limit is spent.
pub async fn create_resources(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(req): Json<CreateResourcesRequest>,
) -> ApiResult<(StatusCode, Json<CuratedResource>)> {
    let subject = normalize_subject(&req.subject)?;

    // Held until the insert lands so a double submit neither curates twice
    // nor spends the budget twice
    let Some(_claim) = state.claims.claim(user.id(), &subject) else {
        return Err(resource_exists(&subject));
    };

    let user_id = user.0.clone();
    let topic = subject.clone();
    let existing = state
        .db(move |store| store.find_resource_by_topic(&user_id, &topic))
        .await?;
    if let Some(existing) = existing {
        return Err(resource_exists(&existing.topic));
    }

    enforce_rate_limit(&state, user.id())?;

    let links = state.curator.curate(&subject).await?;
    let resource = CuratedResource {
        id: new_record_id(),
        topic: subject,
        resources: links,
        created_at: Utc::now(),
    };

    let stored = resource.clone();
    let user_id = user.0.clone();
    state
        .db(move |store| store.insert_resource(&user_id, &stored))
        .await
        .map_err(|e| match e {
            ApiError::Storage(StorageError::Duplicate(_)) => resource_exists(&resource.topic),
            other => other,
        })?;

    tracing::info!(
        user_id = %user.id(),
        resource_id = %resource.id,
        topic = %resource.topic,
        links = resource.resources.len(),
        curator = state.curator.name(),
        "Curated resources created"
    );

    state.hub.publish(WsEvent::resources_changed(
        user.id(),
        ChangeKind::Created,
        &resource.id,
    ));

    Ok((StatusCode::CREATED, Json(resource)))
}

/// DELETE /api/resources/:id
pub async fn delete_resource(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let user_id = user.0.clone();
    let target = id.clone();
    let deleted = state
        .db(move |store| store.delete_resource(&user_id, &target))
        .await?;

    if !deleted {
        return Err(ApiError::NotFound(format!("Resource '{}' not found", id)));
    }

    state
        .hub
        .publish(WsEvent::resources_changed(user.id(), ChangeKind::Deleted, &id));

    Ok(Json(DeleteResponse::ok("Resource deleted successfully")))
}

fn resource_exists(topic: &str) -> ApiError {
    ApiError::Conflict {
        code: RESOURCE_EXISTS,
        message: format!("You already have resources for {}", topic),
    }
}

/// Charge one curation request against the user's budget.
/// Resources and plans share the budget.
pub(crate) fn enforce_rate_limit(state: &AppState, user_id: &str) -> ApiResult<()> {
    state.limiter.check(user_id).map_err(|wait| {
        let retry_after = retry_after_secs(wait);
        tracing::warn!(user_id = %user_id, retry_after, "Curation rate limit exceeded");
        ApiError::RateLimited { retry_after }
    })
}
