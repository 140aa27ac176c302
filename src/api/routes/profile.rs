//! Profile Routes
//!
//! - GET /api/user/profile - Current profile (created from defaults on first read)
//! - PUT /api/user/profile - Update the display name

use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::ProfileRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::CurrentUser;
use crate::api::state::AppState;
use crate::storage::User;

pub const MAX_NAME_LEN: usize = 100;

/// GET /api/user/profile
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> ApiResult<Json<User>> {
    let user_id = user.0.clone();
    let existing = state.db(move |store| store.get_user(&user_id)).await?;

    let profile = match existing {
        Some(profile) => profile,
        None => {
            let profile = User {
                id: user.0.clone(),
                name: state.config.users.default_name.clone(),
                email: state.config.users.default_email.clone(),
                created_at: Utc::now(),
            };
            let stored = profile.clone();
            state.db(move |store| store.upsert_user(&stored)).await?;
            tracing::info!(user_id = %user.id(), "Created default profile");
            profile
        }
    };

    Ok(Json(profile))
}

/// PUT /api/user/profile
///
/// The email is fixed once set; a different non-empty stored email rejects
/// the update.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(req): Json<ProfileRequest>,
) -> ApiResult<Json<User>> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("name is required".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ApiError::Validation(format!(
            "name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    let email = req.email.trim();

    let user_id = user.0.clone();
    let existing = state.db(move |store| store.get_user(&user_id)).await?;

    let profile = match existing {
        Some(current) => {
            if !current.email.is_empty() && !current.email.eq_ignore_ascii_case(email) {
                return Err(ApiError::Validation("email cannot be changed".to_string()));
            }
            User {
                name: name.to_string(),
                email: if current.email.is_empty() {
                    email.to_string()
                } else {
                    current.email
                },
                ..current
            }
        }
        None => User {
            id: user.0.clone(),
            name: name.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        },
    };

    let stored = profile.clone();
    state.db(move |store| store.upsert_user(&stored)).await?;

    tracing::info!(user_id = %user.id(), "Profile updated");
    Ok(Json(profile))
}
