//! Notes Routes
//!
//! - GET /api/notes - List notes, most recently updated first
//! - POST /api/notes - Create a note
//! - PUT /api/notes/:id - Update title and/or content
//! - DELETE /api/notes/:id - Delete a note

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{CreateNoteRequest, UpdateNoteRequest};
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::CurrentUser;
use crate::api::state::AppState;
use crate::storage::Note;

pub const MAX_TITLE_LEN: usize = 200;

/// GET /api/notes
///
/// Returns a bare array, which is what the notes page expects.
pub async fn list_notes(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<Note>>> {
    let notes = state.db(move |store| store.list_notes(&user.0)).await?;
    Ok(Json(notes))
}

/// POST /api/notes
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(req): Json<CreateNoteRequest>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let title = validate_title(&req.title)?;

    if let Some(parent_id) = req.parent_id.clone() {
        let user_id = user.0.clone();
        let parent = state
            .db(move |store| store.get_note(&user_id, &parent_id))
            .await?;
        if parent.is_none() {
            return Err(ApiError::Validation(
                "parentId does not refer to an existing note".to_string(),
            ));
        }
    }

    let note = Note::new(title, req.content, req.parent_id);
    let stored = note.clone();
    let user_id = user.0.clone();
    state
        .db(move |store| store.insert_note(&user_id, &stored))
        .await?;

    tracing::info!(user_id = %user.id(), note_id = %note.id, "Note created");

    Ok((StatusCode::CREATED, Json(note)))
}

/// PUT /api/notes/:id
pub async fn update_note(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateNoteRequest>,
) -> ApiResult<Json<Note>> {
    let user_id = user.0.clone();
    let lookup = id.clone();
    let mut note = state
        .db(move |store| store.get_note(&user_id, &lookup))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Note '{}' not found", id)))?;

    if let Some(title) = req.title {
        note.title = validate_title(&title)?;
    }
    if let Some(content) = req.content {
        note.content = content;
    }
    note.updated_at = Utc::now();

    let stored = note.clone();
    let user_id = user.0.clone();
    let updated = state
        .db(move |store| store.update_note(&user_id, &stored))
        .await?;
    if !updated {
        return Err(ApiError::NotFound(format!("Note '{}' not found", id)));
    }

    Ok(Json(note))
}

/// DELETE /api/notes/:id
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let user_id = user.0.clone();
    let target = id.clone();
    let deleted = state
        .db(move |store| store.delete_note(&user_id, &target))
        .await?;

    if !deleted {
        return Err(ApiError::NotFound(format!("Note '{}' not found", id)));
    }

    tracing::info!(user_id = %user.id(), note_id = %id, "Note deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn validate_title(title: &str) -> ApiResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ApiError::Validation("title is required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ApiError::Validation(format!(
            "title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }
    Ok(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title("  Lecture 3 ").unwrap(), "Lecture 3");
        assert!(validate_title("").is_err());
        assert!(validate_title(&"x".repeat(201)).is_err());
        assert!(validate_title(&"x".repeat(200)).is_ok());
    }
}
