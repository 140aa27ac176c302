//! PDF Document Routes
//!
//! - GET /api/pdf - List uploaded documents
//! - POST /api/pdf/upload - Upload a PDF (multipart field `pdf`, max 10 MB)
//! - DELETE /api/pdf?id= - Delete a document and its file

use axum::{
    extract::{multipart::MultipartError, Multipart, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{PdfDeleteQuery, SuccessResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::CurrentUser;
use crate::api::state::AppState;
use crate::pdf::{self, UploadError};
use crate::storage::{new_record_id, PdfDocument};

/// Multipart field carrying the file
pub const UPLOAD_FIELD: &str = "pdf";

/// GET /api/pdf
pub async fn list_documents(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<PdfDocument>>> {
    let docs = state.db(move |store| store.list_pdfs(&user.0)).await?;
    Ok(Json(docs))
}

/// POST /api/pdf/upload
///
/// Returns the stored document so the page can append it to its list.
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<PdfDocument>)> {
    let limit = state.config.api.max_upload_bytes;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let filename = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        pdf::validate_upload(content_type.as_deref(), bytes.len(), limit).map_err(upload_error)?;
        if !pdf::has_pdf_magic(&bytes) {
            return Err(upload_error(UploadError::NotPdf));
        }

        let doc = PdfDocument {
            id: new_record_id(),
            title: pdf::title_from_filename(filename.as_deref()),
            page_count: pdf::count_pages(&bytes),
            size_bytes: bytes.len() as u64,
            created_at: Utc::now(),
        };

        let stored = doc.clone();
        let user_id = user.0.clone();
        state
            .db(move |store| store.save_pdf(&user_id, &stored, &bytes))
            .await?;

        tracing::info!(
            user_id = %user.id(),
            document_id = %doc.id,
            pages = doc.page_count,
            size_bytes = doc.size_bytes,
            "PDF uploaded"
        );

        return Ok((StatusCode::CREATED, Json(doc)));
    }

    Err(ApiError::Validation(format!(
        "No file provided in field '{}'",
        UPLOAD_FIELD
    )))
}

/// DELETE /api/pdf?id=
pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Query(query): Query<PdfDeleteQuery>,
) -> ApiResult<Json<SuccessResponse>> {
    let id = query.id;
    let user_id = user.0.clone();
    let target = id.clone();
    let deleted = state
        .db(move |store| store.delete_pdf(&user_id, &target))
        .await?;

    if !deleted {
        return Err(ApiError::NotFound(format!("Document '{}' not found", id)));
    }

    tracing::info!(user_id = %user.id(), document_id = %id, "PDF deleted");
    Ok(Json(SuccessResponse { success: true }))
}

fn upload_error(err: UploadError) -> ApiError {
    match err {
        UploadError::TooLarge => ApiError::PayloadTooLarge(err.to_string()),
        UploadError::NotPdf | UploadError::Empty => ApiError::Validation(err.to_string()),
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(UploadError::TooLarge.to_string())
    } else {
        ApiError::Validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}
