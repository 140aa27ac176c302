//! Request extractors
//!
//! `CurrentUser` resolves who a request is for: the `X-User-Id` header, or
//! the configured default user when the header is absent.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

const MAX_USER_ID_LEN: usize = 64;

/// The user a request acts on behalf of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub String);

impl CurrentUser {
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Letters, digits, and `-_.@`, at most 64 characters
pub fn is_valid_user_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_USER_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'))
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(CurrentUser(state.config.users.default_user_id.clone()));
        };

        let id = value
            .to_str()
            .map_err(|_| ApiError::Validation("X-User-Id must be ASCII".to_string()))?
            .trim();

        if !is_valid_user_id(id) {
            return Err(ApiError::Validation(format!("Invalid X-User-Id: '{}'", id)));
        }

        Ok(CurrentUser(id.to_string()))
    }
}
