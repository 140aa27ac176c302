//! Design System Route
//!
//! - GET /api/design-system - Static design tokens

use axum::Json;

use crate::design::{design_tokens, DesignTokens};

/// GET /api/design-system
pub async fn get_design_tokens() -> Json<DesignTokens> {
    Json(design_tokens())
}
