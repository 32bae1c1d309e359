use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::links::rewrite::{rewrite_for_display, DisplayText};

#[derive(Deserialize)]
pub struct RewriteRequest {
    pub text: String,
}

/// POST /api/v1/links/rewrite
pub async fn handle_rewrite(Json(req): Json<RewriteRequest>) -> Result<Json<DisplayText>, AppError> {
    Ok(Json(rewrite_for_display(&req.text)))
}
