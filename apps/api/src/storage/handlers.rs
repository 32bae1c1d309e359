use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::storage::{autosave_key, Snapshot};

fn require_document(state: &AppState, id: Uuid) -> Result<(), AppError> {
    if state.editors.contains(id)? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("Document {id} not found")))
    }
}

/// PUT /api/v1/documents/:id/snapshot
pub async fn handle_put_snapshot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<Value>,
) -> Result<Json<Snapshot>, AppError> {
    require_document(&state, id)?;
    let snapshot = state.snapshots.put(&autosave_key(id), payload).await?;
    debug!(document_id = %id, "Auto-saved");
    Ok(Json(snapshot))
}

/// GET /api/v1/documents/:id/snapshot
pub async fn handle_get_snapshot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Snapshot>, AppError> {
    require_document(&state, id)?;
    let snapshot = state
        .snapshots
        .get(&autosave_key(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No snapshot saved for document {id}")))?;
    Ok(Json(snapshot))
}

/// DELETE /api/v1/documents/:id/snapshot
pub async fn handle_delete_snapshot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    require_document(&state, id)?;
    state.snapshots.delete(&autosave_key(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
