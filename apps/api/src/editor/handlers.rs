use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::editor::dispatch::{Feedback, InputEvent};
use crate::editor::view::{BlockDisplay, DocumentView, OverlayView};
use crate::editor::Editor;
use crate::errors::AppError;
use crate::models::block::{BlockPatch, Divider, NewBlock, NewDivider, TextBlock};
use crate::state::AppState;
use crate::storage::autosave_key;

#[derive(Debug, Default, Deserialize)]
pub struct CreateDocumentRequest {
    #[serde(default)]
    pub seed_default_content: bool,
}

#[derive(Deserialize)]
pub struct BackgroundRequest {
    pub fill: String,
}

#[derive(Serialize)]
pub struct EventResponse {
    pub feedback: Feedback,
    pub overlay: OverlayView,
}

/// POST /api/v1/documents
pub async fn handle_create_document(
    State(state): State<AppState>,
    req: Option<Json<CreateDocumentRequest>>,
) -> Result<(StatusCode, Json<DocumentView>), AppError> {
    let req = req.map(|Json(r)| r).unwrap_or_default();

    let mut editor = Editor::new(state.config.editor_settings());
    if req.seed_default_content {
        editor.seed_default_content()?;
    }
    let view = editor.view();
    let id = state.editors.insert(editor)?;

    info!(document_id = %id, seeded = req.seed_default_content, "Document created");
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/documents/:id
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentView>, AppError> {
    let view = state.editors.with_editor(id, |editor| Ok(editor.view()))?;
    Ok(Json(view))
}

/// DELETE /api/v1/documents/:id
///
/// Drops the live editor and its auto-save slot.
pub async fn handle_delete_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .editors
        .remove(id)?
        .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))?;
    state.snapshots.delete(&autosave_key(id)).await?;

    info!(document_id = %id, "Document deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/documents/:id/reset
pub async fn handle_reset_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentView>, AppError> {
    let view = state.editors.with_editor(id, |editor| {
        editor.reset();
        Ok(editor.view())
    })?;
    Ok(Json(view))
}

/// PATCH /api/v1/documents/:id/background
pub async fn handle_set_background(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<BackgroundRequest>,
) -> Result<Json<DocumentView>, AppError> {
    let view = state.editors.with_editor(id, |editor| {
        editor.set_background_fill(&req.fill)?;
        Ok(editor.view())
    })?;
    Ok(Json(view))
}

/// POST /api/v1/documents/:id/blocks
pub async fn handle_add_block(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NewBlock>,
) -> Result<(StatusCode, Json<TextBlock>), AppError> {
    let block = state
        .editors
        .with_editor(id, |editor| Ok(editor.add_block(req)?))?;
    Ok((StatusCode::CREATED, Json(block)))
}

/// PATCH /api/v1/documents/:id/blocks/:block_id
pub async fn handle_update_block(
    State(state): State<AppState>,
    Path((id, block_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<BlockPatch>,
) -> Result<Json<TextBlock>, AppError> {
    let block = state
        .editors
        .with_editor(id, |editor| Ok(editor.update_block(block_id, patch)?))?;
    Ok(Json(block))
}

/// DELETE /api/v1/documents/:id/blocks/:block_id
pub async fn handle_delete_block(
    State(state): State<AppState>,
    Path((id, block_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    state
        .editors
        .with_editor(id, |editor| Ok(editor.delete_block(block_id)?))?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/documents/:id/dividers
pub async fn handle_add_divider(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NewDivider>,
) -> Result<(StatusCode, Json<Divider>), AppError> {
    let divider = state
        .editors
        .with_editor(id, |editor| Ok(editor.add_divider(req)?))?;
    Ok((StatusCode::CREATED, Json(divider)))
}

/// POST /api/v1/documents/:id/events
pub async fn handle_dispatch_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(event): Json<InputEvent>,
) -> Result<Json<EventResponse>, AppError> {
    let response = state.editors.with_editor(id, |editor| {
        let feedback = editor.dispatch(event)?;
        Ok(EventResponse {
            feedback,
            overlay: editor.overlay_view(),
        })
    })?;
    Ok(Json(response))
}

/// GET /api/v1/documents/:id/overlay
pub async fn handle_get_overlay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OverlayView>, AppError> {
    let overlay = state
        .editors
        .with_editor(id, |editor| Ok(editor.overlay_view()))?;
    Ok(Json(overlay))
}

/// GET /api/v1/documents/:id/blocks/:block_id/display
pub async fn handle_block_display(
    State(state): State<AppState>,
    Path((id, block_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BlockDisplay>, AppError> {
    let display = state
        .editors
        .with_editor(id, |editor| Ok(editor.block_display(block_id)?))?;
    Ok(Json(display))
}
