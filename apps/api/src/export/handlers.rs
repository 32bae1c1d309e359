use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{render_pdf, ExportError};
use crate::models::block::{Divider, FontStyle};
use crate::models::document::Background;
use crate::state::AppState;

/// POST /api/v1/documents/:id/export
///
/// Clones the blocks under the registry lock, then serializes on the blocking pool.
/// The editor is never mutated; selection and hover are not part of the output.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let blocks = state
        .editors
        .with_editor(id, |editor| Ok(editor.document().blocks().to_vec()))?;
    let layout = state.config.page_layout();

    info!(document_id = %id, blocks = blocks.len(), "Generating PDF...");

    let (bytes, summary) = tokio::task::spawn_blocking(move || render_pdf(&blocks, &layout))
        .await
        .map_err(|e| ExportError::Task(format!("spawn_blocking failed in export: {e}")))??;

    info!(
        document_id = %id,
        pages = summary.pages,
        lines = summary.lines,
        links = summary.links,
        bytes = bytes.len(),
        "Resume exported"
    );

    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.config.export_filename
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// One block as it appears in a saved template.
#[derive(Debug, Serialize)]
pub struct TemplateSection {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub section_type: String,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub font_style: FontStyle,
}

#[derive(Debug, Serialize)]
pub struct ResumeData {
    pub sections: Vec<TemplateSection>,
    pub dividers: Vec<Divider>,
    pub background: Background,
}

#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub resume_data: ResumeData,
    pub timestamp: DateTime<Utc>,
}

/// GET /api/v1/documents/:id/template
pub async fn handle_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TemplateResponse>, AppError> {
    let resume_data = state.editors.with_editor(id, |editor| {
        let document = editor.document();
        Ok(ResumeData {
            sections: document
                .blocks()
                .iter()
                .map(|block| TemplateSection {
                    id: block.id,
                    section_type: block.section_type.clone(),
                    text: block.text.clone(),
                    x: block.position.x,
                    y: block.position.y,
                    font_size: block.font_size,
                    font_style: block.font_style,
                })
                .collect(),
            dividers: document.dividers().to_vec(),
            background: document.background().clone(),
        })
    })?;

    Ok(Json(TemplateResponse {
        resume_data,
        timestamp: Utc::now(),
    }))
}
