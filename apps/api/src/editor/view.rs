//! Read-only snapshots of an editor, shaped for the browser surface.

use serde::Serialize;
use uuid::Uuid;

use crate::editor::decorations::DecorationView;
use crate::editor::{Editor, EditorError};
use crate::links::rewrite::{rewrite_for_display, DisplayText};
use crate::models::block::{Divider, TextBlock};
use crate::models::document::Background;
use crate::snap::engine::AlignmentGuide;
use crate::snap::overlay::{GridOverlay, LineRequest};

#[derive(Debug, Clone, Serialize)]
pub struct DocumentView {
    pub id: Uuid,
    pub blocks: Vec<TextBlock>,
    pub dividers: Vec<Divider>,
    pub background: Background,
    pub selected: Option<Uuid>,
    pub hovered: Option<Uuid>,
    pub editing: Option<Uuid>,
    pub dragging: Option<Uuid>,
    pub guides_enabled: bool,
    pub decorations: Vec<DecorationView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverlayView {
    pub grid: Option<GridOverlay>,
    pub guides: Vec<AlignmentGuide>,
    /// Ready-to-draw lines: grid first, guides on top.
    pub lines: Vec<LineRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockDisplay {
    pub block_id: Uuid,
    #[serde(flatten)]
    pub display: DisplayText,
}

impl Editor {
    pub fn view(&self) -> DocumentView {
        let document = self.document();
        DocumentView {
            id: self.id(),
            blocks: document.blocks().to_vec(),
            dividers: document.dividers().to_vec(),
            background: document.background().clone(),
            selected: self.selected(),
            hovered: self.hovered(),
            editing: self.editing(),
            dragging: self.dragging(),
            guides_enabled: self.guides_enabled(),
            decorations: self.decorations.views(document),
        }
    }

    pub fn overlay_view(&self) -> OverlayView {
        let overlay = self.overlay();
        let background = self.document().background();
        OverlayView {
            grid: overlay.grid().copied(),
            guides: overlay.guides().to_vec(),
            lines: overlay.render_requests(background.width, background.height),
        }
    }

    /// Block text with profile URLs replaced by their labels.
    pub fn block_display(&self, id: Uuid) -> Result<BlockDisplay, EditorError> {
        let block = self
            .document()
            .block(id)
            .ok_or(EditorError::BlockNotFound(id))?;
        Ok(BlockDisplay {
            block_id: id,
            display: rewrite_for_display(&block.text),
        })
    }
}
