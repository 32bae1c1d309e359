// Editor
// Implements: the live document, block lifecycle, drag gestures with snapping, guide toggle,
// selection/hover decorations and the single input-event router.
// Every operation is synchronous and runs to completion against &mut Editor.

pub mod decorations;
pub mod dispatch;
pub mod handlers;
pub mod view;

use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::editor::decorations::{DecorationKind, DecorationRegistry};
use crate::geometry::{bounding_box, BoundingBox, Point};
use crate::layout::flow::{next_free_y, PLACEMENT_PADDING};
use crate::models::block::{
    BlockPatch, Divider, FontStyle, NewBlock, NewDivider, TextBlock, DEFAULT_FILL_COLOR,
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE,
};
use crate::models::document::Document;
use crate::snap::{DragGesture, Overlay, SnapConfig, SnapEngine};

pub const DEFAULT_DIVIDER_STROKE: &str = "#666666";
/// New blocks wrap at the canvas width minus this.
const BLOCK_WIDTH_INSET: f64 = 100.0;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("block {0} not found")]
    BlockNotFound(Uuid),

    #[error("invalid block: {0}")]
    InvalidBlock(String),

    #[error("invalid divider: {0}")]
    InvalidDivider(String),

    #[error("block {0} is not being dragged")]
    NotDragging(Uuid),

    #[error("block {0} is being edited")]
    BlockEditing(Uuid),

    #[error("invalid background: {0}")]
    InvalidBackground(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorSettings {
    pub canvas_width: f64,
    pub min_canvas_height: f64,
    pub snap: SnapConfig,
}

impl Default for EditorSettings {
    fn default() -> Self {
        EditorSettings {
            canvas_width: 800.0,
            min_canvas_height: 1000.0,
            snap: SnapConfig::default(),
        }
    }
}

/// One live editing session over one document.
#[derive(Debug)]
pub struct Editor {
    id: Uuid,
    settings: EditorSettings,
    document: Document,
    engine: SnapEngine,
    overlay: Overlay,
    gesture: DragGesture,
    decorations: DecorationRegistry,
    guides_enabled: bool,
    editing: Option<Uuid>,
}

impl Editor {
    pub fn new(settings: EditorSettings) -> Self {
        Editor {
            id: Uuid::new_v4(),
            settings,
            document: Document::new(settings.canvas_width, settings.min_canvas_height),
            engine: SnapEngine::new(settings.snap),
            overlay: Overlay::default(),
            gesture: DragGesture::default(),
            decorations: DecorationRegistry::default(),
            guides_enabled: true,
            editing: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn guides_enabled(&self) -> bool {
        self.guides_enabled
    }

    pub fn selected(&self) -> Option<Uuid> {
        self.decorations.holder(DecorationKind::Selection)
    }

    pub fn hovered(&self) -> Option<Uuid> {
        self.decorations.holder(DecorationKind::Hover)
    }

    pub fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    pub fn dragging(&self) -> Option<Uuid> {
        self.gesture.active_block()
    }

    // ────────────────────────────────────────────────────────────────────────
    // Document lifecycle
    // ────────────────────────────────────────────────────────────────────────

    /// Adds the starter header, subtitle and contact line.
    pub fn seed_default_content(&mut self) -> Result<(), EditorError> {
        let seeds = [
            NewBlock::new("header", "Your Name", 50.0, 50.0).with_font(32.0, FontStyle::Bold),
            NewBlock::new("subtitle", "Software Developer", 50.0, 90.0)
                .with_font(18.0, FontStyle::Normal),
            NewBlock::new(
                "contact",
                "email@example.com | (123) 456-7890 | linkedin.com/in/yourname",
                50.0,
                120.0,
            )
            .with_font(14.0, FontStyle::Normal),
        ];
        for seed in seeds {
            self.add_block(seed)?;
        }
        Ok(())
    }

    /// Removes every block and divider and drops all transient state.
    pub fn reset(&mut self) {
        self.document.clear();
        self.decorations.clear();
        self.overlay.clear();
        self.gesture = DragGesture::Idle;
        self.editing = None;
        self.refresh_height();
        info!(document_id = %self.id, "Document reset");
    }

    pub fn set_background_fill(&mut self, fill: &str) -> Result<(), EditorError> {
        let fill = fill.trim();
        if fill.is_empty() {
            return Err(EditorError::InvalidBackground(
                "fill must not be empty".to_string(),
            ));
        }
        self.document.set_background_fill(fill);
        Ok(())
    }

    // ────────────────────────────────────────────────────────────────────────
    // Blocks
    // ────────────────────────────────────────────────────────────────────────

    /// Creates a block. Without an explicit `y` it is placed below all content.
    pub fn add_block(&mut self, new: NewBlock) -> Result<TextBlock, EditorError> {
        let y = match new.y {
            Some(y) => y,
            None => next_free_y(
                self.document.blocks(),
                self.document.dividers(),
                PLACEMENT_PADDING,
            ),
        };
        let block = TextBlock {
            id: Uuid::new_v4(),
            text: new.text,
            position: Point::new(new.x, y),
            box_width: new
                .box_width
                .unwrap_or(self.settings.canvas_width - BLOCK_WIDTH_INSET),
            font_size: new.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            font_family: new
                .font_family
                .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
            font_style: new.font_style.unwrap_or_default(),
            fill_color: new
                .fill_color
                .unwrap_or_else(|| DEFAULT_FILL_COLOR.to_string()),
            section_type: new.section_type,
            rendered_height: None,
        };
        validate_block(&block)?;

        info!(
            document_id = %self.id,
            block_id = %block.id,
            section_type = %block.section_type,
            y = block.position.y,
            "Block added"
        );
        self.document.push_block(block.clone());
        self.refresh_height();
        Ok(block)
    }

    /// Applies a partial update. Changes to text or font drop the reported
    /// rendered height unless the same patch reports a new one.
    pub fn update_block(&mut self, id: Uuid, patch: BlockPatch) -> Result<TextBlock, EditorError> {
        let current = self
            .document
            .block(id)
            .ok_or(EditorError::BlockNotFound(id))?;

        let mut updated = current.clone();
        let invalidates = patch.invalidates_measurement();
        if let Some(text) = patch.text {
            updated.text = text;
        }
        if let Some(x) = patch.x {
            updated.position.x = x;
        }
        if let Some(y) = patch.y {
            updated.position.y = y;
        }
        if let Some(font_size) = patch.font_size {
            updated.font_size = font_size;
        }
        if let Some(font_family) = patch.font_family {
            updated.font_family = font_family;
        }
        if let Some(font_style) = patch.font_style {
            updated.font_style = font_style;
        }
        if let Some(fill_color) = patch.fill_color {
            updated.fill_color = fill_color;
        }
        if let Some(box_width) = patch.box_width {
            updated.box_width = box_width;
        }
        match patch.rendered_height {
            Some(height) => updated.rendered_height = Some(height),
            None if invalidates => updated.rendered_height = None,
            None => {}
        }
        validate_block(&updated)?;

        if let Some(block) = self.document.block_mut(id) {
            *block = updated.clone();
        }
        self.refresh_height();
        Ok(updated)
    }

    /// Deletes a block together with its decorations and any gesture on it.
    pub fn delete_block(&mut self, id: Uuid) -> Result<TextBlock, EditorError> {
        let removed = self
            .document
            .remove_block(id)
            .ok_or(EditorError::BlockNotFound(id))?;

        self.decorations.forget_block(id);
        if self.gesture.is_dragging(id) {
            self.gesture.settle();
            self.overlay.clear();
        }
        if self.editing == Some(id) {
            self.editing = None;
        }
        self.refresh_height();

        info!(document_id = %self.id, block_id = %id, "Block deleted");
        Ok(removed)
    }

    pub fn add_divider(&mut self, new: NewDivider) -> Result<Divider, EditorError> {
        if !(new.y.is_finite() && new.x_start.is_finite() && new.x_end.is_finite()) {
            return Err(EditorError::InvalidDivider(
                "coordinates must be finite".to_string(),
            ));
        }
        let divider = Divider {
            id: Uuid::new_v4(),
            y: new.y,
            x_start: new.x_start,
            x_end: new.x_end,
            stroke_color: new
                .stroke_color
                .unwrap_or_else(|| DEFAULT_DIVIDER_STROKE.to_string()),
        };
        self.document.push_divider(divider.clone());
        self.refresh_height();
        Ok(divider)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Selection, hover, hit-testing
    // ────────────────────────────────────────────────────────────────────────

    /// Topmost block under `point`. Later blocks are drawn above earlier ones.
    pub fn hit_test(&self, point: Point) -> Option<Uuid> {
        self.document
            .blocks()
            .iter()
            .rev()
            .find(|block| bounding_box(block).contains(point))
            .map(|block| block.id)
    }

    pub fn select(&mut self, id: Uuid) -> Result<(), EditorError> {
        self.require_block(id)?;
        // a selected block shows the selection highlight only
        if self.decorations.has(id, DecorationKind::Hover) {
            self.decorations.remove_kind(DecorationKind::Hover);
        }
        self.decorations.assign(id, DecorationKind::Selection);
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.decorations.remove_kind(DecorationKind::Selection);
    }

    /// Moves the hover highlight to `id`, or clears it with `None`. The selected
    /// block never gets a hover highlight.
    pub fn hover(&mut self, id: Option<Uuid>) {
        match id {
            Some(id) if self.selected() != Some(id) => {
                self.decorations.assign(id, DecorationKind::Hover)
            }
            _ => self.decorations.remove_kind(DecorationKind::Hover),
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Guides
    // ────────────────────────────────────────────────────────────────────────

    /// Flips guide display and snapping. Returns the new state.
    pub fn toggle_guides(&mut self) -> bool {
        self.guides_enabled = !self.guides_enabled;
        if !self.guides_enabled {
            self.overlay.clear();
        }
        debug!(document_id = %self.id, enabled = self.guides_enabled, "Guides toggled");
        self.guides_enabled
    }

    // ────────────────────────────────────────────────────────────────────────
    // Drag gesture
    // ────────────────────────────────────────────────────────────────────────

    /// Starts dragging `id`. Selects it and shows the grid when guides are on.
    /// A drag already in progress on another block is cancelled first.
    pub fn begin_drag(&mut self, id: Uuid) -> Result<(), EditorError> {
        let origin = self.require_block(id)?.position;
        if self.editing == Some(id) {
            return Err(EditorError::BlockEditing(id));
        }
        if let Some(previous) = self.gesture.active_block() {
            if previous != id {
                self.cancel_drag(previous)?;
            }
        }

        self.select(id)?;
        self.overlay.clear();
        if self.guides_enabled {
            self.overlay.show_grid(
                self.engine.config().grid_size(),
                self.settings.canvas_width,
                self.document.background().height,
            );
        }
        self.gesture.start(id, origin);
        Ok(())
    }

    /// Moves the dragged block to `position` and refreshes the guides.
    ///
    /// Returns whether releasing here would snap, for the cursor affordance.
    pub fn drag_move(&mut self, id: Uuid, position: Point) -> Result<bool, EditorError> {
        if !self.gesture.is_dragging(id) {
            return Err(EditorError::NotDragging(id));
        }
        if !(position.x.is_finite() && position.y.is_finite()) {
            return Err(EditorError::InvalidBlock(
                "position must be finite".to_string(),
            ));
        }
        let block = self
            .document
            .block_mut(id)
            .ok_or(EditorError::BlockNotFound(id))?;
        block.position = position;

        let (active, others) = self.snap_inputs(id)?;
        if self.guides_enabled {
            let guides = self.engine.compute_alignment_guides(&active, &others);
            self.overlay.replace_guides(guides);
        }
        Ok(self.engine.can_snap(&active, &others))
    }

    /// Releases the drag: snaps once when guides are on, then clears the overlay.
    /// Returns the block's final position.
    pub fn end_drag(&mut self, id: Uuid) -> Result<Point, EditorError> {
        if !self.gesture.is_dragging(id) {
            return Err(EditorError::NotDragging(id));
        }
        self.gesture.settle();
        self.overlay.clear();

        let (active, others) = self.snap_inputs(id)?;
        let position = if self.guides_enabled {
            self.engine.commit_snap(&active, &others)
        } else {
            Point::new(active.x, active.y)
        };
        if let Some(block) = self.document.block_mut(id) {
            block.position = position;
        }
        self.refresh_height();

        debug!(
            document_id = %self.id,
            block_id = %id,
            from_x = active.x,
            from_y = active.y,
            x = position.x,
            y = position.y,
            "Drag settled"
        );
        Ok(position)
    }

    /// Abandons the drag and puts the block back where it started.
    pub fn cancel_drag(&mut self, id: Uuid) -> Result<Point, EditorError> {
        if !self.gesture.is_dragging(id) {
            return Err(EditorError::NotDragging(id));
        }
        let origin = match self.gesture.settle() {
            Some((_, origin)) => origin,
            None => return Err(EditorError::NotDragging(id)),
        };
        self.overlay.clear();
        if let Some(block) = self.document.block_mut(id) {
            block.position = origin;
        }
        Ok(origin)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Inline text editing
    // ────────────────────────────────────────────────────────────────────────

    /// Enters text-edit mode on a block. Keyboard shortcuts and dragging of that
    /// block are suspended until `end_edit`.
    pub fn begin_edit(&mut self, id: Uuid) -> Result<(), EditorError> {
        self.require_block(id)?;
        if self.gesture.is_dragging(id) {
            self.cancel_drag(id)?;
        }
        self.editing = Some(id);
        Ok(())
    }

    /// Leaves text-edit mode, committing `text` when given.
    pub fn end_edit(
        &mut self,
        id: Uuid,
        text: Option<String>,
    ) -> Result<Option<TextBlock>, EditorError> {
        if self.editing != Some(id) {
            return Err(EditorError::InvalidBlock(format!(
                "block {id} is not in edit mode"
            )));
        }
        let updated = match text {
            Some(text) => {
                let patch = BlockPatch {
                    text: Some(text),
                    ..Default::default()
                };
                Some(self.update_block(id, patch)?)
            }
            None => None,
        };
        self.editing = None;
        Ok(updated)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Internals
    // ────────────────────────────────────────────────────────────────────────

    fn require_block(&self, id: Uuid) -> Result<&TextBlock, EditorError> {
        self.document.block(id).ok_or(EditorError::BlockNotFound(id))
    }

    /// Bounding box of `id` and of every other block, in document order.
    fn snap_inputs(&self, id: Uuid) -> Result<(BoundingBox, Vec<BoundingBox>), EditorError> {
        let active = bounding_box(self.require_block(id)?);
        let others = self
            .document
            .blocks()
            .iter()
            .filter(|b| b.id != id)
            .map(bounding_box)
            .collect();
        Ok((active, others))
    }

    fn refresh_height(&mut self) {
        self.document.recompute_height(self.settings.min_canvas_height);
    }
}

fn validate_block(block: &TextBlock) -> Result<(), EditorError> {
    if !(block.position.x.is_finite() && block.position.y.is_finite()) {
        return Err(EditorError::InvalidBlock(
            "position must be finite".to_string(),
        ));
    }
    if !(block.font_size.is_finite() && block.font_size > 0.0) {
        return Err(EditorError::InvalidBlock(format!(
            "font_size must be positive, got {}",
            block.font_size
        )));
    }
    if !(block.box_width.is_finite() && block.box_width >= 0.0) {
        return Err(EditorError::InvalidBlock(format!(
            "box_width must not be negative, got {}",
            block.box_width
        )));
    }
    if let Some(height) = block.rendered_height {
        if !(height.is_finite() && height >= 0.0) {
            return Err(EditorError::InvalidBlock(format!(
                "rendered_height must not be negative, got {height}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_editor() -> Editor {
        Editor::new(EditorSettings::default())
    }

    fn make_block(editor: &mut Editor, text: &str, x: f64, y: f64) -> Uuid {
        let mut new = NewBlock::new("body", text, x, y);
        new.box_width = Some(200.0);
        editor.add_block(new).unwrap().id
    }

    #[test]
    fn test_seed_default_content() {
        let mut editor = make_editor();
        editor.seed_default_content().unwrap();
        let blocks = editor.document().blocks();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].text, "Your Name");
        assert_eq!(blocks[0].font_size, 32.0);
        assert_eq!(blocks[0].font_style, FontStyle::Bold);
        assert_eq!(blocks[0].box_width, 700.0);
        assert_eq!(blocks[2].section_type, "contact");
        assert_eq!(editor.document().background().height, 1000.0);
    }

    #[test]
    fn test_add_block_without_y_goes_below_content() {
        let mut editor = make_editor();
        let block = editor
            .add_block(NewBlock {
                y: None,
                ..NewBlock::new("skills", "SKILLS", 50.0, 0.0)
            })
            .unwrap();
        // empty document: max(150, nothing) + 50
        assert_eq!(block.position.y, 200.0);
    }

    #[test]
    fn test_add_block_rejects_negative_width_and_zero_font() {
        let mut editor = make_editor();
        let mut new = NewBlock::new("body", "x", 0.0, 0.0);
        new.box_width = Some(-1.0);
        assert!(matches!(
            editor.add_block(new),
            Err(EditorError::InvalidBlock(_))
        ));

        let new = NewBlock::new("body", "x", 0.0, 0.0).with_font(0.0, FontStyle::Normal);
        assert!(matches!(
            editor.add_block(new),
            Err(EditorError::InvalidBlock(_))
        ));
        assert!(editor.document().blocks().is_empty());
    }

    #[test]
    fn test_update_clears_rendered_height_on_text_change() {
        let mut editor = make_editor();
        let id = make_block(&mut editor, "a", 0.0, 0.0);
        editor
            .update_block(
                id,
                BlockPatch {
                    rendered_height: Some(40.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(editor.document().block(id).unwrap().rendered_height, Some(40.0));

        editor
            .update_block(
                id,
                BlockPatch {
                    x: Some(10.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(editor.document().block(id).unwrap().rendered_height, Some(40.0));

        let updated = editor
            .update_block(
                id,
                BlockPatch {
                    text: Some("a\nb".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.rendered_height, None);
    }

    #[test]
    fn test_delete_drops_decorations_and_drag() {
        let mut editor = make_editor();
        let id = make_block(&mut editor, "a", 0.0, 0.0);
        editor.begin_drag(id).unwrap();
        assert_eq!(editor.selected(), Some(id));
        assert!(!editor.overlay().is_empty());

        editor.delete_block(id).unwrap();
        assert_eq!(editor.selected(), None);
        assert_eq!(editor.dragging(), None);
        assert!(editor.overlay().is_empty());
        assert!(matches!(
            editor.delete_block(id),
            Err(EditorError::BlockNotFound(_))
        ));
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut editor = make_editor();
        let _below = make_block(&mut editor, "below", 0.0, 0.0);
        let above = make_block(&mut editor, "above", 10.0, 5.0);
        assert_eq!(editor.hit_test(Point::new(15.0, 8.0)), Some(above));
        assert_eq!(editor.hit_test(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_drag_snaps_on_release() {
        let mut editor = make_editor();
        let _anchor = make_block(&mut editor, "anchor", 53.0, 300.0);
        let moving = make_block(&mut editor, "moving", 400.0, 600.0);

        editor.begin_drag(moving).unwrap();
        assert!(editor.overlay().grid().is_some());

        let can_snap = editor.drag_move(moving, Point::new(45.0, 333.0)).unwrap();
        assert!(can_snap);
        assert!(!editor.overlay().guides().is_empty());

        let settled = editor.end_drag(moving).unwrap();
        // x aligns to the anchor's 53; y 333 grid-rounds to 340, nothing aligns on y
        assert_eq!(settled, Point::new(53.0, 340.0));
        assert!(editor.overlay().is_empty());
        assert_eq!(editor.dragging(), None);
    }

    #[test]
    fn test_drag_without_guides_does_not_snap() {
        let mut editor = make_editor();
        let id = make_block(&mut editor, "a", 100.0, 100.0);
        assert!(!editor.toggle_guides());

        editor.begin_drag(id).unwrap();
        assert!(editor.overlay().is_empty());
        editor.drag_move(id, Point::new(41.0, 59.0)).unwrap();
        assert!(editor.overlay().is_empty());
        assert_eq!(editor.end_drag(id).unwrap(), Point::new(41.0, 59.0));
    }

    #[test]
    fn test_cancel_restores_origin() {
        let mut editor = make_editor();
        let id = make_block(&mut editor, "a", 100.0, 100.0);
        editor.begin_drag(id).unwrap();
        editor.drag_move(id, Point::new(300.0, 400.0)).unwrap();
        assert_eq!(editor.cancel_drag(id).unwrap(), Point::new(100.0, 100.0));
        assert_eq!(
            editor.document().block(id).unwrap().position,
            Point::new(100.0, 100.0)
        );
        assert!(editor.overlay().is_empty());
    }

    #[test]
    fn test_drag_move_requires_active_gesture() {
        let mut editor = make_editor();
        let id = make_block(&mut editor, "a", 0.0, 0.0);
        assert!(matches!(
            editor.drag_move(id, Point::new(1.0, 1.0)),
            Err(EditorError::NotDragging(_))
        ));
    }

    #[test]
    fn test_editing_block_cannot_be_dragged() {
        let mut editor = make_editor();
        let id = make_block(&mut editor, "a", 0.0, 0.0);
        editor.begin_edit(id).unwrap();
        assert!(matches!(
            editor.begin_drag(id),
            Err(EditorError::BlockEditing(_))
        ));
        let updated = editor.end_edit(id, Some("b".to_string())).unwrap();
        assert_eq!(updated.map(|b| b.text), Some("b".to_string()));
        editor.begin_drag(id).unwrap();
    }

    #[test]
    fn test_reset_keeps_background_fill() {
        let mut editor = make_editor();
        editor.seed_default_content().unwrap();
        editor.set_background_fill("#fff8e7").unwrap();
        editor.reset();
        assert!(editor.document().blocks().is_empty());
        assert_eq!(editor.document().background().fill, "#fff8e7");
        assert!(editor.set_background_fill("  ").is_err());
    }

    #[test]
    fn test_editors_do_not_share_state() {
        let mut first = make_editor();
        let second = make_editor();
        first.seed_default_content().unwrap();
        assert!(second.document().blocks().is_empty());
        assert_ne!(first.id(), second.id());
    }
}
