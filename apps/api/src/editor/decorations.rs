//! Hover and selection highlights, kept beside the blocks rather than on them.
//!
//! The registry stores only which block carries which decoration; rectangles are
//! derived from the block's current bounding box when a view is built, so a moved
//! or restyled block never leaves a stale highlight behind.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::geometry::{bounding_box, BoundingBox};
use crate::models::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecorationKind {
    Hover,
    Selection,
}

impl DecorationKind {
    /// Horizontal and vertical inset around the block's bounding box.
    pub fn inset(self) -> (f64, f64) {
        match self {
            DecorationKind::Hover => (3.0, 1.0),
            DecorationKind::Selection => (6.0, 3.0),
        }
    }

    pub fn fill(self) -> &'static str {
        "#f8f9fa"
    }

    pub fn stroke(self) -> Option<&'static str> {
        match self {
            DecorationKind::Hover => None,
            DecorationKind::Selection => Some("#e9ecef"),
        }
    }

    pub fn opacity(self) -> f64 {
        match self {
            DecorationKind::Hover => 0.6,
            DecorationKind::Selection => 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecorationView {
    pub block_id: Uuid,
    pub kind: DecorationKind,
    pub rect: BoundingBox,
    pub fill: &'static str,
    pub stroke: Option<&'static str>,
    pub opacity: f64,
}

#[derive(Debug, Default)]
pub struct DecorationRegistry {
    entries: HashMap<Uuid, Vec<DecorationKind>>,
}

impl DecorationRegistry {
    /// Adds `kind` to `block_id`, removing it from any other block first. At most one
    /// block carries each kind.
    pub fn assign(&mut self, block_id: Uuid, kind: DecorationKind) {
        self.remove_kind(kind);
        self.entries.entry(block_id).or_default().push(kind);
    }

    pub fn remove_kind(&mut self, kind: DecorationKind) {
        self.entries.retain(|_, kinds| {
            kinds.retain(|k| *k != kind);
            !kinds.is_empty()
        });
    }

    pub fn holder(&self, kind: DecorationKind) -> Option<Uuid> {
        self.entries
            .iter()
            .find(|(_, kinds)| kinds.contains(&kind))
            .map(|(id, _)| *id)
    }

    pub fn has(&self, block_id: Uuid, kind: DecorationKind) -> bool {
        self.entries
            .get(&block_id)
            .is_some_and(|kinds| kinds.contains(&kind))
    }

    /// Drops everything attached to a block. Called when the block is deleted.
    pub fn forget_block(&mut self, block_id: Uuid) {
        self.entries.remove(&block_id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Rectangles to draw, in document z-order (selection below hover on one block).
    pub fn views(&self, document: &Document) -> Vec<DecorationView> {
        let mut views = Vec::new();
        for block in document.blocks() {
            let Some(kinds) = self.entries.get(&block.id) else {
                continue;
            };
            let bbox = bounding_box(block);
            for kind in [DecorationKind::Selection, DecorationKind::Hover] {
                if !kinds.contains(&kind) {
                    continue;
                }
                let (dx, dy) = kind.inset();
                views.push(DecorationView {
                    block_id: block.id,
                    kind,
                    rect: bbox.inflate(dx, dy),
                    fill: kind.fill(),
                    stroke: kind.stroke(),
                    opacity: kind.opacity(),
                });
            }
        }
        views
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::models::block::{FontStyle, TextBlock};

    fn make_block(x: f64, y: f64) -> TextBlock {
        TextBlock {
            id: Uuid::new_v4(),
            text: "Jane".to_string(),
            position: Point::new(x, y),
            box_width: 700.0,
            font_size: 16.0,
            font_family: "Arial".to_string(),
            font_style: FontStyle::Normal,
            fill_color: "black".to_string(),
            section_type: "header".to_string(),
            rendered_height: Some(20.0),
        }
    }

    #[test]
    fn test_assign_moves_decoration_between_blocks() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut registry = DecorationRegistry::default();
        registry.assign(a, DecorationKind::Selection);
        registry.assign(b, DecorationKind::Selection);
        assert!(!registry.has(a, DecorationKind::Selection));
        assert_eq!(registry.holder(DecorationKind::Selection), Some(b));
    }

    #[test]
    fn test_views_use_insets() {
        let mut document = Document::new(800.0, 1000.0);
        let block = make_block(50.0, 100.0);
        let id = block.id;
        document.push_block(block);

        let mut registry = DecorationRegistry::default();
        registry.assign(id, DecorationKind::Hover);
        registry.assign(id, DecorationKind::Selection);

        let views = registry.views(&document);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].kind, DecorationKind::Selection);
        assert_eq!(views[0].rect, BoundingBox::new(44.0, 97.0, 712.0, 26.0));
        assert_eq!(views[1].rect, BoundingBox::new(47.0, 99.0, 706.0, 22.0));
    }

    #[test]
    fn test_forget_block_drops_all_kinds() {
        let id = Uuid::new_v4();
        let mut registry = DecorationRegistry::default();
        registry.assign(id, DecorationKind::Hover);
        registry.assign(id, DecorationKind::Selection);
        registry.forget_block(id);
        assert_eq!(registry.holder(DecorationKind::Hover), None);
        assert_eq!(registry.holder(DecorationKind::Selection), None);
    }
}
