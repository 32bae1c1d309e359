//! The editor's document: insertion-ordered blocks, dividers and the page background.
//!
//! Insertion order doubles as z-order. The last block pushed is drawn on top and wins
//! hit-tests.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::layout::flow::document_height;
use crate::models::block::{Divider, TextBlock};

pub const DEFAULT_BACKGROUND_FILL: &str = "white";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub fill: String,
    pub width: f64,
    /// Derived from content; see [`Document::recompute_height`].
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    blocks: Vec<TextBlock>,
    dividers: Vec<Divider>,
    background: Background,
}

impl Document {
    pub fn new(width: f64, min_height: f64) -> Self {
        Document {
            blocks: Vec::new(),
            dividers: Vec::new(),
            background: Background {
                fill: DEFAULT_BACKGROUND_FILL.to_string(),
                width,
                height: min_height,
            },
        }
    }

    pub fn blocks(&self) -> &[TextBlock] {
        &self.blocks
    }

    pub fn dividers(&self) -> &[Divider] {
        &self.dividers
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn block(&self, id: Uuid) -> Option<&TextBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn block_mut(&mut self, id: Uuid) -> Option<&mut TextBlock> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn push_block(&mut self, block: TextBlock) {
        self.blocks.push(block);
    }

    pub fn remove_block(&mut self, id: Uuid) -> Option<TextBlock> {
        let index = self.blocks.iter().position(|b| b.id == id)?;
        Some(self.blocks.remove(index))
    }

    pub fn push_divider(&mut self, divider: Divider) {
        self.dividers.push(divider);
    }

    /// Drops every block and divider. The background fill survives.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.dividers.clear();
    }

    pub fn set_background_fill(&mut self, fill: &str) {
        self.background.fill = fill.to_string();
    }

    /// Re-derives the background height from content. Returns the new height.
    pub fn recompute_height(&mut self, min_height: f64) -> f64 {
        self.background.height = document_height(&self.blocks, &self.dividers, min_height);
        self.background.height
    }
}
