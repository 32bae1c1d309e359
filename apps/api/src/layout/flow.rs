//! Vertical Flow: where the next block goes and how tall the document must be.
//!
//! Rendered heights are not known until the surface has painted a block, so the
//! bottom of a block is the larger of its bounding-box height and a line-height
//! heuristic (`lines * font_size * 1.2`).

use crate::geometry::bounding_box;
use crate::models::block::{Divider, TextBlock};

/// Content never starts above this Y, even on an empty document.
pub const MIN_CONTENT_Y: f64 = 150.0;
/// Line-height multiplier of the pre-paint height heuristic.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;
/// Dividers are thin; they reserve this much height.
pub const DIVIDER_HEIGHT: f64 = 10.0;
/// Padding between existing content and a newly placed block.
pub const PLACEMENT_PADDING: f64 = 50.0;
/// Padding below the last block when sizing the document.
pub const DOCUMENT_PADDING: f64 = 100.0;

/// Bottom edge of a block as the flow calculator sees it.
pub fn block_bottom(block: &TextBlock) -> f64 {
    let line_count = block.text.matches('\n').count() + 1;
    let approximate = line_count as f64 * block.font_size * LINE_HEIGHT_FACTOR;
    let height = bounding_box(block).height.max(approximate);
    block.position.y + height
}

/// Next free Y below all blocks and dividers, plus `extra_padding`.
pub fn next_free_y(blocks: &[TextBlock], dividers: &[Divider], extra_padding: f64) -> f64 {
    let block_bottoms = blocks.iter().map(block_bottom);
    let divider_bottoms = dividers.iter().map(|d| d.y + DIVIDER_HEIGHT);

    let max_y = block_bottoms
        .chain(divider_bottoms)
        .fold(MIN_CONTENT_Y, f64::max);

    max_y + extra_padding
}

/// Document height: content extent plus padding, never below `min_height`.
pub fn document_height(blocks: &[TextBlock], dividers: &[Divider], min_height: f64) -> f64 {
    min_height.max(next_free_y(blocks, dividers, DOCUMENT_PADDING))
}
