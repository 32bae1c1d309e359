//! Shared geometric primitives for blocks on the canvas.
//!
//! `bounding_box` is the single source of block height for the snap engine, the flow
//! calculator and hit-testing, so they can never disagree about where a block ends.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{get_metrics, FontFace};
use crate::models::block::TextBlock;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        BoundingBox {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        center(self)
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Grows the box by `dx` on the left and right and `dy` on the top and bottom.
    pub fn inflate(&self, dx: f64, dy: f64) -> BoundingBox {
        BoundingBox::new(
            self.x - dx,
            self.y - dy,
            self.width + 2.0 * dx,
            self.height + 2.0 * dy,
        )
    }
}

pub fn center(bbox: &BoundingBox) -> Point {
    Point::new(bbox.x + bbox.width / 2.0, bbox.y + bbox.height / 2.0)
}

/// Bounding box of a block: rendered height when the surface has reported one,
/// otherwise the metric estimate.
pub fn bounding_box(block: &TextBlock) -> BoundingBox {
    let height = block
        .rendered_height
        .unwrap_or_else(|| estimated_text_height(block));
    BoundingBox::new(block.position.x, block.position.y, block.box_width, height)
}

/// Height the canvas would give the block's text: one `font_size` per physical line,
/// wrapping each explicit line at `box_width`.
pub fn estimated_text_height(block: &TextBlock) -> f64 {
    let metrics = get_metrics(FontFace::resolve(&block.font_family, block.font_style));
    let lines = metrics.wrapped_line_count(&block.text, block.font_size, block.box_width);
    lines as f64 * block.font_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::block::FontStyle;
    use uuid::Uuid;

    fn make_block(text: &str, x: f64, y: f64) -> TextBlock {
        TextBlock {
            id: Uuid::new_v4(),
            text: text.to_string(),
            position: Point::new(x, y),
            box_width: 700.0,
            font_size: 12.0,
            font_family: "Arial".to_string(),
            font_style: FontStyle::Normal,
            fill_color: "black".to_string(),
            section_type: "body".to_string(),
            rendered_height: None,
        }
    }

    #[test]
    fn test_center_is_box_midpoint() {
        let bbox = BoundingBox::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(center(&bbox), Point::new(60.0, 40.0));
    }

    #[test]
    fn test_bounding_box_prefers_rendered_height() {
        let mut block = make_block("one line", 5.0, 6.0);
        block.rendered_height = Some(33.0);
        let bbox = bounding_box(&block);
        assert_eq!(bbox, BoundingBox::new(5.0, 6.0, 700.0, 33.0));
    }

    #[test]
    fn test_bounding_box_falls_back_to_estimate() {
        let block = make_block("first\nsecond\nthird", 0.0, 0.0);
        let bbox = bounding_box(&block);
        assert!((bbox.height - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_counts_soft_wraps() {
        let mut block = make_block(&"word ".repeat(40), 0.0, 0.0);
        block.box_width = 100.0;
        let height = estimated_text_height(&block);
        assert!(height > 12.0, "long text in a narrow box should wrap, got {height}");
        assert_eq!(height % 12.0, 0.0);
    }

    #[test]
    fn test_empty_text_is_one_line_tall() {
        let block = make_block("", 0.0, 0.0);
        assert!((estimated_text_height(&block) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(bbox.contains(Point::new(0.0, 0.0)));
        assert!(bbox.contains(Point::new(10.0, 10.0)));
        assert!(!bbox.contains(Point::new(10.1, 5.0)));
    }

    #[test]
    fn test_inflate() {
        let bbox = BoundingBox::new(10.0, 10.0, 20.0, 5.0).inflate(3.0, 1.0);
        assert_eq!(bbox, BoundingBox::new(7.0, 9.0, 26.0, 7.0));
    }
}
