use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
}

/// A placed, styled piece of text on the canvas.
///
/// Owned by the editor's document; the rendering surface refers to it by `id` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub id: Uuid,
    pub text: String,
    /// Top-left anchor in document coordinates (unscaled, unscrolled).
    pub position: Point,
    /// Fixed wrap width; layout never reflows it.
    pub box_width: f64,
    pub font_size: f64,
    pub font_family: String,
    pub font_style: FontStyle,
    pub fill_color: String,
    /// Advisory tag (header, contact, experience, ...). Never read by layout.
    pub section_type: String,
    /// Height measured by the rendering surface after its last paint, if any.
    #[serde(default)]
    pub rendered_height: Option<f64>,
}

pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_FILL_COLOR: &str = "black";
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Request payload for a new block. Omitted `y` means "place below existing content".
#[derive(Debug, Clone, Deserialize)]
pub struct NewBlock {
    pub section_type: String,
    pub text: String,
    pub x: f64,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub font_style: Option<FontStyle>,
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub fill_color: Option<String>,
    #[serde(default)]
    pub box_width: Option<f64>,
}

impl NewBlock {
    pub fn new(section_type: &str, text: &str, x: f64, y: f64) -> Self {
        NewBlock {
            section_type: section_type.to_string(),
            text: text.to_string(),
            x,
            y: Some(y),
            font_size: None,
            font_style: None,
            font_family: None,
            fill_color: None,
            box_width: None,
        }
    }

    pub fn with_font(mut self, font_size: f64, font_style: FontStyle) -> Self {
        self.font_size = Some(font_size);
        self.font_style = Some(font_style);
        self
    }
}

/// Partial update of a block. Every field is optional; absent fields are untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockPatch {
    pub text: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub font_style: Option<FontStyle>,
    pub fill_color: Option<String>,
    pub box_width: Option<f64>,
    pub rendered_height: Option<f64>,
}

impl BlockPatch {
    /// True when the patch changes anything that affects the measured text height.
    pub fn invalidates_measurement(&self) -> bool {
        self.text.is_some()
            || self.font_size.is_some()
            || self.font_family.is_some()
            || self.font_style.is_some()
            || self.box_width.is_some()
    }
}

/// A horizontal rule drawn on the canvas. Counts as a 10-unit-tall block for flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divider {
    pub id: Uuid,
    pub y: f64,
    pub x_start: f64,
    pub x_end: f64,
    pub stroke_color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDivider {
    pub y: f64,
    pub x_start: f64,
    pub x_end: f64,
    #[serde(default)]
    pub stroke_color: Option<String>,
}
