//! Drag overlay: the grid and alignment guides shown while a block is dragged.
//!
//! The overlay is owned by one editor. Guides are replaced wholesale on every
//! drag-move, never appended, so a long drag cannot accumulate stale guides.

use serde::Serialize;

use crate::snap::engine::{AlignmentGuide, GuideOrientation};

const GRID_STROKE: &str = "#f0f0f0";
const GRID_STROKE_WIDTH: f64 = 1.0;
const GRID_OPACITY: f64 = 0.5;
const GUIDE_STROKE: &str = "#ff4444";
const GUIDE_STROKE_WIDTH: f64 = 2.0;
const GUIDE_OPACITY: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridOverlay {
    pub size: f64,
    pub width: f64,
    pub height: f64,
}

/// One line the rendering surface should draw: `points` is `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineRequest {
    pub points: [f64; 4],
    pub stroke: &'static str,
    pub stroke_width: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    grid: Option<GridOverlay>,
    guides: Vec<AlignmentGuide>,
}

impl Overlay {
    pub fn show_grid(&mut self, size: f64, width: f64, height: f64) {
        self.grid = Some(GridOverlay {
            size,
            width,
            height,
        });
    }

    pub fn replace_guides(&mut self, guides: Vec<AlignmentGuide>) {
        self.guides = guides;
    }

    /// Drops the grid and every guide.
    pub fn clear(&mut self) {
        self.grid = None;
        self.guides.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_none() && self.guides.is_empty()
    }

    pub fn grid(&self) -> Option<&GridOverlay> {
        self.grid.as_ref()
    }

    pub fn guides(&self) -> &[AlignmentGuide] {
        &self.guides
    }

    /// Draw requests for the current overlay: grid lines first, guides on top.
    /// Guides span the whole canvas of `width` × `height`.
    pub fn render_requests(&self, width: f64, height: f64) -> Vec<LineRequest> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut requests = Vec::new();

        if let Some(grid) = &self.grid {
            let mut x = 0.0;
            while x <= grid.width {
                requests.push(grid_line([x, 0.0, x, grid.height]));
                x += grid.size;
            }
            let mut y = 0.0;
            while y <= grid.height {
                requests.push(grid_line([0.0, y, grid.width, y]));
                y += grid.size;
            }
        }

        for guide in &self.guides {
            let points = match guide.orientation {
                GuideOrientation::Vertical => [guide.coordinate, 0.0, guide.coordinate, height],
                GuideOrientation::Horizontal => [0.0, guide.coordinate, width, guide.coordinate],
            };
            requests.push(LineRequest {
                points,
                stroke: GUIDE_STROKE,
                stroke_width: GUIDE_STROKE_WIDTH,
                opacity: GUIDE_OPACITY,
            });
        }

        requests
    }
}

fn grid_line(points: [f64; 4]) -> LineRequest {
    LineRequest {
        points,
        stroke: GRID_STROKE,
        stroke_width: GRID_STROKE_WIDTH,
        opacity: GRID_OPACITY,
    }
}
