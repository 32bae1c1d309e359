//! Snap/Alignment Engine: grid snapping and cross-block alignment during a drag.
//!
//! All operations are pure functions of the active block's box and the boxes of every
//! other block. Threshold comparisons are strict (`<`).
//!
//! When several other blocks satisfy the alignment threshold on the same axis,
//! `commit_snap` takes the last one in iteration order, not the nearest.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{BoundingBox, Point};

pub const DEFAULT_GRID_SIZE: f64 = 20.0;
pub const DEFAULT_SNAP_THRESHOLD: f64 = 10.0;
pub const DEFAULT_ALIGNMENT_THRESHOLD: f64 = 15.0;

#[derive(Debug, Error, PartialEq)]
pub enum SnapConfigError {
    #[error("grid size must be positive, got {0}")]
    InvalidGridSize(f64),

    #[error("thresholds must be non-negative (snap {snap}, alignment {alignment})")]
    NegativeThreshold { snap: f64, alignment: f64 },

    #[error("alignment threshold {alignment} is below snap threshold {snap}")]
    AlignmentBelowSnap { snap: f64, alignment: f64 },
}

/// Tunable snapping distances, in document units. Only built through `new`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnapConfig {
    grid_size: f64,
    snap_threshold: f64,
    alignment_threshold: f64,
}

impl SnapConfig {
    pub fn new(
        grid_size: f64,
        snap_threshold: f64,
        alignment_threshold: f64,
    ) -> Result<Self, SnapConfigError> {
        if !(grid_size > 0.0) {
            return Err(SnapConfigError::InvalidGridSize(grid_size));
        }
        if !(snap_threshold >= 0.0 && alignment_threshold >= 0.0) {
            return Err(SnapConfigError::NegativeThreshold {
                snap: snap_threshold,
                alignment: alignment_threshold,
            });
        }
        // A guide must never appear for a distance that would not also snap.
        if alignment_threshold < snap_threshold {
            return Err(SnapConfigError::AlignmentBelowSnap {
                snap: snap_threshold,
                alignment: alignment_threshold,
            });
        }
        Ok(SnapConfig {
            grid_size,
            snap_threshold,
            alignment_threshold,
        })
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    pub fn snap_threshold(&self) -> f64 {
        self.snap_threshold
    }

    pub fn alignment_threshold(&self) -> f64 {
        self.alignment_threshold
    }
}

impl Default for SnapConfig {
    fn default() -> Self {
        SnapConfig {
            grid_size: DEFAULT_GRID_SIZE,
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            alignment_threshold: DEFAULT_ALIGNMENT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideOrientation {
    Vertical,
    Horizontal,
}

/// A transient alignment cue. Vertical guides carry an x, horizontal guides a y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentGuide {
    pub orientation: GuideOrientation,
    pub coordinate: f64,
}

impl AlignmentGuide {
    pub fn vertical(x: f64) -> Self {
        AlignmentGuide {
            orientation: GuideOrientation::Vertical,
            coordinate: x,
        }
    }

    pub fn horizontal(y: f64) -> Self {
        AlignmentGuide {
            orientation: GuideOrientation::Horizontal,
            coordinate: y,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SnapEngine {
    config: SnapConfig,
}

impl SnapEngine {
    pub fn new(config: SnapConfig) -> Self {
        SnapEngine { config }
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Nearest grid multiple of `value`.
    pub fn grid_round(&self, value: f64) -> f64 {
        (value / self.config.grid_size).round() * self.config.grid_size
    }

    fn near_grid(&self, value: f64) -> bool {
        (value - self.grid_round(value)).abs() < self.config.snap_threshold
    }

    fn aligned(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.config.alignment_threshold
    }

    /// Whether releasing now would snap on either axis. Drives the cursor affordance.
    pub fn can_snap(&self, active: &BoundingBox, others: &[BoundingBox]) -> bool {
        if self.near_grid(active.x) || self.near_grid(active.y) {
            return true;
        }
        others
            .iter()
            .any(|other| self.aligned(active.x, other.x) || self.aligned(active.y, other.y))
    }

    /// Edge and center alignment cues against every other block.
    ///
    /// Guides sit on the other block's coordinate. Duplicates are kept.
    pub fn compute_alignment_guides(
        &self,
        active: &BoundingBox,
        others: &[BoundingBox],
    ) -> Vec<AlignmentGuide> {
        let active_center = active.center();
        let mut guides = Vec::new();

        for other in others {
            let other_center = other.center();

            if self.aligned(active.x, other.x) {
                guides.push(AlignmentGuide::vertical(other.x));
            }
            if self.aligned(active_center.x, other_center.x) {
                guides.push(AlignmentGuide::vertical(other_center.x));
            }
            if self.aligned(active.right(), other.right()) {
                guides.push(AlignmentGuide::vertical(other.right()));
            }

            if self.aligned(active.y, other.y) {
                guides.push(AlignmentGuide::horizontal(other.y));
            }
            if self.aligned(active_center.y, other_center.y) {
                guides.push(AlignmentGuide::horizontal(other_center.y));
            }
            if self.aligned(active.bottom(), other.bottom()) {
                guides.push(AlignmentGuide::horizontal(other.bottom()));
            }
        }

        guides
    }

    /// Final position on release: grid first, then left/top alignment overrides.
    ///
    /// Alignment is tested against the original, unsnapped coordinate so grid
    /// rounding cannot pull a block into or out of an alignment match.
    pub fn commit_snap(&self, active: &BoundingBox, others: &[BoundingBox]) -> Point {
        let mut snapped = Point::new(active.x, active.y);

        if self.near_grid(active.x) {
            snapped.x = self.grid_round(active.x);
        }
        if self.near_grid(active.y) {
            snapped.y = self.grid_round(active.y);
        }

        for other in others {
            if self.aligned(active.x, other.x) {
                snapped.x = other.x;
            }
            if self.aligned(active.y, other.y) {
                snapped.y = other.y;
            }
        }

        snapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_engine() -> SnapEngine {
        SnapEngine::new(SnapConfig::default())
    }

    fn make_box(x: f64, y: f64) -> BoundingBox {
        BoundingBox::new(x, y, 200.0, 20.0)
    }

    fn at(bbox: &BoundingBox, point: Point) -> BoundingBox {
        BoundingBox::new(point.x, point.y, bbox.width, bbox.height)
    }

    // ── SnapConfig ──────────────────────────────────────────────────────────

    #[test]
    fn test_config_rejects_alignment_below_snap() {
        let err = SnapConfig::new(20.0, 10.0, 5.0).unwrap_err();
        assert!(matches!(err, SnapConfigError::AlignmentBelowSnap { .. }));
    }

    #[test]
    fn test_config_rejects_zero_grid() {
        assert_eq!(
            SnapConfig::new(0.0, 10.0, 15.0),
            Err(SnapConfigError::InvalidGridSize(0.0))
        );
    }

    #[test]
    fn test_config_accepts_equal_thresholds() {
        assert!(SnapConfig::new(20.0, 10.0, 10.0).is_ok());
    }

    // ── can_snap ────────────────────────────────────────────────────────────

    #[test]
    fn test_can_snap_near_grid() {
        let engine = make_engine();
        // 47 rounds to 40 on a 20 grid: 7 away, within the snap threshold
        assert!(engine.can_snap(&make_box(47.0, 333.0), &[]));
    }

    #[test]
    fn test_can_snap_false_far_from_everything() {
        let engine = make_engine();
        // 30 and 130 are exactly 10 from the grid: strict comparison → no grid snap
        let others = [make_box(300.0, 600.0)];
        assert!(!engine.can_snap(&make_box(30.0, 130.0), &others));
    }

    #[test]
    fn test_can_snap_via_alignment_only() {
        let engine = make_engine();
        let others = [make_box(42.0, 600.0)];
        assert!(engine.can_snap(&make_box(30.0, 130.0), &others));
    }

    // ── compute_alignment_guides ─────────────────────────────────────────────

    #[test]
    fn test_guides_for_identical_boxes_cover_all_six_edges() {
        let engine = make_engine();
        let guides = engine.compute_alignment_guides(&make_box(50.0, 50.0), &[make_box(50.0, 50.0)]);
        assert_eq!(guides.len(), 6);
        assert!(guides.contains(&AlignmentGuide::vertical(50.0)));
        assert!(guides.contains(&AlignmentGuide::vertical(150.0)));
        assert!(guides.contains(&AlignmentGuide::vertical(250.0)));
        assert!(guides.contains(&AlignmentGuide::horizontal(50.0)));
        assert!(guides.contains(&AlignmentGuide::horizontal(60.0)));
        assert!(guides.contains(&AlignmentGuide::horizontal(70.0)));
    }

    #[test]
    fn test_guides_sit_on_the_other_block() {
        let engine = make_engine();
        let guides =
            engine.compute_alignment_guides(&make_box(55.0, 500.0), &[make_box(50.0, 50.0)]);
        assert_eq!(
            guides,
            vec![
                AlignmentGuide::vertical(50.0),
                AlignmentGuide::vertical(150.0),
                AlignmentGuide::vertical(250.0),
            ]
        );
    }

    #[test]
    fn test_guides_keep_duplicates() {
        let engine = make_engine();
        let others = [make_box(50.0, 300.0), make_box(50.0, 600.0)];
        let guides = engine.compute_alignment_guides(&make_box(52.0, 900.0), &others);
        let left = guides
            .iter()
            .filter(|g| **g == AlignmentGuide::vertical(50.0))
            .count();
        assert_eq!(left, 2);
    }

    #[test]
    fn test_alignment_symmetry() {
        let engine = make_engine();
        let a = make_box(100.0, 100.0);
        let b = BoundingBox::new(100.0, 400.0, 80.0, 30.0);
        let from_a = engine.compute_alignment_guides(&a, &[b]);
        let from_b = engine.compute_alignment_guides(&b, &[a]);
        assert!(from_a.contains(&AlignmentGuide::vertical(100.0)));
        assert!(from_b.contains(&AlignmentGuide::vertical(100.0)));
    }

    #[test]
    fn test_no_guides_without_others() {
        let engine = make_engine();
        assert!(engine
            .compute_alignment_guides(&make_box(0.0, 0.0), &[])
            .is_empty());
    }

    // ── commit_snap ─────────────────────────────────────────────────────────

    #[test]
    fn test_commit_snap_grid_only() {
        let engine = make_engine();
        let snapped = engine.commit_snap(&make_box(47.0, 133.0), &[]);
        assert_eq!(snapped, Point::new(40.0, 140.0));
    }

    #[test]
    fn test_commit_snap_leaves_far_axis_alone() {
        let engine = make_engine();
        let snapped = engine.commit_snap(&make_box(30.0, 133.0), &[]);
        assert_eq!(snapped, Point::new(30.0, 140.0));
    }

    #[test]
    fn test_commit_snap_alignment_overrides_grid() {
        let engine = make_engine();
        let others = [make_box(53.0, 900.0)];
        // grid would give x = 40, alignment to 53 wins; y still grid-snaps
        let snapped = engine.commit_snap(&make_box(47.0, 333.0), &others);
        assert_eq!(snapped, Point::new(53.0, 340.0));
    }

    #[test]
    fn test_commit_snap_axes_are_independent() {
        let engine = make_engine();
        let others = [make_box(61.0, 900.0)];
        let snapped = engine.commit_snap(&make_box(70.0, 118.0), &others);
        assert_eq!(snapped, Point::new(61.0, 120.0));
    }

    #[test]
    fn test_commit_snap_last_match_wins() {
        let engine = make_engine();
        let others = [make_box(52.0, 900.0), make_box(60.0, 300.0)];
        let snapped = engine.commit_snap(&make_box(55.0, 700.0), &others);
        assert_eq!(snapped.x, 60.0, "later block in iteration order wins");

        let reversed = [others[1], others[0]];
        let snapped = engine.commit_snap(&make_box(55.0, 700.0), &reversed);
        assert_eq!(snapped.x, 52.0);
    }

    #[test]
    fn test_commit_snap_is_idempotent() {
        let engine = make_engine();
        let others = [make_box(53.0, 207.0), make_box(400.0, 600.0)];
        for start in [
            make_box(47.0, 133.0),
            make_box(58.0, 214.0),
            make_box(395.0, 612.0),
            make_box(123.0, 777.0),
        ] {
            let once = engine.commit_snap(&start, &others);
            let twice = engine.commit_snap(&at(&start, once), &others);
            assert_eq!(once, twice, "commit_snap must be a fixed point for {start:?}");
        }
    }
}
