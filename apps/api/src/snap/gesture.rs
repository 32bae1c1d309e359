//! Drag gesture state machine: `Idle -> Dragging -> Idle`.
//!
//! The gesture only remembers which block is being dragged and where it started;
//! the editor applies positions and owns the overlay.

use uuid::Uuid;

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragGesture {
    #[default]
    Idle,
    Dragging { block_id: Uuid, origin: Point },
}

impl DragGesture {
    /// Starts dragging `block_id`. A gesture already in progress is replaced; the
    /// caller is responsible for settling or cancelling it first.
    pub fn start(&mut self, block_id: Uuid, origin: Point) {
        *self = DragGesture::Dragging { block_id, origin };
    }

    pub fn is_dragging(&self, block_id: Uuid) -> bool {
        matches!(self, DragGesture::Dragging { block_id: id, .. } if *id == block_id)
    }

    pub fn active_block(&self) -> Option<Uuid> {
        match self {
            DragGesture::Dragging { block_id, .. } => Some(*block_id),
            DragGesture::Idle => None,
        }
    }

    /// Ends the gesture, returning the dragged block and its start position.
    pub fn settle(&mut self) -> Option<(Uuid, Point)> {
        match std::mem::take(self) {
            DragGesture::Dragging { block_id, origin } => Some((block_id, origin)),
            DragGesture::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_and_settle() {
        let id = Uuid::new_v4();
        let mut gesture = DragGesture::default();
        assert_eq!(gesture.active_block(), None);

        gesture.start(id, Point::new(10.0, 20.0));
        assert!(gesture.is_dragging(id));
        assert!(!gesture.is_dragging(Uuid::new_v4()));

        assert_eq!(gesture.settle(), Some((id, Point::new(10.0, 20.0))));
        assert_eq!(gesture, DragGesture::Idle);
        assert_eq!(gesture.settle(), None);
    }
}
