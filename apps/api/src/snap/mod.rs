// Alignment/Snap-Guide Engine
// Implements: grid and alignment snapping, guide detection, drag overlay, drag state.
// Everything here is synchronous and allocation-light; it runs on every drag-move.

pub mod engine;
pub mod gesture;
pub mod overlay;

pub use engine::{SnapConfig, SnapEngine};
pub use gesture::DragGesture;
pub use overlay::Overlay;
