//! Time-grid interaction engine.
//!
//! `grid` maps between wall-clock time and pixels. `drag`, `resize` and
//! `snap` implement the gestures; `session` wires them to one view.

pub mod drag;
pub mod error;
pub mod grid;
pub mod handles;
pub mod resize;
pub mod session;
pub mod signal;
pub mod snap;

pub use drag::{DragCandidate, DragController, DragPhase, DropHandler, DropZone};
pub use error::InteractionError;
pub use handles::{hit_test_blocks, BlockHit, HandleRects};
pub use resize::{BlockUpdate, ResizeController, ResizeEdge, ResizeHandler};
pub use session::{GestureOutcome, InteractionHandler, TimeGridInteraction};
pub use signal::{ActiveGesture, DragSignal};
pub use snap::{MagneticSnapDetector, SnapObserver, SnapTransition, SnapZone};
