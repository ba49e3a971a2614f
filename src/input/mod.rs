//! Pointer and wheel input handling for the canvas.
//!
//! Each interaction mode is an explicit state machine, so a board can never
//! be dragging and panning at once, and every gesture has a single way back
//! to idle.
//!
//! ## Modules
//!
//! - `coords` - World/screen transform and zoom math
//! - `pointer` - Event types and the pointer capture seam
//! - `drag` - Node drag state machine
//! - `pan_zoom` - Board pan state machine, wheel and zoom buttons

pub mod coords;
pub mod drag;
pub mod pan_zoom;
pub mod pointer;

pub use coords::{Point, ScaleBounds, Size, Transform};
pub use drag::{DragCommit, DragController, DragSession, DragState};
pub use pan_zoom::{PanState, PanZoomController};
pub use pointer::{
    CaptureError, DropPayload, EventResponse, InputEvent, Modifiers, NullCapture, PointerCapture,
    PointerEvent, PointerId, WheelEvent,
};
