//! Pointer, wheel and drop events, and the pointer capture seam.
//!
//! Controllers never talk to a windowing system directly. They receive these
//! plain event values and ask an injected [`PointerCapture`] to capture or
//! release a pointer, which lets them run without a window in tests.

use crate::input::coords::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a pointer (mouse, pen, touch contact)
pub type PointerId = u32;

/// A pointer down/move/up event in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    #[serde(default)]
    pub pointer_id: PointerId,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(pointer_id: PointerId, x: f64, y: f64) -> Self {
        Self {
            pointer_id,
            position: Point::new(x, y),
        }
    }
}

/// Modifier keys held during a wheel event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    /// Command on macOS, Windows key elsewhere
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        meta: false,
    };

    /// True when the wheel should zoom instead of pan
    pub fn zooms(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    pub position: Point,
    pub delta: Point,
    #[serde(default)]
    pub modifiers: Modifiers,
}

/// A palette item dropped onto the board
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropPayload {
    /// Node type string carried by the drag-and-drop data
    pub kind: String,
    pub position: Point,
}

/// Every input the board accepts, in one serializable enum.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    /// The pointer left the window during a gesture
    PointerLeave(PointerEvent),
    /// Capture was taken away (element detached, system gesture)
    LostPointerCapture { pointer_id: PointerId },
    Wheel(WheelEvent),
    Drop(DropPayload),
    ZoomIn,
    ZoomOut,
    FitView,
}

/// What the host should do after the board handled an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// Suppress native scrolling/zooming for this event
    pub prevent_default: bool,
    /// The scene changed and should be redrawn
    pub redraw: bool,
}

impl EventResponse {
    pub const IGNORED: EventResponse = EventResponse {
        prevent_default: false,
        redraw: false,
    };

    pub const REDRAW: EventResponse = EventResponse {
        prevent_default: false,
        redraw: true,
    };
}

/// Pointer capture failures reported by the host
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("pointer {0} is not active")]
    InactivePointer(PointerId),
    #[error("capture target is detached")]
    Detached,
    #[error("{0}")]
    Other(String),
}

/// Routes subsequent events of a pointer to the capturing controller even
/// when the cursor leaves the element that started the gesture.
pub trait PointerCapture {
    fn capture(&mut self, pointer_id: PointerId) -> Result<(), CaptureError>;
    fn release(&mut self, pointer_id: PointerId) -> Result<(), CaptureError>;
}

/// Capture that always succeeds; for hosts that deliver every event
/// to the board regardless of cursor position.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullCapture;

impl PointerCapture for NullCapture {
    fn capture(&mut self, _pointer_id: PointerId) -> Result<(), CaptureError> {
        Ok(())
    }

    fn release(&mut self, _pointer_id: PointerId) -> Result<(), CaptureError> {
        Ok(())
    }
}
