//! Board pan and zoom.
//!
//! ```text
//! Idle -> Panning     (pointer down on the board background)
//! Panning -> Panning  (pointer move: translate by delta since last move)
//! Panning -> Idle     (pointer up / capture lost / pointer left window)
//! ```
//!
//! Wheel input, zoom buttons and fit view act on the transform directly and
//! do not depend on the pan state.

use crate::input::coords::{Point, Transform, wheel_zoom_factor};
use crate::input::pointer::{PointerCapture, PointerEvent, PointerId, WheelEvent};
use crate::profile_scope;
use crate::settings::ZoomSettings;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PanState {
    #[default]
    Idle,
    Panning {
        pointer_id: PointerId,
        /// Pointer position at the previous move, for incremental deltas
        last_pos: Point,
    },
}

#[derive(Debug, Default)]
pub struct PanZoomController {
    state: PanState,
}

impl PanZoomController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PanState {
        self.state
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, PanState::Panning { .. })
    }

    /// Start panning. Returns false if a pan is already active.
    pub fn begin(&mut self, event: &PointerEvent, capture: &mut dyn PointerCapture) -> bool {
        if self.is_panning() {
            return false;
        }
        if let Err(e) = capture.capture(event.pointer_id) {
            debug!(pointer = event.pointer_id, "Pointer capture failed, panning uncaptured: {}", e);
        }
        debug!(pointer = event.pointer_id, "Pan start");
        self.state = PanState::Panning {
            pointer_id: event.pointer_id,
            last_pos: event.position,
        };
        true
    }

    /// Translate `transform` by the pointer delta since the last move.
    pub fn update(&mut self, event: &PointerEvent, transform: &Transform) -> Option<Transform> {
        profile_scope!("pan_update");

        let PanState::Panning { pointer_id, last_pos } = &mut self.state else {
            return None;
        };
        if *pointer_id != event.pointer_id {
            return None;
        }

        let delta = event.position - *last_pos;
        *last_pos = event.position;
        trace!(dx = delta.x, dy = delta.y, "Pan move");
        Some(transform.pan_by(delta))
    }

    /// End the pan. Returns false if no pan by this pointer was active.
    pub fn finish(&mut self, pointer_id: PointerId, capture: &mut dyn PointerCapture) -> bool {
        match self.state {
            PanState::Panning { pointer_id: active, .. } if active == pointer_id => {
                if let Err(e) = capture.release(pointer_id) {
                    debug!(pointer = pointer_id, "Pointer release failed, ignoring: {}", e);
                }
                self.state = PanState::Idle;
                debug!(pointer = pointer_id, "Pan end");
                true
            }
            _ => false,
        }
    }

    /// End the pan without touching capture (capture already gone)
    pub fn cancel(&mut self, pointer_id: PointerId) -> bool {
        match self.state {
            PanState::Panning { pointer_id: active, .. } if active == pointer_id => {
                self.state = PanState::Idle;
                debug!(pointer = pointer_id, "Pan cancelled");
                true
            }
            _ => false,
        }
    }

    /// Apply a wheel event: ctrl/meta zooms around the cursor, otherwise pans.
    pub fn wheel(&self, event: &WheelEvent, transform: &Transform, zoom: &ZoomSettings) -> Transform {
        if event.modifiers.zooms() {
            let factor = wheel_zoom_factor(event.delta.y, zoom.wheel_sensitivity);
            transform.zoom_at(event.position, factor, zoom.bounds)
        } else {
            transform.pan_by_wheel(event.delta)
        }
    }
}

/// One zoom-button step in, anchored at `center`
pub fn zoom_in(transform: &Transform, center: Point, zoom: &ZoomSettings) -> Transform {
    transform.zoom_to(center, transform.scale + zoom.button_step, zoom.bounds)
}

/// One zoom-button step out, anchored at `center`
pub fn zoom_out(transform: &Transform, center: Point, zoom: &ZoomSettings) -> Transform {
    transform.zoom_to(center, transform.scale - zoom.button_step, zoom.bounds)
}

/// The transform restored by "fit view"
pub fn fit_view(zoom: &ZoomSettings) -> Transform {
    zoom.default_transform
}
