//! Node drag state machine.
//!
//! ```text
//! Idle -> Dragging      (pointer down on a node)
//! Dragging -> Dragging  (pointer move: new displayed position)
//! Dragging -> Idle      (pointer up: commit)
//! Dragging -> Idle      (capture lost / pointer left window: no commit)
//! ```
//!
//! While dragging, the node's displayed position diverges from the committed
//! one stored in the funnel. Positions are always derived from the origin of
//! the gesture, never accumulated per move.

use crate::input::coords::{Point, Transform};
use crate::input::pointer::{PointerCapture, PointerEvent, PointerId};
use crate::model::snap_point;
use crate::profile_scope;
use crate::types::{Node, NodeId};
use tracing::{debug, trace};

/// The transient record of an in-progress node reposition.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub node_id: NodeId,
    pub pointer_id: PointerId,
    /// Committed world position of the node when the drag began
    pub origin: Point,
    /// Screen position of the pointer when the drag began
    pub pointer_origin: Point,
    /// Position currently shown for the node
    pub displayed: Point,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Grid applied to drag candidates, `None` when snapping is off
pub type Snap = Option<f64>;

/// Position to commit when a drag ends normally
#[derive(Clone, Debug, PartialEq)]
pub struct DragCommit {
    pub node_id: NodeId,
    pub position: Point,
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn dragged_node(&self) -> Option<&NodeId> {
        self.session().map(|s| &s.node_id)
    }

    /// In-flight position of `node_id`, if it is the node being dragged
    pub fn displayed_position(&self, node_id: &NodeId) -> Option<Point> {
        self.session()
            .filter(|s| &s.node_id == node_id)
            .map(|s| s.displayed)
    }

    /// Start dragging `node`. Returns false if a drag is already active.
    pub fn begin(
        &mut self,
        node: &Node,
        event: &PointerEvent,
        capture: &mut dyn PointerCapture,
    ) -> bool {
        if self.is_dragging() {
            return false;
        }

        if let Err(e) = capture.capture(event.pointer_id) {
            debug!(pointer = event.pointer_id, "Pointer capture failed, dragging uncaptured: {}", e);
        }

        debug!(node = %node.id, pointer = event.pointer_id, "Drag start");
        self.state = DragState::Dragging(DragSession {
            node_id: node.id.clone(),
            pointer_id: event.pointer_id,
            origin: node.position(),
            pointer_origin: event.position,
            displayed: node.position(),
        });
        true
    }

    /// Update the displayed position. Returns the new position, or `None` if
    /// no drag is active or the event belongs to another pointer.
    pub fn update(&mut self, event: &PointerEvent, transform: &Transform, snap: Snap) -> Option<Point> {
        profile_scope!("drag_update");

        let DragState::Dragging(session) = &mut self.state else {
            return None;
        };
        if session.pointer_id != event.pointer_id {
            return None;
        }

        session.displayed = candidate(session, event, transform, snap);
        trace!(node = %session.node_id, x = session.displayed.x, y = session.displayed.y, "Drag move");
        Some(session.displayed)
    }

    /// Finish the drag, releasing capture and returning the position to
    /// commit. A failed release is ignored; the controller is idle afterwards
    /// either way.
    ///
    /// A pointer-up at the pointer-down position is a click and commits
    /// nothing.
    pub fn finish(
        &mut self,
        event: &PointerEvent,
        transform: &Transform,
        snap: Snap,
        capture: &mut dyn PointerCapture,
    ) -> Option<DragCommit> {
        let DragState::Dragging(session) = &self.state else {
            return None;
        };
        if session.pointer_id != event.pointer_id {
            return None;
        }

        let clicked = event.position == session.pointer_origin;
        let position = candidate(session, event, transform, snap);
        let node_id = session.node_id.clone();
        if let Err(e) = capture.release(event.pointer_id) {
            debug!(pointer = event.pointer_id, "Pointer release failed, ignoring: {}", e);
        }
        self.state = DragState::Idle;

        if clicked {
            debug!(node = %node_id, "Drag end without movement");
            return None;
        }
        debug!(node = %node_id, x = position.x, y = position.y, "Drag end");
        Some(DragCommit { node_id, position })
    }

    /// Abandon the drag without committing. Returns the node that was being
    /// dragged, if any.
    pub fn cancel(&mut self, pointer_id: PointerId) -> Option<NodeId> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) if session.pointer_id == pointer_id => {
                debug!(node = %session.node_id, "Drag cancelled");
                Some(session.node_id)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Drop the session unconditionally (node removed underneath it)
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }
}

fn candidate(session: &DragSession, event: &PointerEvent, transform: &Transform, snap: Snap) -> Point {
    let delta = transform.delta_to_world(event.position - session.pointer_origin);
    let position = session.origin + delta;
    match snap {
        Some(grid) => snap_point(position, grid),
        None => position,
    }
}
