//! The board - composes transform, controllers, edge rendering and the
//! node model, and is the only place that reports funnel changes.
//!
//! ## Ownership
//!
//! The board holds the current funnel snapshot but never edits it in place.
//! Each edit builds a new funnel through [`crate::model`], stores it, and
//! hands it to the change callback. A host that replaces the funnel from
//! outside calls [`Board::set_funnel`].
//!
//! ## Gestures
//!
//! A pointer-down is hit-tested against committed node bounds. A hit starts
//! a node drag, a miss starts a board pan. While either gesture is active,
//! further pointer-downs are ignored, so the two never overlap.

use crate::input::coords::{Point, Size, Transform};
use crate::input::drag::{DragController, DragSession, Snap};
use crate::input::pan_zoom::{self, PanZoomController};
use crate::input::pointer::{
    DropPayload, EventResponse, InputEvent, PointerCapture, PointerEvent, PointerId, WheelEvent,
};
use crate::model;
use crate::profile_scope;
use crate::render::edges::render_edges;
use crate::render::scene::{Scene, SceneNode};
use crate::settings::CanvasSettings;
use crate::spatial_index::SpatialIndex;
use crate::types::{EdgeId, Funnel, NodeDataPatch, NodeId, NodeKind};
use tracing::{debug, trace};

/// Called with the new funnel after every committed edit
pub type FunnelCallback = Box<dyn FnMut(&Funnel)>;

/// What a pointer-down landed on
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Node(NodeId),
    Background,
}

pub struct Board {
    funnel: Funnel,
    settings: CanvasSettings,
    transform: Transform,
    viewport: Size,
    snap: bool,
    selection: Option<NodeId>,
    side_panel: Option<NodeId>,
    settings_panel: Option<NodeId>,
    drag: DragController,
    pan_zoom: PanZoomController,
    /// Pointer still captured by a drag that ended when its node vanished
    stale_capture: Option<PointerId>,
    index: SpatialIndex,
    on_change: FunnelCallback,
}

impl Board {
    pub fn new(
        funnel: Funnel,
        settings: CanvasSettings,
        on_change: impl FnMut(&Funnel) + 'static,
    ) -> Self {
        let index = SpatialIndex::from_nodes(&funnel.nodes, settings.layout.node_size);
        Self {
            transform: settings.zoom.default_transform,
            snap: settings.snap_enabled,
            funnel,
            settings,
            viewport: Size::default(),
            selection: None,
            side_panel: None,
            settings_panel: None,
            drag: DragController::new(),
            pan_zoom: PanZoomController::new(),
            stale_capture: None,
            index,
            on_change: Box::new(on_change),
        }
    }

    // ==================== Accessors ====================

    pub fn funnel(&self) -> &Funnel {
        &self.funnel
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn zoom_percent(&self) -> u32 {
        self.transform.zoom_percent()
    }

    pub fn selection(&self) -> Option<&NodeId> {
        self.selection.as_ref()
    }

    pub fn side_panel(&self) -> Option<&NodeId> {
        self.side_panel.as_ref()
    }

    pub fn settings_panel(&self) -> Option<&NodeId> {
        self.settings_panel.as_ref()
    }

    pub fn snap_enabled(&self) -> bool {
        self.snap
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    pub fn is_panning(&self) -> bool {
        self.pan_zoom.is_panning()
    }

    /// Pointer whose capture is owed a release after its drag was dropped
    pub fn stale_capture(&self) -> Option<PointerId> {
        self.stale_capture
    }

    /// Node (or background) under a screen position, by committed bounds
    pub fn hit_test(&self, screen: Point) -> HitTarget {
        let world = self.transform.to_world(screen);
        match self.index.topmost_at(world) {
            Some(id) => HitTarget::Node(id.clone()),
            None => HitTarget::Background,
        }
    }

    // ==================== External updates ====================

    /// Replace the funnel with a snapshot from the host. Does not invoke the
    /// change callback.
    pub fn set_funnel(&mut self, funnel: Funnel) {
        if funnel.same_snapshot(&self.funnel) {
            return;
        }
        self.funnel = funnel;
        self.reindex();
        self.reconcile();
    }

    pub fn apply_settings(&mut self, settings: CanvasSettings) {
        debug!("Applying canvas settings");
        self.settings = settings;
        self.transform = Transform {
            scale: self.settings.zoom.bounds.clamp(self.transform.scale),
            ..self.transform
        };
        self.reindex();
    }

    /// Size of the visible board area, used to anchor button zoom
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
    }

    // ==================== Input ====================

    /// Single entry point for every input event
    pub fn handle(&mut self, event: &InputEvent, capture: &mut dyn PointerCapture) -> EventResponse {
        self.release_stale_capture(capture);
        match event {
            InputEvent::PointerDown(e) => self.pointer_down(e, capture),
            InputEvent::PointerMove(e) => self.pointer_move(e),
            InputEvent::PointerUp(e) => self.pointer_up(e, capture),
            InputEvent::PointerLeave(e) => self.pointer_leave(e, capture),
            InputEvent::LostPointerCapture { pointer_id } => self.lost_pointer_capture(*pointer_id),
            InputEvent::Wheel(e) => self.wheel(e),
            InputEvent::Drop(payload) => {
                let added = self.drop_node(payload).is_some();
                EventResponse {
                    prevent_default: true,
                    redraw: added,
                }
            }
            InputEvent::ZoomIn => self.redraw_if(|board| board.zoom_in()),
            InputEvent::ZoomOut => self.redraw_if(|board| board.zoom_out()),
            InputEvent::FitView => self.redraw_if(|board| board.fit_view()),
        }
    }

    pub fn pointer_down(&mut self, event: &PointerEvent, capture: &mut dyn PointerCapture) -> EventResponse {
        profile_scope!("pointer_down");

        if self.drag.is_dragging() || self.pan_zoom.is_panning() {
            trace!(pointer = event.pointer_id, "Pointer down during active gesture, ignored");
            return EventResponse::IGNORED;
        }

        match self.hit_test(event.position) {
            HitTarget::Node(id) => {
                if let Some(node) = self.funnel.node(&id) {
                    self.drag.begin(node, event, capture);
                }
                self.selection = Some(id);
            }
            HitTarget::Background => {
                self.selection = None;
                self.pan_zoom.begin(event, capture);
            }
        }
        EventResponse::REDRAW
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) -> EventResponse {
        profile_scope!("pointer_move");

        if self.drag.is_dragging() {
            let snap = self.drag_snap();
            return match self.drag.update(event, &self.transform, snap) {
                Some(_) => EventResponse::REDRAW,
                None => EventResponse::IGNORED,
            };
        }
        match self.pan_zoom.update(event, &self.transform) {
            Some(next) => {
                self.transform = next;
                EventResponse::REDRAW
            }
            None => EventResponse::IGNORED,
        }
    }

    pub fn pointer_up(&mut self, event: &PointerEvent, capture: &mut dyn PointerCapture) -> EventResponse {
        if self.drag.is_dragging() {
            let snap = self.drag_snap();
            let Some(commit) = self.drag.finish(event, &self.transform, snap, capture) else {
                // Still dragging means the event came from another pointer
                return if self.drag.is_dragging() {
                    EventResponse::IGNORED
                } else {
                    EventResponse::REDRAW
                };
            };
            let next = model::move_node(
                &self.funnel,
                &commit.node_id,
                commit.position.x,
                commit.position.y,
            );
            self.commit(next);
            return EventResponse::REDRAW;
        }
        if self.pan_zoom.finish(event.pointer_id, capture) {
            return EventResponse::REDRAW;
        }
        EventResponse::IGNORED
    }

    /// Pointer left the window mid-gesture: end it without committing
    pub fn pointer_leave(&mut self, event: &PointerEvent, capture: &mut dyn PointerCapture) -> EventResponse {
        let ended = self.cancel_gestures(event.pointer_id);
        if ended {
            if let Err(e) = capture.release(event.pointer_id) {
                debug!(pointer = event.pointer_id, "Pointer release failed, ignoring: {}", e);
            }
        }
        EventResponse {
            prevent_default: false,
            redraw: ended,
        }
    }

    /// Release the capture held by a drag whose node was removed by an edit.
    /// Edits have no capture handle, so this runs on the next event; hosts
    /// may also call it directly after an edit. Returns whether a release
    /// was attempted.
    pub fn release_stale_capture(&mut self, capture: &mut dyn PointerCapture) -> bool {
        let Some(pointer_id) = self.stale_capture.take() else {
            return false;
        };
        debug!(pointer = pointer_id, "Releasing capture of ended drag");
        if let Err(e) = capture.release(pointer_id) {
            debug!(pointer = pointer_id, "Pointer release failed, ignoring: {}", e);
        }
        true
    }

    /// Capture was lost unexpectedly: end any gesture without committing
    pub fn lost_pointer_capture(&mut self, pointer_id: PointerId) -> EventResponse {
        if self.stale_capture == Some(pointer_id) {
            self.stale_capture = None;
        }
        EventResponse {
            prevent_default: false,
            redraw: self.cancel_gestures(pointer_id),
        }
    }

    pub fn wheel(&mut self, event: &WheelEvent) -> EventResponse {
        profile_scope!("wheel");

        self.transform = self
            .pan_zoom
            .wheel(event, &self.transform, &self.settings.zoom);
        EventResponse {
            prevent_default: true,
            redraw: true,
        }
    }

    // ==================== View actions ====================

    pub fn zoom_in(&mut self) -> bool {
        let next = pan_zoom::zoom_in(&self.transform, self.viewport.center(), &self.settings.zoom);
        self.set_transform(next)
    }

    pub fn zoom_out(&mut self) -> bool {
        let next = pan_zoom::zoom_out(&self.transform, self.viewport.center(), &self.settings.zoom);
        self.set_transform(next)
    }

    pub fn fit_view(&mut self) -> bool {
        let next = pan_zoom::fit_view(&self.settings.zoom);
        self.set_transform(next)
    }

    pub fn set_snap(&mut self, enabled: bool) {
        self.snap = enabled;
    }

    pub fn toggle_snap(&mut self) -> bool {
        self.snap = !self.snap;
        self.snap
    }

    // ==================== Selection & panels ====================

    /// Select `id`; ignored if the node does not exist
    pub fn select(&mut self, id: &NodeId) -> bool {
        if !self.funnel.contains_node(id) {
            return false;
        }
        self.selection = Some(id.clone());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn open_side_panel(&mut self, id: &NodeId) -> bool {
        if !self.funnel.contains_node(id) {
            return false;
        }
        self.side_panel = Some(id.clone());
        true
    }

    pub fn close_side_panel(&mut self) {
        self.side_panel = None;
    }

    pub fn open_settings_panel(&mut self, id: &NodeId) -> bool {
        if !self.funnel.contains_node(id) {
            return false;
        }
        self.settings_panel = Some(id.clone());
        true
    }

    pub fn close_settings_panel(&mut self) {
        self.settings_panel = None;
    }

    // ==================== Edits ====================

    /// Add a node from a palette drop. The cursor marks the node's center.
    pub fn drop_node(&mut self, payload: &DropPayload) -> Option<NodeId> {
        let kind = NodeKind::from(payload.kind.as_str());
        if kind.is_unknown() {
            debug!(kind = %kind, "Dropped unknown node type");
        }
        let world = self.transform.to_world(payload.position) + self.settings.layout.drop_anchor_offset;
        let next = model::add_node(&self.funnel, kind, world, self.snap, &self.settings.layout);
        let id = next.nodes.last().map(|n| n.id.clone());
        self.commit(next).then_some(id).flatten()
    }

    /// Add a connected child to the right of `parent`
    pub fn add_child(&mut self, parent: &NodeId) -> Option<NodeId> {
        let next = model::add_child(&self.funnel, parent, self.snap, &self.settings.layout);
        let id = next.nodes.last().map(|n| n.id.clone());
        self.commit(next).then_some(id).flatten()
    }

    pub fn delete_node(&mut self, id: &NodeId) -> bool {
        let next = model::delete_node(&self.funnel, id);
        self.commit(next)
    }

    pub fn update_node_data(&mut self, id: &NodeId, patch: &NodeDataPatch) -> bool {
        let next = model::update_node_data(&self.funnel, id, patch);
        self.commit(next)
    }

    /// Inline edit of a text-type node's name
    pub fn rename_node(&mut self, id: &NodeId, name: &str) -> bool {
        let inline = self
            .funnel
            .node(id)
            .is_some_and(|n| n.kind.chrome().inline_edit);
        if !inline {
            return false;
        }
        self.update_node_data(id, &NodeDataPatch::name(name))
    }

    /// Flip the checklist state of a node that shows a checklist
    pub fn toggle_completed(&mut self, id: &NodeId) -> bool {
        let Some(node) = self.funnel.node(id) else {
            return false;
        };
        if !node.kind.chrome().checklist {
            return false;
        }
        let patch = NodeDataPatch::default().with_completed(!node.data.is_completed());
        self.update_node_data(id, &patch)
    }

    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> bool {
        let next = model::connect(&self.funnel, source, target);
        self.commit(next)
    }

    pub fn disconnect(&mut self, edge: &EdgeId) -> bool {
        let next = model::disconnect(&self.funnel, edge);
        self.commit(next)
    }

    // ==================== Scene ====================

    pub fn scene(&self) -> Scene {
        profile_scope!("scene");

        let size = self.settings.layout.node_size;
        let dragged = self.drag.session().map(|s| (&s.node_id, s.displayed));

        let nodes = self
            .funnel
            .nodes
            .iter()
            .map(|node| {
                let displayed = self.drag.displayed_position(&node.id);
                SceneNode {
                    id: node.id.clone(),
                    kind: node.kind.clone(),
                    icon: node.kind.icon(),
                    position: displayed.unwrap_or_else(|| node.position()),
                    size,
                    data: node.data.clone(),
                    chrome: node.kind.chrome(),
                    selected: self.selection.as_ref() == Some(&node.id),
                    dragging: displayed.is_some(),
                }
            })
            .collect();

        Scene {
            transform: self.transform,
            zoom_percent: self.zoom_percent(),
            snap_enabled: self.snap,
            nodes,
            edges: render_edges(&self.funnel, dragged, &self.settings),
            side_panel: self.side_panel.clone(),
            settings_panel: self.settings_panel.clone(),
        }
    }

    // ==================== Internals ====================

    fn drag_snap(&self) -> Snap {
        self.snap.then_some(self.settings.layout.grid_size)
    }

    fn set_transform(&mut self, next: Transform) -> bool {
        if next == self.transform {
            return false;
        }
        self.transform = next;
        true
    }

    fn redraw_if(&mut self, f: impl FnOnce(&mut Self) -> bool) -> EventResponse {
        if f(self) {
            EventResponse::REDRAW
        } else {
            EventResponse::IGNORED
        }
    }

    fn cancel_gestures(&mut self, pointer_id: PointerId) -> bool {
        let drag = self.drag.cancel(pointer_id).is_some();
        let pan = self.pan_zoom.cancel(pointer_id);
        drag || pan
    }

    /// Store `next` and notify the host, unless nothing changed
    fn commit(&mut self, next: Funnel) -> bool {
        if next.same_snapshot(&self.funnel) {
            return false;
        }
        self.funnel = next;
        self.reindex();
        self.reconcile();
        (self.on_change)(&self.funnel);
        true
    }

    fn reindex(&mut self) {
        self.index
            .rebuild(&self.funnel.nodes, self.settings.layout.node_size);
    }

    /// Drop references to nodes that no longer exist
    fn reconcile(&mut self) {
        let funnel = &self.funnel;
        let gone = |slot: &Option<NodeId>| slot.as_ref().is_some_and(|id| !funnel.contains_node(id));

        if gone(&self.selection) {
            self.selection = None;
        }
        if gone(&self.side_panel) {
            debug!("Closing side panel of removed node");
            self.side_panel = None;
        }
        if gone(&self.settings_panel) {
            debug!("Closing settings panel of removed node");
            self.settings_panel = None;
        }
        if let Some(session) = self.drag.session() {
            if !funnel.contains_node(&session.node_id) {
                debug!(node = %session.node_id, "Dragged node removed, ending drag");
                self.stale_capture = Some(session.pointer_id);
                self.drag.reset();
            }
        }
    }
}
