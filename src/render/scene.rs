//! Renderer-agnostic description of the board.
//!
//! A [`Scene`] contains everything a DOM, canvas or vector backend needs to
//! draw one frame. Node and edge geometry is in world space; the renderer
//! applies `transform` to the whole layer.

use crate::input::coords::{Point, Size, Transform};
use crate::render::edges::EdgePath;
use crate::types::{NodeChrome, NodeData, NodeId, NodeKind};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub icon: &'static str,
    /// Displayed position: in-flight while dragged, committed otherwise
    pub position: Point,
    pub size: Size,
    pub data: NodeData,
    pub chrome: NodeChrome,
    pub selected: bool,
    pub dragging: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    pub transform: Transform,
    pub zoom_percent: u32,
    pub snap_enabled: bool,
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<EdgePath>,
    pub side_panel: Option<NodeId>,
    pub settings_panel: Option<NodeId>,
}

impl Scene {
    pub fn node(&self, id: &NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Edge paths with `id` as an endpoint
    pub fn edges_touching<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a EdgePath> + 'a {
        self.edges
            .iter()
            .filter(move |e| &e.source == id || &e.target == id)
    }
}
