//! Pure edit operations on a [`Funnel`].
//!
//! Every function takes the funnel by reference and returns a new value. A
//! no-op returns a clone that shares both sequences with the input, so
//! [`Funnel::same_snapshot`] reports "nothing changed". When only nodes
//! change the edges `Arc` is carried over untouched, and vice versa.

use crate::input::coords::Point;
use crate::settings::LayoutSettings;
use crate::types::{Edge, EdgeId, Funnel, Node, NodeDataPatch, NodeId, NodeKind};
use std::sync::Arc;
use tracing::{debug, trace};

/// Round `value` to the nearest multiple of `grid`.
#[inline]
pub fn snap_to_grid(value: f64, grid: f64) -> f64 {
    (value / grid).round() * grid
}

/// Round both axes of `point` to the nearest multiple of `grid`.
#[inline]
pub fn snap_point(point: Point, grid: f64) -> Point {
    Point::new(snap_to_grid(point.x, grid), snap_to_grid(point.y, grid))
}

fn placed(position: Point, snap: bool, layout: &LayoutSettings) -> Point {
    if snap {
        snap_point(position, layout.grid_size)
    } else {
        position
    }
}

/// Append a node of `kind` at `position`, snapped to the grid when `snap`.
pub fn add_node(
    funnel: &Funnel,
    kind: NodeKind,
    position: Point,
    snap: bool,
    layout: &LayoutSettings,
) -> Funnel {
    let node = Node::new(NodeId::generate(), kind, placed(position, snap, layout));
    debug!(node = %node.id, kind = %node.kind, x = node.x, y = node.y, "Add node");
    push_node(funnel, node)
}

/// Append a fully formed node. The caller guarantees the id is fresh.
pub fn push_node(funnel: &Funnel, node: Node) -> Funnel {
    let mut nodes = Vec::with_capacity(funnel.nodes.len() + 1);
    nodes.extend(funnel.nodes.iter().cloned());
    nodes.push(node);
    Funnel {
        nodes: Arc::new(nodes),
        ..funnel.clone()
    }
}

/// Create a child of `parent_id` one spacing step to its right, connected
/// by a parent -> child edge. Returns the input unchanged if the parent is
/// absent.
pub fn add_child(
    funnel: &Funnel,
    parent_id: &NodeId,
    snap: bool,
    layout: &LayoutSettings,
) -> Funnel {
    let Some(parent) = funnel.node(parent_id) else {
        debug!(parent = %parent_id, "Add child: parent not found");
        return funnel.clone();
    };

    let position = placed(
        Point::new(parent.x + layout.child_spacing, parent.y),
        snap,
        layout,
    );
    let child = Node::new(NodeId::generate(), parent.kind.clone(), position);
    let edge = Edge::new(EdgeId::generate(), parent.id.clone(), child.id.clone());
    debug!(parent = %parent_id, child = %child.id, "Add child");

    let mut next = push_node(funnel, child);
    let mut edges = Vec::with_capacity(funnel.edges.len() + 1);
    edges.extend(funnel.edges.iter().cloned());
    edges.push(edge);
    next.edges = Arc::new(edges);
    next
}

/// Remove `node_id` and every edge touching it. Idempotent.
pub fn delete_node(funnel: &Funnel, node_id: &NodeId) -> Funnel {
    if !funnel.contains_node(node_id) {
        trace!(node = %node_id, "Delete node: not found");
        return funnel.clone();
    }

    let nodes: Vec<Node> = funnel
        .nodes
        .iter()
        .filter(|n| &n.id != node_id)
        .cloned()
        .collect();

    let edges = if funnel.incident_edges(node_id).next().is_some() {
        Arc::new(
            funnel
                .edges
                .iter()
                .filter(|e| !e.touches(node_id))
                .cloned()
                .collect(),
        )
    } else {
        Arc::clone(&funnel.edges)
    };

    debug!(node = %node_id, removed_edges = funnel.edges.len() - edges.len(), "Delete node");
    Funnel {
        nodes: Arc::new(nodes),
        edges,
        ..funnel.clone()
    }
}

/// Shallow-merge `patch` into the node's data. No-op if the node is absent
/// or the patch changes nothing.
pub fn update_node_data(funnel: &Funnel, node_id: &NodeId, patch: &NodeDataPatch) -> Funnel {
    map_node(funnel, node_id, |node| {
        let data = patch.merged_into(&node.data);
        (data != node.data).then(|| Node {
            data,
            ..node.clone()
        })
    })
}

/// Replace the node's committed position. No-op if absent or unchanged.
pub fn move_node(funnel: &Funnel, node_id: &NodeId, x: f64, y: f64) -> Funnel {
    map_node(funnel, node_id, |node| {
        (node.x != x || node.y != y).then(|| Node {
            x,
            y,
            ..node.clone()
        })
    })
}

/// Add an edge `source -> target`. No-op if either endpoint is absent.
pub fn connect(funnel: &Funnel, source: &NodeId, target: &NodeId) -> Funnel {
    if !funnel.contains_node(source) || !funnel.contains_node(target) {
        debug!(%source, %target, "Connect: endpoint not found");
        return funnel.clone();
    }

    let mut edges = Vec::with_capacity(funnel.edges.len() + 1);
    edges.extend(funnel.edges.iter().cloned());
    edges.push(Edge::new(EdgeId::generate(), source.clone(), target.clone()));
    Funnel {
        edges: Arc::new(edges),
        ..funnel.clone()
    }
}

/// Remove the edge `edge_id`. No-op if absent.
pub fn disconnect(funnel: &Funnel, edge_id: &EdgeId) -> Funnel {
    if funnel.edge(edge_id).is_none() {
        trace!(edge = %edge_id, "Disconnect: not found");
        return funnel.clone();
    }

    Funnel {
        edges: Arc::new(
            funnel
                .edges
                .iter()
                .filter(|e| &e.id != edge_id)
                .cloned()
                .collect(),
        ),
        ..funnel.clone()
    }
}

/// Rebuild the node list with `f` applied to `node_id`. `f` returns `None`
/// to signal that nothing changed.
fn map_node(funnel: &Funnel, node_id: &NodeId, f: impl FnOnce(&Node) -> Option<Node>) -> Funnel {
    let Some(index) = funnel.nodes.iter().position(|n| &n.id == node_id) else {
        trace!(node = %node_id, "Update: node not found");
        return funnel.clone();
    };
    let Some(updated) = f(&funnel.nodes[index]) else {
        return funnel.clone();
    };

    let mut nodes = funnel.nodes.as_ref().clone();
    nodes[index] = updated;
    Funnel {
        nodes: Arc::new(nodes),
        ..funnel.clone()
    }
}
