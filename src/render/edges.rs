//! Edge path geometry.
//!
//! Each edge is a cubic bezier from the right-center of its source node to
//! the left-center of its target, with both control points pushed out
//! horizontally. The S-shape holds whatever the relative placement of the
//! two nodes, including targets to the left of or below their source.

use crate::input::coords::{Point, Size};
use crate::profile_scope;
use crate::settings::CanvasSettings;
use crate::types::{EdgeId, Funnel, Node, NodeId};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write as _;
use tracing::trace;

/// World-space path of one edge
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgePath {
    pub edge_id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl EdgePath {
    /// Build the curve between two node positions of the given size
    pub fn between(
        edge_id: EdgeId,
        source: (&NodeId, Point),
        target: (&NodeId, Point),
        node_size: Size,
        control_offset: f64,
    ) -> Self {
        let start = Node::bounds_at(source.1, node_size).right_center();
        let end = Node::bounds_at(target.1, node_size).left_center();
        Self {
            edge_id,
            source: source.0.clone(),
            target: target.0.clone(),
            start,
            control1: Point::new(start.x + control_offset, start.y),
            control2: Point::new(end.x - control_offset, end.y),
            end,
        }
    }

    /// Point on the curve at `t` in `[0, 1]`
    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        Point::new(
            a * self.start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
            a * self.start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
        )
    }

    /// SVG path data, e.g. `M 260 40 C 310 40, 300 40, 350 40`
    pub fn to_svg(&self) -> String {
        let mut d = String::with_capacity(64);
        let _ = write!(
            d,
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        );
        d
    }
}

/// Paths for every edge of `funnel` whose endpoints both exist.
///
/// `in_flight` overrides the committed position of the node being dragged,
/// so edges follow it on the same frame.
pub fn render_edges(
    funnel: &Funnel,
    in_flight: Option<(&NodeId, Point)>,
    settings: &CanvasSettings,
) -> Vec<EdgePath> {
    profile_scope!("render_edges");

    let positions: HashMap<&NodeId, Point> = funnel
        .nodes
        .iter()
        .map(|node| {
            let position = match in_flight {
                Some((id, displayed)) if id == &node.id => displayed,
                _ => node.position(),
            };
            (&node.id, position)
        })
        .collect();

    funnel
        .edges
        .iter()
        .filter_map(|edge| {
            let (Some(&source), Some(&target)) =
                (positions.get(&edge.source), positions.get(&edge.target))
            else {
                trace!(edge = %edge.id, "Skipping dangling edge");
                return None;
            };
            Some(EdgePath::between(
                edge.id.clone(),
                (&edge.source, source),
                (&edge.target, target),
                settings.layout.node_size,
                settings.edges.control_offset,
            ))
        })
        .collect()
}
