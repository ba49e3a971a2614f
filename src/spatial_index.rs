//! Spatial Index Module
//!
//! R-tree over committed node bounding boxes, used to decide whether a
//! pointer-down landed on a node or on the board background. Point queries
//! are O(log n) instead of a scan over every node.

use crate::input::coords::{Point, Size};
use crate::types::{Node, NodeId};
use rstar::{AABB, RTree, RTreeObject};

/// A node's bounding box plus its paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialEntry {
    pub node_id: NodeId,
    /// Index in the funnel's node list; later nodes paint on top
    pub z: usize,
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl SpatialEntry {
    pub fn new(node_id: NodeId, z: usize, position: Point, size: Size) -> Self {
        Self {
            node_id,
            z,
            min: [position.x, position.y],
            max: [position.x + size.width, position.y + size.height],
        }
    }

    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.min[0] && p.x <= self.max[0] && p.y >= self.min[1] && p.y <= self.max[1]
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

/// Spatial index for funnel nodes using an R-tree.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over `nodes`, all sharing `size`.
    pub fn from_nodes(nodes: &[Node], size: Size) -> Self {
        let entries = nodes
            .iter()
            .enumerate()
            .map(|(z, node)| SpatialEntry::new(node.id.clone(), z, node.position(), size))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    pub fn rebuild(&mut self, nodes: &[Node], size: Size) {
        *self = Self::from_nodes(nodes, size);
    }

    /// All nodes containing world point `p`, in no particular order
    pub fn query_point(&self, p: Point) -> Vec<&NodeId> {
        let envelope = AABB::from_point([p.x, p.y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.contains_point(p))
            .map(|entry| &entry.node_id)
            .collect()
    }

    /// The topmost node containing `p`
    pub fn topmost_at(&self, p: Point) -> Option<&NodeId> {
        let envelope = AABB::from_point([p.x, p.y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.contains_point(p))
            .max_by_key(|entry| entry.z)
            .map(|entry| &entry.node_id)
    }

    /// All nodes intersecting the world-space rectangle
    pub fn query_rect(&self, min: Point, max: Point) -> Vec<&NodeId> {
        let envelope = AABB::from_corners([min.x, min.y], [max.x, max.y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| &entry.node_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
