//! Core types for the funnel canvas.
//!
//! A [`Funnel`] is the externally owned record the canvas edits. The canvas
//! never mutates one in place: every edit produces a new value, and the node
//! and edge sequences are shared behind an [`Arc`] so unchanged halves can be
//! detected by pointer identity.

use crate::constants::DEFAULT_NODE_NAME;
use crate::input::coords::{Point, Size};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of a node, unique within a funnel and stable across edits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an edge.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EdgeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Node Kinds
// ============================================================================

/// The type of a funnel step.
///
/// Serialized as the plain type string. Strings that match no known kind
/// deserialize to [`NodeKind::Unknown`] and round-trip unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Ad,
    LandingPage,
    Optin,
    Email,
    Sms,
    Webinar,
    SalesPage,
    Checkout,
    Upsell,
    Downsell,
    ThankYou,
    /// Free-floating annotation, edited inline
    Text,
    /// A type string this version does not know
    Unknown(String),
}

/// Which affordances a node draws around its content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NodeChrome {
    /// Task-mode checkbox
    pub checklist: bool,
    /// Output port used to create children
    pub port_handle: bool,
    /// Name is edited in place rather than in the side panel
    pub inline_edit: bool,
}

impl NodeKind {
    pub fn all() -> &'static [NodeKind] {
        &[
            NodeKind::Ad,
            NodeKind::LandingPage,
            NodeKind::Optin,
            NodeKind::Email,
            NodeKind::Sms,
            NodeKind::Webinar,
            NodeKind::SalesPage,
            NodeKind::Checkout,
            NodeKind::Upsell,
            NodeKind::Downsell,
            NodeKind::ThankYou,
            NodeKind::Text,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Ad => "Ad",
            NodeKind::LandingPage => "LandingPage",
            NodeKind::Optin => "Optin",
            NodeKind::Email => "Email",
            NodeKind::Sms => "Sms",
            NodeKind::Webinar => "Webinar",
            NodeKind::SalesPage => "SalesPage",
            NodeKind::Checkout => "Checkout",
            NodeKind::Upsell => "Upsell",
            NodeKind::Downsell => "Downsell",
            NodeKind::ThankYou => "ThankYou",
            NodeKind::Text => "Text",
            NodeKind::Unknown(s) => s,
        }
    }

    /// Human-readable label, also used as the default name of new nodes
    pub fn label(&self) -> &str {
        match self {
            NodeKind::Ad => "Ad",
            NodeKind::LandingPage => "Landing Page",
            NodeKind::Optin => "Opt-in",
            NodeKind::Email => "Email",
            NodeKind::Sms => "SMS",
            NodeKind::Webinar => "Webinar",
            NodeKind::SalesPage => "Sales Page",
            NodeKind::Checkout => "Checkout",
            NodeKind::Upsell => "Upsell",
            NodeKind::Downsell => "Downsell",
            NodeKind::ThankYou => "Thank You",
            NodeKind::Text => "Text",
            NodeKind::Unknown(_) => DEFAULT_NODE_NAME,
        }
    }

    /// Icon name for renderers
    pub fn icon(&self) -> &'static str {
        match self {
            NodeKind::Ad => "megaphone",
            NodeKind::LandingPage => "layout",
            NodeKind::Optin => "user-plus",
            NodeKind::Email => "mail",
            NodeKind::Sms => "message-square",
            NodeKind::Webinar => "video",
            NodeKind::SalesPage => "file-text",
            NodeKind::Checkout => "shopping-cart",
            NodeKind::Upsell => "trending-up",
            NodeKind::Downsell => "trending-down",
            NodeKind::ThankYou => "heart",
            NodeKind::Text => "type",
            NodeKind::Unknown(_) => "help-circle",
        }
    }

    pub fn chrome(&self) -> NodeChrome {
        match self {
            NodeKind::Text => NodeChrome {
                checklist: false,
                port_handle: false,
                inline_edit: true,
            },
            _ => NodeChrome {
                checklist: true,
                port_handle: true,
                inline_edit: false,
            },
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, NodeKind::Unknown(_))
    }
}

impl From<&str> for NodeKind {
    fn from(s: &str) -> Self {
        match s {
            "Ad" => NodeKind::Ad,
            "LandingPage" => NodeKind::LandingPage,
            "Optin" => NodeKind::Optin,
            "Email" => NodeKind::Email,
            "Sms" => NodeKind::Sms,
            "Webinar" => NodeKind::Webinar,
            "SalesPage" => NodeKind::SalesPage,
            "Checkout" => NodeKind::Checkout,
            "Upsell" => NodeKind::Upsell,
            "Downsell" => NodeKind::Downsell,
            "ThankYou" => NodeKind::ThankYou,
            "Text" => NodeKind::Text,
            other => NodeKind::Unknown(other.to_string()),
        }
    }
}

impl From<String> for NodeKind {
    fn from(s: String) -> Self {
        match NodeKind::from(s.as_str()) {
            NodeKind::Unknown(_) => NodeKind::Unknown(s),
            known => known,
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Unknown(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Node & Edge
// ============================================================================

/// Free-form content of a node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_task_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl NodeData {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_task_mode(&self) -> bool {
        self.is_task_mode.unwrap_or(false)
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed.unwrap_or(false)
    }
}

/// A partial [`NodeData`] shallow-merged over a node's data. `None` fields
/// leave the existing value alone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeDataPatch {
    pub name: Option<String>,
    pub subtitle: Option<String>,
    pub notes: Option<String>,
    pub description: Option<String>,
    pub is_task_mode: Option<bool>,
    pub is_completed: Option<bool>,
}

impl NodeDataPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_task_mode(mut self, enabled: bool) -> Self {
        self.is_task_mode = Some(enabled);
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.is_completed = Some(completed);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge into `data`, returning the merged copy
    pub fn merged_into(&self, data: &NodeData) -> NodeData {
        NodeData {
            name: self.name.clone().unwrap_or_else(|| data.name.clone()),
            subtitle: self.subtitle.clone().or_else(|| data.subtitle.clone()),
            notes: self.notes.clone().or_else(|| data.notes.clone()),
            description: self.description.clone().or_else(|| data.description.clone()),
            is_task_mode: self.is_task_mode.or(data.is_task_mode),
            is_completed: self.is_completed.or(data.is_completed),
        }
    }
}

/// A funnel step placed on the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// World-space x of the bounding box's top-left corner
    pub x: f64,
    /// World-space y of the bounding box's top-left corner
    pub y: f64,
    #[serde(default)]
    pub data: NodeData,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, kind: NodeKind, position: Point) -> Self {
        let data = NodeData::named(kind.label());
        Self {
            id: id.into(),
            kind,
            x: position.x,
            y: position.y,
            data,
        }
    }

    pub fn with_data(mut self, data: NodeData) -> Self {
        self.data = data;
        self
    }

    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Bounding box of this node at `position` with the given size
    pub fn bounds_at(position: Point, size: Size) -> Rect {
        Rect {
            origin: position,
            size,
        }
    }
}

/// An axis-aligned box in world space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn right_center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn left_center(&self) -> Point {
        Point::new(self.origin.x, self.origin.y + self.size.height / 2.0)
    }
}

/// A directed connection from `source` to `target`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(id: impl Into<EdgeId>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.source == node_id || &self.target == node_id
    }
}

// ============================================================================
// Funnel
// ============================================================================

/// Lifecycle status of a funnel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunnelStatus {
    #[default]
    Draft,
    Active,
    Paused,
    Done,
}

impl FunnelStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FunnelStatus::Draft => "Draft",
            FunnelStatus::Active => "Active",
            FunnelStatus::Paused => "Paused",
            FunnelStatus::Done => "Done",
        }
    }
}

/// A flow of funnel steps and the connections between them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Funnel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: FunnelStatus,
    #[serde(default)]
    pub nodes: Arc<Vec<Node>>,
    #[serde(default)]
    pub edges: Arc<Vec<Edge>>,
}

impl Funnel {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.nodes = Arc::new(nodes);
        self
    }

    pub fn with_edges(mut self, edges: Vec<Edge>) -> Self {
        self.edges = Arc::new(edges);
        self
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| &e.id == id)
    }

    /// Edges whose source or target is `id`
    pub fn incident_edges<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.touches(id))
    }

    /// True when `other` is this value, or a clone sharing both sequences.
    pub fn same_snapshot(&self, other: &Funnel) -> bool {
        Arc::ptr_eq(&self.nodes, &other.nodes)
            && Arc::ptr_eq(&self.edges, &other.edges)
            && self.id == other.id
            && self.name == other.name
            && self.status == other.status
    }
}
