//! Unit tests for funnel edit operations.

use crate::helpers::{TestFunnelBuilder, empty_funnel, linear_funnel};
use funnel_canvas::input::Point;
use funnel_canvas::model::{
    add_child, add_node, connect, delete_node, disconnect, move_node, snap_point, snap_to_grid,
    update_node_data,
};
use funnel_canvas::settings::LayoutSettings;
use funnel_canvas::types::{EdgeId, NodeDataPatch, NodeId, NodeKind};
use std::sync::Arc;

#[test]
fn test_snap_rounds_to_nearest() {
    assert_eq!(snap_to_grid(13.0, 28.0), 0.0);
    assert_eq!(snap_to_grid(15.0, 28.0), 28.0);
    assert_eq!(snap_to_grid(-30.0, 28.0), -28.0);
    assert_eq!(snap_to_grid(60.0, 28.0), 56.0);
    assert_eq!(snap_point(Point::new(41.0, 43.0), 28.0), Point::new(28.0, 56.0));
}

#[test]
fn test_add_node_appends_without_touching_input() {
    let funnel = empty_funnel();
    let next = add_node(&funnel, NodeKind::Ad, Point::new(10.0, 20.0), false, &LayoutSettings::default());

    assert!(funnel.nodes.is_empty());
    assert_eq!(next.nodes.len(), 1);
    let node = &next.nodes[0];
    assert_eq!(node.kind, NodeKind::Ad);
    assert_eq!(node.position(), Point::new(10.0, 20.0));
    assert_eq!(node.data.name, "Ad");
    assert!(Arc::ptr_eq(&funnel.edges, &next.edges));
}

#[test]
fn test_add_node_snaps_when_enabled() {
    let next = add_node(
        &empty_funnel(),
        NodeKind::Email,
        Point::new(-30.0, 60.0),
        true,
        &LayoutSettings::default(),
    );
    assert_eq!(next.nodes[0].position(), Point::new(-28.0, 56.0));
}

#[test]
fn test_add_node_ids_are_unique() {
    let layout = LayoutSettings::default();
    let mut funnel = empty_funnel();
    for _ in 0..20 {
        funnel = add_node(&funnel, NodeKind::Sms, Point::ZERO, false, &layout);
    }
    let mut ids: Vec<_> = funnel.nodes.iter().map(|n| n.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[test]
fn test_add_child_places_to_the_right() {
    let funnel = TestFunnelBuilder::new()
        .with_node("n1", NodeKind::Webinar, (100.0, 100.0))
        .build();
    let next = add_child(&funnel, &NodeId::from("n1"), false, &LayoutSettings::default());

    assert_eq!(next.nodes.len(), 2);
    let child = &next.nodes[1];
    assert_eq!(child.position(), Point::new(450.0, 100.0));
    assert_eq!(child.kind, NodeKind::Webinar);
    assert_ne!(child.id, NodeId::from("n1"));

    assert_eq!(next.edges.len(), 1);
    assert_eq!(next.edges[0].source, NodeId::from("n1"));
    assert_eq!(next.edges[0].target, child.id);
}

#[test]
fn test_add_child_snaps_off_grid_parent() {
    let funnel = TestFunnelBuilder::new()
        .with_node("n1", NodeKind::Webinar, (100.0, 100.0))
        .build();
    let next = add_child(&funnel, &NodeId::from("n1"), true, &LayoutSettings::default());

    let child = &next.nodes[1];
    assert_eq!(child.position(), Point::new(448.0, 112.0));
    assert_eq!(child.x % 28.0, 0.0);
    assert_eq!(child.y % 28.0, 0.0);
    assert_eq!(next.nodes[0].position(), Point::new(100.0, 100.0));
}

#[test]
fn test_add_child_of_missing_parent_is_noop() {
    let funnel = linear_funnel();
    let next = add_child(&funnel, &NodeId::from("ghost"), true, &LayoutSettings::default());
    assert!(next.same_snapshot(&funnel));
}

#[test]
fn test_delete_node_removes_incident_edges() {
    let funnel = TestFunnelBuilder::new()
        .with_node("n1", NodeKind::Ad, (0.0, 0.0))
        .with_node("n2", NodeKind::Optin, (350.0, 0.0))
        .with_edge("e1", "n1", "n2")
        .build();
    let next = delete_node(&funnel, &NodeId::from("n1"));

    assert_eq!(next.nodes.len(), 1);
    assert_eq!(next.nodes[0].id, NodeId::from("n2"));
    assert!(next.edges.is_empty());
}

#[test]
fn test_delete_middle_node_keeps_unrelated_edges() {
    let funnel = TestFunnelBuilder::new()
        .with_node("a", NodeKind::Ad, (0.0, 0.0))
        .with_node("b", NodeKind::Email, (350.0, 0.0))
        .with_node("c", NodeKind::Sms, (700.0, 0.0))
        .with_node("d", NodeKind::Checkout, (1050.0, 0.0))
        .with_edge("ab", "a", "b")
        .with_edge("bc", "b", "c")
        .with_edge("cd", "c", "d")
        .build();
    let next = delete_node(&funnel, &NodeId::from("b"));

    let ids: Vec<_> = next.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["cd"]);
}

#[test]
fn test_delete_is_idempotent() {
    let funnel = linear_funnel();
    let once = delete_node(&funnel, &NodeId::from("lp"));
    let twice = delete_node(&once, &NodeId::from("lp"));
    assert!(twice.same_snapshot(&once));
}

#[test]
fn test_delete_isolated_node_shares_edges() {
    let funnel = TestFunnelBuilder::new()
        .with_node("a", NodeKind::Ad, (0.0, 0.0))
        .with_node("b", NodeKind::Email, (350.0, 0.0))
        .with_node("note", NodeKind::Text, (0.0, 300.0))
        .with_edge("ab", "a", "b")
        .build();
    let next = delete_node(&funnel, &NodeId::from("note"));
    assert!(Arc::ptr_eq(&funnel.edges, &next.edges));
}

#[test]
fn test_update_node_data_merges() {
    let funnel = linear_funnel();
    let id = NodeId::from("email");
    let patch = NodeDataPatch::name("Welcome").with_task_mode(true);
    let next = update_node_data(&funnel, &id, &patch);

    let node = next.node(&id).unwrap();
    assert_eq!(node.data.name, "Welcome");
    assert!(node.data.is_task_mode());
    assert_eq!(node.data.description, None);

    let next = update_node_data(&next, &id, &NodeDataPatch::default().with_description("Day 1"));
    let node = next.node(&id).unwrap();
    assert_eq!(node.data.name, "Welcome");
    assert_eq!(node.data.description.as_deref(), Some("Day 1"));
}

#[test]
fn test_update_missing_or_unchanged_is_noop() {
    let funnel = linear_funnel();
    let missing = update_node_data(&funnel, &NodeId::from("ghost"), &NodeDataPatch::name("x"));
    assert!(missing.same_snapshot(&funnel));

    let unchanged = update_node_data(&funnel, &NodeId::from("ad"), &NodeDataPatch::name("Ad"));
    assert!(unchanged.same_snapshot(&funnel));
}

#[test]
fn test_move_node() {
    let funnel = linear_funnel();
    let id = NodeId::from("lp");
    let next = move_node(&funnel, &id, 364.0, 28.0);

    assert_eq!(next.node(&id).unwrap().position(), Point::new(364.0, 28.0));
    assert!(Arc::ptr_eq(&funnel.edges, &next.edges));
    assert_eq!(funnel.node(&id).unwrap().position(), Point::new(350.0, 0.0));

    let same = move_node(&next, &id, 364.0, 28.0);
    assert!(same.same_snapshot(&next));
}

#[test]
fn test_connect_and_disconnect() {
    let funnel = TestFunnelBuilder::new()
        .with_node("a", NodeKind::Ad, (0.0, 0.0))
        .with_node("b", NodeKind::Email, (350.0, 0.0))
        .build();
    let a = NodeId::from("a");
    let b = NodeId::from("b");

    let connected = connect(&funnel, &a, &b);
    assert_eq!(connected.edges.len(), 1);
    assert!(Arc::ptr_eq(&funnel.nodes, &connected.nodes));

    let edge_id = connected.edges[0].id.clone();
    let disconnected = disconnect(&connected, &edge_id);
    assert!(disconnected.edges.is_empty());

    let dangling = connect(&funnel, &a, &NodeId::from("ghost"));
    assert!(dangling.same_snapshot(&funnel));
    let missing = disconnect(&funnel, &EdgeId::from("nope"));
    assert!(missing.same_snapshot(&funnel));
}
