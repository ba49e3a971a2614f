//! Board Workflow Integration Tests

use crate::helpers::{
    TestFunnelBuilder, assert_close, down, empty_funnel, linear_funnel, move_to, test_board,
    test_board_with, up,
};
use funnel_canvas::input::pointer::{DropPayload, InputEvent, Modifiers, NullCapture, WheelEvent};
use funnel_canvas::input::{Point, Transform};
use funnel_canvas::settings::CanvasSettings;
use funnel_canvas::types::{NodeDataPatch, NodeId, NodeKind};

fn identity_settings() -> CanvasSettings {
    let mut settings = CanvasSettings::default();
    settings.zoom.default_transform = Transform::IDENTITY;
    settings
}

#[test]
fn test_drop_on_empty_funnel_snaps_offset_position() {
    let (mut board, emitted) = test_board_with(empty_funnel(), identity_settings());
    assert!(board.snap_enabled());

    let response = board.handle(
        &InputEvent::Drop(DropPayload {
            kind: "Ad".to_string(),
            position: Point::new(100.0, 100.0),
        }),
        &mut NullCapture,
    );
    assert!(response.prevent_default);
    assert!(response.redraw);

    let emitted = emitted.borrow();
    assert_eq!(emitted.len(), 1);
    let node = &emitted[0].nodes[0];
    assert_eq!(node.kind, NodeKind::Ad);
    // (100, 100) + (-130, -40) = (-30, 60), rounded to the 28 grid
    assert_eq!(node.position(), Point::new(-28.0, 56.0));
}

#[test]
fn test_drop_without_snap_uses_exact_anchor() {
    let (mut board, emitted) = test_board_with(empty_funnel(), identity_settings());
    board.set_snap(false);

    let id = board
        .drop_node(&DropPayload {
            kind: "Checkout".to_string(),
            position: Point::new(500.0, 300.0),
        })
        .unwrap();

    let node = board.funnel().node(&id).unwrap();
    assert_eq!(node.position(), Point::new(370.0, 260.0));
    assert_eq!(emitted.borrow().len(), 1);
}

#[test]
fn test_drop_accounts_for_transform() {
    let (mut board, _) = test_board(empty_funnel());
    board.set_snap(false);
    board.handle(&InputEvent::Wheel(WheelEvent {
        position: Point::new(400.0, 150.0),
        delta: Point::new(0.0, -100.0 * 2f64.ln() / 0.5),
        modifiers: Modifiers::CTRL,
    }), &mut NullCapture);
    assert_close(board.transform().scale, 2.0);

    let id = board
        .drop_node(&DropPayload {
            kind: "Sms".to_string(),
            position: Point::new(600.0, 350.0),
        })
        .unwrap();
    let node = board.funnel().node(&id).unwrap();
    assert_close(node.x, 100.0 - 130.0);
    assert_close(node.y, 100.0 - 40.0);
}

#[test]
fn test_drop_of_unknown_type_is_kept() {
    let (mut board, _) = test_board(empty_funnel());
    let id = board
        .drop_node(&DropPayload {
            kind: "Quiz".to_string(),
            position: Point::new(0.0, 0.0),
        })
        .unwrap();
    let node = board.funnel().node(&id).unwrap();
    assert_eq!(node.kind, NodeKind::Unknown("Quiz".to_string()));
    assert_eq!(node.data.name, "Untitled");
}

#[test]
fn test_add_child_workflow() {
    let funnel = TestFunnelBuilder::new()
        .with_node("n1", NodeKind::Optin, (100.0, 100.0))
        .build();
    let (mut board, emitted) = test_board(funnel);
    board.set_snap(false);

    let child = board.add_child(&NodeId::from("n1")).unwrap();
    let funnel = board.funnel();
    assert_eq!(funnel.node(&child).unwrap().position(), Point::new(450.0, 100.0));
    assert_eq!(funnel.edges.len(), 1);
    assert_eq!(funnel.edges[0].source, NodeId::from("n1"));
    assert_eq!(funnel.edges[0].target, child);
    assert_eq!(emitted.borrow().len(), 1);

    assert_eq!(board.add_child(&NodeId::from("missing")), None);
    assert_eq!(emitted.borrow().len(), 1);
}

#[test]
fn test_delete_node_workflow() {
    let funnel = TestFunnelBuilder::new()
        .with_node("n1", NodeKind::Ad, (0.0, 0.0))
        .with_node("n2", NodeKind::LandingPage, (350.0, 0.0))
        .with_edge("e1", "n1", "n2")
        .build();
    let (mut board, emitted) = test_board(funnel);

    assert!(board.delete_node(&NodeId::from("n1")));
    let funnel = board.funnel();
    assert_eq!(funnel.nodes.len(), 1);
    assert_eq!(funnel.nodes[0].id, NodeId::from("n2"));
    assert!(funnel.edges.is_empty());
    assert!(board.scene().edges.is_empty());

    assert!(!board.delete_node(&NodeId::from("n1")));
    assert_eq!(emitted.borrow().len(), 1);
}

#[test]
fn test_connect_and_disconnect_workflow() {
    let funnel = TestFunnelBuilder::new()
        .with_node("a", NodeKind::Ad, (0.0, 0.0))
        .with_node("b", NodeKind::Email, (350.0, 0.0))
        .build();
    let (mut board, emitted) = test_board(funnel);

    assert!(board.connect(&NodeId::from("a"), &NodeId::from("b")));
    assert_eq!(board.scene().edges.len(), 1);

    let edge = board.funnel().edges[0].id.clone();
    assert!(board.disconnect(&edge));
    assert!(board.scene().edges.is_empty());
    assert_eq!(emitted.borrow().len(), 2);
}

#[test]
fn test_rename_only_for_inline_kinds() {
    let funnel = TestFunnelBuilder::new()
        .with_node("note", NodeKind::Text, (0.0, 300.0))
        .with_node("ad", NodeKind::Ad, (0.0, 0.0))
        .build();
    let (mut board, _) = test_board(funnel);

    assert!(board.rename_node(&NodeId::from("note"), "Remember the promo code"));
    assert_eq!(
        board.funnel().node(&NodeId::from("note")).unwrap().data.name,
        "Remember the promo code"
    );
    assert!(!board.rename_node(&NodeId::from("ad"), "Renamed"));
}

#[test]
fn test_side_panel_edits_data() {
    let (mut board, emitted) = test_board(linear_funnel());
    let email = NodeId::from("email");

    assert!(board.open_side_panel(&email));
    let patch = NodeDataPatch::name("Day 1 welcome").with_description("Sent on signup");
    assert!(board.update_node_data(&email, &patch));

    let scene = board.scene();
    assert_eq!(scene.side_panel, Some(email.clone()));
    let node = scene.node(&email).unwrap();
    assert_eq!(node.data.name, "Day 1 welcome");
    assert_eq!(node.data.description.as_deref(), Some("Sent on signup"));

    assert!(!board.update_node_data(&email, &patch));
    assert_eq!(emitted.borrow().len(), 1);
}

#[test]
fn test_toggle_completed() {
    let funnel = TestFunnelBuilder::new()
        .with_node("ad", NodeKind::Ad, (0.0, 0.0))
        .with_node("note", NodeKind::Text, (0.0, 300.0))
        .build();
    let (mut board, _) = test_board(funnel);
    let ad = NodeId::from("ad");

    assert!(board.update_node_data(&ad, &NodeDataPatch::default().with_task_mode(true)));
    assert!(board.toggle_completed(&ad));
    assert!(board.funnel().node(&ad).unwrap().data.is_completed());
    assert!(board.toggle_completed(&ad));
    assert!(!board.funnel().node(&ad).unwrap().data.is_completed());

    assert!(!board.toggle_completed(&NodeId::from("note")));
}

#[test]
fn test_external_funnel_replacement_is_not_echoed() {
    let (mut board, emitted) = test_board(linear_funnel());
    let replacement = TestFunnelBuilder::new()
        .with_node("solo", NodeKind::Webinar, (0.0, 0.0))
        .build();

    board.set_funnel(replacement.clone());
    assert!(board.funnel().same_snapshot(&replacement));
    assert!(emitted.borrow().is_empty());

    // The hit index follows the new funnel: (0, 0) world is (400, 150) screen
    board.handle(&down(410.0, 160.0), &mut NullCapture);
    assert_eq!(board.selection(), Some(&NodeId::from("solo")));
}

#[test]
fn test_no_op_gesture_does_not_emit() {
    let (mut board, emitted) = test_board(linear_funnel());
    let mut capture = NullCapture;

    board.handle(&down(410.0, 160.0), &mut capture);
    board.handle(&up(410.0, 160.0), &mut capture);
    board.handle(&down(1200.0, 700.0), &mut capture);
    board.handle(&move_to(1100.0, 650.0), &mut capture);
    board.handle(&up(1100.0, 650.0), &mut capture);

    assert!(emitted.borrow().is_empty());
    assert_eq!(board.transform(), Transform::new(300.0, 100.0, 1.0));
}
