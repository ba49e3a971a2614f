//! Snapshot tests using the insta crate.
//!
//! Snapshot testing captures serialized output and stores it in `.snap`
//! files next to this module. The JSON forms of funnels, settings and scenes
//! are what hosts persist and render, so changes to them should be visible
//! in review.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```
//!
//! Or review changes interactively:
//! ```sh
//! cargo insta review
//! ```

use crate::helpers::{TestFunnelBuilder, test_board};
use funnel_canvas::settings::CanvasSettings;
use funnel_canvas::types::{Funnel, NodeData, NodeId, NodeKind};

fn pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap()
}

fn two_step_funnel() -> Funnel {
    let welcome = NodeData {
        is_task_mode: Some(true),
        ..NodeData::named("Welcome")
    };
    TestFunnelBuilder::new()
        .with_name("Launch")
        .with_node("a", NodeKind::Ad, (0.0, 0.0))
        .with_node_data("b", NodeKind::Email, (350.0, 0.0), welcome)
        .with_edge("e1", "a", "b")
        .build()
}

// ============================================================================
// Funnel Serialization Tests
// ============================================================================

#[test]
fn snapshot_funnel() {
    insta::assert_snapshot!("funnel", pretty(&two_step_funnel()));
}

// ============================================================================
// Settings Serialization Tests
// ============================================================================

#[test]
fn snapshot_default_settings() {
    insta::assert_snapshot!("default_settings", pretty(&CanvasSettings::default()));
}

// ============================================================================
// Scene Tests
// ============================================================================

#[test]
fn snapshot_scene_with_selection() {
    let (mut board, _) = test_board(two_step_funnel());
    let b = NodeId::from("b");
    board.select(&b);
    board.open_side_panel(&b);
    insta::assert_snapshot!("scene_with_selection", pretty(&board.scene()));
}
