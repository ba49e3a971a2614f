//! Canvas-wide constants.
//!
//! Centralizes the visual tuning values of the funnel canvas. These are the
//! defaults of [`crate::settings::CanvasSettings`]; code that needs a tunable
//! value should read it from the settings rather than from here.

// ============================================================================
// Layout
// ============================================================================

/// Snap grid spacing in world units
pub const GRID_SIZE: f64 = 28.0;

/// Horizontal distance between a parent and a child created with "add child"
pub const CHILD_SPACING: f64 = 350.0;

/// Width of a node's bounding box in world units
pub const NODE_WIDTH: f64 = 260.0;

/// Height of a node's bounding box in world units
pub const NODE_HEIGHT: f64 = 80.0;

/// Offset applied to a palette drop so the cursor lands on the node's center
pub const DROP_ANCHOR_OFFSET: (f64, f64) = (-130.0, -40.0);

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum zoom level
pub const MIN_SCALE: f64 = 0.1;

/// Maximum zoom level
pub const MAX_SCALE: f64 = 3.0;

/// Wheel delta multiplier: `factor = exp(-delta_y * WHEEL_ZOOM_SENSITIVITY)`
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.005;

/// Scale increment of the zoom in / zoom out buttons
pub const ZOOM_BUTTON_STEP: f64 = 0.1;

/// Transform restored by "fit view": (x, y, scale)
pub const DEFAULT_TRANSFORM: (f64, f64, f64) = (400.0, 150.0, 1.0);

// ============================================================================
// Edges
// ============================================================================

/// Horizontal distance of a bezier control point from its endpoint
pub const EDGE_CONTROL_OFFSET: f64 = 50.0;

// ============================================================================
// Nodes
// ============================================================================

/// Name given to nodes created without one
pub const DEFAULT_NODE_NAME: &str = "Untitled";

/// Name of the settings file inside the config directory
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Directory under the platform config dir holding canvas files
pub const CONFIG_DIR_NAME: &str = "funnel-canvas";
