//! Canvas settings - the tunable constants of the canvas, loaded from JSON.
//!
//! Every field has a default (see [`crate::constants`]), so a settings file
//! only needs to name the values it overrides:
//!
//! ```json
//! { "layout": { "grid_size": 20 }, "snap_enabled": false }
//! ```

use crate::constants::{
    CHILD_SPACING, CONFIG_DIR_NAME, DROP_ANCHOR_OFFSET, EDGE_CONTROL_OFFSET, GRID_SIZE,
    NODE_HEIGHT, NODE_WIDTH, SETTINGS_FILE_NAME, WHEEL_ZOOM_SENSITIVITY, ZOOM_BUTTON_STEP,
};
use crate::error::{CanvasError, CanvasResult};
use crate::input::coords::{Point, ScaleBounds, Size, Transform};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Node placement rules
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub grid_size: f64,
    pub child_spacing: f64,
    pub node_size: Size,
    pub drop_anchor_offset: Point,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            child_spacing: CHILD_SPACING,
            node_size: Size::new(NODE_WIDTH, NODE_HEIGHT),
            drop_anchor_offset: Point::from(DROP_ANCHOR_OFFSET),
        }
    }
}

/// Zoom and pan behaviour
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSettings {
    pub bounds: ScaleBounds,
    pub wheel_sensitivity: f64,
    pub button_step: f64,
    pub default_transform: Transform,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            bounds: ScaleBounds::default(),
            wheel_sensitivity: WHEEL_ZOOM_SENSITIVITY,
            button_step: ZOOM_BUTTON_STEP,
            default_transform: Transform::default(),
        }
    }
}

/// Edge geometry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeSettings {
    pub control_offset: f64,
}

impl Default for EdgeSettings {
    fn default() -> Self {
        Self {
            control_offset: EDGE_CONTROL_OFFSET,
        }
    }
}

/// All tunable canvas values
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub layout: LayoutSettings,
    pub zoom: ZoomSettings,
    pub edges: EdgeSettings,
    /// Whether new boards start with grid snapping on
    pub snap_enabled: bool,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            layout: LayoutSettings::default(),
            zoom: ZoomSettings::default(),
            edges: EdgeSettings::default(),
            snap_enabled: true,
        }
    }
}

/// Default location of the settings file, if the platform has a config dir
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(SETTINGS_FILE_NAME))
}

impl CanvasSettings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let settings: CanvasSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`
    pub fn load_from(path: &Path) -> CanvasResult<Self> {
        if !path.exists() {
            return Err(CanvasError::NotFound(path.to_path_buf()));
        }
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        debug!(path = %path.display(), "Loaded canvas settings");
        Ok(settings)
    }

    /// Load from the default path, falling back to defaults on any error
    pub fn load() -> Self {
        let Some(path) = default_settings_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(CanvasError::NotFound(_)) => Self::default(),
            Err(e) => {
                warn!(path = %path.display(), "Failed to load canvas settings: {}", e);
                Self::default()
            }
        }
    }

    /// Write settings to `path` as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> CanvasResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Write settings to the default path
    pub fn save(&self) -> CanvasResult<()> {
        let path = default_settings_path().ok_or(CanvasError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Reject values the canvas cannot work with
    pub fn validate(&self) -> CanvasResult<()> {
        let invalid = |msg: &str| Err(CanvasError::InvalidSettings(msg.to_string()));

        if !(self.layout.grid_size > 0.0) {
            return invalid("layout.grid_size must be positive");
        }
        if self.layout.node_size.width <= 0.0 || self.layout.node_size.height <= 0.0 {
            return invalid("layout.node_size must be positive");
        }
        let bounds = self.zoom.bounds;
        if !(bounds.min > 0.0) || bounds.min > bounds.max {
            return invalid("zoom.bounds must satisfy 0 < min <= max");
        }
        if !bounds.contains(self.zoom.default_transform.scale) {
            return invalid("zoom.default_transform.scale must lie within zoom.bounds");
        }
        if !(self.zoom.button_step > 0.0) {
            return invalid("zoom.button_step must be positive");
        }
        if !self.zoom.wheel_sensitivity.is_finite() {
            return invalid("zoom.wheel_sensitivity must be finite");
        }
        Ok(())
    }
}
