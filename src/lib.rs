//! Headless core of a pannable, zoomable node-graph canvas for marketing
//! funnels.
//!
//! The host feeds pointer, wheel and drop events into a [`Board`], draws the
//! [`Scene`] it produces, and receives every edited [`Funnel`] through the
//! board's change callback.
//!
//! ## Modules
//!
//! - `board` - Composes the controllers and emits funnel changes
//! - `input` - Transform math, event types and gesture state machines
//! - `model` - Pure edit operations on funnels
//! - `render` - Edge geometry and the scene description
//! - `spatial_index` - R-tree hit testing
//! - `settings` / `settings_watcher` - Persisted canvas settings, hot reload
//! - `store` - Observable store for hosts that hold the funnel

pub mod board;
pub mod constants;
pub mod error;
pub mod input;
pub mod model;
pub mod perf;
pub mod render;
pub mod settings;
pub mod settings_watcher;
pub mod spatial_index;
pub mod store;
pub mod types;

pub use board::{Board, HitTarget};
pub use error::{CanvasError, CanvasResult};
pub use input::{EventResponse, InputEvent, NullCapture, Point, PointerCapture, Size, Transform};
pub use render::{EdgePath, Scene, SceneNode};
pub use settings::CanvasSettings;
pub use store::{Store, Subscription};
pub use types::{Edge, EdgeId, Funnel, Node, NodeData, NodeDataPatch, NodeId, NodeKind};
