//! Scene construction for renderers.
//!
//! - `edges` - Bezier geometry for edges, tracking in-flight drags
//! - `scene` - The serializable scene description

pub mod edges;
pub mod scene;

pub use edges::{EdgePath, render_edges};
pub use scene::{Scene, SceneNode};
