//! Rendering module
//!
//! `scene` snapshots the world into a drawable list; `shapes` tessellates it;
//! `pipeline` draws the triangles with WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderInitError, RenderState};
pub use scene::{Background, DrawKind, Drawable, RenderSink, Scene};
