//! Renderer boundary
//!
//! Vertex layouts and blend state for uploading the shadow streams, and the
//! per-light compositing loop. GPU resource management lives with the
//! implementor of `LightPassRenderer`.

pub mod compositor;
pub mod vertex;

pub use compositor::{Compositor, FrameStats, LightPassRenderer};
pub use vertex::{LIGHT_QUAD, LightQuadVertex, LightUniform, SHADOW_BLEND, ShadowStream};
