//! Shadowcast - height-aware 2D shadow geometry
//!
//! Core modules:
//! - `math`: Vector and angle primitives
//! - `cursor`: Growable flat buffers the geometry is written into
//! - `occluder` / `light`: Scene primitives
//! - `projector`: Where a shadow edge lands for a given occluder height
//! - `geometry`: Per-occluder umbra and penumbra triangles
//! - `aggregator`: Whole-scene shadow streams for one light
//! - `renderer`: Vertex layouts and the multi-light compositing loop
//! - `scene` / `settings`: Scene description and tunables (JSON)

pub mod aggregator;
pub mod coords;
pub mod cursor;
pub mod debug;
pub mod geometry;
pub mod light;
pub mod math;
pub mod occluder;
pub mod projector;
pub mod renderer;
pub mod scene;
pub mod settings;

pub use aggregator::{ShadowCounts, ShadowGeometry};
pub use debug::DebugRecorder;
pub use light::Light;
pub use occluder::{CircularOccluder, Endpoint, Occluder, SegmentOccluder};
pub use scene::Scene;
pub use settings::{QualityPreset, ShadowSettings};

/// Geometry constants
pub mod consts {
    /// Umbra vertices per occluder (two triangles)
    pub const VERTICES_PER_OCCLUDER: usize = 6;
    /// Penumbra vertices per segment occluder (one triangle per side)
    pub const BLUR_VERTICES_PER_OCCLUDER: usize = 6;

    /// Light radius when a scene file doesn't give one
    pub const DEFAULT_LIGHT_RADIUS: f32 = 5.0;
    /// Penumbra width as a fraction of the far shadow distance
    pub const DEFAULT_BLUR: f32 = 0.05;
    /// Radial depth of the shadow shell behind a circular occluder
    pub const SILHOUETTE_SHELL_DEPTH: f32 = 0.1;
}
