//! Multi-light compositing
//!
//! Drives one shadow recompute per light, strictly in sequence, so a single
//! `ShadowGeometry` serves every light. The actual GPU work sits behind
//! [`LightPassRenderer`].

use crate::aggregator::{ShadowCounts, ShadowGeometry};
use crate::light::Light;
use crate::scene::Scene;
use crate::settings::ShadowSettings;

/// GPU side of a frame
pub trait LightPassRenderer {
    /// Upload `geometry` and draw this light's shadow mask offscreen.
    ///
    /// `geometry` is only valid for the duration of the call.
    fn draw_shadow_mask(&mut self, light_index: usize, light: &Light, geometry: &ShadowGeometry);

    /// Combine every light's masked contribution into the final image
    fn composite(&mut self, lights: &[Light]);
}

/// Totals for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub lights: usize,
    pub vertices: usize,
    pub blur_vertices: usize,
}

impl FrameStats {
    fn add(&mut self, counts: ShadowCounts) {
        self.lights += 1;
        self.vertices += counts.vertices;
        self.blur_vertices += counts.blur_vertices;
    }
}

pub struct Compositor {
    geometry: ShadowGeometry,
    pub settings: ShadowSettings,
}

impl Compositor {
    pub fn new(settings: ShadowSettings) -> Self {
        Self {
            geometry: ShadowGeometry::new(),
            settings,
        }
    }

    /// Shadow streams as left by the most recent light
    pub fn geometry(&self) -> &ShadowGeometry {
        &self.geometry
    }

    /// Render every light's shadow mask, then composite
    pub fn render_frame<R: LightPassRenderer>(&mut self, scene: &Scene, renderer: &mut R) -> FrameStats {
        let mut stats = FrameStats::default();
        self.geometry.ensure_capacity(scene.occluders.len());

        for (index, light) in scene.lights.iter().enumerate() {
            let counts = self.geometry.recompute(light, &scene.occluders, &self.settings);
            renderer.draw_shadow_mask(index, light, &self.geometry);
            stats.add(counts);
        }

        renderer.composite(&scene.lights);
        log::trace!(
            "Frame: {} lights, {} shadow vertices, {} blur vertices",
            stats.lights,
            stats.vertices,
            stats.blur_vertices
        );
        stats
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(ShadowSettings::default())
    }
}
