//! Scene: the lights and occluders a frame is built from
//!
//! Mutation goes through the methods here so index mistakes come back as
//! `None` instead of panicking mid-frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::light::Light;
use crate::occluder::{CircularOccluder, Endpoint, Occluder, SegmentOccluder};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub lights: Vec<Light>,
    #[serde(default)]
    pub occluders: Vec<Occluder>,
}

impl Scene {
    /// A small sandbox: one warm light, a few walls and a pillar
    pub fn demo() -> Self {
        let mut scene = Self::default();
        scene.add_light(Light::new(Vec2::new(0.0, 0.0), 8.0, 5.0).with_tint([1.0, 0.9, 0.7]));
        scene.add_light(Light::new(Vec2::new(0.6, -0.4), 2.0, 3.0).with_tint([0.4, 0.6, 1.0]));

        scene.add_occluder(SegmentOccluder::new(Vec2::new(-0.1, 0.4), Vec2::new(0.1, 0.4), 0.0, 0.2, 1.0).into());
        scene.add_occluder(SegmentOccluder::new(Vec2::new(0.3, 0.2), Vec2::new(0.5, -0.1), 0.0, 3.0, 0.8).into());
        scene.add_occluder(SegmentOccluder::flat(Vec2::new(-0.6, -0.3), Vec2::new(-0.4, -0.5), 0.6).into());
        scene.add_occluder(CircularOccluder::new(Vec2::new(-0.3, 0.6), 0.05).into());
        scene
    }

    /// Returns the new occluder's index
    pub fn add_occluder(&mut self, occluder: Occluder) -> usize {
        self.occluders.push(occluder);
        self.occluders.len() - 1
    }

    pub fn remove_occluder(&mut self, index: usize) -> Option<Occluder> {
        (index < self.occluders.len()).then(|| self.occluders.remove(index))
    }

    /// Move one end of a segment occluder, returning its previous position.
    ///
    /// `None` if there is no occluder at `index` or it isn't a segment.
    pub fn move_endpoint(&mut self, index: usize, which: Endpoint, to: Vec2) -> Option<Vec2> {
        match self.occluders.get_mut(index)? {
            Occluder::Segment(s) => Some(s.move_endpoint(which, to)),
            Occluder::Circular(_) => None,
        }
    }

    /// Set an occluder's opacity, returning the previous value
    pub fn set_alpha(&mut self, index: usize, alpha: f32) -> Option<f32> {
        let occluder = self.occluders.get_mut(index)?;
        let previous = occluder.alpha();
        occluder.set_alpha(alpha);
        Some(previous)
    }

    /// Returns the new light's index
    pub fn add_light(&mut self, light: Light) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }

    /// Move a light, returning its previous position
    pub fn move_light(&mut self, index: usize, to: Vec2) -> Option<Vec2> {
        let light = self.lights.get_mut(index)?;
        Some(std::mem::replace(&mut light.position, to))
    }

    /// Change a light's height, returning the previous height
    pub fn raise_light(&mut self, index: usize, height: f32) -> Option<f32> {
        debug_assert!(height > 0.0, "light height must be positive, got {height}");
        let light = self.lights.get_mut(index)?;
        Some(std::mem::replace(&mut light.height, height))
    }

    /// Load a scene description.
    ///
    /// Occluder opacity is clamped to [0, 1] while parsing. A reversed
    /// height range or a non-positive light height is reported but left
    /// alone.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let scene: Scene = serde_json::from_str(json)?;
        for (i, occluder) in scene.occluders.iter().enumerate() {
            if let Some(s) = occluder.as_segment()
                && !s.is_well_formed()
            {
                log::warn!("Occluder {} has bottom {} above top {}", i, s.bottom, s.top);
            }
        }
        for (i, light) in scene.lights.iter().enumerate() {
            if light.height <= 0.0 {
                log::warn!("Light {} has non-positive height {}", i, light.height);
            }
        }
        log::info!(
            "Loaded scene with {} lights and {} occluders",
            scene.lights.len(),
            scene.occluders.len()
        );
        Ok(scene)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_api() {
        let mut scene = Scene::default();
        let light = scene.add_light(Light::new(Vec2::ZERO, 8.0, 5.0));
        let wall = scene.add_occluder(SegmentOccluder::new(Vec2::ZERO, Vec2::X, 0.0, 1.0, 1.0).into());
        let disc = scene.add_occluder(CircularOccluder::new(Vec2::Y, 0.1).into());

        assert_eq!(scene.move_endpoint(wall, Endpoint::A, Vec2::NEG_X), Some(Vec2::ZERO));
        assert_eq!(scene.occluders[wall].as_segment().map(|s| s.a), Some(Vec2::NEG_X));
        assert_eq!(scene.move_endpoint(disc, Endpoint::A, Vec2::ZERO), None);
        assert_eq!(scene.move_endpoint(7, Endpoint::A, Vec2::ZERO), None);

        assert_eq!(scene.set_alpha(wall, 0.25), Some(1.0));
        assert_eq!(scene.occluders[wall].alpha(), 0.25);

        assert_eq!(scene.move_light(light, Vec2::ONE), Some(Vec2::ZERO));
        assert_eq!(scene.raise_light(light, 2.0), Some(8.0));
        assert_eq!(scene.lights[light].height, 2.0);
        assert_eq!(scene.move_light(3, Vec2::ONE), None);

        assert!(scene.remove_occluder(disc).is_some());
        assert!(scene.remove_occluder(disc).is_none());
        assert_eq!(scene.occluders.len(), 1);
    }

    #[test]
    fn test_json_roundtrip() {
        let scene = Scene::demo();
        let back = Scene::from_json(&scene.to_json().unwrap()).unwrap();
        assert_eq!(back, scene);
    }

    #[test]
    fn test_reversed_range_loads_untouched() {
        let json = r#"{
            "lights": [{"position": [0.0, 0.0], "height": 8.0}],
            "occluders": [
                {"kind": "segment", "a": [0.0, 1.0], "b": [1.0, 1.0], "bottom": 2.0, "top": 1.0, "alpha": 0.5}
            ]
        }"#;
        let scene = Scene::from_json(json).unwrap();
        let s = scene.occluders[0].as_segment().copied().unwrap();
        assert_eq!((s.bottom, s.top), (2.0, 1.0));
    }

    #[test]
    fn test_out_of_range_alpha_is_clamped_on_load() {
        let json = r#"{
            "lights": [{"position": [0.0, 0.0], "height": 8.0}],
            "occluders": [
                {"kind": "segment", "a": [-0.5, 1.0], "b": [0.5, 1.0], "bottom": 0.0, "top": 0.5, "alpha": 1.7},
                {"kind": "circular", "origin": [1.0, 0.0], "radius": 0.1, "alpha": -0.2}
            ]
        }"#;
        let scene = Scene::from_json(json).unwrap();
        assert_eq!(scene.occluders[0].alpha(), 1.0);
        assert_eq!(scene.occluders[1].alpha(), 0.0);

        let mut geometry = crate::ShadowGeometry::new();
        geometry.recompute(&scene.lights[0], &scene.occluders, &crate::ShadowSettings::default());
        assert_eq!(&geometry.alphas()[..6], &[1.0; 6]);
        assert_eq!(&geometry.alphas()[6..], &[0.0; 6]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "light height must be positive")]
    fn test_lowering_light_to_ground_asserts() {
        let mut scene = Scene::demo();
        scene.raise_light(0, 0.0);
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let scene = Scene::from_json("{}").unwrap();
        assert!(scene.lights.is_empty());
        assert!(scene.occluders.is_empty());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Scene::from_json(r#"{"occluders": [{"kind": "triangle"}]}"#).is_err());
    }
}
