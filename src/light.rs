//! Point light with height

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_LIGHT_RADIUS;

/// A point light hovering `height` above the occlusion plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec2,
    /// Elevation above the ground plane, must be > 0
    pub height: f32,
    /// Furthest any shadow ray from this light may reach
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_tint")]
    pub tint: [f32; 3],
}

fn default_radius() -> f32 {
    DEFAULT_LIGHT_RADIUS
}

fn default_tint() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Light {
    pub fn new(position: Vec2, height: f32, radius: f32) -> Self {
        Self {
            position,
            height,
            radius,
            tint: default_tint(),
        }
    }

    pub fn with_tint(mut self, tint: [f32; 3]) -> Self {
        self.tint = tint;
        self
    }

    /// `p` relative to the light
    #[inline]
    pub fn relative(&self, p: Vec2) -> Vec2 {
        p - self.position
    }
}
