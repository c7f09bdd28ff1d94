//! Occluder model
//!
//! Two kinds of light blocker:
//! - `SegmentOccluder`: a wall between two points with a vertical extent
//!   `[bottom, top]` above the ground plane
//! - `CircularOccluder`: a round silhouette caster with no height, shadowed
//!   as if it were the segment between its two (approximate) tangent points

use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize};

use crate::math::{angle_between, scalar_mult};
use std::f32::consts::FRAC_PI_2;

fn default_alpha() -> f32 {
    1.0
}

/// Opacity from scene data, clamped the same way as `set_alpha`
fn clamped_alpha<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    Ok(f32::deserialize(deserializer)?.clamp(0.0, 1.0))
}

/// Which end of a segment occluder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    A,
    B,
}

/// A wall segment with a height range
///
/// Contract: `bottom <= top`. This is asserted in debug builds and otherwise
/// trusted; a reversed range is not reordered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentOccluder {
    pub a: Vec2,
    pub b: Vec2,
    /// Height of the lowest blocking point above the ground plane
    pub bottom: f32,
    /// Height of the highest blocking point above the ground plane
    pub top: f32,
    /// Shadow opacity (0-1)
    #[serde(default = "default_alpha", deserialize_with = "clamped_alpha")]
    pub alpha: f32,
}

impl SegmentOccluder {
    pub fn new(a: Vec2, b: Vec2, bottom: f32, top: f32, alpha: f32) -> Self {
        debug_assert!(bottom <= top, "occluder bottom {bottom} above top {top}");
        Self {
            a,
            b,
            bottom,
            top,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// A wall that no light can see over: its shadow runs from the segment
    /// out to the light's radius.
    ///
    /// Uses `f32::MAX` rather than infinity so the occluder survives a JSON
    /// round trip.
    pub fn flat(a: Vec2, b: Vec2, alpha: f32) -> Self {
        Self::new(a, b, 0.0, f32::MAX, alpha)
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn endpoint(&self, which: Endpoint) -> Vec2 {
        match which {
            Endpoint::A => self.a,
            Endpoint::B => self.b,
        }
    }

    /// Move one endpoint, returning where it was
    pub fn move_endpoint(&mut self, which: Endpoint, to: Vec2) -> Vec2 {
        let slot = match which {
            Endpoint::A => &mut self.a,
            Endpoint::B => &mut self.b,
        };
        std::mem::replace(slot, to)
    }

    /// Whether the height range honours `bottom <= top`
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.bottom <= self.top
    }
}

/// A round silhouette caster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularOccluder {
    pub origin: Vec2,
    pub radius: f32,
    #[serde(default = "default_alpha", deserialize_with = "clamped_alpha")]
    pub alpha: f32,
}

impl CircularOccluder {
    pub fn new(origin: Vec2, radius: f32) -> Self {
        Self {
            origin,
            radius,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Approximate tangent points as seen from `light`.
    ///
    /// Not true tangents: the origin is offset by `radius` either side,
    /// perpendicular to the light-to-origin direction. The first point is
    /// the one rotated +90° from that direction.
    pub fn tangent_points(&self, light: Vec2) -> (Vec2, Vec2) {
        let toward = angle_between(light, self.origin);
        let offset = scalar_mult(toward.offset(FRAC_PI_2).to_unit_vector(), self.radius);
        (self.origin + offset, self.origin - offset)
    }
}

/// Any occluder the shadow generator knows how to cast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Occluder {
    Segment(SegmentOccluder),
    Circular(CircularOccluder),
}

impl Occluder {
    pub fn alpha(&self) -> f32 {
        match self {
            Occluder::Segment(s) => s.alpha,
            Occluder::Circular(c) => c.alpha,
        }
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        match self {
            Occluder::Segment(s) => s.set_alpha(alpha),
            Occluder::Circular(c) => c.alpha = alpha.clamp(0.0, 1.0),
        }
    }

    pub fn as_segment(&self) -> Option<&SegmentOccluder> {
        match self {
            Occluder::Segment(s) => Some(s),
            Occluder::Circular(_) => None,
        }
    }
}

impl From<SegmentOccluder> for Occluder {
    fn from(s: SegmentOccluder) -> Self {
        Occluder::Segment(s)
    }
}

impl From<CircularOccluder> for Occluder {
    fn from(c: CircularOccluder) -> Self {
        Occluder::Circular(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_is_clamped() {
        let s = SegmentOccluder::new(Vec2::ZERO, Vec2::X, 0.0, 1.0, 1.7);
        assert_eq!(s.alpha, 1.0);
        let mut o = Occluder::from(s);
        o.set_alpha(-0.3);
        assert_eq!(o.alpha(), 0.0);
        let c = CircularOccluder::new(Vec2::ZERO, 1.0).with_alpha(2.0);
        assert_eq!(c.alpha, 1.0);
    }

    #[test]
    fn test_move_endpoint() {
        let mut s = SegmentOccluder::new(Vec2::ZERO, Vec2::X, 0.0, 1.0, 1.0);
        let old = s.move_endpoint(Endpoint::B, Vec2::new(2.0, 2.0));
        assert_eq!(old, Vec2::X);
        assert_eq!(s.endpoint(Endpoint::B), Vec2::new(2.0, 2.0));
        assert_eq!(s.endpoint(Endpoint::A), Vec2::ZERO);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "above top")]
    fn test_reversed_height_range_asserts() {
        let _ = SegmentOccluder::new(Vec2::ZERO, Vec2::X, 2.0, 1.0, 1.0);
    }

    #[test]
    fn test_tangent_points_perpendicular_to_light() {
        let c = CircularOccluder::new(Vec2::new(0.0, 2.0), 0.5);
        let (a, b) = c.tangent_points(Vec2::ZERO);
        // Light-to-origin is +y, so +90° is -x
        assert!((a - Vec2::new(-0.5, 2.0)).length() < 1e-6);
        assert!((b - Vec2::new(0.5, 2.0)).length() < 1e-6);
    }

    #[test]
    fn test_occluder_json_tagging() {
        let json = r#"[
            {"kind": "segment", "a": [0.0, 1.0], "b": [1.0, 1.0], "bottom": 0.0, "top": 0.5},
            {"kind": "circular", "origin": [2.0, 0.0], "radius": 0.25, "alpha": 0.5}
        ]"#;
        let occluders: Vec<Occluder> = serde_json::from_str(json).unwrap();
        assert_eq!(occluders.len(), 2);
        assert_eq!(occluders[0].alpha(), 1.0);
        assert_eq!(occluders[1].alpha(), 0.5);
        assert!(occluders[0].as_segment().is_some());
        assert!(occluders[1].as_segment().is_none());
    }

    #[test]
    fn test_deserialized_alpha_is_clamped() {
        let json = r#"[
            {"kind": "segment", "a": [0.0, 1.0], "b": [1.0, 1.0], "bottom": 0.0, "top": 0.5, "alpha": 1.7},
            {"kind": "circular", "origin": [2.0, 0.0], "radius": 0.25, "alpha": -0.2}
        ]"#;
        let occluders: Vec<Occluder> = serde_json::from_str(json).unwrap();
        assert_eq!(occluders[0].alpha(), 1.0);
        assert_eq!(occluders[1].alpha(), 0.0);
    }
}
