//! Vector and angle primitives
//!
//! Thin, pure helpers over `glam::Vec2`. Angles only ever come out of
//! [`angle_of`] / [`angle_between`] and only ever go back into vectors via
//! [`Angle::to_unit_vector`].

use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// An angle in radians, measured counter-clockwise from +x.
///
/// Not wrapped: whatever `atan2` produced (plus any explicit offset) is kept.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Angle(f32);

impl Angle {
    /// Raw radians value
    #[inline]
    pub fn radians(self) -> f32 {
        self.0
    }

    /// Rotate by `by` radians
    #[inline]
    pub fn offset(self, by: f32) -> Angle {
        Angle(self.0 + by)
    }

    #[inline]
    pub fn to_unit_vector(self) -> Vec2 {
        Vec2::new(self.0.cos(), self.0.sin())
    }
}

#[inline]
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    a + b
}

#[inline]
pub fn invert(v: Vec2) -> Vec2 {
    -v
}

#[inline]
pub fn scalar_mult(v: Vec2, s: f32) -> Vec2 {
    v * s
}

#[inline]
pub fn magnitude(v: Vec2) -> f32 {
    v.length()
}

/// Rotate +90°
#[inline]
pub fn perpendicular(v: Vec2) -> Vec2 {
    v.perp()
}

#[inline]
pub fn angle_of(v: Vec2) -> Angle {
    Angle(v.y.atan2(v.x))
}

/// Direction from `origin` towards `target`
#[inline]
pub fn angle_between(origin: Vec2, target: Vec2) -> Angle {
    angle_of(add(invert(origin), target))
}

/// Unwrap a pair of ray angles so that interpolating between them sweeps the
/// shorter arc.
///
/// When the rays straddle the ±π seam the smaller angle is lifted by 2π.
/// Pairs that don't straddle are returned untouched.
pub fn unwrap_ray_pair(a: Angle, b: Angle) -> (Angle, Angle) {
    if (a.0 - b.0).abs() <= PI {
        return (a, b);
    }
    if a.0 < b.0 {
        (a.offset(TAU), b)
    } else {
        (a, b.offset(TAU))
    }
}
