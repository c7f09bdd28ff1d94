//! Shadow edge projection
//!
//! A light at height `H` grazes an occluder point at planar distance `d` and
//! height `h`. By similar triangles the grazing ray meets the ground at
//! `d * H / (H - h)` from the light. Computed here via the boundary angle,
//! `tan(atan(d / (H - h))) * H`.
//!
//! When `h >= H` the ray never comes back down and the shadow is unbounded.
//! The angle step runs in f64: in f32, `atan` of a large ratio rounds past
//! π/2 and `tan` comes back negative.

use glam::Vec2;

use crate::math::magnitude;

/// Ground-plane distance from the light at which the shadow cast by the
/// height level `height` of point `relative` begins (or ends).
///
/// `relative` is the occluder point minus the light position. Returns
/// `f32::INFINITY` if the light is not strictly above `height`, or if the
/// grazing ray is so shallow the distance can't be represented.
pub fn boundary_distance(relative: Vec2, height: f32, light_height: f32) -> f32 {
    debug_assert!(light_height > 0.0, "light height must be positive, got {light_height}");
    if height >= light_height {
        return f32::INFINITY;
    }
    let d = f64::from(magnitude(relative));
    let delta = f64::from(light_height) - f64::from(height);
    let boundary_angle = (d / delta).atan();
    let distance = (boundary_angle.tan() * f64::from(light_height)) as f32;
    if distance.is_finite() && distance >= 0.0 {
        distance
    } else {
        f32::INFINITY
    }
}

/// [`boundary_distance`] limited to `[0, light_radius]`
#[inline]
pub fn clamped_boundary_distance(relative: Vec2, height: f32, light_height: f32, light_radius: f32) -> f32 {
    boundary_distance(relative, height, light_height).min(light_radius).max(0.0)
}

/// Start and end distances along one ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayExtent {
    /// Where the shadow of the occluder's bottom begins
    pub start: f32,
    /// Where the shadow of the occluder's top ends
    pub end: f32,
}

/// Both clamped boundary distances for one occluder endpoint
pub fn ray_extent(relative: Vec2, bottom: f32, top: f32, light_height: f32, light_radius: f32) -> RayExtent {
    RayExtent {
        start: clamped_boundary_distance(relative, bottom, light_height, light_radius),
        end: clamped_boundary_distance(relative, top, light_height, light_radius),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed_form(d: f32, h: f32, light_height: f32) -> f32 {
        d * light_height / (light_height - h)
    }

    #[test]
    fn test_boundary_matches_closed_form() {
        let cases = [
            (Vec2::new(1.0, 0.0), 0.0, 8.0),
            (Vec2::new(0.3, -0.4), 2.0, 8.0),
            (Vec2::new(-3.0, 4.0), 0.9, 1.0),
            (Vec2::new(0.1, 0.4), 0.2, 8.0),
        ];
        for (p, h, light_height) in cases {
            let got = boundary_distance(p, h, light_height);
            let want = closed_form(p.length(), h, light_height);
            assert!((got - want).abs() <= 1e-5 * want.max(1.0), "p={p} h={h}: {got} vs {want}");
        }
    }

    #[test]
    fn test_ground_level_starts_at_occluder() {
        // d=1, H=8, h=0: the shadow of a ground-level point starts at the point
        let got = boundary_distance(Vec2::new(1.0, 0.0), 0.0, 8.0);
        assert!((got - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_taller_than_light_is_unbounded() {
        assert_eq!(boundary_distance(Vec2::ONE, 8.0, 8.0), f32::INFINITY);
        assert_eq!(boundary_distance(Vec2::ONE, 9.0, 8.0), f32::INFINITY);
    }

    #[test]
    fn test_unbounded_clamps_to_radius_exactly() {
        let d = clamped_boundary_distance(Vec2::new(0.5, 0.5), 10.0, 8.0, 5.0);
        assert_eq!(d, 5.0);
        assert!(d.is_finite());
    }

    #[test]
    fn test_finite_beyond_radius_is_clamped() {
        // 4 * 8 / (8 - 7) = 32, well past the radius
        let d = clamped_boundary_distance(Vec2::new(4.0, 0.0), 7.0, 8.0, 5.0);
        assert_eq!(d, 5.0);
    }

    #[test]
    fn test_ray_extent() {
        let e = ray_extent(Vec2::new(0.0, 2.0), 0.0, 4.0, 8.0, 100.0);
        assert!((e.start - 2.0).abs() < 1e-5);
        assert!((e.end - 4.0).abs() < 1e-5);
    }

    fn one_ulp_below(x: f32) -> f32 {
        f32::from_bits(x.to_bits() - 1)
    }

    #[test]
    fn test_edge_just_below_light_stays_in_range() {
        let just_below = one_ulp_below(1.0);
        let raw = boundary_distance(Vec2::new(5.0, 0.0), just_below, 1.0);
        assert!(raw > 5.0, "raw distance {raw}");

        let d = clamped_boundary_distance(Vec2::new(5.0, 0.0), just_below, 1.0, 5.0);
        assert_eq!(d, 5.0);
    }

    #[test]
    fn test_near_grazing_is_never_negative() {
        for h in [0.0, 4.0, 7.9, 7.999, 7.99999, one_ulp_below(8.0)] {
            let d = boundary_distance(Vec2::new(3.0, 4.0), h, 8.0);
            assert!(d >= 4.99999, "h={h}: {d}");
            let clamped = clamped_boundary_distance(Vec2::new(3.0, 4.0), h, 8.0, 50.0);
            assert!((0.0..=50.0).contains(&clamped), "h={h}: {clamped}");
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "light height must be positive")]
    fn test_non_positive_light_height_asserts() {
        let _ = boundary_distance(Vec2::ONE, 0.0, 0.0);
    }

    #[test]
    fn test_light_at_occluder_point() {
        assert_eq!(boundary_distance(Vec2::ZERO, 0.0, 8.0), 0.0);
    }
}
