//! Shadow triangle generation
//!
//! Each occluder becomes one quad (two triangles, six vertices) spanning the
//! umbra between its near and far boundaries, plus optional penumbra
//! triangles along the two side edges.
//!
//! The shape is computed first as plain data (`SegmentShadow`,
//! `CircularShadow`) and then written into the flat output streams.

use glam::Vec2;
use std::f32::consts::PI;

use crate::cursor::F32Cursor;
use crate::light::Light;
use crate::math::{Angle, angle_between, angle_of, magnitude, scalar_mult, unwrap_ray_pair};
use crate::occluder::{CircularOccluder, Occluder, SegmentOccluder};
use crate::projector::{RayExtent, ray_extent};

/// Local coordinates of the three penumbra triangle corners: occluder edge,
/// inner point, outer point. The fragment stage fades on these.
pub const PENUMBRA_TRI_COORDS: [[f32; 2]; 3] = [[0.0, 0.0], [1.0, 1.0], [-1.0, 1.0]];

/// The flat output streams, one cursor each
#[derive(Debug, Clone, Default)]
pub struct ShadowStreams {
    /// `x, y` per primary vertex
    pub position: F32Cursor,
    /// Opacity per primary vertex
    pub alpha: F32Cursor,
    /// `theta_a, theta_b` per primary vertex
    pub angular_range: F32Cursor,
    /// `start, end` radial fade distances per primary vertex
    pub radial: F32Cursor,
    /// `x, y` per penumbra vertex
    pub blur_position: F32Cursor,
    /// Local `u, v` per penumbra vertex
    pub blur_tri_position: F32Cursor,
}

impl ShadowStreams {
    pub fn restart(&mut self) {
        self.position.restart();
        self.alpha.restart();
        self.angular_range.restart();
        self.radial.restart();
        self.blur_position.restart();
        self.blur_tri_position.restart();
    }
}

/// Per-recompute options, resolved from `ShadowSettings`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorOptions {
    /// Penumbra width factor, `None` for hard shadows
    pub blur: Option<f32>,
    pub angular_range: bool,
    pub shell_depth: f32,
}

/// The umbra quad. Emitted as `start_a, end_a, start_b` and
/// `start_b, end_a, end_b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowQuad {
    pub start_a: Vec2,
    pub end_a: Vec2,
    pub start_b: Vec2,
    pub end_b: Vec2,
}

impl ShadowQuad {
    /// The six triangle-list vertices in emission order
    pub fn vertices(&self) -> [Vec2; 6] {
        [
            self.start_a,
            self.end_a,
            self.start_b,
            self.start_b,
            self.end_a,
            self.end_b,
        ]
    }
}

/// Attributes shared by all six vertices of one occluder's quad
#[derive(Debug, Clone, Copy, PartialEq)]
struct QuadTag {
    alpha: f32,
    range: (f32, f32),
    radial: (f32, f32),
}

/// Outer and inner penumbra points at each far corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penumbra {
    pub inner_a: Vec2,
    pub outer_a: Vec2,
    pub inner_b: Vec2,
    pub outer_b: Vec2,
}

impl Penumbra {
    /// Build the penumbra points for the far edge `end_a`-`end_b`.
    ///
    /// `dist_a`/`dist_b` are the far boundary distances of each ray; the
    /// blur reaches `blur * dist` outward along the far edge and half that
    /// inward. An inward point that would reach past the middle of a short
    /// far edge is pinned to the midpoint so the two sides never cross.
    pub fn new(end_a: Vec2, end_b: Vec2, dist_a: f32, dist_b: f32, blur: f32) -> Self {
        // Unit vector pointing from end_b towards end_a
        let normal = angle_between(end_a, end_b).offset(-PI).to_unit_vector();
        let half_gap = magnitude(end_a - end_b) / 2.0;
        let midpoint = (end_a + end_b) * 0.5;

        let side = |end: Vec2, outward: Vec2, dist: f32| {
            let factor = blur * dist;
            let outer = end + scalar_mult(outward, factor);
            let inner = if factor > half_gap {
                midpoint
            } else {
                end - scalar_mult(outward, factor * 0.5)
            };
            (inner, outer)
        };

        let (inner_a, outer_a) = side(end_a, normal, dist_a);
        let (inner_b, outer_b) = side(end_b, -normal, dist_b);
        Self {
            inner_a,
            outer_a,
            inner_b,
            outer_b,
        }
    }
}

/// Everything needed to emit one segment occluder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentShadow {
    pub theta_a: Angle,
    pub theta_b: Angle,
    pub extent_a: RayExtent,
    pub extent_b: RayExtent,
    pub quad: ShadowQuad,
}

impl SegmentShadow {
    pub fn new(occluder: &SegmentOccluder, light: &Light) -> Self {
        debug_assert!(
            occluder.is_well_formed(),
            "occluder bottom {} above top {}",
            occluder.bottom,
            occluder.top
        );

        let relative_a = light.relative(occluder.a);
        let relative_b = light.relative(occluder.b);
        let theta_a = angle_of(relative_a);
        let theta_b = angle_of(relative_b);

        let extent_a = ray_extent(relative_a, occluder.bottom, occluder.top, light.height, light.radius);
        let extent_b = ray_extent(relative_b, occluder.bottom, occluder.top, light.height, light.radius);

        let ray_a = theta_a.to_unit_vector();
        let ray_b = theta_b.to_unit_vector();
        let quad = ShadowQuad {
            start_a: light.position + scalar_mult(ray_a, extent_a.start),
            end_a: light.position + scalar_mult(ray_a, extent_a.end),
            start_b: light.position + scalar_mult(ray_b, extent_b.start),
            end_b: light.position + scalar_mult(ray_b, extent_b.end),
        };

        Self {
            theta_a,
            theta_b,
            extent_a,
            extent_b,
            quad,
        }
    }

    pub fn penumbra(&self, blur: f32) -> Penumbra {
        Penumbra::new(
            self.quad.end_a,
            self.quad.end_b,
            self.extent_a.end,
            self.extent_b.end,
            blur,
        )
    }
}

/// Everything needed to emit one circular occluder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularShadow {
    pub theta_a: Angle,
    pub theta_b: Angle,
    /// Distance from the light to the occluder's origin
    pub start_dist: f32,
    pub end_dist: f32,
    pub quad: ShadowQuad,
}

impl CircularShadow {
    pub fn new(occluder: &CircularOccluder, light: &Light, shell_depth: f32) -> Self {
        let (a, b) = occluder.tangent_points(light.position);
        let theta_a = angle_between(light.position, a);
        let theta_b = angle_between(light.position, b);

        let quad = ShadowQuad {
            start_a: a,
            end_a: light.position + scalar_mult(theta_a.to_unit_vector(), light.radius),
            start_b: b,
            end_b: light.position + scalar_mult(theta_b.to_unit_vector(), light.radius),
        };

        let start_dist = magnitude(light.relative(occluder.origin));
        Self {
            theta_a,
            theta_b,
            start_dist,
            end_dist: start_dist + shell_depth,
            quad,
        }
    }
}

fn write_quad(out: &mut ShadowStreams, quad: &ShadowQuad, tag: QuadTag, opts: &GeneratorOptions) {
    for v in quad.vertices() {
        out.position.vec2(v);
        out.alpha.push(tag.alpha);
        if opts.angular_range {
            out.angular_range.push2(tag.range.0, tag.range.1);
        }
        out.radial.push2(tag.radial.0, tag.radial.1);
    }
}

fn write_penumbra(out: &mut ShadowStreams, a: Vec2, b: Vec2, p: &Penumbra) {
    for tri in [[a, p.inner_a, p.outer_a], [b, p.inner_b, p.outer_b]] {
        for (v, uv) in tri.into_iter().zip(PENUMBRA_TRI_COORDS) {
            out.blur_position.vec2(v);
            out.blur_tri_position.push2(uv[0], uv[1]);
        }
    }
}

fn ray_range(theta_a: Angle, theta_b: Angle) -> (f32, f32) {
    let (a, b) = unwrap_ray_pair(theta_a, theta_b);
    (a.radians(), b.radians())
}

/// Emit one segment occluder. Returns the number of penumbra vertices written.
pub fn segment_triangles(
    out: &mut ShadowStreams,
    occluder: &SegmentOccluder,
    light: &Light,
    opts: &GeneratorOptions,
) -> usize {
    let shadow = SegmentShadow::new(occluder, light);
    let tag = QuadTag {
        alpha: occluder.alpha,
        range: ray_range(shadow.theta_a, shadow.theta_b),
        radial: (
            shadow.extent_a.start.min(shadow.extent_b.start),
            shadow.extent_a.end.max(shadow.extent_b.end),
        ),
    };
    write_quad(out, &shadow.quad, tag, opts);

    match opts.blur {
        Some(blur) => {
            write_penumbra(out, occluder.a, occluder.b, &shadow.penumbra(blur));
            crate::consts::BLUR_VERTICES_PER_OCCLUDER
        }
        None => 0,
    }
}

/// Emit one circular occluder. Circular occluders have no penumbra.
pub fn circular_triangles(
    out: &mut ShadowStreams,
    occluder: &CircularOccluder,
    light: &Light,
    opts: &GeneratorOptions,
) -> usize {
    let shadow = CircularShadow::new(occluder, light, opts.shell_depth);
    let tag = QuadTag {
        alpha: occluder.alpha,
        range: ray_range(shadow.theta_a, shadow.theta_b),
        radial: (shadow.start_dist, shadow.end_dist),
    };
    write_quad(out, &shadow.quad, tag, opts);
    0
}

/// Emit any occluder. Returns the number of penumbra vertices written.
pub fn occlusion_triangles(
    out: &mut ShadowStreams,
    occluder: &Occluder,
    light: &Light,
    opts: &GeneratorOptions,
) -> usize {
    match occluder {
        Occluder::Segment(s) => segment_triangles(out, s, light, opts),
        Occluder::Circular(c) => circular_triangles(out, c, light, opts),
    }
}
