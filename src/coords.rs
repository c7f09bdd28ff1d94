//! Coordinate spaces
//!
//! Screen pixels, normalized device coordinates and texture coordinates all
//! share the `Vec2` shape. Each gets its own wrapper so they can't be mixed
//! without going through one of the conversions below.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Viewport size in pixels
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

/// Pixel position, origin top-left, y down
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenCoords(pub Vec2);

/// Normalized device coordinates, [-1, 1] on both axes, y up
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlCoords(pub Vec2);

/// Texture space, [0, 1] on both axes
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureCoords(pub Vec2);

impl ScreenCoords {
    /// From a pointer event's offset within the canvas
    pub fn from_offset(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn from_gl(v: GlCoords, viewport: Viewport) -> Self {
        debug_assert!(viewport.is_valid(), "invalid viewport {viewport:?}");
        Self(Vec2::new(
            (v.0.x + 1.0) * 0.5 * viewport.width,
            (1.0 - v.0.y) * 0.5 * viewport.height,
        ))
    }
}

impl GlCoords {
    pub fn from_screen(v: ScreenCoords, viewport: Viewport) -> Self {
        debug_assert!(viewport.is_valid(), "invalid viewport {viewport:?}");
        Self(Vec2::new(
            (v.0.x / viewport.width) * 2.0 - 1.0,
            -((v.0.y / viewport.height) * 2.0 - 1.0),
        ))
    }

    #[inline]
    pub fn vec2(self) -> Vec2 {
        self.0
    }
}

impl TextureCoords {
    pub fn from_gl(v: GlCoords) -> Self {
        Self((v.0 + Vec2::ONE) * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_gl_corners() {
        let vp = Viewport::new(800.0, 600.0);
        let tl = GlCoords::from_screen(ScreenCoords::from_offset(0.0, 0.0), vp);
        assert_eq!(tl.vec2(), Vec2::new(-1.0, 1.0));
        let br = GlCoords::from_screen(ScreenCoords::from_offset(800.0, 600.0), vp);
        assert_eq!(br.vec2(), Vec2::new(1.0, -1.0));
        let center = GlCoords::from_screen(ScreenCoords::from_offset(400.0, 300.0), vp);
        assert_eq!(center.vec2(), Vec2::ZERO);
    }

    #[test]
    fn test_gl_to_screen_inverts() {
        let vp = Viewport::new(1280.0, 720.0);
        let screen = ScreenCoords::from_offset(320.0, 500.0);
        let back = ScreenCoords::from_gl(GlCoords::from_screen(screen, vp), vp);
        assert!((back.0 - screen.0).length() < 1e-3);
    }

    #[test]
    fn test_gl_to_texture() {
        assert_eq!(TextureCoords::from_gl(GlCoords(Vec2::new(-1.0, 1.0))).0, Vec2::new(0.0, 1.0));
        assert_eq!(TextureCoords::from_gl(GlCoords(Vec2::ZERO)).0, Vec2::splat(0.5));
    }

    #[test]
    fn test_viewport_validity() {
        assert!(Viewport::new(1.0, 1.0).is_valid());
        assert!(!Viewport::new(0.0, 1.0).is_valid());
        assert!(!Viewport::new(f32::INFINITY, 1.0).is_valid());
    }
}
