//! Vertex layouts for the shadow and light passes
//!
//! The shadow streams are uploaded one buffer per attribute, each described
//! by [`ShadowStream::layout`]. The light pass draws [`LIGHT_QUAD`].

use bytemuck::{Pod, Zeroable};

use crate::light::Light;

/// Blending for shadow masks: overlapping shadows compose by alpha
pub const SHADOW_BLEND: wgpu::BlendState = wgpu::BlendState::ALPHA_BLENDING;

/// One flat output stream of `ShadowGeometry`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadowStream {
    Position,
    Alpha,
    AngularRange,
    Radial,
    BlurPosition,
    BlurTriPosition,
}

impl ShadowStream {
    pub const ALL: [ShadowStream; 6] = [
        ShadowStream::Position,
        ShadowStream::Alpha,
        ShadowStream::AngularRange,
        ShadowStream::Radial,
        ShadowStream::BlurPosition,
        ShadowStream::BlurTriPosition,
    ];

    /// Floats per vertex
    pub fn components(self) -> usize {
        match self {
            ShadowStream::Alpha => 1,
            _ => 2,
        }
    }

    /// Attribute name in the shadow shaders
    pub fn attribute_name(self) -> &'static str {
        match self {
            ShadowStream::Position => "position",
            ShadowStream::Alpha => "alpha",
            ShadowStream::AngularRange => "angular_range",
            ShadowStream::Radial => "dist",
            ShadowStream::BlurPosition => "position",
            ShadowStream::BlurTriPosition => "tri_position",
        }
    }

    /// Whether the stream feeds the penumbra pass rather than the umbra pass
    pub fn is_blur(self) -> bool {
        matches!(self, ShadowStream::BlurPosition | ShadowStream::BlurTriPosition)
    }

    pub fn layout(self) -> wgpu::VertexBufferLayout<'static> {
        let attributes: &'static [wgpu::VertexAttribute] = match self {
            ShadowStream::Position | ShadowStream::BlurPosition => &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            }],
            ShadowStream::Alpha => &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32,
            }],
            ShadowStream::AngularRange => &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            }],
            ShadowStream::Radial => &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 3,
                format: wgpu::VertexFormat::Float32x2,
            }],
            ShadowStream::BlurTriPosition => &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            }],
        };

        wgpu::VertexBufferLayout {
            array_stride: (self.components() * std::mem::size_of::<f32>()) as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}

/// Full-screen quad vertex for the light pass
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LightQuadVertex {
    pub position: [f32; 2],
    pub emission_tex_coord: [f32; 2],
}

impl LightQuadVertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            emission_tex_coord: [u, v],
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LightQuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Two triangles covering clip space
pub const LIGHT_QUAD: [LightQuadVertex; 6] = [
    LightQuadVertex::new(-1.0, -1.0, 0.0, 0.0),
    LightQuadVertex::new(1.0, -1.0, 1.0, 0.0),
    LightQuadVertex::new(-1.0, 1.0, 0.0, 1.0),
    LightQuadVertex::new(1.0, -1.0, 1.0, 0.0),
    LightQuadVertex::new(-1.0, 1.0, 0.0, 1.0),
    LightQuadVertex::new(1.0, 1.0, 1.0, 1.0),
];

/// Per-light uniform for the light pass (must match shader)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    pub translate: [f32; 2], // offset 0
    pub height: f32,         // offset 8
    pub radius: f32,         // offset 12
    pub tint: [f32; 3],      // offset 16
    pub _pad: f32,           // pad to 32 bytes
}

impl LightUniform {
    pub fn from_light(light: &Light) -> Self {
        Self {
            translate: light.position.to_array(),
            height: light.height,
            radius: light.radius,
            tint: light.tint,
            _pad: 0.0,
        }
    }
}
