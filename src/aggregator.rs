//! Occlusion aggregation
//!
//! `ShadowGeometry` owns the reusable output streams for one shadow pass.
//! A recompute sizes them for the occluder list, rewinds them and writes
//! every occluder's triangles for one light. No GPU work happens here; the
//! renderer reads the streams afterwards.

use glam::Vec2;

use crate::consts::{BLUR_VERTICES_PER_OCCLUDER, VERTICES_PER_OCCLUDER};
use crate::debug::DebugRecorder;
use crate::geometry::{GeneratorOptions, ShadowStreams, occlusion_triangles};
use crate::light::Light;
use crate::occluder::Occluder;
use crate::renderer::vertex::ShadowStream;
use crate::settings::ShadowSettings;

/// Vertex counts produced by one recompute, used as draw element counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShadowCounts {
    /// Primary umbra vertices, always `6 * occluders`
    pub vertices: usize,
    /// Penumbra vertices
    pub blur_vertices: usize,
}

/// Reusable shadow vertex streams for one light at a time
#[derive(Debug, Clone, Default)]
pub struct ShadowGeometry {
    streams: ShadowStreams,
    counts: ShadowCounts,
}

impl ShadowGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make room for `occluders` occluders' worth of vertices in every stream.
    ///
    /// Storage only ever grows.
    pub fn ensure_capacity(&mut self, occluders: usize) {
        let vertices = occluders * VERTICES_PER_OCCLUDER;
        let blur_vertices = occluders * BLUR_VERTICES_PER_OCCLUDER;
        let s = &mut self.streams;

        let grown = s.position.ensure_capacity(vertices * 2)
            | s.alpha.ensure_capacity(vertices)
            | s.angular_range.ensure_capacity(vertices * 2)
            | s.radial.ensure_capacity(vertices * 2)
            | s.blur_position.ensure_capacity(blur_vertices * 2)
            | s.blur_tri_position.ensure_capacity(blur_vertices * 2);

        if grown {
            log::debug!(
                "Shadow buffers grown for {} occluders ({} vertices)",
                occluders,
                self.vertex_capacity()
            );
        }
    }

    /// Rewind every stream without releasing storage
    pub fn reset(&mut self) {
        self.streams.restart();
        self.counts = ShadowCounts::default();
    }

    /// Rebuild all streams for `light` and `occluders`
    pub fn recompute(&mut self, light: &Light, occluders: &[Occluder], settings: &ShadowSettings) -> ShadowCounts {
        self.ensure_capacity(occluders.len());
        self.reset();

        let opts = GeneratorOptions {
            blur: settings.effective_blur(),
            angular_range: settings.angular_range,
            shell_depth: settings.shell_depth,
        };

        let mut blur_vertices = 0;
        for occluder in occluders {
            blur_vertices += occlusion_triangles(&mut self.streams, occluder, light, &opts);
        }

        self.counts = ShadowCounts {
            vertices: self.streams.position.offset() / 2,
            blur_vertices,
        };
        debug_assert_eq!(self.counts.vertices, occluders.len() * VERTICES_PER_OCCLUDER);

        log::trace!(
            "occlusion triangles cursor offset: {} ({} occluders, {} blur vertices)",
            self.streams.position.offset(),
            occluders.len(),
            blur_vertices
        );
        self.counts
    }

    /// [`recompute`](Self::recompute) that also reports internals to `recorder`
    pub fn recompute_recorded(
        &mut self,
        light: &Light,
        occluders: &[Occluder],
        settings: &ShadowSettings,
        recorder: &mut DebugRecorder,
    ) -> ShadowCounts {
        let counts = self.recompute(light, occluders, settings);
        recorder.record("occlusion triangles cursor offset", &self.streams.position.offset());
        recorder.record("occlusion info size", &self.streams.angular_range.offset());
        recorder.record("vertex count", &counts.vertices);
        recorder.record("blur vertex count", &counts.blur_vertices);
        recorder.record("vertex capacity", &self.vertex_capacity());
        counts
    }

    /// Recompute from loose light parameters
    pub fn recompute_occlusions(
        &mut self,
        light_position: Vec2,
        light_height: f32,
        light_radius: f32,
        occluders: &[Occluder],
        settings: &ShadowSettings,
    ) -> ShadowCounts {
        let light = Light::new(light_position, light_height, light_radius);
        self.recompute(&light, occluders, settings)
    }

    /// Counts from the last recompute
    pub fn counts(&self) -> ShadowCounts {
        self.counts
    }

    /// Primary vertices the streams can hold without growing
    pub fn vertex_capacity(&self) -> usize {
        self.streams.alpha.capacity()
    }

    /// Penumbra vertices the streams can hold without growing
    pub fn blur_vertex_capacity(&self) -> usize {
        self.streams.blur_tri_position.capacity() / 2
    }

    pub fn positions(&self) -> &[f32] {
        self.streams.position.written()
    }

    pub fn alphas(&self) -> &[f32] {
        self.streams.alpha.written()
    }

    /// Empty when the angular range stream is disabled
    pub fn angular_ranges(&self) -> &[f32] {
        self.streams.angular_range.written()
    }

    pub fn radial_ranges(&self) -> &[f32] {
        self.streams.radial.written()
    }

    pub fn blur_positions(&self) -> &[f32] {
        self.streams.blur_position.written()
    }

    pub fn blur_tri_positions(&self) -> &[f32] {
        self.streams.blur_tri_position.written()
    }

    /// Written floats of one stream
    pub fn stream(&self, stream: ShadowStream) -> &[f32] {
        match stream {
            ShadowStream::Position => self.positions(),
            ShadowStream::Alpha => self.alphas(),
            ShadowStream::AngularRange => self.angular_ranges(),
            ShadowStream::Radial => self.radial_ranges(),
            ShadowStream::BlurPosition => self.blur_positions(),
            ShadowStream::BlurTriPosition => self.blur_tri_positions(),
        }
    }

    /// Written bytes of one stream, ready for `queue.write_buffer`
    pub fn stream_bytes(&self, stream: ShadowStream) -> &[u8] {
        bytemuck::cast_slice(self.stream(stream))
    }
}
