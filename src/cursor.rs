//! Growable flat `f32` buffer with a write cursor
//!
//! The backing storage only ever grows. `restart` rewinds the cursor so the
//! same allocation is reused every frame.

use glam::Vec2;

#[derive(Debug, Clone, Default)]
pub struct F32Cursor {
    data: Vec<f32>,
    offset: usize,
}

impl F32Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor over `len` zeroed floats
    pub fn with_capacity(len: usize) -> Self {
        Self {
            data: vec![0.0; len],
            offset: 0,
        }
    }

    /// Number of floats that can be written before the next restart
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Floats written since the last restart
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Grow the backing storage to hold at least `len` floats.
    ///
    /// Never shrinks. Growth is at least doubling so a slowly growing scene
    /// doesn't reallocate every frame. Returns true if storage was grown.
    pub fn ensure_capacity(&mut self, len: usize) -> bool {
        if len <= self.data.len() {
            return false;
        }
        let new_len = len.max(self.data.len() * 2);
        self.data.resize(new_len, 0.0);
        true
    }

    #[inline]
    pub fn restart(&mut self) {
        self.offset = 0;
    }

    #[inline]
    pub fn push(&mut self, value: f32) {
        debug_assert!(
            self.offset < self.data.len(),
            "cursor overflow: offset {} capacity {}",
            self.offset,
            self.data.len()
        );
        self.data[self.offset] = value;
        self.offset += 1;
    }

    #[inline]
    pub fn push2(&mut self, a: f32, b: f32) {
        self.push(a);
        self.push(b);
    }

    #[inline]
    pub fn push3(&mut self, a: f32, b: f32, c: f32) {
        self.push2(a, b);
        self.push(c);
    }

    #[inline]
    pub fn vec2(&mut self, v: Vec2) {
        self.push2(v.x, v.y);
    }

    /// The floats written since the last restart
    #[inline]
    pub fn written(&self) -> &[f32] {
        &self.data[..self.offset]
    }

    /// Written floats as raw bytes for buffer upload
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.written())
    }
}
