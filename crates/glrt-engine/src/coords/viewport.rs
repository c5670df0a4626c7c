use winit::dpi::PhysicalSize;

/// Drawable size in physical pixels, as seen by the fragment shader through
/// the `windowDimensions` uniform.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_physical(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width as f32, size.height as f32)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub fn as_array(self) -> [f32; 2] {
        [self.width, self.height]
    }

    /// Integer size for `glViewport`, rounded down.
    pub fn pixels(self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }
}
