//! Output surfaces: the RGBA frame buffer and the background transparency
//! grid left behind by the background renderer.

/// Framebuffer dimensions.
pub const FB_WIDTH: usize = 256;
pub const FB_HEIGHT: usize = 240;

/// One RGBA pixel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Opaque colour.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Pack as `0xAARRGGBB`, the layout most host surfaces expect.
    #[must_use]
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

/// 256x240 RGBA frame, persistent across scanlines and read by the host.
pub struct FrameBuffer {
    pixels: Vec<Rgba>,
}

impl FrameBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgba::BLACK; FB_WIDTH * FB_HEIGHT],
        }
    }

    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Rgba {
        self.pixels[y * FB_WIDTH + x]
    }

    pub fn set(&mut self, x: usize, y: usize, color: Rgba) {
        self.pixels[y * FB_WIDTH + x] = color;
    }

    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Row-major pixels, `FB_WIDTH * FB_HEIGHT` long.
    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-pixel background transparency for the current frame.
///
/// `true` means the background pixel there was colour 0 (transparent), so
/// sprites show through and sprite 0 cannot hit.
pub struct BackgroundMask {
    transparent: Vec<bool>,
}

impl BackgroundMask {
    /// A fully transparent grid.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transparent: vec![true; FB_WIDTH * FB_HEIGHT],
        }
    }

    #[must_use]
    pub fn is_transparent(&self, x: usize, y: usize) -> bool {
        self.transparent[y * FB_WIDTH + x]
    }

    pub fn set_transparent(&mut self, x: usize, y: usize, transparent: bool) {
        self.transparent[y * FB_WIDTH + x] = transparent;
    }

    pub fn fill(&mut self, transparent: bool) {
        self.transparent.fill(transparent);
    }
}

impl Default for BackgroundMask {
    fn default() -> Self {
        Self::new()
    }
}
