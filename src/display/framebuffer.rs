// Frame Buffer - destination for the pixel-render hook
//
// 256×240 pixels, one palette index per pixel. The buffer either comes from
// the presentation layer (shared) or is allocated by the PPU itself.

use super::palette::palette_to_rgb_bytes;
use std::cell::RefCell;
use std::collections::TryReserveError;
use std::rc::Rc;

/// Screen width in pixels
pub const SCREEN_WIDTH: usize = 256;

/// Screen height in pixels
pub const SCREEN_HEIGHT: usize = 240;

/// Total number of pixels in the frame buffer
pub const SCREEN_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// Frame buffer handed out by a presentation layer
pub type SharedFrameBuffer = Rc<RefCell<FrameBuffer>>;

/// Heap-allocated frame of palette indices
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Vec<u8>,
}

impl FrameBuffer {
    /// Allocate a zeroed frame buffer
    ///
    /// # Errors
    ///
    /// Returns the allocator's error instead of aborting when the heap is exhausted.
    pub fn try_new() -> Result<Self, TryReserveError> {
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(SCREEN_SIZE)?;
        pixels.resize(SCREEN_SIZE, 0);
        Ok(Self { pixels })
    }

    /// Wrap existing pixel data; `None` if it is not exactly 256×240 bytes
    pub fn from_pixels(pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == SCREEN_SIZE).then_some(Self { pixels })
    }

    /// Allocate a buffer and wrap it for sharing with the PPU
    pub fn try_new_shared() -> Result<SharedFrameBuffer, TryReserveError> {
        Ok(Rc::new(RefCell::new(Self::try_new()?)))
    }

    pub fn width(&self) -> usize {
        SCREEN_WIDTH
    }

    pub fn height(&self) -> usize {
        SCREEN_HEIGHT
    }

    /// Set a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, palette_index: u8) {
        assert!(x < SCREEN_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < SCREEN_HEIGHT, "Y coordinate {} out of bounds", y);

        self.pixels[y * SCREEN_WIDTH + x] = palette_index & 0x3F;
    }

    /// Get a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u8 {
        assert!(x < SCREEN_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < SCREEN_HEIGHT, "Y coordinate {} out of bounds", y);

        self.pixels[y * SCREEN_WIDTH + x]
    }

    /// Fill every pixel with one palette index
    pub fn clear(&mut self, palette_index: u8) {
        self.pixels.fill(palette_index & 0x3F);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Expand to packed RGB (3 bytes per pixel) through the system palette
    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&index| palette_to_rgb_bytes(index))
            .collect()
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrameBuffer({}x{})", SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framebuffer_creation() {
        let fb = FrameBuffer::try_new().expect("allocation");
        assert_eq!(fb.as_slice().len(), SCREEN_SIZE);
        assert!(fb.as_slice().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_set_get_pixel() {
        let mut fb = FrameBuffer::try_new().expect("allocation");
        fb.set_pixel(100, 100, 0x20);
        assert_eq!(fb.get_pixel(100, 100), 0x20);
    }

    #[test]
    fn test_pixel_is_masked_to_palette_range() {
        let mut fb = FrameBuffer::try_new().expect("allocation");
        fb.set_pixel(0, 0, 0xFF);
        assert_eq!(fb.get_pixel(0, 0), 0x3F);
    }

    #[test]
    fn test_clear() {
        let mut fb = FrameBuffer::try_new().expect("allocation");
        fb.clear(0x10);
        assert_eq!(fb.get_pixel(0, 0), 0x10);
        assert_eq!(fb.get_pixel(255, 239), 0x10);
    }

    #[test]
    fn test_from_pixels_checks_size() {
        assert!(FrameBuffer::from_pixels(vec![0; SCREEN_SIZE]).is_some());
        assert!(FrameBuffer::from_pixels(vec![0; 100]).is_none());
    }

    #[test]
    fn test_to_rgb() {
        let mut fb = FrameBuffer::try_new().expect("allocation");
        fb.set_pixel(1, 0, 0x01);

        let rgb = fb.to_rgb();
        assert_eq!(rgb.len(), SCREEN_SIZE * 3);
        assert_eq!(&rgb[0..3], &[0x54, 0x54, 0x54]);
        assert_eq!(&rgb[3..6], &[0x00, 0x1E, 0x74]);
    }

    #[test]
    #[should_panic]
    fn test_set_pixel_out_of_bounds_x() {
        let mut fb = FrameBuffer::try_new().expect("allocation");
        fb.set_pixel(256, 0, 0x00);
    }

    #[test]
    #[should_panic]
    fn test_set_pixel_out_of_bounds_y() {
        let mut fb = FrameBuffer::try_new().expect("allocation");
        fb.set_pixel(0, 240, 0x00);
    }
}
