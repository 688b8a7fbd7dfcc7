// Pixel-render hook
//
// The timing state machine calls into a `PixelRenderer` for every visible
// dot. Turning tile and attribute data into pixels is up to the renderer.

use super::registers::{DecodedControl1, DecodedControl2};
use super::Vram;
use crate::display::FrameBuffer;

/// Everything a renderer can see for one pixel
#[derive(Debug)]
pub struct RenderContext<'a> {
    /// Horizontal position (0-255)
    pub x: usize,
    /// Vertical position (0-239)
    pub y: usize,
    /// PPU memory
    pub vram: &'a Vram,
    /// Decoded control register 1
    pub control: DecodedControl1,
    /// Decoded control register 2
    pub mask: DecodedControl2,
    /// Scroll position from $2005
    pub scroll: u16,
}

/// Extension point for pixel compositing
pub trait PixelRenderer {
    /// Produce the pixel at `(ctx.x, ctx.y)` into `frame`
    fn render_pixel(&mut self, ctx: &RenderContext<'_>, frame: &mut FrameBuffer);
}
