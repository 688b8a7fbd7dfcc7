// Display module - pixel destination shared with the presentation layer
//
// This module provides:
// - System color palette (64 entries)
// - Frame buffer (256×240 palette indices), owned or shared

pub mod framebuffer;
pub mod palette;

pub use framebuffer::{FrameBuffer, SharedFrameBuffer, SCREEN_HEIGHT, SCREEN_SIZE, SCREEN_WIDTH};
pub use palette::{palette_to_rgb, palette_to_rgb_bytes, SYSTEM_PALETTE};
