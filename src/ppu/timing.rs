// PPU timing state machine

use super::constants::{
    CYCLES_PER_SCANLINE, FIRST_RENDER_SCANLINE, LAST_RENDER_SCANLINE, SCANLINES_PER_FRAME,
    VBLANK_CLEAR_SCANLINE, VBLANK_SCANLINE,
};
use super::registers::Status;
use super::render::RenderContext;
use super::Ppu;
use crate::display::SCREEN_WIDTH;
use crate::interrupt::InterruptFlags;
use serde::Serialize;
use tracing::{debug, trace, warn};

/// Position of the beam
///
/// `scanline` stays in 0..=261 and `dot` in 0..=340 between steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimingState {
    pub scanline: u16,
    pub dot: u16,
}

impl TimingState {
    /// Whether the current position reaches the pixel-render hook
    pub fn in_render_window(&self) -> bool {
        (FIRST_RENDER_SCANLINE..=LAST_RENDER_SCANLINE).contains(&self.scanline)
            && (self.dot as usize) < SCREEN_WIDTH
    }

    /// Advance one dot. Returns the new scanline when a scanline ends.
    fn advance(&mut self) -> Option<u16> {
        self.dot += 1;
        if self.dot == CYCLES_PER_SCANLINE {
            self.dot = 0;
            self.scanline += 1;
            Some(self.scanline)
        } else {
            None
        }
    }
}

impl Ppu {
    /// Execute one PPU cycle
    ///
    /// Never panics on a busy shared frame buffer: pixels that cannot be
    /// written are dropped and reported once at the end of the frame.
    ///
    /// # Returns
    ///
    /// `true` when this cycle completed a frame (scanline wrapped to 0)
    pub fn step(&mut self) -> bool {
        self.cycles += 1;

        if self.timing.in_render_window() {
            self.render_pixel();
        }

        let Some(scanline) = self.timing.advance() else {
            return false;
        };

        match scanline {
            VBLANK_CLEAR_SCANLINE => {
                // TODO: clear sprite overflow and sprite 0 hit here once sprite evaluation exists
                self.registers.set_status_flag(Status::VBLANK, false);
                false
            }
            VBLANK_SCANLINE => {
                debug!("ppu: set vblank");
                self.registers.set_status_flag(Status::VBLANK, true);

                if self.registers.decode_control1().vblank_nmi_enabled {
                    debug!("ppu: generate NMI");
                    self.interrupts.request(InterruptFlags::NMI);
                } else {
                    debug!("ppu: NMI disabled, not generating");
                }
                false
            }
            SCANLINES_PER_FRAME => {
                self.timing.scanline = 0;
                self.frame_count += 1;
                if self.skipped_pixels > 0 {
                    warn!(
                        frame = self.frame_count,
                        skipped = self.skipped_pixels,
                        "ppu: frame buffer busy, pixels dropped"
                    );
                    self.skipped_pixels = 0;
                }
                trace!(frame = self.frame_count, "ppu: frame done");
                true
            }
            _ => false,
        }
    }

    /// Run until the current frame completes
    ///
    /// # Returns
    ///
    /// Number of cycles executed
    pub fn step_frame(&mut self) -> u32 {
        let mut cycles = 1;
        while !self.step() {
            cycles += 1;
        }
        cycles
    }

    fn render_pixel(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        let ctx = RenderContext {
            x: self.timing.dot as usize,
            y: (self.timing.scanline - FIRST_RENDER_SCANLINE) as usize,
            vram: &self.vram,
            control: self.registers.decode_control1(),
            mask: self.registers.decode_control2(),
            scroll: self.scroll.value(),
        };

        // The presentation layer may be reading its buffer; drop the pixel
        if self.pixels.with_mut(|frame| renderer.render_pixel(&ctx, frame)).is_none() {
            self.skipped_pixels += 1;
        }
    }
}
