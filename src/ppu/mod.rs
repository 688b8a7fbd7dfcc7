// PPU module - Picture Processing Unit (2C02) core
//
// Register file, address space, CPU-visible ports and the scanline/dot
// timing state machine. Everything lives on one `Ppu` instance; nothing
// is global.

mod constants;
mod memory;
mod ports;
mod registers;
mod render;
mod timing;

pub use memory::{Mirroring, Vram};
pub use registers::{
    Control1, Control2, DecodedControl1, DecodedControl2, RegisterFile, SplitWriteRegister, Status,
};
pub use render::{PixelRenderer, RenderContext};
pub use timing::TimingState;

use crate::display::{FrameBuffer, SharedFrameBuffer};
use crate::interrupt::InterruptLine;
use tracing::warn;

/// Fatal initialization errors
///
/// An instance is never produced when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PpuError {
    /// Mirroring mode exists but this core cannot provide it (cartridge VRAM)
    UnsupportedMirroring(Mirroring),
    /// Raw mirroring code that names no mode
    UnknownMirroring(u8),
    /// The fallback frame buffer could not be allocated
    FramebufferAllocation,
}

impl PpuError {
    /// Nonzero status code for embedders that expect C-style init results
    pub fn code(&self) -> i32 {
        match self {
            PpuError::UnsupportedMirroring(_) => 1,
            PpuError::UnknownMirroring(_) => 2,
            PpuError::FramebufferAllocation => 3,
        }
    }
}

impl std::fmt::Display for PpuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PpuError::UnsupportedMirroring(mode) => {
                write!(f, "mirroring mode {:?} (cartridge VRAM) is not implemented", mode)
            }
            PpuError::UnknownMirroring(code) => write!(f, "unknown mirror type ${:02X}", code),
            PpuError::FramebufferAllocation => write!(f, "failed to allocate the frame buffer"),
        }
    }
}

impl std::error::Error for PpuError {}

/// Where rendered pixels go
enum PixelBuffer {
    /// Supplied by the presentation layer
    Shared(SharedFrameBuffer),
    /// Fallback allocation owned by the PPU
    Owned(FrameBuffer),
}

impl PixelBuffer {
    fn with<R>(&self, f: impl FnOnce(&FrameBuffer) -> R) -> R {
        match self {
            PixelBuffer::Shared(fb) => f(&fb.borrow()),
            PixelBuffer::Owned(fb) => f(fb),
        }
    }

    /// `None` while the presentation layer holds a borrow of its buffer
    fn with_mut<R>(&mut self, f: impl FnOnce(&mut FrameBuffer) -> R) -> Option<R> {
        match self {
            PixelBuffer::Shared(fb) => fb.try_borrow_mut().ok().map(|mut fb| f(&mut fb)),
            PixelBuffer::Owned(fb) => Some(f(fb)),
        }
    }
}

/// PPU structure representing the Picture Processing Unit state
pub struct Ppu {
    /// Control 1, control 2 and status
    registers: RegisterFile,

    /// Scroll position ($2005), filled low byte first
    scroll: SplitWriteRegister,

    /// VRAM address ($2006), filled low byte first
    vram_addr: SplitWriteRegister,

    /// Pattern, name table and palette memory
    vram: Vram,

    /// Current scanline and dot
    timing: TimingState,

    /// Where VBlank NMIs are raised
    interrupts: Box<dyn InterruptLine>,

    pixels: PixelBuffer,

    /// Pixel-render hook, called for every visible dot
    renderer: Option<Box<dyn PixelRenderer>>,

    /// Total PPU cycles executed
    cycles: u64,

    /// Completed frames
    frame_count: u64,

    /// Pixels dropped this frame because the shared buffer was borrowed
    skipped_pixels: u32,
}

impl Ppu {
    /// Initialize a PPU that owns its frame buffer
    ///
    /// # Errors
    ///
    /// Fails for mirroring modes this core cannot wire, or if the frame
    /// buffer cannot be allocated.
    ///
    /// # Example
    ///
    /// ```
    /// use ppu_core::{Mirroring, Ppu, SharedInterruptFlags};
    ///
    /// let nmi = SharedInterruptFlags::new();
    /// let mut ppu = Ppu::init(Mirroring::Vertical, nmi.clone()).unwrap();
    /// ppu.write_port(0, 0x80);
    /// assert_eq!(ppu.scanline(), 0);
    /// ```
    pub fn init(
        mirroring: Mirroring,
        interrupts: impl InterruptLine + 'static,
    ) -> Result<Self, PpuError> {
        Self::build(mirroring, Box::new(interrupts), None)
    }

    /// Initialize a PPU that renders into a buffer owned by the presentation layer
    ///
    /// # Errors
    ///
    /// Fails for mirroring modes this core cannot wire.
    pub fn init_with_surface(
        mirroring: Mirroring,
        interrupts: impl InterruptLine + 'static,
        surface: SharedFrameBuffer,
    ) -> Result<Self, PpuError> {
        Self::build(mirroring, Box::new(interrupts), Some(surface))
    }

    fn build(
        mirroring: Mirroring,
        interrupts: Box<dyn InterruptLine>,
        surface: Option<SharedFrameBuffer>,
    ) -> Result<Self, PpuError> {
        let vram = Vram::new(mirroring).map_err(|e| {
            warn!(error = %e, "PPU init failed");
            e
        })?;

        let pixels = match surface {
            Some(fb) => PixelBuffer::Shared(fb),
            None => {
                let fb = FrameBuffer::try_new().map_err(|e| {
                    warn!(error = %e, "PPU init failed: frame buffer allocation");
                    PpuError::FramebufferAllocation
                })?;
                PixelBuffer::Owned(fb)
            }
        };

        Ok(Ppu {
            registers: RegisterFile::new(),
            scroll: SplitWriteRegister::new(),
            vram_addr: SplitWriteRegister::new(),
            vram,
            timing: TimingState::default(),
            interrupts,
            pixels,
            renderer: None,
            cycles: 0,
            frame_count: 0,
            skipped_pixels: 0,
        })
    }

    /// Install the pixel-render hook
    pub fn set_renderer(&mut self, renderer: Box<dyn PixelRenderer>) {
        self.renderer = Some(renderer);
    }

    /// Remove the pixel-render hook
    pub fn clear_renderer(&mut self) -> Option<Box<dyn PixelRenderer>> {
        self.renderer.take()
    }

    /// Control 1, control 2 and status registers
    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Current scroll position assembled from $2005 writes
    pub fn scroll_position(&self) -> u16 {
        self.scroll.value()
    }

    /// Whether the next $2005 write fills the high byte
    pub fn scroll_expects_high_byte(&self) -> bool {
        self.scroll.expects_high_byte()
    }

    /// Current VRAM address assembled from $2006 writes
    pub fn vram_address(&self) -> u16 {
        self.vram_addr.value()
    }

    /// Whether the next $2006 write fills the high byte
    pub fn vram_address_expects_high_byte(&self) -> bool {
        self.vram_addr.expects_high_byte()
    }

    /// PPU memory (pattern tables, name tables, palette)
    pub fn vram(&self) -> &Vram {
        &self.vram
    }

    /// Direct access to PPU memory, e.g. for loading pattern data
    pub fn vram_mut(&mut self) -> &mut Vram {
        &mut self.vram
    }

    /// Name table mirroring wired at init
    pub fn mirroring(&self) -> Mirroring {
        self.vram.mirroring()
    }

    /// Current beam position
    pub fn timing(&self) -> TimingState {
        self.timing
    }

    /// Current scanline (0-261)
    pub fn scanline(&self) -> u16 {
        self.timing.scanline
    }

    /// Current dot (cycle within the scanline)
    pub fn dot(&self) -> u16 {
        self.timing.dot
    }

    /// Total PPU cycles executed since init
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Frames completed since init
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Whether the frame buffer was supplied by the presentation layer
    pub fn is_presentation_backed(&self) -> bool {
        matches!(self.pixels, PixelBuffer::Shared(_))
    }

    /// Run `f` against the current frame buffer
    ///
    /// # Panics
    /// Panics if the presentation layer holds a mutable borrow of its
    /// shared buffer at the time of the call
    pub fn with_frame<R>(&self, f: impl FnOnce(&FrameBuffer) -> R) -> R {
        self.pixels.with(f)
    }

    /// Copy of the current frame's palette indices
    pub fn frame_snapshot(&self) -> Vec<u8> {
        self.with_frame(|fb| fb.as_slice().to_vec())
    }
}

#[cfg(test)]
mod tests;
