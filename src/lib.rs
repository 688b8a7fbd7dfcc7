// PPU Core Library
// Video chip (2C02) core for an NES emulator: registers, address space,
// CPU-visible ports and scanline timing

// Public modules
pub mod bus;
pub mod config;
pub mod debug;
pub mod display;
pub mod interrupt;
pub mod ppu;
pub mod screenshot;

// Re-export main types for convenience
pub use bus::MemoryMappedDevice;
pub use config::{ConfigError, CoreConfig};
pub use debug::PpuState;
pub use display::{FrameBuffer, SharedFrameBuffer};
pub use interrupt::{InterruptFlags, InterruptLine, SharedInterruptFlags};
pub use ppu::{Mirroring, PixelRenderer, Ppu, PpuError, RenderContext};
pub use screenshot::{save_screenshot, ScreenshotError};
