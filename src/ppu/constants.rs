// PPU constants

/// Mask folding any 16-bit address into the 14-bit PPU address space
pub(super) const PPU_ADDRESS_MASK: u16 = 0x3FFF;

/// CPU-visible register window is 8 bytes ($2000-$2007), mirrored up to $3FFF
pub(super) const PORT_MASK: u16 = 0x0007;

/// Number of CPU-visible ports
pub(super) const PORT_COUNT: u8 = 8;

/// Start of the name table range
pub(super) const NAMETABLE_START: u16 = 0x2000;

/// Start of the palette range
pub(super) const PALETTE_START: u16 = 0x3F00;

/// Size of the pattern table memory (two 4KB tables)
pub(super) const PATTERN_MEMORY_SIZE: usize = 0x2000;

/// Size of one name table in bytes (1KB)
pub(super) const NAMETABLE_SIZE: usize = 0x400;

/// Physical name table RAM inside the chip (two name tables)
pub(super) const NAMETABLE_MEMORY_SIZE: usize = 2 * NAMETABLE_SIZE;

/// Number of logical name table slots in the address space
pub(super) const NAMETABLE_SLOTS: usize = 4;

/// Size of palette RAM in bytes
pub(super) const PALETTE_SIZE: usize = 32;

/// Palette index mask (flat 32-byte mirror)
pub(super) const PALETTE_MASK: u16 = 0x001F;

/// Value returned by the trace-only register read path
pub(super) const LOG_READ_SENTINEL: u8 = 0xFF;

// ========================================
// PPU Timing Constants (NTSC)
// ========================================

/// Number of PPU cycles (dots) per scanline
pub(super) const CYCLES_PER_SCANLINE: u16 = 341;

/// Number of scanlines per frame (NTSC)
pub(super) const SCANLINES_PER_FRAME: u16 = 262;

/// Total PPU cycles per frame
/// 341 cycles/scanline × 262 scanlines = 89,342 cycles
#[cfg(test)]
pub(super) const CYCLES_PER_FRAME: u32 =
    (CYCLES_PER_SCANLINE as u32) * (SCANLINES_PER_FRAME as u32);

/// Scanline at which the VBlank flag is cleared (6820 PPU clocks after wrap)
pub(super) const VBLANK_CLEAR_SCANLINE: u16 = 20;

/// First scanline that reaches the pixel-render hook
pub(super) const FIRST_RENDER_SCANLINE: u16 = 21;

/// Last scanline that reaches the pixel-render hook
pub(super) const LAST_RENDER_SCANLINE: u16 = 260;

/// Scanline at which the VBlank flag is set and NMI may be requested
pub(super) const VBLANK_SCANLINE: u16 = 241;
