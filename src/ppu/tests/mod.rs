//! PPU unit tests
//!
//! This module contains tests for the PPU core, organized by functionality.

use super::constants::*;
use super::*;
use crate::bus::MemoryMappedDevice;
use crate::interrupt::{InterruptFlags, SharedInterruptFlags};

// ========================================
// Test Constants (CPU addresses of the ports)
// ========================================

/// Control register 1 ($2000)
pub(crate) const PPUCTRL: u16 = 0x2000;
/// Control register 2 ($2001)
pub(crate) const PPUMASK: u16 = 0x2001;
/// Status register ($2002)
pub(crate) const PPUSTATUS: u16 = 0x2002;
/// OAM address port ($2003), unimplemented
pub(crate) const OAMADDR: u16 = 0x2003;
/// Scroll position ($2005), written twice
pub(crate) const PPUSCROLL: u16 = 0x2005;
/// VRAM address ($2006), written twice
pub(crate) const PPUADDR: u16 = 0x2006;
/// VRAM data ($2007)
pub(crate) const PPUDATA: u16 = 0x2007;

// ========================================
// Test Helper Functions
// ========================================

/// PPU with horizontal mirroring and a fresh interrupt line
pub(crate) fn new_ppu() -> (Ppu, SharedInterruptFlags) {
    new_ppu_with(Mirroring::Horizontal)
}

pub(crate) fn new_ppu_with(mirroring: Mirroring) -> (Ppu, SharedInterruptFlags) {
    let nmi = SharedInterruptFlags::new();
    let ppu = Ppu::init(mirroring, nmi.clone()).expect("PPU init should succeed");
    (ppu, nmi)
}

/// Point the VRAM address register at `addr` (low byte first)
pub(crate) fn set_vram_address(ppu: &mut Ppu, addr: u16) {
    ppu.write(PPUADDR, (addr & 0xFF) as u8);
    ppu.write(PPUADDR, (addr >> 8) as u8);
}

/// Step until the beam sits at `scanline`, dot 0
pub(crate) fn run_to_scanline(ppu: &mut Ppu, scanline: u16) {
    while !(ppu.scanline() == scanline && ppu.dot() == 0) {
        ppu.step();
    }
}

// ========================================
// Test Modules
// ========================================

mod init;
mod registers;
