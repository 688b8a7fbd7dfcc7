// Common helpers for integration tests
//
// Stands in for the CPU side: owns the interrupt flags and talks to the PPU
// only through the CPU bus.

#![allow(dead_code)]

use ppu_core::{InterruptFlags, MemoryMappedDevice, Mirroring, Ppu, SharedInterruptFlags};

/// PPU cycles per frame
pub const CYCLES_PER_FRAME: u32 = 341 * 262;

/// A PPU plus the CPU's end of its interrupt line
pub struct TestSystem {
    pub ppu: Ppu,
    pub interrupts: SharedInterruptFlags,
}

impl TestSystem {
    pub fn new(mirroring: Mirroring) -> Self {
        let interrupts = SharedInterruptFlags::new();
        let ppu = Ppu::init(mirroring, interrupts.clone()).expect("PPU init should succeed");
        TestSystem { ppu, interrupts }
    }

    /// Write through the CPU bus at $2000 + port
    pub fn poke(&mut self, port: u16, value: u8) {
        self.ppu.write(0x2000 + port, value);
    }

    /// Read through the CPU bus at $2000 + port
    pub fn peek(&mut self, port: u16) -> u8 {
        self.ppu.read(0x2000 + port)
    }

    /// Set the VRAM address the way a program does: low byte, then high byte
    pub fn set_address(&mut self, addr: u16) {
        self.poke(6, (addr & 0xFF) as u8);
        self.poke(6, (addr >> 8) as u8);
    }

    /// Acknowledge a pending NMI, returning whether one was pending
    pub fn acknowledge_nmi(&self) -> bool {
        let pending = self.interrupts.nmi_pending();
        self.interrupts.clear(InterruptFlags::NMI);
        pending
    }
}
