// PPU state snapshots for trace output and tooling

use crate::ppu::{DecodedControl1, DecodedControl2, Mirroring, Ppu};
use serde::Serialize;

/// PPU state snapshot
///
/// Captured without side effects; reading a snapshot never clears VBlank.
#[derive(Debug, Clone, Serialize)]
pub struct PpuState {
    /// Current scanline (0-261)
    pub scanline: u16,

    /// Current dot (0-340)
    pub dot: u16,

    /// Completed frames
    pub frame: u64,

    /// Total PPU cycles
    pub cycles: u64,

    /// Control register 1 ($2000)
    pub control1: u8,

    /// Control register 2 ($2001)
    pub control2: u8,

    /// Status register ($2002)
    pub status: u8,

    /// Scroll position ($2005)
    pub scroll: u16,

    /// Next $2005 write fills the high byte
    pub scroll_high_phase: bool,

    /// VRAM address ($2006)
    pub vram_address: u16,

    /// Next $2006 write fills the high byte
    pub vram_address_high_phase: bool,

    pub mirroring: Mirroring,

    pub decoded_control1: DecodedControl1,

    pub decoded_control2: DecodedControl2,
}

impl PpuState {
    /// Capture the current state of `ppu`
    pub fn capture(ppu: &Ppu) -> Self {
        let regs = ppu.registers();
        PpuState {
            scanline: ppu.scanline(),
            dot: ppu.dot(),
            frame: ppu.frame_count(),
            cycles: ppu.cycles(),
            control1: regs.control1(),
            control2: regs.control2(),
            status: regs.status(),
            scroll: ppu.scroll_position(),
            scroll_high_phase: ppu.scroll_expects_high_byte(),
            vram_address: ppu.vram_address(),
            vram_address_high_phase: ppu.vram_address_expects_high_byte(),
            mirroring: ppu.mirroring(),
            decoded_control1: regs.decode_control1(),
            decoded_control2: regs.decode_control2(),
        }
    }

    /// Format status flags
    pub fn format_status(&self) -> String {
        let mut flags = Vec::new();

        if self.status & 0x80 != 0 {
            flags.push("VBlank");
        }
        if self.status & 0x40 != 0 {
            flags.push("Spr0Hit");
        }
        if self.status & 0x20 != 0 {
            flags.push("SprOvf");
        }

        if flags.is_empty() {
            "None".to_string()
        } else {
            flags.join(" ")
        }
    }

    /// Multi-line report of the whole state
    pub fn format(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Scanline: {} Dot: {} Frame: {} Cycles: {}\n",
            self.scanline, self.dot, self.frame, self.cycles
        ));
        output.push_str(&format!(
            "CTRL1:  ${:02X} [{}]\n",
            self.control1, self.decoded_control1
        ));
        output.push_str(&format!(
            "CTRL2:  ${:02X} [{}]\n",
            self.control2, self.decoded_control2
        ));
        output.push_str(&format!(
            "STATUS: ${:02X} [{}]\n",
            self.status,
            self.format_status()
        ));
        output.push_str(&format!(
            "scroll: ${:04X} (w{}) addr: ${:04X} (w{})\n",
            self.scroll,
            self.scroll_high_phase as u8,
            self.vram_address,
            self.vram_address_high_phase as u8
        ));
        output.push_str(&format!("mirroring: {:?}\n", self.mirroring));

        output
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl std::fmt::Display for PpuState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PPU[{:3},{:3}] CTRL1:{:02X} CTRL2:{:02X} STATUS:{:02X} addr:{:04X}",
            self.scanline, self.dot, self.control1, self.control2, self.status, self.vram_address
        )
    }
}
