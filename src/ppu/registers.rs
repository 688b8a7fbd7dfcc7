// PPU register file and bitfield decoding

use bitflags::bitflags;
use serde::Serialize;
use std::fmt;

bitflags! {
    /// Control register 1 (`$2000`)
    ///
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// N . H B S I . .
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Control1: u8 {
        /// VRAM address increment per data port access (0 = +1, 1 = +32)
        const INCREMENT_32 = 0b0000_0100;
        /// Sprite pattern table (0 = $0000, 1 = $1000)
        const SPRITE_TABLE = 0b0000_1000;
        /// Background pattern table (0 = $0000, 1 = $1000)
        const BACKGROUND_TABLE = 0b0001_0000;
        /// 8x16 sprites
        const SPRITE_8X16 = 0b0010_0000;
        /// Generate NMI at the start of VBlank
        const VBLANK_NMI = 0b1000_0000;
    }
}

bitflags! {
    /// Control register 2 (`$2001`)
    ///
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// C C C s b S B M
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Control2: u8 {
        /// Monochrome mode
        const MONOCHROME = 0b0000_0001;
        /// Do not clip the left 8 pixels of the background
        const SHOW_FULL_BACKGROUND = 0b0000_0010;
        /// Do not clip the left 8 pixels of sprites
        const SHOW_FULL_SPRITES = 0b0000_0100;
        /// Background rendering enabled
        const BACKGROUND_ENABLE = 0b0000_1000;
        /// Sprite rendering enabled
        const SPRITE_ENABLE = 0b0001_0000;
        /// Background color select (color) or intensity (monochrome)
        const BACKGROUND_COLOR = 0b1110_0000;
    }
}

bitflags! {
    /// Status register (`$2002`)
    ///
    /// Sprite overflow and sprite-0 hit are reserved here; this core never sets them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Status: u8 {
        /// Sprite overflow (unimplemented)
        const SPRITE_OVERFLOW = 0b0010_0000;
        /// Sprite 0 hit (unimplemented)
        const SPRITE_ZERO_HIT = 0b0100_0000;
        /// Vertical blank in progress
        const VBLANK = 0b1000_0000;
    }
}

/// Semantic view of control register 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecodedControl1 {
    /// Step added to the VRAM address after each data port access (1 or 32)
    pub auto_increment: u16,
    /// Base address of the sprite pattern table
    pub sprite_pattern_base: u16,
    /// Base address of the background pattern table
    pub background_pattern_base: u16,
    /// 8x16 sprite mode
    pub sprite_8x16: bool,
    /// NMI on VBlank
    pub vblank_nmi_enabled: bool,
}

impl fmt::Display for DecodedControl1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "inc {}, sprite_loc ${:04X}, bg_loc ${:04X}, 8x16 {}, vblank_nmi {}",
            self.auto_increment,
            self.sprite_pattern_base,
            self.background_pattern_base,
            self.sprite_8x16 as u8,
            self.vblank_nmi_enabled as u8
        )
    }
}

/// Semantic view of control register 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecodedControl2 {
    /// Monochrome output
    pub monochrome: bool,
    /// Left 8 background pixels are shown (clipping suppressed)
    pub show_full_background: bool,
    /// Left 8 sprite pixels are shown (clipping suppressed)
    pub show_full_sprites: bool,
    /// Background rendering enabled
    pub background_enabled: bool,
    /// Sprite rendering enabled
    pub sprites_enabled: bool,
    /// Background color (color mode) or intensity (monochrome), 0-7
    pub background_color: u8,
}

impl fmt::Display for DecodedControl2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mono {}, full_bg {}, full_sprites {}, bg_enabled {}, sprites_enabled {}, bg {}",
            self.monochrome as u8,
            self.show_full_background as u8,
            self.show_full_sprites as u8,
            self.background_enabled as u8,
            self.sprites_enabled as u8,
            self.background_color
        )
    }
}

/// The chip's three byte-wide registers
///
/// Any byte is legal input for the control registers, so assignment never fails.
/// Decoding is recomputed from the raw byte on every query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterFile {
    control1: Control1,
    control2: Control2,
    status: Status,
}

impl RegisterFile {
    /// Create a register file with every register cleared
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign control register 1
    pub fn set_control1(&mut self, value: u8) {
        self.control1 = Control1::from_bits_retain(value);
    }

    /// Assign control register 2
    pub fn set_control2(&mut self, value: u8) {
        self.control2 = Control2::from_bits_retain(value);
    }

    /// Raw value of control register 1
    pub fn control1(&self) -> u8 {
        self.control1.bits()
    }

    /// Raw value of control register 2
    pub fn control2(&self) -> u8 {
        self.control2.bits()
    }

    /// Raw value of the status register
    pub fn status(&self) -> u8 {
        self.status.bits()
    }

    pub(super) fn status_flags(&self) -> Status {
        self.status
    }

    pub(super) fn set_status_flag(&mut self, flag: Status, value: bool) {
        self.status.set(flag, value);
    }

    /// Overwrite the raw status register
    pub fn set_status(&mut self, value: u8) {
        self.status = Status::from_bits_retain(value);
    }

    /// Decode control register 1
    pub fn decode_control1(&self) -> DecodedControl1 {
        let c = self.control1;
        DecodedControl1 {
            auto_increment: if c.contains(Control1::INCREMENT_32) {
                32
            } else {
                1
            },
            sprite_pattern_base: if c.contains(Control1::SPRITE_TABLE) {
                0x1000
            } else {
                0x0000
            },
            background_pattern_base: if c.contains(Control1::BACKGROUND_TABLE) {
                0x1000
            } else {
                0x0000
            },
            sprite_8x16: c.contains(Control1::SPRITE_8X16),
            vblank_nmi_enabled: c.contains(Control1::VBLANK_NMI),
        }
    }

    /// Decode control register 2
    pub fn decode_control2(&self) -> DecodedControl2 {
        let c = self.control2;
        DecodedControl2 {
            monochrome: c.contains(Control2::MONOCHROME),
            show_full_background: c.contains(Control2::SHOW_FULL_BACKGROUND),
            show_full_sprites: c.contains(Control2::SHOW_FULL_SPRITES),
            background_enabled: c.contains(Control2::BACKGROUND_ENABLE),
            sprites_enabled: c.contains(Control2::SPRITE_ENABLE),
            background_color: (c & Control2::BACKGROUND_COLOR).bits() >> 5,
        }
    }
}

/// A 16-bit register filled one byte per write
///
/// The toggle starts in the low phase and flips on every write. It has no
/// reset; only another write moves it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitWriteRegister {
    value: u16,
    high_phase: bool,
}

impl SplitWriteRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte into the half selected by the toggle
    pub fn write(&mut self, data: u8) {
        if self.high_phase {
            self.value = ((data as u16) << 8) | (self.value & 0x00FF);
        } else {
            self.value = (data as u16) | (self.value & 0xFF00);
        }
        self.high_phase = !self.high_phase;
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    /// Whether the next write fills the high byte
    pub fn expects_high_byte(&self) -> bool {
        self.high_phase
    }

    pub(super) fn add(&mut self, step: u16) {
        self.value = self.value.wrapping_add(step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control1_decode_defaults() {
        let regs = RegisterFile::new();
        let decoded = regs.decode_control1();
        assert_eq!(decoded.auto_increment, 1);
        assert_eq!(decoded.sprite_pattern_base, 0x0000);
        assert_eq!(decoded.background_pattern_base, 0x0000);
        assert!(!decoded.sprite_8x16);
        assert!(!decoded.vblank_nmi_enabled);
    }

    #[test]
    fn test_control1_decode_all_set() {
        let mut regs = RegisterFile::new();
        regs.set_control1(0xFF);
        let decoded = regs.decode_control1();
        assert_eq!(decoded.auto_increment, 32);
        assert_eq!(decoded.sprite_pattern_base, 0x1000);
        assert_eq!(decoded.background_pattern_base, 0x1000);
        assert!(decoded.sprite_8x16);
        assert!(decoded.vblank_nmi_enabled);
    }

    #[test]
    fn test_control1_keeps_unnamed_bits() {
        let mut regs = RegisterFile::new();
        regs.set_control1(0x43);
        assert_eq!(regs.control1(), 0x43);
    }

    #[test]
    fn test_control2_decode() {
        let mut regs = RegisterFile::new();
        regs.set_control2(0b1011_1010);
        let decoded = regs.decode_control2();
        assert!(!decoded.monochrome);
        assert!(decoded.show_full_background);
        assert!(!decoded.show_full_sprites);
        assert!(decoded.background_enabled);
        assert!(decoded.sprites_enabled);
        assert_eq!(decoded.background_color, 0b101);
    }

    #[test]
    fn test_control2_background_color_range() {
        let mut regs = RegisterFile::new();
        regs.set_control2(0xE0);
        assert_eq!(regs.decode_control2().background_color, 7);
        regs.set_control2(0x1F);
        assert_eq!(regs.decode_control2().background_color, 0);
    }

    #[test]
    fn test_decode_follows_latest_write() {
        let mut regs = RegisterFile::new();
        regs.set_control1(0x04);
        assert_eq!(regs.decode_control1().auto_increment, 32);
        regs.set_control1(0x00);
        assert_eq!(regs.decode_control1().auto_increment, 1);
    }

    #[test]
    fn test_split_write_low_then_high() {
        let mut reg = SplitWriteRegister::new();
        assert!(!reg.expects_high_byte());

        reg.write(0x20);
        assert_eq!(reg.value(), 0x0020);
        assert!(reg.expects_high_byte());

        reg.write(0x10);
        assert_eq!(reg.value(), 0x1020);
        assert!(!reg.expects_high_byte());
    }

    #[test]
    fn test_split_write_preserves_other_half() {
        let mut reg = SplitWriteRegister::new();
        reg.write(0x34);
        reg.write(0x12);

        // Third write lands in the low half again
        reg.write(0xCD);
        assert_eq!(reg.value(), 0x12CD);

        reg.write(0xAB);
        assert_eq!(reg.value(), 0xABCD);
    }

    #[test]
    fn test_display_control1() {
        let mut regs = RegisterFile::new();
        regs.set_control1(0x80);
        assert_eq!(
            regs.decode_control1().to_string(),
            "inc 1, sprite_loc $0000, bg_loc $0000, 8x16 0, vblank_nmi 1"
        );
    }
}
