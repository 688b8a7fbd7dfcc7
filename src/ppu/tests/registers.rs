//! PPU Register Tests
//!
//! Tests for the register file as seen through the ports:
//! - Control register assignment and decoding
//! - Status register read side effects
//! - Register mirroring across $2000-$3FFF

use super::*;

// Control Register Tests
// ========================================

#[test]
fn test_write_ppuctrl() {
    let (mut ppu, _) = new_ppu();
    ppu.write(PPUCTRL, 0x80);
    assert_eq!(ppu.registers().control1(), 0x80);
    assert!(ppu.registers().decode_control1().vblank_nmi_enabled);
}

#[test]
fn test_write_ppumask() {
    let (mut ppu, _) = new_ppu();
    ppu.write(PPUMASK, 0x1E);
    assert_eq!(ppu.registers().control2(), 0x1E);

    let decoded = ppu.registers().decode_control2();
    assert!(decoded.show_full_background);
    assert!(decoded.show_full_sprites);
    assert!(decoded.background_enabled);
    assert!(decoded.sprites_enabled);
    assert!(!decoded.monochrome);
}

#[test]
fn test_control_write_is_plain_assignment() {
    let (mut ppu, _) = new_ppu();
    for value in [0x00u8, 0xFF, 0x5A, 0xA5] {
        ppu.write_port(0, value);
        ppu.write_port(1, !value);
        assert_eq!(ppu.registers().control1(), value);
        assert_eq!(ppu.registers().control2(), !value);
    }
}

#[test]
fn test_pattern_table_bases() {
    let (mut ppu, _) = new_ppu();
    ppu.write(PPUCTRL, 0x18);
    let decoded = ppu.registers().decode_control1();
    assert_eq!(decoded.sprite_pattern_base, 0x1000);
    assert_eq!(decoded.background_pattern_base, 0x1000);

    ppu.write(PPUCTRL, 0x08);
    let decoded = ppu.registers().decode_control1();
    assert_eq!(decoded.sprite_pattern_base, 0x1000);
    assert_eq!(decoded.background_pattern_base, 0x0000);
}

// ========================================
// Status Register Tests
// ========================================

#[test]
fn test_read_ppustatus_clears_vblank() {
    let (mut ppu, _) = new_ppu();
    ppu.registers.set_status(0x80);

    let status = ppu.read(PPUSTATUS);
    assert_eq!(status, 0x80, "first read sees VBlank");

    let status = ppu.read(PPUSTATUS);
    assert_eq!(status, 0x00, "second read sees it cleared");
}

#[test]
fn test_read_ppustatus_keeps_other_bits() {
    let (mut ppu, _) = new_ppu();
    ppu.registers.set_status(0xE0);

    assert_eq!(ppu.read(PPUSTATUS), 0xE0);
    assert_eq!(ppu.read(PPUSTATUS), 0x60);
    assert_eq!(ppu.read(PPUSTATUS), 0x60);
}

#[test]
fn test_read_ppustatus_without_vblank_is_stable() {
    let (mut ppu, _) = new_ppu();
    ppu.registers.set_status(0x40);

    assert_eq!(ppu.read(PPUSTATUS), 0x40);
    assert_eq!(ppu.registers().status(), 0x40);
}

#[test]
fn test_status_read_does_not_reset_toggles() {
    let (mut ppu, _) = new_ppu();
    ppu.write(PPUADDR, 0x20);
    ppu.registers.set_status(0x80);
    ppu.read(PPUSTATUS);

    assert!(ppu.vram_address_expects_high_byte());
}

// ========================================
// Register Mirroring Tests
// ========================================

#[test]
fn test_register_mirroring() {
    let (mut ppu, _) = new_ppu();

    // $2008 mirrors $2000
    ppu.write(0x2008, 0x04);
    assert_eq!(ppu.registers().control1(), 0x04);

    // $3FF9 mirrors $2001
    ppu.write(0x3FF9, 0x08);
    assert_eq!(ppu.registers().control2(), 0x08);

    // $3FFA mirrors $2002
    ppu.registers.set_status(0x80);
    assert_eq!(ppu.read(0x3FFA), 0x80);
    assert_eq!(ppu.registers().status(), 0x00);
}

#[test]
fn test_bus_and_port_paths_agree() {
    let (mut a, _) = new_ppu();
    let (mut b, _) = new_ppu();

    for (port, value) in [(0u8, 0x04u8), (6, 0x00), (6, 0x21), (7, 0x99), (5, 0x12)] {
        a.write_port(port, value);
        b.write(0x2000 + port as u16, value);
    }

    assert_eq!(a.registers(), b.registers());
    assert_eq!(a.vram_address(), b.vram_address());
    assert_eq!(a.scroll_position(), b.scroll_position());
    assert_eq!(a.vram().read(0x2100), b.vram().read(0x2100));
}
