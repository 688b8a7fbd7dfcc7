//! PPU Initialization Tests
//!
//! Tests for instance creation including:
//! - Supported and unsupported mirroring modes
//! - Raw mirroring codes
//! - Frame buffer ownership

use super::*;
use crate::display::{FrameBuffer, SCREEN_SIZE};

#[test]
fn test_init_initial_state() {
    let (ppu, nmi) = new_ppu();
    assert_eq!(ppu.registers().control1(), 0x00);
    assert_eq!(ppu.registers().control2(), 0x00);
    assert_eq!(ppu.registers().status(), 0x00);
    assert_eq!(ppu.scanline(), 0);
    assert_eq!(ppu.dot(), 0);
    assert_eq!(ppu.vram_address(), 0);
    assert_eq!(ppu.scroll_position(), 0);
    assert!(!ppu.vram_address_expects_high_byte());
    assert!(!ppu.scroll_expects_high_byte());
    assert!(nmi.pending().is_empty());
}

#[test]
fn test_init_records_mirroring() {
    let (ppu, _) = new_ppu_with(Mirroring::Vertical);
    assert_eq!(ppu.mirroring(), Mirroring::Vertical);
}

#[test]
fn test_init_four_screen_fails() {
    let result = Ppu::init(Mirroring::FourScreen, SharedInterruptFlags::new());
    match result {
        Err(e) => {
            assert_eq!(e, PpuError::UnsupportedMirroring(Mirroring::FourScreen));
            assert_ne!(e.code(), 0);
        }
        Ok(_) => panic!("four-screen mirroring should fail init"),
    }
}

#[test]
fn test_mirroring_from_raw_code() {
    assert_eq!(Mirroring::try_from(0), Ok(Mirroring::Horizontal));
    assert_eq!(Mirroring::try_from(1), Ok(Mirroring::Vertical));
    assert_eq!(Mirroring::try_from(2), Ok(Mirroring::FourScreen));

    let err = Mirroring::try_from(0x7F).unwrap_err();
    assert_eq!(err, PpuError::UnknownMirroring(0x7F));
    assert_ne!(err.code(), 0);
    assert_eq!(err.to_string(), "unknown mirror type $7F");
}

#[test]
fn test_error_codes_are_distinct() {
    let codes = [
        PpuError::UnsupportedMirroring(Mirroring::FourScreen).code(),
        PpuError::UnknownMirroring(9).code(),
        PpuError::FramebufferAllocation.code(),
    ];
    assert!(codes.iter().all(|&c| c != 0));
    assert_ne!(codes[0], codes[1]);
    assert_ne!(codes[1], codes[2]);
    assert_ne!(codes[0], codes[2]);
}

#[test]
fn test_headless_init_owns_frame_buffer() {
    let (ppu, _) = new_ppu();
    assert!(!ppu.is_presentation_backed());
    assert_eq!(ppu.frame_snapshot().len(), SCREEN_SIZE);
}

#[test]
fn test_init_with_surface_shares_buffer() {
    let surface = FrameBuffer::try_new_shared().expect("allocation");
    surface.borrow_mut().set_pixel(3, 4, 0x2A);

    let ppu = Ppu::init_with_surface(
        Mirroring::Horizontal,
        SharedInterruptFlags::new(),
        surface.clone(),
    )
    .expect("PPU init should succeed");

    assert!(ppu.is_presentation_backed());
    assert_eq!(ppu.with_frame(|fb| fb.get_pixel(3, 4)), 0x2A);
}

#[test]
fn test_independent_instances() {
    let (mut a, _) = new_ppu();
    let (b, _) = new_ppu();

    a.write(PPUCTRL, 0x80);
    a.vram_mut().write(0x2000, 0x55);

    assert_eq!(b.registers().control1(), 0x00);
    assert_eq!(b.vram().read(0x2000), 0x00);
}
