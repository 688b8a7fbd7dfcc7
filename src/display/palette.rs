// System palette - RGB values for the 64 colors the chip can output
//
// Palette RAM holds 6-bit indices into this table. Entries $xE/$xF are
// unused and render as black.

/// Master palette in 0xRRGGBB form
pub const SYSTEM_PALETTE: [u32; 64] = [
    // $00-$0F
    0x545454, 0x001E74, 0x081090, 0x300088, 0x440064, 0x5C0030, 0x540400, 0x3C1800,
    0x202A00, 0x083A00, 0x004000, 0x003C00, 0x00323C, 0x000000, 0x000000, 0x000000,
    // $10-$1F
    0x989698, 0x084CC4, 0x3032EC, 0x5C1EE4, 0x8814B0, 0xA01464, 0x982220, 0x783C00,
    0x545A00, 0x287200, 0x087C00, 0x007628, 0x006678, 0x000000, 0x000000, 0x000000,
    // $20-$2F
    0xECEEEC, 0x4C9AEC, 0x787CEC, 0xB062EC, 0xE454EC, 0xEC58B4, 0xEC6A64, 0xD48820,
    0xA0AA00, 0x74C400, 0x4CD020, 0x38CC6C, 0x38B4CC, 0x3C3C3C, 0x000000, 0x000000,
    // $30-$3F
    0xECEEEC, 0xA8CCEC, 0xBCBCEC, 0xD4B2EC, 0xECAEEC, 0xECAED4, 0xECB4B0, 0xE4C490,
    0xCCD278, 0xB4DE78, 0xA8E290, 0x98E2B4, 0xA0D6E4, 0xA0A2A0, 0x000000, 0x000000,
];

/// Look up a palette index (masked to 6 bits)
#[inline]
pub fn palette_to_rgb(index: u8) -> u32 {
    SYSTEM_PALETTE[(index & 0x3F) as usize]
}

/// Split a palette index into `[R, G, B]` bytes
#[inline]
pub fn palette_to_rgb_bytes(index: u8) -> [u8; 3] {
    let rgb = palette_to_rgb(index);
    [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8]
}
