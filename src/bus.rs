// Bus module - CPU-side view of memory-mapped devices
//
// ```text
// $2000-$2007: PPU Registers
// $2008-$3FFF: Mirrors of PPU Registers (repeating every 8 bytes)
// ```

use std::ops::RangeInclusive;

/// CPU addresses routed to the PPU's register window
pub const PPU_REGISTER_RANGE: RangeInclusive<u16> = 0x2000..=0x3FFF;

/// Trait for memory-mapped components
///
/// This trait defines the interface for components that can be mapped into the
/// CPU's address space. Components implementing this trait can handle read and
/// write operations for their specific memory ranges.
pub trait MemoryMappedDevice {
    /// Read a byte from the device
    ///
    /// Some devices have side effects on read (e.g., the PPU status register
    /// clears VBlank), so this method takes &mut self.
    ///
    /// # Arguments
    /// * `addr` - The address to read from (device-specific addressing)
    ///
    /// # Returns
    /// The byte value at the specified address
    fn read(&mut self, addr: u16) -> u8;

    /// Write a byte to the device
    ///
    /// # Arguments
    /// * `addr` - The address to write to (device-specific addressing)
    /// * `data` - The byte value to write
    fn write(&mut self, addr: u16, data: u8);
}
