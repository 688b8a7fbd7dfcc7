// CPU-visible port interface ($2000-$2007)

use super::constants::{LOG_READ_SENTINEL, PORT_COUNT, PORT_MASK};
use super::registers::Status;
use super::Ppu;
use crate::bus::MemoryMappedDevice;
use tracing::{debug, trace, warn};

impl Ppu {
    /// Read from a PPU port
    ///
    /// # Arguments
    ///
    /// * `port` - The port number (0-7)
    ///
    /// # Port Behaviors
    ///
    /// - Status (2): returns the status register; if VBlank was set the
    ///   returned value still has it, and the register is cleared afterwards
    /// - Data (7): read-ahead buffering is not implemented, returns 0
    /// - Anything else: invalid, returns 0
    pub fn read_port(&mut self, port: u8) -> u8 {
        match port {
            2 => {
                let status = self.registers.status();
                trace!("PPU status read ${:02X}", status);

                if self.registers.status_flags().contains(Status::VBLANK) {
                    self.registers.set_status_flag(Status::VBLANK, false);
                }

                status
            }
            7 => {
                debug!("PPU data port read is not implemented");
                0
            }
            _ => {
                warn!(port, "PPU port read is invalid");
                0
            }
        }
    }

    /// Trace-only port read
    ///
    /// Always returns `$FF` and never touches any state, so tracing tools can
    /// print register values without the side effects of [`Ppu::read_port`].
    pub fn read_port_for_log(&self, _port: u8) -> u8 {
        LOG_READ_SENTINEL
    }

    /// Write to a PPU port
    ///
    /// # Arguments
    ///
    /// * `port` - The port number (0-7)
    /// * `data` - The value to write
    ///
    /// # Port Behaviors
    ///
    /// - Control 1 (0) / Control 2 (1): plain assignment
    /// - 2, 3, 4: OAM ports, not implemented, ignored
    /// - Scroll (5) / VRAM address (6): two writes, low byte first, each
    ///   with its own toggle
    /// - Data (7): writes at the VRAM address, then advances it by 1 or 32
    pub fn write_port(&mut self, port: u8, data: u8) {
        match port {
            0 => {
                self.registers.set_control1(data);
                debug!("ppu control_1: {}", self.registers.decode_control1());
            }
            1 => {
                self.registers.set_control2(data);
                debug!("ppu control_2: {}", self.registers.decode_control2());
            }
            2..=4 => {
                warn!(port, value = data, "PPU port write is not implemented");
            }
            5 => {
                self.scroll.write(data);
                trace!(
                    "PPU scroll write ${:02X} (scroll position = ${:04X})",
                    data,
                    self.scroll.value()
                );
            }
            6 => {
                self.vram_addr.write(data);
                trace!(
                    "PPU address write ${:02X} (vram address = ${:04X})",
                    data,
                    self.vram_addr.value()
                );
            }
            7 => {
                self.vram.write(self.vram_addr.value(), data);
                let step = self.registers.decode_control1().auto_increment;
                self.vram_addr.add(step);
            }
            _ => {
                warn!(port, ports = PORT_COUNT, "PPU port write is invalid");
            }
        }
    }
}

impl MemoryMappedDevice for Ppu {
    /// `addr` is any CPU address in $2000-$3FFF; registers repeat every 8 bytes
    fn read(&mut self, addr: u16) -> u8 {
        self.read_port((addr & PORT_MASK) as u8)
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.write_port((addr & PORT_MASK) as u8, data)
    }
}
