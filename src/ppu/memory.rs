// PPU address space: pattern tables, name tables and palette RAM

use super::constants::{
    NAMETABLE_MEMORY_SIZE, NAMETABLE_SIZE, NAMETABLE_SLOTS, NAMETABLE_START, PALETTE_MASK,
    PALETTE_SIZE, PALETTE_START, PATTERN_MEMORY_SIZE, PPU_ADDRESS_MASK,
};
use super::PpuError;
use serde::{Deserialize, Serialize};

/// Name table mirroring mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mirroring {
    /// $2000=$2400, $2800=$2C00
    Horizontal,
    /// $2000=$2800, $2400=$2C00
    Vertical,
    /// Four name tables backed by cartridge VRAM (not supported by this core)
    FourScreen,
}

impl Mirroring {
    /// Physical 1KB region used by each logical slot
    fn slot_regions(self) -> Result<[usize; NAMETABLE_SLOTS], PpuError> {
        match self {
            Mirroring::Horizontal => Ok([0, 0, 1, 1]),
            Mirroring::Vertical => Ok([0, 1, 0, 1]),
            Mirroring::FourScreen => Err(PpuError::UnsupportedMirroring(self)),
        }
    }
}

impl TryFrom<u8> for Mirroring {
    type Error = PpuError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Mirroring::Horizontal),
            1 => Ok(Mirroring::Vertical),
            2 => Ok(Mirroring::FourScreen),
            other => Err(PpuError::UnknownMirroring(other)),
        }
    }
}

/// The PPU's 14-bit address space
///
/// Name table mirroring is an offset table into a single 2KB buffer, wired
/// once at construction.
#[derive(Clone)]
pub struct Vram {
    /// Pattern tables $0000-$1FFF
    patterns: Box<[u8; PATTERN_MEMORY_SIZE]>,
    /// Physical name table RAM
    nametables: [u8; NAMETABLE_MEMORY_SIZE],
    /// Byte offset of the physical region behind each logical slot
    nametable_map: [usize; NAMETABLE_SLOTS],
    /// Image and sprite palettes
    palette: [u8; PALETTE_SIZE],
    mirroring: Mirroring,
}

impl Vram {
    /// Create zeroed memory wired for `mirroring`
    ///
    /// # Errors
    ///
    /// Fails with [`PpuError::UnsupportedMirroring`] for four-screen mirroring.
    pub fn new(mirroring: Mirroring) -> Result<Self, PpuError> {
        let regions = mirroring.slot_regions()?;
        Ok(Vram {
            patterns: Box::new([0; PATTERN_MEMORY_SIZE]),
            nametables: [0; NAMETABLE_MEMORY_SIZE],
            nametable_map: regions.map(|region| region * NAMETABLE_SIZE),
            palette: [0; PALETTE_SIZE],
            mirroring,
        })
    }

    /// Fold any 16-bit address into the 14-bit PPU address space
    #[inline]
    pub fn normalize(addr: u16) -> u16 {
        addr & PPU_ADDRESS_MASK
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    /// Physical byte offset behind the name table slot containing `addr`
    ///
    /// Only the slot bits (`---- XX-- ---- ----`) take part; the low 10 bits
    /// of the address are not added, so every address in a slot resolves to
    /// the base byte of its region.
    pub fn nametable_offset(&self, addr: u16) -> usize {
        let slot = ((addr >> 10) & 0x3) as usize;
        self.nametable_map[slot]
    }

    /// Read a byte from PPU memory
    pub fn read(&self, addr: u16) -> u8 {
        let addr = Self::normalize(addr);

        if addr < NAMETABLE_START {
            self.patterns[addr as usize]
        } else if addr < PALETTE_START {
            self.nametables[self.nametable_offset(addr)]
        } else {
            self.palette[(addr & PALETTE_MASK) as usize]
        }
    }

    /// Write a byte to PPU memory
    pub fn write(&mut self, addr: u16, data: u8) {
        let addr = Self::normalize(addr);

        if addr < NAMETABLE_START {
            self.patterns[addr as usize] = data;
        } else if addr < PALETTE_START {
            let offset = self.nametable_offset(addr);
            self.nametables[offset] = data;
        } else {
            self.palette[(addr & PALETTE_MASK) as usize] = data;
        }
    }

    /// Copy pattern data (e.g. CHR from a cartridge) into $0000 onwards
    ///
    /// Data beyond 8KB is ignored. Returns the number of bytes copied.
    pub fn load_patterns(&mut self, data: &[u8]) -> usize {
        let len = data.len().min(PATTERN_MEMORY_SIZE);
        self.patterns[..len].copy_from_slice(&data[..len]);
        len
    }

    pub fn pattern_memory(&self) -> &[u8] {
        &self.patterns[..]
    }

    pub fn nametable_memory(&self) -> &[u8] {
        &self.nametables
    }

    pub fn palette_memory(&self) -> &[u8] {
        &self.palette
    }
}

impl std::fmt::Debug for Vram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vram")
            .field("mirroring", &self.mirroring)
            .field("nametable_map", &self.nametable_map)
            .field("palette", &self.palette)
            .finish_non_exhaustive()
    }
}
