// Debug module - inspection helpers for the PPU core
//
// Snapshots are taken through side-effect-free accessors only, so tooling
// never disturbs the emulated program's view of the registers.

pub mod ppu;

pub use ppu::PpuState;
