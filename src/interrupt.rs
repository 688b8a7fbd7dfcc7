// Interrupt line between the PPU and the CPU
//
// The PPU only ever asserts interrupts. Acknowledging (clearing) them is the
// CPU side's job.

use bitflags::bitflags;
use std::cell::Cell;
use std::rc::Rc;

bitflags! {
    /// Pending interrupt requests
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InterruptFlags: u8 {
        /// Non-maskable interrupt (VBlank)
        const NMI = 0b0000_0001;
        /// Maskable interrupt request
        const IRQ = 0b0000_0010;
    }
}

/// Capability to raise interrupts on the CPU
pub trait InterruptLine {
    /// OR `flags` into the pending set. Must never clear anything.
    fn request(&self, flags: InterruptFlags);
}

/// Interrupt flags shared between the PPU and the CPU
///
/// Clones share the same underlying register. The CPU keeps one clone and
/// polls/acknowledges it; the PPU gets another as its [`InterruptLine`].
#[derive(Debug, Clone, Default)]
pub struct SharedInterruptFlags {
    flags: Rc<Cell<InterruptFlags>>,
}

impl SharedInterruptFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently pending interrupts
    pub fn pending(&self) -> InterruptFlags {
        self.flags.get()
    }

    /// Whether an NMI is pending
    pub fn nmi_pending(&self) -> bool {
        self.pending().contains(InterruptFlags::NMI)
    }

    /// Acknowledge `flags` (CPU side only)
    pub fn clear(&self, flags: InterruptFlags) {
        self.flags.set(self.flags.get() - flags);
    }

    /// Return and acknowledge everything pending
    pub fn take(&self) -> InterruptFlags {
        self.flags.replace(InterruptFlags::empty())
    }
}

impl InterruptLine for SharedInterruptFlags {
    fn request(&self, flags: InterruptFlags) {
        self.flags.set(self.flags.get() | flags);
    }
}
