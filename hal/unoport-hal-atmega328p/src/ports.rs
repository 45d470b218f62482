//! Port register access
//!
//! [`PortAccess`] is the seam between pin handles and the registers they
//! drive. `Atmega328pPorts` talks to the real registers through the device
//! PAC; `SimulatedPorts` models them in RAM for host tests.

use crate::mapping::{PortMapping, Register};

/// Byte-wide access to the port registers
///
/// Only [`read`](Self::read) and [`write`](Self::write) are required. The
/// read-modify-write helpers run inside a critical section so an interrupt
/// handler touching the same port cannot lose an update.
pub trait PortAccess {
    /// Read a register
    fn read(&self, reg: Register) -> u8;

    /// Write a register
    fn write(&self, reg: Register, value: u8);

    /// Read, transform and write back a register as one indivisible step
    fn modify<F: FnOnce(u8) -> u8>(&self, reg: Register, f: F) {
        critical_section::with(|_| {
            let value = self.read(reg);
            self.write(reg, f(value));
        });
    }

    /// Set the bits in `mask`, leaving the others untouched
    fn set_bits(&self, reg: Register, mask: u8) {
        self.modify(reg, |value| value | mask);
    }

    /// Clear the bits in `mask`, leaving the others untouched
    fn clear_bits(&self, reg: Register, mask: u8) {
        self.modify(reg, |value| value & !mask);
    }

    /// Check whether any bit in `mask` is set
    fn bits_set(&self, reg: Register, mask: u8) -> bool {
        self.read(reg) & mask != 0
    }

    /// Invert the `PORTx` bit of an output pin
    ///
    /// AVR toggles `PORTxn` in hardware when a 1 is written to `PINxn`, so
    /// the default writes the pin's mask (and nothing else) to `PINx`.
    /// Backends without that idiom override this with an atomic
    /// alternative.
    fn toggle_output(&self, mapping: &PortMapping) {
        self.write(mapping.input(), mapping.mask());
    }
}

impl<T: PortAccess> PortAccess for &T {
    fn read(&self, reg: Register) -> u8 {
        T::read(self, reg)
    }

    fn write(&self, reg: Register, value: u8) {
        T::write(self, reg, value)
    }

    fn modify<F: FnOnce(u8) -> u8>(&self, reg: Register, f: F) {
        T::modify(self, reg, f)
    }

    fn toggle_output(&self, mapping: &PortMapping) {
        T::toggle_output(self, mapping)
    }
}
