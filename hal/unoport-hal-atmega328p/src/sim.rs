//! Simulated port registers
//!
//! RAM-backed stand-in for the three ATmega328P ports, used to run the pin
//! manager on the host.
//!
//! Line model for the level read back from `PINx`, per bit:
//! - output (`DDRx` set): the `PORTx` bit
//! - input driven externally (see [`SimulatedPorts::drive`]): that level
//! - input left open: the `PORTx` bit, i.e. high with the pull-up enabled
//!   and low without it (a floating line is modelled as reading low)

use core::cell::Cell;

use crate::mapping::{resolve, PinId, Port, PortMapping, Register, RegisterKind};
use crate::ports::PortAccess;

#[derive(Debug, Default)]
struct PortState {
    ddr: Cell<u8>,
    port: Cell<u8>,
    /// Bits held by something outside the chip
    driven: Cell<u8>,
    /// Level of the driven bits
    driven_level: Cell<u8>,
}

impl PortState {
    fn input_levels(&self) -> u8 {
        let ddr = self.ddr.get();
        let port = self.port.get();
        let driven = self.driven.get();

        (ddr & port) | (!ddr & driven & self.driven_level.get()) | (!ddr & !driven & port)
    }
}

/// Simulated ATmega328P ports B, C and D
#[derive(Debug)]
pub struct SimulatedPorts {
    ports: [PortState; 3],
    /// Whether writing 1 to `PINxn` toggles `PORTxn`
    pin_write_toggles: bool,
    last_input_write: Cell<Option<(Port, u8)>>,
}

impl Default for SimulatedPorts {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedPorts {
    /// Ports with the AVR `PINx` write-to-toggle behaviour
    pub fn new() -> Self {
        Self {
            ports: Default::default(),
            pin_write_toggles: true,
            last_input_write: Cell::new(None),
        }
    }

    /// Ports for a device whose input register is read-only
    ///
    /// Writes to `PINx` are dropped, and toggling falls back to a
    /// read-modify-write of `PORTx` inside a critical section.
    pub fn without_pin_toggle() -> Self {
        Self {
            pin_write_toggles: false,
            ..Self::new()
        }
    }

    fn state(&self, port: Port) -> &PortState {
        &self.ports[port.index()]
    }

    /// Hold a line at `high` from outside the chip
    ///
    /// Only affects what the pin reads while it is an input. Unknown pins
    /// are ignored.
    pub fn drive(&self, id: PinId, high: bool) {
        let Some(mapping) = resolve(id) else {
            return;
        };
        let state = self.state(mapping.port);
        let mask = mapping.mask();

        state.driven.set(state.driven.get() | mask);
        if high {
            state.driven_level.set(state.driven_level.get() | mask);
        } else {
            state.driven_level.set(state.driven_level.get() & !mask);
        }
    }

    /// Stop driving a line externally
    pub fn disconnect(&self, id: PinId) {
        if let Some(mapping) = resolve(id) {
            let state = self.state(mapping.port);
            state.driven.set(state.driven.get() & !mapping.mask());
        }
    }

    /// Port and value of the most recent write to a `PINx` register
    pub fn last_input_write(&self) -> Option<(Port, u8)> {
        self.last_input_write.get()
    }
}

impl PortAccess for SimulatedPorts {
    fn read(&self, reg: Register) -> u8 {
        let state = self.state(reg.port);
        match reg.kind {
            RegisterKind::Input => state.input_levels(),
            RegisterKind::Direction => state.ddr.get(),
            RegisterKind::Output => state.port.get(),
        }
    }

    fn write(&self, reg: Register, value: u8) {
        let state = self.state(reg.port);
        match reg.kind {
            RegisterKind::Input => {
                self.last_input_write.set(Some((reg.port, value)));
                if self.pin_write_toggles {
                    state.port.set(state.port.get() ^ value);
                }
            }
            RegisterKind::Direction => state.ddr.set(value),
            RegisterKind::Output => state.port.set(value),
        }
    }

    fn toggle_output(&self, mapping: &PortMapping) {
        if self.pin_write_toggles {
            self.write(mapping.input(), mapping.mask());
        } else {
            let mask = mapping.mask();
            self.modify(mapping.output(), |value| value ^ mask);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PORTB: Register = Register::new(Port::B, RegisterKind::Output);
    const DDRB: Register = Register::new(Port::B, RegisterKind::Direction);
    const PINB: Register = Register::new(Port::B, RegisterKind::Input);

    #[test]
    fn test_starts_cleared() {
        let sim = SimulatedPorts::new();
        for port in [Port::B, Port::C, Port::D] {
            for kind in [RegisterKind::Input, RegisterKind::Direction, RegisterKind::Output] {
                assert_eq!(sim.read(Register::new(port, kind)), 0);
            }
        }
        assert_eq!(sim.last_input_write(), None);
    }

    #[test]
    fn test_output_echoes_port() {
        let sim = SimulatedPorts::new();
        sim.write(DDRB, 0b0000_0001);
        sim.write(PORTB, 0b0000_0001);

        // Outputs ignore external drivers
        sim.drive(8, false);
        assert_eq!(sim.read(PINB) & 1, 1);
    }

    #[test]
    fn test_input_levels() {
        let sim = SimulatedPorts::new();

        // Floating input reads low, pull-up reads high
        assert_eq!(sim.read(PINB) & 1, 0);
        sim.write(PORTB, 0b0000_0001);
        assert_eq!(sim.read(PINB) & 1, 1);

        // External driver overrides the pull-up
        sim.drive(8, false);
        assert_eq!(sim.read(PINB) & 1, 0);
        sim.disconnect(8);
        assert_eq!(sim.read(PINB) & 1, 1);
    }

    #[test]
    fn test_pin_write_toggles_port() {
        let sim = SimulatedPorts::new();
        sim.write(PORTB, 0b1000_0001);
        sim.write(PINB, 0b0000_0011);

        assert_eq!(sim.read(PORTB), 0b1000_0010);
        assert_eq!(sim.last_input_write(), Some((Port::B, 0b0000_0011)));
    }

    #[test]
    fn test_read_only_pin_register() {
        let sim = SimulatedPorts::without_pin_toggle();
        sim.write(PORTB, 0b0000_0001);
        sim.write(PINB, 0b0000_0001);
        assert_eq!(sim.read(PORTB), 0b0000_0001);

        let mapping = resolve(8).unwrap();
        sim.toggle_output(&mapping);
        assert_eq!(sim.read(PORTB), 0);
    }

    #[test]
    fn test_drive_unknown_pin_ignored() {
        let sim = SimulatedPorts::new();
        sim.drive(42, true);
        sim.disconnect(42);
        assert_eq!(sim.read(PINB), 0);
    }
}
