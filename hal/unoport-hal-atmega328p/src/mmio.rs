//! Port registers through the ATmega328P PAC
//!
//! Only built for the AVR target. Host code uses
//! [`SimulatedPorts`](crate::sim::SimulatedPorts) instead.

use avr_device::atmega328p::{Peripherals, PORTB, PORTC, PORTD};

use crate::mapping::{Port, Register, RegisterKind};
use crate::ports::PortAccess;

/// The ATmega328P I/O ports B, C and D
///
/// Built by consuming the PAC's port peripherals, so at most one exists
/// per program. Clones share the same hardware and are handed to pin
/// handles by the manager.
#[derive(Debug, Clone)]
pub struct Atmega328pPorts {
    _private: (),
}

impl Atmega328pPorts {
    /// Take ownership of the port peripherals
    pub fn new(_portb: PORTB, _portc: PORTC, _portd: PORTD) -> Self {
        Self { _private: () }
    }

    /// Claim the device peripherals and keep the ports
    ///
    /// Returns `None` if the peripherals were already taken.
    pub fn take() -> Option<Self> {
        let dp = Peripherals::take()?;
        Some(Self::new(dp.PORTB, dp.PORTC, dp.PORTD))
    }
}

impl PortAccess for Atmega328pPorts {
    #[inline]
    fn read(&self, reg: Register) -> u8 {
        // SAFETY: the ports were moved into `Self::new`; the PAC pointers
        // stay valid for the whole program.
        unsafe {
            match (reg.port, reg.kind) {
                (Port::B, RegisterKind::Input) => (*PORTB::ptr()).pinb().read().bits(),
                (Port::B, RegisterKind::Direction) => (*PORTB::ptr()).ddrb().read().bits(),
                (Port::B, RegisterKind::Output) => (*PORTB::ptr()).portb().read().bits(),
                (Port::C, RegisterKind::Input) => (*PORTC::ptr()).pinc().read().bits(),
                (Port::C, RegisterKind::Direction) => (*PORTC::ptr()).ddrc().read().bits(),
                (Port::C, RegisterKind::Output) => (*PORTC::ptr()).portc().read().bits(),
                (Port::D, RegisterKind::Input) => (*PORTD::ptr()).pind().read().bits(),
                (Port::D, RegisterKind::Direction) => (*PORTD::ptr()).ddrd().read().bits(),
                (Port::D, RegisterKind::Output) => (*PORTD::ptr()).portd().read().bits(),
            }
        }
    }

    #[inline]
    fn write(&self, reg: Register, value: u8) {
        // SAFETY: see `read`; every bit pattern is valid for these registers
        unsafe {
            match (reg.port, reg.kind) {
                (Port::B, RegisterKind::Input) => (*PORTB::ptr()).pinb().write(|w| w.bits(value)),
                (Port::B, RegisterKind::Direction) => (*PORTB::ptr()).ddrb().write(|w| w.bits(value)),
                (Port::B, RegisterKind::Output) => (*PORTB::ptr()).portb().write(|w| w.bits(value)),
                (Port::C, RegisterKind::Input) => (*PORTC::ptr()).pinc().write(|w| w.bits(value)),
                (Port::C, RegisterKind::Direction) => (*PORTC::ptr()).ddrc().write(|w| w.bits(value)),
                (Port::C, RegisterKind::Output) => (*PORTC::ptr()).portc().write(|w| w.bits(value)),
                (Port::D, RegisterKind::Input) => (*PORTD::ptr()).pind().write(|w| w.bits(value)),
                (Port::D, RegisterKind::Direction) => (*PORTD::ptr()).ddrd().write(|w| w.bits(value)),
                (Port::D, RegisterKind::Output) => (*PORTD::ptr()).portd().write(|w| w.bits(value)),
            };
        }
    }
}
