//! Pin handles
//!
//! A [`Gpio`] is the only way to touch a pin's registers. It is created by
//! [`PinManager::acquire`](crate::PinManager::acquire) and consumed by
//! [`PinManager::release`](crate::PinManager::release), so a released pin
//! can never be used again.

use core::convert::Infallible;

use unoport_hal::{DigitalPin, Direction};

use crate::mapping::{PinId, Port, PortMapping};
use crate::ports::PortAccess;

/// An acquired pin
///
/// Write and toggle are gated on the direction register: on an input they
/// do nothing.
#[derive(Debug)]
#[must_use = "the pin stays reserved until it is released through its manager"]
pub struct Gpio<P: PortAccess> {
    ports: P,
    mapping: PortMapping,
    id: PinId,
}

impl<P: PortAccess> Gpio<P> {
    /// Program the registers for `direction` and wrap the pin
    pub(crate) fn configure(ports: P, id: PinId, mapping: PortMapping, direction: Direction) -> Self {
        let mask = mapping.mask();

        match direction {
            Direction::InputPullUp => {
                ports.clear_bits(mapping.direction(), mask);
                ports.set_bits(mapping.output(), mask);
            }
            Direction::Output => {
                // Low before enabling the driver so the line never glitches high
                ports.clear_bits(mapping.output(), mask);
                ports.set_bits(mapping.direction(), mask);
            }
            Direction::Input => {
                ports.clear_bits(mapping.direction(), mask);
                ports.clear_bits(mapping.output(), mask);
            }
        }

        Self { ports, mapping, id }
    }

    /// Return the pin to input without pull-up and give back its number
    pub(crate) fn reset(self) -> PinId {
        let mask = self.mapping.mask();
        self.ports.clear_bits(self.mapping.direction(), mask);
        self.ports.clear_bits(self.mapping.output(), mask);
        self.id
    }

    /// Logical pin number
    pub fn id(&self) -> PinId {
        self.id
    }

    /// Port the pin belongs to
    pub fn port(&self) -> Port {
        self.mapping.port
    }

    /// Bit offset within the port
    pub fn bit(&self) -> u8 {
        self.mapping.bit
    }

    /// Port and bit as one value
    pub fn mapping(&self) -> PortMapping {
        self.mapping
    }

    /// Current direction, derived from `DDRx` and `PORTx`
    pub fn direction(&self) -> Direction {
        let mask = self.mapping.mask();
        if self.ports.bits_set(self.mapping.direction(), mask) {
            Direction::Output
        } else if self.ports.bits_set(self.mapping.output(), mask) {
            Direction::InputPullUp
        } else {
            Direction::Input
        }
    }

    /// Level the pin is driving (the `PORTx` bit)
    pub fn driven_level(&self) -> bool {
        self.ports.bits_set(self.mapping.output(), self.mapping.mask())
    }
}

impl<P: PortAccess> DigitalPin for Gpio<P> {
    fn read(&self) -> bool {
        self.ports.bits_set(self.mapping.input(), self.mapping.mask())
    }

    fn write(&mut self, high: bool) {
        if !self.is_output() {
            return;
        }
        let mask = self.mapping.mask();
        if high {
            self.ports.set_bits(self.mapping.output(), mask);
        } else {
            self.ports.clear_bits(self.mapping.output(), mask);
        }
    }

    fn toggle(&mut self) {
        if !self.is_output() {
            return;
        }
        self.ports.toggle_output(&self.mapping);
    }

    fn is_output(&self) -> bool {
        self.ports.bits_set(self.mapping.direction(), self.mapping.mask())
    }
}

impl<P: PortAccess> embedded_hal::digital::ErrorType for Gpio<P> {
    type Error = Infallible;
}

impl<P: PortAccess> embedded_hal::digital::OutputPin for Gpio<P> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        DigitalPin::write(self, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        DigitalPin::write(self, true);
        Ok(())
    }
}

impl<P: PortAccess> embedded_hal::digital::StatefulOutputPin for Gpio<P> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.driven_level())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.driven_level())
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        DigitalPin::toggle(self);
        Ok(())
    }
}

impl<P: PortAccess> embedded_hal::digital::InputPin for Gpio<P> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(DigitalPin::read(self))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!DigitalPin::read(self))
    }
}
