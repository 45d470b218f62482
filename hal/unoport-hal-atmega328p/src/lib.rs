//! ATmega328P pin manager for unoport
//!
//! Exposes the Arduino Uno's 20 digital pins as direction-aware handles and
//! tracks which pins are owned, so no two handles ever control the same
//! physical pin.
//!
//! # Usage
//!
//! ```ignore
//! let ports = Atmega328pPorts::take().unwrap();
//! let mut pins = PinManager::new(ports);
//!
//! let mut led = pins.acquire(8, Direction::Output)?;
//! let button = pins.acquire(13, Direction::InputPullUp)?;
//! led.write(button.is_low());
//!
//! pins.release(button);
//!
//! pins.release(led);
//! ```
//!
//! # Features
//!
//! - `defmt` - Enable debug formatting support and acquire/release logging
//! - `sim` - Build the RAM register model (`SimulatedPorts`) for host tests

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod manager;
pub mod mapping;
#[cfg(target_arch = "avr")]
pub mod mmio;
pub mod pin;
pub mod ports;
pub mod registry;
#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use config::{parse_pin_string, PinSpec};
pub use manager::{PinManager, SharedPinManager};
pub use mapping::{resolve, PinId, Port, PortMapping, Register, RegisterKind, PIN_COUNT};
#[cfg(target_arch = "avr")]
pub use mmio::Atmega328pPorts;
pub use pin::Gpio;
pub use ports::PortAccess;
pub use registry::PinRegistry;
#[cfg(any(test, feature = "sim"))]
pub use sim::SimulatedPorts;

// Re-export shared types from unoport-hal
pub use unoport_hal::{DigitalPin, Direction, PinError};
