//! Pin acquisition errors

use core::fmt;

/// Errors returned when a pin cannot be acquired
///
/// Only acquisition can fail. Operations on an acquired pin degrade to
/// silent no-ops instead of returning errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin is already owned by a live handle
    PinUnavailable,
    /// Pin number outside the valid range, or no register mapping for it
    InvalidPin,
    /// No room left to store the handle
    AllocationFailure,
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinError::PinUnavailable => f.write_str("pin already reserved"),
            PinError::InvalidPin => f.write_str("invalid pin number"),
            PinError::AllocationFailure => f.write_str("no storage for pin handle"),
        }
    }
}

impl core::error::Error for PinError {}

impl embedded_hal::digital::Error for PinError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}
