//! Pin names from configuration
//!
//! Lets pin assignments come from text instead of hard-coded numbers.

use unoport_hal::Direction;

use crate::mapping::{pin_at, PinId, Port, PIN_COUNT, PIN_OFFSET_C};

/// Number of analog header pins (A0..A5)
const ANALOG_PIN_COUNT: u8 = PIN_COUNT - PIN_OFFSET_C;

/// A parsed pin name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSpec {
    pub id: PinId,
    /// `^` prefix: enable the internal pull-up when used as input
    pub pull_up: bool,
}

impl PinSpec {
    /// Direction to acquire the pin with when it is used as an input
    pub fn input_direction(self) -> Direction {
        if self.pull_up {
            Direction::InputPullUp
        } else {
            Direction::Input
        }
    }
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "8" or "D8" -> pin 8
/// - "A0" -> pin 14 (analog header, used as digital)
/// - "PB0" -> pin 8 (port and bit)
/// - "^D13" -> pin 13 with pull-up
pub fn parse_pin_string(s: &str) -> Option<PinSpec> {
    let s = s.trim();

    let (s, pull_up) = match s.strip_prefix('^') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let mut chars = s.chars();
    let id = match chars.next()?.to_ascii_uppercase() {
        'P' => {
            let port = Port::from_char(chars.next()?)?;
            let bit: u8 = chars.as_str().parse().ok()?;
            pin_at(port, bit)?
        }
        'D' => chars.as_str().parse().ok()?,
        'A' => {
            let n: u8 = chars.as_str().parse().ok()?;
            if n >= ANALOG_PIN_COUNT {
                return None;
            }
            PIN_OFFSET_C + n
        }
        c if c.is_ascii_digit() => s.parse().ok()?,
        _ => return None,
    };

    if id >= PIN_COUNT {
        return None;
    }

    Some(PinSpec { id, pull_up })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Option<PinId> {
        parse_pin_string(s).map(|spec| spec.id)
    }

    #[test]
    fn test_parse_pin_string() {
        assert_eq!(id("8"), Some(8));
        assert_eq!(id("D8"), Some(8));
        assert_eq!(id("d13"), Some(13));
        assert_eq!(id("A0"), Some(14));
        assert_eq!(id("A5"), Some(19));
        assert_eq!(id("PB0"), Some(8));
        assert_eq!(id("pd7"), Some(7));
        assert_eq!(id("PC5"), Some(19));
        assert_eq!(id("  D2 "), Some(2));

        // Invalid
        assert_eq!(id("20"), None);
        assert_eq!(id("D20"), None);
        assert_eq!(id("A6"), None);
        assert_eq!(id("PB6"), None);
        assert_eq!(id("PA0"), None);
        assert_eq!(id("pin8"), None);
        assert_eq!(id("D-1"), None);
        assert_eq!(id(""), None);
        assert_eq!(id("^"), None);
    }

    #[test]
    fn test_pull_up_prefix() {
        let spec = parse_pin_string("^D13").unwrap();
        assert_eq!(spec, PinSpec { id: 13, pull_up: true });
        assert_eq!(spec.input_direction(), Direction::InputPullUp);

        let spec = parse_pin_string("A1").unwrap();
        assert!(!spec.pull_up);
        assert_eq!(spec.input_direction(), Direction::Input);
    }
}
