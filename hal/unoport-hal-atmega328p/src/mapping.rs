//! Pin number to port register mapping
//!
//! The ATmega328P exposes three 8-bit I/O ports. The Arduino Uno numbers
//! its pins linearly across them:
//!
//! ```text
//!  pin   0 ..  7  ->  PORTD0 .. PORTD7
//!  pin   8 .. 13  ->  PORTB0 .. PORTB5
//!  pin  14 .. 19  ->  PORTC0 .. PORTC5   (A0 .. A5)
//! ```
//!
//! Each port has three registers: `PINx`, `DDRx` and `PORTx`. Their
//! addresses come from the device PAC; here a register is only named by
//! port and kind.

/// Logical pin number (Arduino Uno numbering)
pub type PinId = u8;

/// Number of addressable pins
pub const PIN_COUNT: u8 = 20;

/// First pin on port D (pin 5 = PORTD5)
pub const PIN_OFFSET_D: u8 = 0;
/// First pin on port B (pin 9 = PORTB1)
pub const PIN_OFFSET_B: u8 = 8;
/// First pin on port C (pin 14 = PORTC0)
pub const PIN_OFFSET_C: u8 = 14;

/// Half-open pin ranges per port, in ascending pin order
pub const PIN_RANGES: [(Port, u8, u8); 3] = [
    (Port::D, PIN_OFFSET_D, PIN_OFFSET_B),
    (Port::B, PIN_OFFSET_B, PIN_OFFSET_C),
    (Port::C, PIN_OFFSET_C, PIN_COUNT),
];

// The ranges must cover 0..PIN_COUNT exactly once and fit in 8-bit ports.
const _: () = assert!(ranges_partition(&PIN_RANGES, PIN_COUNT));

const fn ranges_partition(ranges: &[(Port, u8, u8)], count: u8) -> bool {
    let mut next = 0;
    let mut i = 0;
    while i < ranges.len() {
        let (_, start, end) = ranges[i];
        if start != next || end <= start || end - start > 8 {
            return false;
        }
        next = end;
        i += 1;
    }
    next == count
}

/// Physical I/O port (register group)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    B,
    C,
    D,
}

impl Port {
    /// Index of the port in a three-entry register file
    pub const fn index(self) -> usize {
        match self {
            Port::B => 0,
            Port::C => 1,
            Port::D => 2,
        }
    }

    /// First pin number mapped onto this port
    pub const fn pin_offset(self) -> u8 {
        match self {
            Port::B => PIN_OFFSET_B,
            Port::C => PIN_OFFSET_C,
            Port::D => PIN_OFFSET_D,
        }
    }

    /// Parse a port letter (`'B'`, `'c'`, ...)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'B' => Some(Port::B),
            'C' => Some(Port::C),
            'D' => Some(Port::D),
            _ => None,
        }
    }
}

/// Which of a port's three registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterKind {
    /// `PINx` - input levels; writing 1 toggles the `PORTx` bit
    Input,
    /// `DDRx` - data direction (1 = output)
    Direction,
    /// `PORTx` - output level, or pull-up enable for inputs
    Output,
}

/// A single 8-bit port register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Register {
    pub port: Port,
    pub kind: RegisterKind,
}

impl Register {
    pub const fn new(port: Port, kind: RegisterKind) -> Self {
        Self { port, kind }
    }
}

/// Resolved location of a pin: its port and bit offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortMapping {
    pub port: Port,
    pub bit: u8,
}

impl PortMapping {
    /// `DDRx` for this pin's port
    pub const fn direction(&self) -> Register {
        Register::new(self.port, RegisterKind::Direction)
    }

    /// `PORTx` for this pin's port
    pub const fn output(&self) -> Register {
        Register::new(self.port, RegisterKind::Output)
    }

    /// `PINx` for this pin's port
    pub const fn input(&self) -> Register {
        Register::new(self.port, RegisterKind::Input)
    }

    /// Single-bit mask selecting this pin within its port registers
    pub const fn mask(&self) -> u8 {
        1 << self.bit
    }

    /// Logical pin number for this location
    pub const fn pin_id(&self) -> PinId {
        self.port.pin_offset() + self.bit
    }
}

/// Resolve a pin number to its port and bit
///
/// Returns `None` for pins outside `0..PIN_COUNT`. Pure; touches no
/// hardware.
pub const fn resolve(id: PinId) -> Option<PortMapping> {
    let mut i = 0;
    while i < PIN_RANGES.len() {
        let (port, start, end) = PIN_RANGES[i];
        if id >= start && id < end {
            return Some(PortMapping {
                port,
                bit: id - start,
            });
        }
        i += 1;
    }
    None
}

/// Inverse of [`resolve`]: pin number for a port bit, if the board exposes it
pub fn pin_at(port: Port, bit: u8) -> Option<PinId> {
    let id = port.pin_offset().checked_add(bit)?;
    match resolve(id) {
        Some(mapping) if mapping.port == port => Some(id),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_every_pin() {
        // (pin, port, bit) for the whole board
        let expected = [
            (0, Port::D, 0),
            (1, Port::D, 1),
            (2, Port::D, 2),
            (3, Port::D, 3),
            (4, Port::D, 4),
            (5, Port::D, 5),
            (6, Port::D, 6),
            (7, Port::D, 7),
            (8, Port::B, 0),
            (9, Port::B, 1),
            (10, Port::B, 2),
            (11, Port::B, 3),
            (12, Port::B, 4),
            (13, Port::B, 5),
            (14, Port::C, 0),
            (15, Port::C, 1),
            (16, Port::C, 2),
            (17, Port::C, 3),
            (18, Port::C, 4),
            (19, Port::C, 5),
        ];
        assert_eq!(expected.len(), PIN_COUNT as usize);

        for (id, port, bit) in expected {
            let mapping = resolve(id).unwrap();
            assert_eq!(mapping, PortMapping { port, bit }, "pin {}", id);
            assert_eq!(mapping.pin_id(), id);
        }
    }

    #[test]
    fn test_each_pin_in_exactly_one_range() {
        for id in 0..PIN_COUNT {
            let hits = PIN_RANGES
                .iter()
                .filter(|(_, start, end)| (*start..*end).contains(&id))
                .count();
            assert_eq!(hits, 1, "pin {}", id);
        }
    }

    #[test]
    fn test_resolve_out_of_range() {
        for id in PIN_COUNT..=u8::MAX {
            assert_eq!(resolve(id), None);
        }
    }

    #[test]
    fn test_mapping_registers() {
        let mapping = resolve(13).unwrap();
        assert_eq!(mapping.direction(), Register::new(Port::B, RegisterKind::Direction));
        assert_eq!(mapping.output(), Register::new(Port::B, RegisterKind::Output));
        assert_eq!(mapping.input(), Register::new(Port::B, RegisterKind::Input));
        assert_eq!(mapping.mask(), 0b0010_0000);
    }

    #[test]
    fn test_pin_at() {
        assert_eq!(pin_at(Port::B, 0), Some(8));
        assert_eq!(pin_at(Port::D, 7), Some(7));
        assert_eq!(pin_at(Port::C, 5), Some(19));

        // PB6/PB7 carry the crystal, PC6 is reset
        assert_eq!(pin_at(Port::B, 6), None);
        assert_eq!(pin_at(Port::C, 6), None);
        assert_eq!(pin_at(Port::D, 8), None);
    }

    #[test]
    fn test_partition_check_rejects_gaps_and_overlaps() {
        let gap = [(Port::D, 0, 8), (Port::B, 9, 14), (Port::C, 14, 20)];
        let overlap = [(Port::D, 0, 8), (Port::B, 7, 14), (Port::C, 14, 20)];
        let short = [(Port::D, 0, 8), (Port::B, 8, 14), (Port::C, 14, 19)];
        let wide = [(Port::D, 0, 9), (Port::B, 9, 14), (Port::C, 14, 20)];

        assert!(ranges_partition(&PIN_RANGES, PIN_COUNT));
        assert!(!ranges_partition(&gap, PIN_COUNT));
        assert!(!ranges_partition(&overlap, PIN_COUNT));
        assert!(!ranges_partition(&short, PIN_COUNT));
        assert!(!ranges_partition(&wide, PIN_COUNT));
    }
}
