//! Pin reservation registry
//!
//! Tracks which pins are owned by a live handle. One bit per pin; a set bit
//! means reserved.

use crate::mapping::{PinId, PIN_COUNT};

/// Pin reservation registry
///
/// Starts with every pin free. Out-of-range pins are never free and are
/// ignored by [`reserve`](Self::reserve) and [`release`](Self::release).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinRegistry {
    /// Bitmask of reserved pins
    reserved: u32,
}

// Every pin must have a bit in the mask
const _: () = assert!(PIN_COUNT as u32 <= u32::BITS);

impl PinRegistry {
    /// Create a registry with all pins free
    pub const fn new() -> Self {
        Self { reserved: 0 }
    }

    fn mask(id: PinId) -> Option<u32> {
        if id < PIN_COUNT {
            Some(1 << id)
        } else {
            None
        }
    }

    /// Check if a pin can be acquired
    ///
    /// Fails closed: returns false for reserved pins and for pins outside
    /// the valid range.
    pub fn is_free(&self, id: PinId) -> bool {
        Self::mask(id).is_some_and(|mask| self.reserved & mask == 0)
    }

    /// Check if a pin is currently reserved
    pub fn is_reserved(&self, id: PinId) -> bool {
        Self::mask(id).is_some_and(|mask| self.reserved & mask != 0)
    }

    /// Mark a pin reserved
    ///
    /// Callers check [`is_free`](Self::is_free) first. Reserving twice
    /// leaves the registry unchanged.
    pub fn reserve(&mut self, id: PinId) {
        if let Some(mask) = Self::mask(id) {
            self.reserved |= mask;
        }
    }

    /// Mark a pin free
    pub fn release(&mut self, id: PinId) {
        if let Some(mask) = Self::mask(id) {
            self.reserved &= !mask;
        }
    }

    /// Get the number of reserved pins
    pub fn reserved_count(&self) -> usize {
        self.reserved.count_ones() as usize
    }

    /// Iterate over reserved pin numbers in ascending order
    pub fn iter_reserved(&self) -> impl Iterator<Item = PinId> + '_ {
        (0..PIN_COUNT).filter(move |&id| self.is_reserved(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry() {
        let mut registry = PinRegistry::new();

        assert!(registry.is_free(11));
        registry.reserve(11);
        assert!(!registry.is_free(11));
        assert!(registry.is_reserved(11));

        // Other pins unaffected
        assert!(registry.is_free(12));

        // Release and re-check
        registry.release(11);
        assert!(registry.is_free(11));
        assert_eq!(registry.reserved_count(), 0);
    }

    #[test]
    fn test_starts_all_free() {
        let registry = PinRegistry::default();
        for id in 0..PIN_COUNT {
            assert!(registry.is_free(id), "pin {}", id);
        }
        assert_eq!(registry.iter_reserved().count(), 0);
    }

    #[test]
    fn test_out_of_range_fails_closed() {
        let mut registry = PinRegistry::new();

        assert!(!registry.is_free(PIN_COUNT));
        assert!(!registry.is_free(u8::MAX));

        // Ignored rather than wrapping into a valid bit
        registry.reserve(PIN_COUNT);
        registry.reserve(32);
        assert_eq!(registry, PinRegistry::new());

        registry.release(200);
        assert_eq!(registry, PinRegistry::new());
        assert!(!registry.is_reserved(PIN_COUNT));
    }

    #[test]
    fn test_reserve_is_idempotent() {
        let mut registry = PinRegistry::new();

        registry.reserve(3);
        let once = registry.clone();
        registry.reserve(3);
        assert_eq!(registry, once);
        assert_eq!(registry.reserved_count(), 1);

        registry.release(3);
        registry.release(3);
        assert!(registry.is_free(3));
    }

    #[test]
    fn test_iter_reserved() {
        let mut registry = PinRegistry::new();
        registry.reserve(19);
        registry.reserve(0);
        registry.reserve(8);

        let mut reserved = [0u8; 3];
        for (slot, id) in reserved.iter_mut().zip(registry.iter_reserved()) {
            *slot = id;
        }
        assert_eq!(reserved, [0, 8, 19]);
        assert_eq!(registry.reserved_count(), 3);
    }
}
