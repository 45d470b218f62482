//! Pin manager
//!
//! Hands out [`Gpio`] handles and keeps the reservation registry in step
//! with them. A pin is reserved exactly while a handle for it is alive.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::Vec;
use unoport_hal::{Direction, PinError};

use crate::mapping::{resolve, PinId, PIN_COUNT};
use crate::pin::Gpio;
use crate::ports::PortAccess;
use crate::registry::PinRegistry;

/// Owner of the port registers and the reservation registry
///
/// Single-context use. Wrap it in a [`SharedPinManager`] when pins are
/// acquired from more than one execution context.
#[derive(Debug)]
pub struct PinManager<P> {
    ports: P,
    registry: PinRegistry,
}

impl<P: PortAccess + Clone> PinManager<P> {
    /// Create a manager with every pin free
    pub const fn new(ports: P) -> Self {
        Self {
            ports,
            registry: PinRegistry::new(),
        }
    }

    /// Check if a pin can be acquired
    pub fn is_free(&self, id: PinId) -> bool {
        self.registry.is_free(id)
    }

    /// Reservation state of every pin
    pub fn registry(&self) -> &PinRegistry {
        &self.registry
    }

    /// Register backend shared with the handles
    pub fn ports(&self) -> &P {
        &self.ports
    }

    /// Acquire a pin and configure its direction
    ///
    /// Outputs start low. Fails with [`PinError::InvalidPin`] for numbers
    /// outside `0..PIN_COUNT` and [`PinError::PinUnavailable`] if the pin
    /// is already held.
    pub fn acquire(&mut self, id: PinId, direction: Direction) -> Result<Gpio<P>, PinError> {
        if id >= PIN_COUNT {
            #[cfg(feature = "defmt")]
            defmt::warn!("pin {=u8} out of range", id);
            return Err(PinError::InvalidPin);
        }
        if !self.registry.is_free(id) {
            #[cfg(feature = "defmt")]
            defmt::warn!("pin {=u8} already reserved", id);
            return Err(PinError::PinUnavailable);
        }

        // In range but unmapped means the mapping table is inconsistent
        let mapping = resolve(id).ok_or(PinError::InvalidPin)?;

        let gpio = Gpio::configure(self.ports.clone(), id, mapping, direction);
        self.registry.reserve(id);

        #[cfg(feature = "defmt")]
        defmt::debug!("pin {=u8} acquired as {}", id, direction);

        Ok(gpio)
    }

    /// Acquire several pins at once
    ///
    /// All or nothing: if any pin fails, or more than `N` are requested
    /// ([`PinError::AllocationFailure`]), every pin acquired by this call
    /// is released again.
    pub fn acquire_all<const N: usize>(
        &mut self,
        requests: &[(PinId, Direction)],
    ) -> Result<Vec<Gpio<P>, N>, PinError> {
        let mut pins: Vec<Gpio<P>, N> = Vec::new();

        for &(id, direction) in requests {
            let result = self.acquire(id, direction).and_then(|gpio| {
                pins.push(gpio).map_err(|gpio| {
                    self.release(gpio);
                    PinError::AllocationFailure
                })
            });

            if let Err(e) = result {
                while let Some(gpio) = pins.pop() {
                    self.release(gpio);
                }
                return Err(e);
            }
        }

        Ok(pins)
    }

    /// Release a pin
    ///
    /// Returns the pin to input without pull-up and frees it for the next
    /// [`acquire`](Self::acquire).
    pub fn release(&mut self, gpio: Gpio<P>) {
        let id = gpio.reset();
        self.registry.release(id);

        #[cfg(feature = "defmt")]
        defmt::debug!("pin {=u8} released", id);
    }

    /// Release the pin held in `slot`, if any, leaving `None` behind
    pub fn release_slot(&mut self, slot: &mut Option<Gpio<P>>) {
        if let Some(gpio) = slot.take() {
            self.release(gpio);
        }
    }
}

/// Pin manager shared between execution contexts
///
/// Every call runs inside a critical section, so the free check and the
/// reservation in [`acquire`](Self::acquire) cannot interleave with another
/// acquire of the same pin.
pub struct SharedPinManager<P> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<PinManager<P>>>,
}

impl<P: PortAccess + Clone> SharedPinManager<P> {
    pub const fn new(ports: P) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(PinManager::new(ports))),
        }
    }

    /// Run `f` with exclusive access to the manager
    pub fn with<R>(&self, f: impl FnOnce(&mut PinManager<P>) -> R) -> R {
        self.inner.lock(|manager| f(&mut manager.borrow_mut()))
    }

    pub fn is_free(&self, id: PinId) -> bool {
        self.with(|manager| manager.is_free(id))
    }

    pub fn acquire(&self, id: PinId, direction: Direction) -> Result<Gpio<P>, PinError> {
        self.with(|manager| manager.acquire(id, direction))
    }

    pub fn release(&self, gpio: Gpio<P>) {
        self.with(|manager| manager.release(gpio))
    }

    pub fn release_slot(&self, slot: &mut Option<Gpio<P>>) {
        self.with(|manager| manager.release_slot(slot))
    }
}
