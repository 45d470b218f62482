//! unoport Hardware Abstraction Layer
//!
//! This crate defines the board-agnostic half of the pin manager: the
//! direction a pin is configured for, the digital I/O trait every pin handle
//! implements, and the error returned when a pin cannot be acquired.
//! Chip-specific crates (currently `unoport-hal-atmega328p`) provide the
//! register mapping and the handles themselves.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (unoport-firmware, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  unoport-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!         ┌───────────────────────┐
//!         │ unoport-hal-atmega328p│
//!         └───────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::DigitalPin`] - Direction-gated read/write/toggle

#![no_std]
#![deny(unsafe_code)]

pub mod error;
pub mod gpio;

// Re-export key types at crate root for convenience
pub use error::PinError;
pub use gpio::{DigitalPin, Direction};
