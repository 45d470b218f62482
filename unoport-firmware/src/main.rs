//! unoport demo firmware
//!
//! Lights the LED on pin 8 while the button on pin 13 is pressed. The
//! button switches to ground, so it is read through the internal pull-up
//! and reads low when pressed.

#![no_std]
#![no_main]

use panic_halt as _;

use unoport_hal::{DigitalPin, Direction};
use unoport_hal_atmega328p::{Atmega328pPorts, PinManager};

/// LED pin (PORTB0)
const LED_PIN: u8 = 8;
/// Button pin (PORTB5)
const BUTTON_PIN: u8 = 13;

#[avr_device::entry]
fn main() -> ! {
    let Some(ports) = Atmega328pPorts::take() else {
        panic!("port registers already taken");
    };
    let mut pins = PinManager::new(ports);

    // A pin that could not be acquired stays `None`: writes to it are
    // dropped, and a missing button counts as never pressed
    let mut led = pins.acquire(LED_PIN, Direction::Output).ok();
    let button = pins.acquire(BUTTON_PIN, Direction::InputPullUp).ok();

    loop {
        led.write(button.as_ref().is_some_and(|b| b.is_low()));
    }
}
