//! GPIO pin abstractions
//!
//! Provides the direction type and the digital I/O trait implemented by
//! chip-specific pin handles.

/// Data direction of a pin
///
/// The direction is programmed into hardware when a pin is acquired and is
/// not cached by the handle; chip crates re-derive it from the direction
/// register whenever they need it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Input with the internal pull-up disabled (floating)
    #[default]
    Input,
    /// Input with the internal pull-up enabled
    InputPullUp,
    /// Push-pull output, starts low
    Output,
}

impl Direction {
    /// Whether this direction drives the line
    pub fn is_output(self) -> bool {
        matches!(self, Direction::Output)
    }

    /// Whether this direction enables the internal pull-up
    pub fn is_pull_up(self) -> bool {
        matches!(self, Direction::InputPullUp)
    }
}

/// Direction-gated digital pin
///
/// None of these operations can fail. Implementations must treat misuse as
/// a silent no-op:
/// - [`write`](DigitalPin::write) and [`toggle`](DigitalPin::toggle) do
///   nothing unless the pin is configured as an output
/// - [`read`](DigitalPin::read) never touches a register other than the
///   input register
///
/// An absent handle (`Option::None`) also implements this trait: it reads
/// low and ignores writes and toggles.
pub trait DigitalPin {
    /// Read the line level (true = high)
    ///
    /// Valid in every direction. Reading an output echoes its driven level.
    fn read(&self) -> bool;

    /// Drive the line to `high`, if configured as output
    fn write(&mut self, high: bool);

    /// Invert the driven level, if configured as output
    fn toggle(&mut self);

    /// Check whether the pin is currently configured as output
    fn is_output(&self) -> bool;

    /// Drive the line high, if configured as output
    fn set_high(&mut self) {
        self.write(true);
    }

    /// Drive the line low, if configured as output
    fn set_low(&mut self) {
        self.write(false);
    }

    /// Check if the line reads low
    fn is_low(&self) -> bool {
        !self.read()
    }
}

impl<T: DigitalPin> DigitalPin for Option<T> {
    fn read(&self) -> bool {
        self.as_ref().is_some_and(|pin| pin.read())
    }

    fn write(&mut self, high: bool) {
        if let Some(pin) = self {
            pin.write(high);
        }
    }

    fn toggle(&mut self) {
        if let Some(pin) = self {
            pin.toggle();
        }
    }

    fn is_output(&self) -> bool {
        self.as_ref().is_some_and(|pin| pin.is_output())
    }
}
