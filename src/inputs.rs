//! Key sampling for either node.
//!
//! Keys are switch-to-ground with the pin's pull-up enabled, so a pressed
//! key reads low. [`InputBank::sample`] reads every pin once and returns a
//! positive-logic [`Snapshot`]. A pin that fails to read counts as released.

use embedded_hal::digital::InputPin;

use crate::snapshot::Snapshot;

/// Fixed set of key pins, in snapshot order.
pub struct InputBank<P, const N: usize> {
    pins: [P; N],
}

impl<P: InputPin, const N: usize> InputBank<P, N> {
    pub fn new(pins: [P; N]) -> Self {
        Self { pins }
    }

    /// Read all pins back to back.
    pub fn sample(&mut self) -> Snapshot<N> {
        let mut high = [true; N];
        for (level, pin) in high.iter_mut().zip(self.pins.iter_mut()) {
            *level = pin.is_high().unwrap_or(true);
        }
        Snapshot::from_active_low(high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    struct FixedPin(bool);

    impl ErrorType for FixedPin {
        type Error = Infallible;
    }

    impl InputPin for FixedPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.0)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.0)
        }
    }

    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = ErrorKind;
    }

    impl InputPin for BrokenPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Err(ErrorKind::Other)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    #[test]
    fn low_pin_reads_pressed() {
        let mut bank = InputBank::new([FixedPin(true), FixedPin(false), FixedPin(true)]);
        assert_eq!(bank.sample(), Snapshot::new([false, true, false]));
    }

    #[test]
    fn unreadable_pin_reads_released() {
        let mut bank = InputBank::new([BrokenPin, BrokenPin]);
        assert_eq!(bank.sample(), Snapshot::released());
    }
}
