//! Unified error types for latchpad.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging.

/// Top-level error type used by the board layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The channel table is inconsistent.
    Config(ConfigError),

    // USB
    /// Writing the HID report to the host failed.
    Usb,

    // LED strip
    /// The PWM sequence for the LED strip could not be started.
    Led,
}

/// Channel table problems, detected before the polling loop starts.
///
/// Channel positions refer to the table the set was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// More channels than a `ChannelId` can address.
    TooManyChannels,
    /// Snapshot index beyond the width of the channel's source.
    InputOutOfRange { channel: u8 },
    /// HID button index beyond the report.
    OutputOutOfRange { channel: u8 },
    /// Pixel index beyond the strip.
    LedOutOfRange { channel: u8 },
    /// Two channels read the same input of the same source.
    DuplicateInput { first: u8, second: u8 },
    /// Two channels drive the same HID button.
    DuplicateOutput { first: u8, second: u8 },
    /// Two channels drive the same pixel.
    DuplicateLed { first: u8, second: u8 },
    /// Only one hopper flag exists, so only one channel may toggle it.
    MultipleToggles { channel: u8 },
}

/// Why a remote transfer failed.
///
/// Never fatal: a failed fetch makes the cycle stale and a failed command
/// is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// No answer within the fetch deadline.
    Timeout,
    /// The slave did not acknowledge its address.
    Nack,
    /// Any other bus fault (arbitration, overrun, ...).
    Bus,
}

// Convenience conversions

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}
