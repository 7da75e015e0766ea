//! HID report types sent to the host.

pub mod gamepad;

#[cfg(test)]
mod tests;

pub use gamepad::{ButtonReport, GAMEPAD_REPORT_DESCRIPTOR, GAMEPAD_REPORT_SIZE};
