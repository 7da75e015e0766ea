//! nRF52840 board support shared by both firmware binaries.
//!
//! - **USB**: composite-free HID gamepad on the built-in USBD
//! - **Strip**: WS2812 pixels driven by a PWM sequence
//!
//! Key pins and the TWI peripheral are bound in the binaries, since the
//! master runs TWIM (controller) and the slave runs TWIS (target).

pub mod strip;
pub mod usb;
