//! USB HID gamepad report - 16 buttons, no axes.
//!
//! Layout (2 bytes):
//! ```text
//! Byte 0: Buttons 1-8   (bit 0 = button 1)
//! Byte 1: Buttons 9-16  (bit 0 = button 9)
//! ```
//!
//! A channel's output index `n` is HID button `n + 1`.

use crate::config::BUTTON_COUNT;

/// Gamepad report size in bytes.
pub const GAMEPAD_REPORT_SIZE: usize = 2;

const _: () = assert!(BUTTON_COUNT <= GAMEPAD_REPORT_SIZE * 8);

/// Button states as seen by the host.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonReport {
    /// Button bitfield (bit n = output index n).
    pub buttons: u16,
}

impl ButtonReport {
    /// All buttons released.
    pub const fn empty() -> Self {
        Self { buttons: 0 }
    }

    /// Set or clear one button. Indices past the report are ignored.
    pub fn set(&mut self, index: usize, pressed: bool) {
        if index >= BUTTON_COUNT {
            return;
        }
        if pressed {
            self.buttons |= 1 << index;
        } else {
            self.buttons &= !(1 << index);
        }
    }

    pub fn is_pressed(&self, index: usize) -> bool {
        index < BUTTON_COUNT && self.buttons & (1 << index) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.buttons == 0
    }

    /// Serialise into a byte slice for USB HID transmission.
    /// Returns the number of bytes written (0 if `buf` is too small).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < GAMEPAD_REPORT_SIZE {
            return 0;
        }
        buf[..GAMEPAD_REPORT_SIZE].copy_from_slice(&self.buttons.to_le_bytes());
        GAMEPAD_REPORT_SIZE
    }
}

// USB HID report descriptor for a button-only gamepad

/// USB HID Report Descriptor for the selector.
///
/// This descriptor tells the USB host that we are a gamepad with:
///   - 16 buttons, one bit each (input)
///   - no axes, no output report
pub const GAMEPAD_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Game Pad)
    0xA1, 0x01, // Collection (Application)
    //
    //   - Buttons (16 bits) -
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x10, //   Usage Maximum (Button 16)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x10, //   Report Count (16)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];
