//! Application-wide constants and compile-time configuration.
//!
//! All channel assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

use crate::channel::{Category, Channel, ChannelSet};
use crate::latch::{CommitPolicy, Policy, ToggleMode};

// Inputs

/// Momentary inputs wired to the master node.
pub const LOCAL_CHANNEL_COUNT: usize = 5;

/// Momentary inputs digitized by the slave node.
pub const REMOTE_CHANNEL_COUNT: usize = 11;

/// Size of the unified HID button space (one button per channel).
pub const BUTTON_COUNT: usize = 16;

/// Pixels on the status strip.
pub const LED_COUNT: usize = 16;

// Remote link (I²C)

/// 7-bit I²C address the slave answers on.
pub const REMOTE_I2C_ADDR: u8 = 0x08;

/// Upper bound on one remote fetch (ms). A slower fetch is a stale cycle.
pub const REMOTE_FETCH_TIMEOUT_MS: u64 = 50;

// Timing

/// Master polling period (ms).
pub const POLL_INTERVAL_MS: u64 = 10;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "latchpad";
pub const USB_PRODUCT: &str = "Latchpad Selector";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 1;

// LED strip

/// Global brightness scale applied before the frame goes out (0-255).
pub const LED_BRIGHTNESS: u8 = 64;

// GPIO pin assignments (nRF52840 boards, both nodes)
//
// These are logical names; actual `embassy_nrf::peripherals::*` are
// bound in `main.rs` / `bin/slave.rs`.  Adjust for your custom PCB.
//
//   Master
//     Local inputs 0..5  → P0.02, P0.03, P0.28, P0.29, P0.30 (active-low, pull-up)
//     I²C SDA / SCL      → P0.26 / P0.27
//     WS2812 data        → P0.13
//   Slave
//     Inputs 0..11       → P0.02 P0.03 P0.04 P0.05 P0.28 P0.29 P0.30 P0.31
//                          P1.11 P1.12 P1.13 (active-low, pull-up)
//     I²C SDA / SCL      → P0.26 / P0.27

// Channel table
//
// Output index doubles as the HID button number (button 1 = index 0).
// LED indices follow the physical strip order, which runs across the
// master's keys first and then the slave's.

const CHANNEL_TABLE: &[Channel] = &[
    // Master
    Channel::local("H1", 0, Category::Height, 10, 0),
    Channel::local("H2", 1, Category::Height, 11, 1),
    Channel::local("H3", 2, Category::Height, 12, 2),
    Channel::local("P1", 3, Category::Location, 13, 3),
    Channel::local("P2", 4, Category::Location, 14, 4),
    // Slave
    Channel::remote("A1", 0, Category::Location, 0, 5),
    Channel::remote("A2", 1, Category::Location, 1, 6),
    Channel::remote("A3", 2, Category::Location, 2, 7),
    Channel::remote("A4", 3, Category::Location, 3, 8),
    Channel::remote("B1", 4, Category::Location, 4, 9),
    Channel::remote("B2", 5, Category::Location, 5, 10),
    Channel::remote("B3", 6, Category::Location, 6, 11),
    Channel::remote("B4", 7, Category::Location, 7, 12),
    Channel::remote("H4", 8, Category::Height, 8, 13),
    Channel::remote("H5", 9, Category::Height, 9, 14),
    Channel::remote("HOP", 10, Category::Toggle, 15, 15),
];

/// Every channel of both nodes.
pub const CHANNELS: ChannelSet<'static> = ChannelSet::new(CHANNEL_TABLE);

// The deployed table is checked at build time as well as at startup.
const _: () = match CHANNELS.validate::<LOCAL_CHANNEL_COUNT, REMOTE_CHANNEL_COUNT>() {
    Ok(()) => (),
    Err(_) => panic!("invalid channel table"),
};

/// Selection policy the firmware ships with.
pub const POLICY: Policy = Policy {
    toggle: ToggleMode::Flip,
    commit: CommitPolicy::EveryCycle,
    clear_remote: false,
};
