//! Selection logic and wire formats for the latchpad button controller.
//!
//! Two nRF52840 nodes make up one controller:
//!
//! ```text
//!   [ Slave: 11 keys ] --I²C (2-byte snapshot)--> [ Master: 5 keys ]
//!                      <--(clear commands)-----        |        |
//!                                                  USB HID   WS2812 strip
//! ```
//!
//! The master merges both key sets into one latched selection (a
//! location, a height and the hopper flag) and reports it to the host.
//!
//! Everything outside `board` is pure logic that runs on the host:
//!
//! Usage: `cargo test` (host), `cargo build --release --features embedded
//! --target thumbv7em-none-eabihf` (firmware).

#![cfg_attr(not(test), no_std)]

mod log;

// ═══════════════════════════════════════════════════════════════════════════
// Core: classification, latch, projection
// ═══════════════════════════════════════════════════════════════════════════

pub mod channel;
pub mod config;
pub mod controller;
pub mod latch;
pub mod project;
pub mod snapshot;

// ═══════════════════════════════════════════════════════════════════════════
// Wire formats and output encodings
// ═══════════════════════════════════════════════════════════════════════════

pub mod command;
pub mod error;
pub mod hid;
pub mod led;
pub mod link;
pub mod inputs;

// ═══════════════════════════════════════════════════════════════════════════
// Board support (nRF52840 + Embassy), firmware builds only
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(feature = "embedded")]
pub mod board;

pub use channel::{Category, Channel, ChannelId, ChannelSet, Source};
pub use controller::{Controller, CycleOutput};
pub use error::{ConfigError, Error, FetchError};
pub use latch::{CommitPolicy, Latch, Policy, ToggleMode};
pub use snapshot::Snapshot;
