//! Unit tests for the gamepad report.
//!
//! These tests run on the host (not embedded) and verify the bit
//! layout the host sees.

use super::gamepad::{ButtonReport, GAMEPAD_REPORT_DESCRIPTOR, GAMEPAD_REPORT_SIZE};

#[test]
fn gamepad_report_empty() {
    let report = ButtonReport::empty();
    assert!(report.is_empty());
    assert_eq!(report.buttons, 0);
}

#[test]
fn gamepad_report_set_and_clear() {
    let mut report = ButtonReport::empty();
    report.set(0, true);
    report.set(15, true);
    assert!(report.is_pressed(0));
    assert!(report.is_pressed(15));
    assert_eq!(report.buttons, 0x8001);

    report.set(0, false);
    assert!(!report.is_pressed(0));
    assert_eq!(report.buttons, 0x8000);
}

#[test]
fn gamepad_report_ignores_out_of_range_buttons() {
    let mut report = ButtonReport::empty();
    report.set(16, true);
    assert!(report.is_empty());
    assert!(!report.is_pressed(16));
}

#[test]
fn gamepad_report_serialize_low_byte_first() {
    let mut report = ButtonReport::empty();
    report.set(1, true); // button 2
    report.set(9, true); // button 10

    let mut buf = [0u8; 8];
    let written = report.serialize(&mut buf);
    assert_eq!(written, GAMEPAD_REPORT_SIZE);
    assert_eq!(buf[..2], [0x02, 0x02]);
}

#[test]
fn gamepad_report_serialize_buffer_too_small() {
    let report = ButtonReport::empty();
    let mut small_buf = [0u8; 1];
    assert_eq!(report.serialize(&mut small_buf), 0); // Should fail gracefully
}

#[test]
fn gamepad_descriptor_declares_sixteen_buttons() {
    // Usage Maximum (Button 16) and Report Count (16)
    assert!(GAMEPAD_REPORT_DESCRIPTOR.windows(2).any(|w| w == [0x29, 0x10]));
    assert!(GAMEPAD_REPORT_DESCRIPTOR.windows(2).any(|w| w == [0x95, 0x10]));
    assert_eq!(GAMEPAD_REPORT_DESCRIPTOR.last(), Some(&0xC0));
}
