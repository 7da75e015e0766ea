//! USB HID gamepad - reports the latched selection to the host.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes one HID endpoint. The polling loop never writes
//! to the endpoint directly: it publishes the latest report through a
//! [`Signal`] and a dedicated task forwards it, so a slow or suspended
//! host cannot stall a poll cycle.

use crate::config;
use crate::error::Error;
use crate::hid::{ButtonReport, GAMEPAD_REPORT_DESCRIPTOR, GAMEPAD_REPORT_SIZE};
use defmt::{info, warn};
use embassy_usb::driver::EndpointError;
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

/// Concrete USB driver type.
pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

/// HID writer for the gamepad endpoint.
pub type GamepadWriter = HidWriter<'static, UsbDriver, 8>;

static HID_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static REPORT_SIGNAL: Signal<CriticalSectionRawMutex, ButtonReport> = Signal::new();

/// Latest report to send.
///
/// A newer report overwrites one the writer task has not picked up yet.
pub fn report_signal() -> &'static Signal<CriticalSectionRawMutex, ButtonReport> {
    &REPORT_SIGNAL
}

/// Build result containing the USB device runner and the HID writer.
pub struct UsbHidDevice {
    pub device: UsbDevice<'static, UsbDriver>,
    pub writer: GamepadWriter,
}

/// Initialise the USB stack and create the HID gamepad.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbHidDevice {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let hid_state = HID_STATE.init(State::new());
    let hid_config = HidConfig {
        report_descriptor: GAMEPAD_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    let writer = HidWriter::new(&mut builder, hid_state, hid_config);

    let device = builder.build();

    info!("USB HID gamepad initialised");

    UsbHidDevice { device, writer }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Report forwarding task - waits for the next published report and
/// writes it to the HID endpoint.
pub async fn hid_writer_task(mut writer: GamepadWriter) -> ! {
    info!("HID writer task started - waiting for reports");

    loop {
        let report = REPORT_SIGNAL.wait().await;
        if let Err(e) = send_report(&mut writer, &report).await {
            warn!("Report {} not sent: {}", report, e);
        }
    }
}

/// Serialize `report` and write it to the gamepad endpoint.
pub async fn send_report(writer: &mut GamepadWriter, report: &ButtonReport) -> Result<(), Error> {
    let mut buf = [0u8; GAMEPAD_REPORT_SIZE];
    let n = report.serialize(&mut buf);
    writer
        .write(&buf[..n])
        .await
        .map_err(|_: EndpointError| Error::Usb)
}
