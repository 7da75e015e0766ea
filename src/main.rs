//! Master node firmware for nRF52840.
//!
//! Every poll tick:
//! - sample the five local keys,
//! - fetch the slave's snapshot over I²C (bounded by a deadline),
//! - run one controller cycle,
//! - deliver slave commands (each bounded by the same deadline),
//! - publish the HID report and refresh the strip.

#![no_std]
#![no_main]

use defmt::{info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Pin, Pull};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{with_timeout, Duration, Ticker};
use embassy_usb::UsbDevice;
use {defmt_rtt as _, panic_probe as _};

use latchpad::board::strip::LedStrip;
use latchpad::board::usb::{self, GamepadWriter, UsbDriver};
use latchpad::config::{self, REMOTE_CHANNEL_COUNT};
use latchpad::inputs::InputBank;
use latchpad::link::RemoteLink;
use latchpad::{Controller, FetchError};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

#[embassy_executor::task]
async fn usb_task(device: UsbDevice<'static, UsbDriver>) -> ! {
    usb::run_usb_device(device).await
}

#[embassy_executor::task]
async fn hid_task(writer: GamepadWriter) -> ! {
    usb::hid_writer_task(writer).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("latchpad master starting");

    let mut controller = unwrap!(Controller::deployed());
    info!("Policy: {}", controller.policy());

    let hid = usb::init(p.USBD);
    unwrap!(spawner.spawn(usb_task(hid.device)));
    unwrap!(spawner.spawn(hid_task(hid.writer)));

    let mut keys = InputBank::new(
        [
            p.P0_02.degrade(),
            p.P0_03.degrade(),
            p.P0_28.degrade(),
            p.P0_29.degrade(),
            p.P0_30.degrade(),
        ]
        .map(|pin| Input::new(pin, Pull::Up)),
    );

    let mut twim_config = twim::Config::default();
    twim_config.frequency = twim::Frequency::K100;
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim_config);
    let mut link = RemoteLink::new(i2c, config::REMOTE_I2C_ADDR);

    let mut strip = unwrap!(LedStrip::new(p.PWM0, p.P0_13.degrade()));

    let deadline = Duration::from_millis(config::REMOTE_FETCH_TIMEOUT_MS);
    let mut ticker = Ticker::every(Duration::from_millis(config::POLL_INTERVAL_MS));

    loop {
        let local = keys.sample();
        let fetched = with_timeout(deadline, link.fetch::<REMOTE_CHANNEL_COUNT>())
            .await
            .unwrap_or(Err(FetchError::Timeout));
        let timed_out = matches!(fetched, Err(FetchError::Timeout));
        let remote = link.observe(fetched);

        let out = controller.cycle(local, remote);

        for command in out.commands {
            let sent = with_timeout(deadline, link.send(command))
                .await
                .unwrap_or(Err(FetchError::Timeout));
            if let Err(e) = sent {
                warn!("Command {} not delivered: {}", command, e);
            }
        }
        if let Some(report) = out.report {
            usb::report_signal().signal(report);
        }
        if let Err(e) = strip.write(&out.leds).await {
            warn!("LED frame dropped: {}", e);
        }

        // A full-length timeout overruns the period; restart the schedule
        // instead of firing the missed ticks back to back.
        if timed_out {
            ticker.reset();
        }
        ticker.next().await;
    }
}
