//! Slave node firmware for nRF52840.
//!
//! Answers the master on the I²C bus:
//! - read (or write-read): sample the 11 keys right then and return the
//!   2-byte snapshot,
//! - write: decode command opcodes. The slave keeps no selection of its
//!   own, so a clear needs no state change here; it is only traced.

#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Pin, Pull};
use embassy_nrf::twis::{self, Command, Twis};
use embassy_nrf::{bind_interrupts, peripherals};
use {defmt_rtt as _, panic_probe as _};

use latchpad::command::RemoteCommand;
use latchpad::config::{self, REMOTE_CHANNEL_COUNT};
use latchpad::inputs::InputBank;
use latchpad::Snapshot;

bind_interrupts!(struct Irqs {
    TWISPI0 => twis::InterruptHandler<peripherals::TWISPI0>;
});

fn handle_commands(bytes: &[u8]) {
    for &byte in bytes {
        match RemoteCommand::from_opcode(byte) {
            Some(command) => info!("Master sent {}", command),
            None => warn!("Unknown opcode 0x{:02x}", byte),
        }
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("latchpad slave starting at 0x{:02x}", config::REMOTE_I2C_ADDR);

    let mut keys = InputBank::new(
        [
            p.P0_02.degrade(),
            p.P0_03.degrade(),
            p.P0_04.degrade(),
            p.P0_05.degrade(),
            p.P0_28.degrade(),
            p.P0_29.degrade(),
            p.P0_30.degrade(),
            p.P0_31.degrade(),
            p.P1_11.degrade(),
            p.P1_12.degrade(),
            p.P1_13.degrade(),
        ]
        .map(|pin| Input::new(pin, Pull::Up)),
    );

    let mut twis_config = twis::Config::default();
    twis_config.address0 = config::REMOTE_I2C_ADDR;
    let mut i2c = Twis::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twis_config);

    let mut rx = [0u8; 4];
    loop {
        let wants_snapshot = match i2c.listen(&mut rx).await {
            Ok(Command::Read) => true,
            Ok(Command::WriteRead(n)) => {
                handle_commands(&rx[..n]);
                true
            }
            Ok(Command::Write(n)) => {
                handle_commands(&rx[..n]);
                false
            }
            Err(e) => {
                warn!("TWIS listen failed: {}", e);
                false
            }
        };

        if wants_snapshot {
            let snapshot: Snapshot<REMOTE_CHANNEL_COUNT> = keys.sample();
            let wire = snapshot.to_wire();
            if let Err(e) = i2c.respond_to_read(&wire).await {
                warn!("TWIS read not served: {}", e);
            }
        }
    }
}
