//! Master side of the I²C link to the slave.
//!
//! A fetch is a plain 2-byte read from the slave's address; a command is
//! a 1-byte write. Both are generic over `embedded-hal-async` so the same
//! code runs against the nRF TWIM on target and a mock on the host.
//!
//! The caller bounds each fetch with its own deadline and feeds the
//! outcome back through [`RemoteLink::observe`], which turns failures into
//! a stale cycle and logs link loss and recovery once each.

use embedded_hal_async::i2c::{Error as _, ErrorKind, I2c};

use crate::command::RemoteCommand;
use crate::error::FetchError;
use crate::log::{info, warning};
use crate::snapshot::{Snapshot, WIRE_BYTES};

fn classify(kind: ErrorKind) -> FetchError {
    match kind {
        ErrorKind::NoAcknowledge(_) => FetchError::Nack,
        _ => FetchError::Bus,
    }
}

/// Bus handle plus link health.
pub struct RemoteLink<I> {
    i2c: I,
    address: u8,
    online: bool,
}

impl<I: I2c> RemoteLink<I> {
    /// Link to the slave at 7-bit `address`. Starts offline until the first
    /// successful fetch.
    pub fn new(i2c: I, address: u8) -> Self {
        Self {
            i2c,
            address,
            online: false,
        }
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Read one snapshot from the slave.
    pub async fn fetch<const N: usize>(&mut self) -> Result<Snapshot<N>, FetchError> {
        let mut buf = [0u8; WIRE_BYTES];
        self.i2c
            .read(self.address, &mut buf)
            .await
            .map_err(|e| classify(e.kind()))?;
        Snapshot::from_wire(&buf).ok_or(FetchError::Bus)
    }

    /// Fire-and-forget command write.
    pub async fn send(&mut self, command: RemoteCommand) -> Result<(), FetchError> {
        let buf = [command.opcode()];
        self.i2c
            .write(self.address, &buf)
            .await
            .map_err(|e| classify(e.kind()))
    }

    /// Record a fetch outcome, yielding the snapshot for a fresh cycle and
    /// `None` for a stale one.
    pub fn observe<const N: usize>(
        &mut self,
        result: Result<Snapshot<N>, FetchError>,
    ) -> Option<Snapshot<N>> {
        match result {
            Ok(snapshot) => {
                if !self.online {
                    info!("Remote link up");
                    self.online = true;
                }
                Some(snapshot)
            }
            Err(e) => {
                if self.online {
                    warning!("Remote link lost: {}", e);
                    self.online = false;
                }
                None
            }
        }
    }
}
