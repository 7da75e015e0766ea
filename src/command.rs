//! Single-byte commands the master may write to the slave.
//!
//! Writes are fire-and-forget: the slave never acknowledges a command
//! beyond the bus-level ACK.

use crate::channel::Category;

/// Command sent from master to slave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteCommand {
    /// A master key took over the location selection.
    ClearLocation,
    /// A master key took over the height selection.
    ClearHeight,
}

impl RemoteCommand {
    pub const fn opcode(self) -> u8 {
        match self {
            RemoteCommand::ClearLocation => 0x01,
            RemoteCommand::ClearHeight => 0x02,
        }
    }

    pub const fn from_opcode(opcode: u8) -> Option<Self> {
        match opcode {
            0x01 => Some(RemoteCommand::ClearLocation),
            0x02 => Some(RemoteCommand::ClearHeight),
            _ => None,
        }
    }

    /// Clear command for an exclusive category; the hopper has none.
    pub const fn clear(category: Category) -> Option<Self> {
        match category {
            Category::Location => Some(RemoteCommand::ClearLocation),
            Category::Height => Some(RemoteCommand::ClearHeight),
            Category::Toggle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcodes_are_stable() {
        assert_eq!(RemoteCommand::ClearLocation.opcode(), 0x01);
        assert_eq!(RemoteCommand::ClearHeight.opcode(), 0x02);
    }

    #[test]
    fn unknown_opcode_is_rejected() {
        assert_eq!(RemoteCommand::from_opcode(0x00), None);
        assert_eq!(RemoteCommand::from_opcode(0xFF), None);
        assert_eq!(
            RemoteCommand::from_opcode(0x02),
            Some(RemoteCommand::ClearHeight)
        );
    }

    #[test]
    fn hopper_has_no_clear_command() {
        assert_eq!(RemoteCommand::clear(Category::Toggle), None);
        assert_eq!(
            RemoteCommand::clear(Category::Location),
            Some(RemoteCommand::ClearLocation)
        );
    }
}
