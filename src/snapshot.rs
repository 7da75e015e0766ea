//! Input snapshots and their wire packing.
//!
//! A snapshot is the full level vector of one node captured once per
//! poll cycle, always in positive logic (`true` = pressed). Polarity is
//! normalized where the levels are read, never inside the latch.
//!
//! Wire layout used between the nodes (little bit order):
//! ```text
//! Byte 0: bit k = channel k       (channels 0..8)
//! Byte 1: bit k = channel 8 + k   (channels 8..16, unused bits zero)
//! ```

/// Bytes a snapshot occupies on the wire.
pub const WIRE_BYTES: usize = 2;

/// Levels of one node's `N` inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot<const N: usize> {
    levels: [bool; N],
}

impl<const N: usize> Snapshot<N> {
    const FITS_WIRE: () = assert!(N <= WIRE_BYTES * 8, "snapshot too wide for the wire format");

    /// Snapshot from positive-logic levels.
    pub const fn new(levels: [bool; N]) -> Self {
        Self { levels }
    }

    /// Nothing pressed.
    pub const fn released() -> Self {
        Self { levels: [false; N] }
    }

    /// Snapshot from raw pin levels of pulled-up, switch-to-ground inputs.
    pub fn from_active_low(raw_high: [bool; N]) -> Self {
        Self {
            levels: raw_high.map(|high| !high),
        }
    }

    pub fn is_pressed(&self, index: usize) -> bool {
        self.levels.get(index).copied().unwrap_or(false)
    }

    pub fn levels(&self) -> &[bool; N] {
        &self.levels
    }

    /// Indices that went from released to pressed since `previous`, ascending.
    pub fn rising_edges<'a>(&'a self, previous: &'a Self) -> impl Iterator<Item = usize> + 'a {
        self.levels
            .iter()
            .zip(previous.levels.iter())
            .enumerate()
            .filter(|&(_, (&now, &before))| now && !before)
            .map(|(index, _)| index)
    }

    /// Pack into the wire layout.
    pub fn to_wire(&self) -> [u8; WIRE_BYTES] {
        let () = Self::FITS_WIRE;
        let mut bytes = [0u8; WIRE_BYTES];
        for (index, _) in self.levels.iter().enumerate().filter(|&(_, &pressed)| pressed) {
            bytes[index / 8] |= 1 << (index % 8);
        }
        bytes
    }

    /// Unpack from the wire layout.
    ///
    /// Returns `None` on a short buffer. Bits beyond `N` are ignored.
    pub fn from_wire(bytes: &[u8]) -> Option<Self> {
        let () = Self::FITS_WIRE;
        if bytes.len() < N.div_ceil(8) {
            return None;
        }
        let mut levels = [false; N];
        for (index, level) in levels.iter_mut().enumerate() {
            *level = bytes[index / 8] & (1 << (index % 8)) != 0;
        }
        Some(Self { levels })
    }
}

impl<const N: usize> Default for Snapshot<N> {
    fn default() -> Self {
        Self::released()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_low_is_inverted() {
        let snap = Snapshot::from_active_low([true, false, true]);
        assert_eq!(snap.levels(), &[false, true, false]);
    }

    #[test]
    fn rising_edges_ignore_held_and_released() {
        let previous = Snapshot::new([true, false, true, false]);
        let current = Snapshot::new([true, true, false, true]);
        let mut edges = current.rising_edges(&previous);
        assert_eq!(edges.next(), Some(1));
        assert_eq!(edges.next(), Some(3));
        assert_eq!(edges.next(), None);
    }

    #[test]
    fn eleven_channels_pack_eight_plus_three() {
        let mut levels = [false; 11];
        levels[0] = true;
        levels[7] = true;
        levels[8] = true;
        levels[10] = true;
        let bytes = Snapshot::new(levels).to_wire();
        assert_eq!(bytes, [0b1000_0001, 0b0000_0101]);
    }

    #[test]
    fn unused_wire_bits_are_ignored() {
        let snap = Snapshot::<11>::from_wire(&[0x00, 0xF8]).unwrap();
        assert_eq!(snap, Snapshot::released());

        let snap = Snapshot::<11>::from_wire(&[0x02, 0xFC]).unwrap();
        assert!(snap.is_pressed(1));
        assert!(snap.is_pressed(10));
        assert!(!snap.is_pressed(9));
    }

    #[test]
    fn short_wire_buffer_is_rejected() {
        assert!(Snapshot::<11>::from_wire(&[0xFF]).is_none());
        assert!(Snapshot::<11>::from_wire(&[]).is_none());
        assert!(Snapshot::<5>::from_wire(&[0x1F]).is_some());
    }

    #[test]
    fn out_of_range_index_reads_released() {
        assert!(!Snapshot::new([true; 3]).is_pressed(3));
    }
}
