//! Static channel classification.
//!
//! Every physical input of both nodes is described once by a [`Channel`]:
//! which node samples it, where it sits in that node's snapshot, which
//! selection group it belongs to, and where it lands in the HID button
//! space and on the LED strip.
//!
//! A [`ChannelSet`] is the lookup table the selection latch and the report
//! projector work from. It is validated once before use; after that every
//! lookup is infallible by construction.

use crate::config::{BUTTON_COUNT, LED_COUNT};
use crate::error::ConfigError;

/// Node that samples a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Source {
    /// Wired to the master's own GPIO.
    Local,
    /// Sampled by the slave and fetched over the bus.
    Remote,
}

/// Selection group of a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Category {
    /// Exactly-one group: where to go.
    Location,
    /// Exactly-one group: at which height.
    Height,
    /// Independent hopper flag.
    Toggle,
}

impl Category {
    /// Number of categories, for tables keyed by category.
    pub const COUNT: usize = 3;

    /// Position of this category in a category-keyed table.
    pub const fn index(self) -> usize {
        match self {
            Category::Location => 0,
            Category::Height => 1,
            Category::Toggle => 2,
        }
    }
}

/// One physical input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel {
    /// Short label for traces.
    pub name: &'static str,
    pub source: Source,
    /// Position within the source's snapshot.
    pub index: u8,
    pub category: Category,
    /// HID button index (button 1 = 0).
    pub output: u8,
    /// Pixel on the status strip.
    pub led: u8,
}

impl Channel {
    /// Channel wired to the master.
    pub const fn local(
        name: &'static str,
        index: u8,
        category: Category,
        output: u8,
        led: u8,
    ) -> Self {
        Self {
            name,
            source: Source::Local,
            index,
            category,
            output,
            led,
        }
    }

    /// Channel sampled by the slave.
    pub const fn remote(
        name: &'static str,
        index: u8,
        category: Category,
        output: u8,
        led: u8,
    ) -> Self {
        Self {
            name,
            source: Source::Remote,
            index,
            category,
            output,
            led,
        }
    }
}

/// Position of a channel within its [`ChannelSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelId(u8);

impl ChannelId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Immutable table of all channels.
#[derive(Clone, Copy, Debug)]
pub struct ChannelSet<'a> {
    channels: &'a [Channel],
}

impl<'a> ChannelSet<'a> {
    pub const fn new(channels: &'a [Channel]) -> Self {
        Self { channels }
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Look up a channel by id.
    ///
    /// Ids are only handed out by this set, so the index is always in range.
    pub fn get(&self, id: ChannelId) -> &'a Channel {
        &self.channels[id.index()]
    }

    /// Channel bound to `index` of the `source` snapshot, if any.
    pub fn find(&self, source: Source, index: usize) -> Option<ChannelId> {
        self.channels
            .iter()
            .position(|c| c.source == source && c.index as usize == index)
            .map(|pos| ChannelId(pos as u8))
    }

    /// The hopper channel, if the set has one.
    pub fn hopper(&self) -> Option<ChannelId> {
        self.channels
            .iter()
            .position(|c| c.category == Category::Toggle)
            .map(|pos| ChannelId(pos as u8))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChannelId, &'a Channel)> + 'a {
        self.channels
            .iter()
            .enumerate()
            .map(|(pos, c)| (ChannelId(pos as u8), c))
    }

    /// Check the table against the snapshot widths of both nodes.
    ///
    /// Rejects out-of-range indices, any two channels sharing an input,
    /// a HID button or a pixel, and more than one hopper channel.
    pub const fn validate<const LOCAL: usize, const REMOTE: usize>(
        &self,
    ) -> Result<(), ConfigError> {
        let channels = self.channels;
        if channels.len() > u8::MAX as usize {
            return Err(ConfigError::TooManyChannels);
        }

        let mut toggles = 0;
        let mut i = 0;
        while i < channels.len() {
            let c = &channels[i];
            let width = match c.source {
                Source::Local => LOCAL,
                Source::Remote => REMOTE,
            };
            if c.index as usize >= width {
                return Err(ConfigError::InputOutOfRange { channel: i as u8 });
            }
            if c.output as usize >= BUTTON_COUNT {
                return Err(ConfigError::OutputOutOfRange { channel: i as u8 });
            }
            if c.led as usize >= LED_COUNT {
                return Err(ConfigError::LedOutOfRange { channel: i as u8 });
            }
            if matches!(c.category, Category::Toggle) {
                toggles += 1;
                if toggles > 1 {
                    return Err(ConfigError::MultipleToggles { channel: i as u8 });
                }
            }

            let mut j = 0;
            while j < i {
                let other = &channels[j];
                let same_source = matches!(
                    (c.source, other.source),
                    (Source::Local, Source::Local) | (Source::Remote, Source::Remote)
                );
                if same_source && c.index == other.index {
                    return Err(ConfigError::DuplicateInput {
                        first: j as u8,
                        second: i as u8,
                    });
                }
                if c.output == other.output {
                    return Err(ConfigError::DuplicateOutput {
                        first: j as u8,
                        second: i as u8,
                    });
                }
                if c.led == other.led {
                    return Err(ConfigError::DuplicateLed {
                        first: j as u8,
                        second: i as u8,
                    });
                }
                j += 1;
            }
            i += 1;
        }
        Ok(())
    }
}
