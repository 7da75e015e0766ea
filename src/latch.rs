//! Selection latch - the persistent location / height / hopper state.
//!
//! The latch turns rising edges from both nodes into one exclusive
//! selection per group:
//!
//! - a LOCATION edge makes that channel the active location,
//! - a HEIGHT edge makes that channel the active height,
//! - the TOGGLE channel drives the hopper flag ([`ToggleMode`]).
//!
//! Edges are applied in a fixed order, all local channels ascending by
//! index, then all remote channels ascending by index. The last applied
//! edge of a group wins, so a remote key beats a local key pressed in the
//! same cycle.
//!
//! A stale remote fetch contributes no edges at all; the caller keeps the
//! last good remote snapshot as the reference for the next cycle.

use heapless::Vec;

use crate::channel::{Category, ChannelId, ChannelSet, Source};
use crate::command::RemoteCommand;
use crate::log::{debug, info};
use crate::snapshot::Snapshot;

/// How the hopper channel drives the hopper flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToggleMode {
    /// Every press flips the flag (momentary key).
    Flip,
    /// The flag follows the channel level (latching switch).
    Mirror,
}

/// When the HID report is handed to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommitPolicy {
    /// Every poll cycle.
    EveryCycle,
    /// Only on cycles that applied an edge or moved the hopper, plus the
    /// first cycle.
    OnChange,
}

/// Selection behaviour knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Policy {
    pub toggle: ToggleMode,
    pub commit: CommitPolicy,
    /// Tell the slave to drop a group a master key just took over.
    pub clear_remote: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            toggle: ToggleMode::Flip,
            commit: CommitPolicy::EveryCycle,
            clear_remote: false,
        }
    }
}

/// Current and previous snapshot of one node.
#[derive(Clone, Copy, Debug)]
pub struct Levels<'a, const N: usize> {
    pub current: &'a Snapshot<N>,
    pub previous: &'a Snapshot<N>,
}

impl<'a, const N: usize> Levels<'a, N> {
    pub fn new(current: &'a Snapshot<N>, previous: &'a Snapshot<N>) -> Self {
        Self { current, previous }
    }
}

/// What one update did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    /// Rising edges that hit a mapped channel.
    pub edges: u8,
    pub location_changed: bool,
    pub height_changed: bool,
    pub hopper_changed: bool,
    /// Commands for the slave, at most one per exclusive group.
    pub commands: Vec<RemoteCommand, 2>,
}

impl Transition {
    /// Whether this cycle counts as an input event for commit purposes.
    pub fn is_event(&self) -> bool {
        self.edges > 0 || self.hopper_changed
    }
}

/// Latched selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Latch {
    location: Option<ChannelId>,
    height: Option<ChannelId>,
    hopper: bool,
}

impl Latch {
    /// Nothing selected, hopper off.
    pub const fn new() -> Self {
        Self {
            location: None,
            height: None,
            hopper: false,
        }
    }

    pub fn location(&self) -> Option<ChannelId> {
        self.location
    }

    pub fn height(&self) -> Option<ChannelId> {
        self.height
    }

    pub fn hopper(&self) -> bool {
        self.hopper
    }

    /// Active channel of an exclusive group. The hopper group has none.
    pub fn active(&self, category: Category) -> Option<ChannelId> {
        match category {
            Category::Location => self.location,
            Category::Height => self.height,
            Category::Toggle => None,
        }
    }

    /// Whether `id` is lit: the active location, the active height, or the
    /// hopper channel while the hopper is on.
    pub fn is_selected(&self, id: ChannelId, channels: &ChannelSet<'_>) -> bool {
        match channels.get(id).category {
            Category::Toggle => self.hopper,
            category => self.active(category) == Some(id),
        }
    }

    /// Apply one poll cycle.
    ///
    /// `remote` is `None` when the fetch failed; remote edges are then
    /// suppressed for the cycle.
    pub fn update<const LOCAL: usize, const REMOTE: usize>(
        &mut self,
        channels: &ChannelSet<'_>,
        policy: &Policy,
        local: Levels<'_, LOCAL>,
        remote: Option<Levels<'_, REMOTE>>,
    ) -> Transition {
        let before = *self;
        let mut transition = Transition::default();

        self.apply_source(channels, policy, Source::Local, local, &mut transition);
        if let Some(remote) = remote {
            self.apply_source(channels, policy, Source::Remote, remote, &mut transition);
        }

        transition.location_changed = self.location != before.location;
        transition.height_changed = self.height != before.height;
        transition.hopper_changed = self.hopper != before.hopper;

        if transition.location_changed {
            if let Some(id) = self.location {
                info!("Location: {}", channels.get(id).name);
            }
        }
        if transition.height_changed {
            if let Some(id) = self.height {
                info!("Height: {}", channels.get(id).name);
            }
        }
        if transition.hopper_changed {
            info!("Hopper: {}", self.hopper);
        }

        if policy.clear_remote {
            self.collect_clears(channels, &before, &mut transition);
        }

        transition
    }

    fn apply_source<const N: usize>(
        &mut self,
        channels: &ChannelSet<'_>,
        policy: &Policy,
        source: Source,
        levels: Levels<'_, N>,
        transition: &mut Transition,
    ) {
        for index in levels.current.rising_edges(levels.previous) {
            let Some(id) = channels.find(source, index) else {
                continue;
            };
            match channels.get(id).category {
                Category::Location => self.location = Some(id),
                Category::Height => self.height = Some(id),
                Category::Toggle => match policy.toggle {
                    ToggleMode::Flip => self.hopper = !self.hopper,
                    ToggleMode::Mirror => {}
                },
            }
            transition.edges = transition.edges.saturating_add(1);
        }

        if policy.toggle == ToggleMode::Mirror {
            let hopper = channels.hopper().map(|id| channels.get(id));
            if let Some(channel) = hopper.filter(|c| c.source == source) {
                let index = channel.index as usize;
                let level = levels.current.is_pressed(index);
                if level != levels.previous.is_pressed(index) {
                    self.hopper = level;
                }
            }
        }
    }

    /// Queue a clear for every group a master key took over from the slave.
    fn collect_clears(
        &self,
        channels: &ChannelSet<'_>,
        before: &Latch,
        transition: &mut Transition,
    ) {
        for category in [Category::Location, Category::Height] {
            let now_local = self
                .active(category)
                .is_some_and(|id| channels.get(id).source == Source::Local);
            let was_remote = before
                .active(category)
                .is_some_and(|id| channels.get(id).source == Source::Remote);
            if now_local && was_remote {
                if let Some(command) = RemoteCommand::clear(category) {
                    debug!("Queue {} for slave", command);
                    let _ = transition.commands.push(command);
                }
            }
        }
    }
}
