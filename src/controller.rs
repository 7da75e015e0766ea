//! Per-cycle driver of the master node.
//!
//! [`Controller`] owns everything that survives from one poll cycle to the
//! next: the latch and the previous snapshot of each node. One call to
//! [`Controller::cycle`] is one poll cycle:
//!
//! 1. edge-detect local and (if fresh) remote levels against the previous cycle,
//! 2. update the latch,
//! 3. project the latch onto the HID report and the LED frame,
//! 4. keep the new snapshots as the reference for the next cycle.
//!
//! A failed remote fetch keeps the last good remote snapshot as reference,
//! so a recovered link with unchanged levels yields no edges.

use heapless::Vec;

use crate::channel::ChannelSet;
use crate::command::RemoteCommand;
use crate::config::{self, LOCAL_CHANNEL_COUNT, REMOTE_CHANNEL_COUNT};
use crate::error::{ConfigError, Error};
use crate::hid::ButtonReport;
use crate::latch::{CommitPolicy, Latch, Levels, Policy};
use crate::led::LedFrame;
use crate::log::warning;
use crate::project::project;
use crate::snapshot::Snapshot;

/// What the board layer must do after a cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleOutput {
    /// Report to hand to the host, `None` when the commit policy skips it.
    pub report: Option<ButtonReport>,
    /// Frame for the strip, every cycle.
    pub leds: LedFrame,
    /// Commands for the slave.
    pub commands: Vec<RemoteCommand, 2>,
}

/// Selection state machine of the master node.
pub struct Controller<'a, const LOCAL: usize, const REMOTE: usize> {
    channels: ChannelSet<'a>,
    policy: Policy,
    latch: Latch,
    local_previous: Snapshot<LOCAL>,
    remote_previous: Snapshot<REMOTE>,
    committed: bool,
    remote_stale: bool,
}

impl<'a, const LOCAL: usize, const REMOTE: usize> Controller<'a, LOCAL, REMOTE> {
    /// Validate `channels` and start with nothing selected.
    pub fn new(channels: ChannelSet<'a>, policy: Policy) -> Result<Self, ConfigError> {
        channels.validate::<LOCAL, REMOTE>()?;
        Ok(Self {
            channels,
            policy,
            latch: Latch::new(),
            local_previous: Snapshot::released(),
            remote_previous: Snapshot::released(),
            committed: false,
            remote_stale: false,
        })
    }

    pub fn latch(&self) -> &Latch {
        &self.latch
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Run one poll cycle. `remote` is `None` when the fetch failed.
    pub fn cycle(
        &mut self,
        local: Snapshot<LOCAL>,
        remote: Option<Snapshot<REMOTE>>,
    ) -> CycleOutput {
        if remote.is_none() && !self.remote_stale {
            warning!("Remote snapshot stale, holding last good levels");
        }
        self.remote_stale = remote.is_none();

        let transition = self.latch.update(
            &self.channels,
            &self.policy,
            Levels::new(&local, &self.local_previous),
            remote.as_ref().map(|r| Levels::new(r, &self.remote_previous)),
        );

        self.local_previous = local;
        if let Some(remote) = remote {
            self.remote_previous = remote;
        }

        let (report, leds) = project(&self.latch, &self.channels);
        let commit = match self.policy.commit {
            CommitPolicy::EveryCycle => true,
            CommitPolicy::OnChange => transition.is_event() || !self.committed,
        };
        self.committed |= commit;

        CycleOutput {
            report: commit.then_some(report),
            leds,
            commands: transition.commands,
        }
    }
}

impl Controller<'static, LOCAL_CHANNEL_COUNT, REMOTE_CHANNEL_COUNT> {
    /// Controller for the channel table and policy the firmware ships with.
    pub fn deployed() -> Result<Self, Error> {
        Ok(Self::new(config::CHANNELS, config::POLICY)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{Category, Channel};
    use crate::latch::ToggleMode;

    const TABLE: &[Channel] = &[
        Channel::local("L1", 0, Category::Location, 0, 0),
        Channel::remote("R1", 0, Category::Location, 1, 1),
    ];

    fn controller(commit: CommitPolicy) -> Controller<'static, 1, 1> {
        let policy = Policy {
            toggle: ToggleMode::Flip,
            commit,
            clear_remote: false,
        };
        Controller::new(ChannelSet::new(TABLE), policy).unwrap()
    }

    #[test]
    fn invalid_table_is_rejected_at_construction() {
        let clash = [
            Channel::local("L1", 0, Category::Location, 0, 0),
            Channel::remote("R1", 0, Category::Location, 0, 1),
        ];
        let result = Controller::<1, 1>::new(ChannelSet::new(&clash), Policy::default());
        assert!(matches!(
            result,
            Err(ConfigError::DuplicateOutput { first: 0, second: 1 })
        ));
    }

    #[test]
    fn deployed_table_builds() {
        let ctl = Controller::deployed().unwrap();
        assert_eq!(*ctl.policy(), config::POLICY);
        assert_eq!(ctl.channels.len(), LOCAL_CHANNEL_COUNT + REMOTE_CHANNEL_COUNT);
        assert_eq!(*ctl.latch(), Latch::new());
    }

    #[test]
    fn table_error_converts_into_board_error() {
        let clash = [
            Channel::local("L1", 0, Category::Height, 0, 0),
            Channel::local("L2", 0, Category::Height, 1, 1),
        ];
        fn build(table: &[Channel]) -> Result<Controller<'_, 1, 0>, Error> {
            Ok(Controller::new(ChannelSet::new(table), Policy::default())?)
        }
        assert!(matches!(
            build(&clash),
            Err(Error::Config(ConfigError::DuplicateInput { first: 0, second: 1 }))
        ));
    }

    #[test]
    fn mirror_local_switch_holds_through_stale_cycles() {
        const SWITCHED: &[Channel] = &[
            Channel::local("SW", 0, Category::Toggle, 0, 0),
            Channel::remote("R1", 0, Category::Location, 1, 1),
        ];
        let policy = Policy {
            toggle: ToggleMode::Mirror,
            commit: CommitPolicy::EveryCycle,
            clear_remote: false,
        };
        let mut ctl = Controller::<1, 1>::new(ChannelSet::new(SWITCHED), policy).unwrap();

        ctl.cycle(Snapshot::new([true]), Some(Snapshot::released()));
        assert!(ctl.latch().hopper());

        let out = ctl.cycle(Snapshot::new([true]), None);
        assert!(ctl.latch().hopper());
        assert!(out.report.unwrap().is_pressed(0));

        ctl.cycle(Snapshot::released(), None);
        assert!(!ctl.latch().hopper());
    }

    #[test]
    fn every_cycle_always_commits() {
        let mut ctl = controller(CommitPolicy::EveryCycle);
        for _ in 0..3 {
            let out = ctl.cycle(Snapshot::released(), Some(Snapshot::released()));
            assert_eq!(out.report, Some(ButtonReport::empty()));
        }
        let out = ctl.cycle(Snapshot::released(), None);
        assert!(out.report.is_some());
    }

    #[test]
    fn on_change_commits_first_cycle_and_events_only() {
        let mut ctl = controller(CommitPolicy::OnChange);
        let first = ctl.cycle(Snapshot::released(), Some(Snapshot::released()));
        assert_eq!(first.report, Some(ButtonReport::empty()));

        let idle = ctl.cycle(Snapshot::released(), Some(Snapshot::released()));
        assert_eq!(idle.report, None);

        let press = ctl.cycle(Snapshot::new([true]), Some(Snapshot::released()));
        let report = press.report.unwrap();
        assert!(report.is_pressed(0));

        let held = ctl.cycle(Snapshot::new([true]), Some(Snapshot::released()));
        assert_eq!(held.report, None);
    }

    #[test]
    fn frame_is_produced_even_without_commit() {
        let mut ctl = controller(CommitPolicy::OnChange);
        ctl.cycle(Snapshot::new([true]), Some(Snapshot::released()));
        let out = ctl.cycle(Snapshot::new([true]), Some(Snapshot::released()));
        assert_eq!(out.report, None);
        assert_eq!(out.leds.get(0), Some(crate::led::color(Category::Location, true)));
    }

    #[test]
    fn stale_remote_keeps_reference_snapshot() {
        let mut ctl = controller(CommitPolicy::EveryCycle);
        ctl.cycle(Snapshot::released(), Some(Snapshot::new([true])));
        let active = ctl.latch().location();

        ctl.cycle(Snapshot::released(), None);
        assert_eq!(ctl.latch().location(), active);

        // still held after the outage: not a new press
        ctl.cycle(Snapshot::new([true]), None);
        ctl.cycle(Snapshot::new([true]), Some(Snapshot::new([true])));
        let local = ctl.latch().location();
        assert_ne!(local, active);
        assert_eq!(ctl.channels.get(local.unwrap()).name, "L1");
    }
}
