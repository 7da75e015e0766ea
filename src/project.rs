//! Projection of the latch onto the HID report and the status strip.

use crate::channel::ChannelSet;
use crate::hid::ButtonReport;
use crate::latch::Latch;
use crate::led::{self, LedFrame};

/// Derive the host report and the strip frame from the latch.
///
/// The report holds exactly the active location, the active height and,
/// while the hopper is on, the hopper channel. Every channel's pixel shows
/// its category colour, bright when selected. Unbound pixels stay dark.
pub fn project(latch: &Latch, channels: &ChannelSet<'_>) -> (ButtonReport, LedFrame) {
    let mut report = ButtonReport::empty();
    let mut frame = LedFrame::dark();

    for (id, channel) in channels.iter() {
        let selected = latch.is_selected(id, channels);
        report.set(channel.output as usize, selected);
        frame.set(channel.led as usize, led::color(channel.category, selected));
    }

    (report, frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{Category, Channel, Source};
    use crate::latch::{Levels, Policy};
    use crate::led::{color, OFF};
    use crate::snapshot::Snapshot;

    const TABLE: &[Channel] = &[
        Channel::local("L1", 0, Category::Location, 4, 0),
        Channel::local("L2", 1, Category::Height, 5, 2),
        Channel::remote("R1", 0, Category::Location, 6, 4),
        Channel::remote("R2", 1, Category::Toggle, 7, 6),
    ];

    const SET: ChannelSet<'static> = ChannelSet::new(TABLE);

    fn latched(local: [bool; 2], remote: [bool; 2]) -> Latch {
        let mut latch = Latch::new();
        latch.update(
            &SET,
            &Policy::default(),
            Levels::new(&Snapshot::new(local), &Snapshot::released()),
            Some(Levels::new(&Snapshot::new(remote), &Snapshot::released())),
        );
        latch
    }

    #[test]
    fn startup_projection_is_idle() {
        let (report, frame) = project(&Latch::new(), &SET);
        assert!(report.is_empty());
        assert_eq!(frame.get(0), Some(color(Category::Location, false)));
        assert_eq!(frame.get(2), Some(color(Category::Height, false)));
        assert_eq!(frame.get(6), Some(color(Category::Toggle, false)));
        // unbound pixels
        assert_eq!(frame.get(1), Some(OFF));
        assert_eq!(frame.get(3), Some(OFF));
    }

    #[test]
    fn report_marks_selected_outputs_only() {
        let latch = latched([false, true], [true, true]);
        let (report, _) = project(&latch, &SET);
        assert!(!report.is_pressed(4));
        assert!(report.is_pressed(5));
        assert!(report.is_pressed(6));
        assert!(report.is_pressed(7));
        assert_eq!(report.buttons, 0b1110_0000);
    }

    #[test]
    fn frame_lights_selected_pixels() {
        let latch = latched([true, false], [false, false]);
        let (_, frame) = project(&latch, &SET);
        assert_eq!(frame.get(0), Some(color(Category::Location, true)));
        assert_eq!(frame.get(4), Some(color(Category::Location, false)));
        assert_eq!(frame.get(6), Some(color(Category::Toggle, false)));
        assert_eq!(latch.location(), SET.find(Source::Local, 0));
    }
}
