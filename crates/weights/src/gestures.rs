use catalog::Category;
use foundation::time::{Time, TimeSpan};
use runtime::repeat::{RepeatSchedule, RepeatTask};
use tracing::trace;

use crate::engine::WeightGesture;

/// Timing thresholds used to tell clicks, holds and double clicks apart.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GestureTiming {
    /// A press lasting at least this long is a hold; its click is suppressed.
    pub hold_delay_s: f64,
    /// Period of hold increments once the hold has started.
    pub repeat_interval_s: f64,
    /// Two clicks on the same category within this window form a double click.
    pub double_click_window_s: f64,
    /// Cap on hold increments delivered by a single `tick`.
    pub max_catch_up: u32,
}

impl Default for GestureTiming {
    fn default() -> Self {
        Self {
            hold_delay_s: 0.25,
            repeat_interval_s: 0.02,
            double_click_window_s: 0.3,
            max_catch_up: 8,
        }
    }
}

#[derive(Debug, Clone)]
struct ActivePress {
    category: Category,
    started: Time,
    repeat: RepeatTask,
}

/// Turns raw press/release/tick input on category controls into weight gestures.
///
/// - A press shorter than `hold_delay_s` is a `Click` on release.
/// - A second click on the same category within `double_click_window_s` of the
///   previous one is reported as `DoubleClick` instead of a second `Click`.
///   The first click of the pair has already been reported as a `Click`, so
///   callers see the intermediate state (and any refilter it triggers) before
///   the `DoubleClick` lands. The final weights equal those of a coalesced
///   pair, because `DoubleClick` ignores the prior vector.
/// - A press that lasts `hold_delay_s` produces `Hold` every `repeat_interval_s`
///   from `tick` until it is released or cancelled; the release produces nothing.
///
/// At most one press is tracked. The hold repeat is owned by the press, so
/// releasing, cancelling or resetting always stops it.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    timing: GestureTiming,
    press: Option<ActivePress>,
    last_click: [Option<Time>; Category::COUNT],
}

impl GestureTracker {
    pub fn new(timing: GestureTiming) -> Self {
        Self {
            timing,
            press: None,
            last_click: [None; Category::COUNT],
        }
    }

    pub fn timing(&self) -> &GestureTiming {
        &self.timing
    }

    /// Category currently pressed, if any.
    pub fn pressed(&self) -> Option<Category> {
        self.press.as_ref().map(|p| p.category)
    }

    /// `true` while a hold repeat is live.
    pub fn is_holding(&self) -> bool {
        self.press
            .as_ref()
            .is_some_and(|p| p.repeat.is_active() && p.repeat.has_fired())
    }

    /// Starts tracking a press. Any press already in flight is abandoned.
    pub fn press(&mut self, category: Category, now: Time) {
        self.cancel();
        let schedule = RepeatSchedule::new(self.timing.hold_delay_s, self.timing.repeat_interval_s)
            .with_max_catch_up(self.timing.max_catch_up);
        self.press = Some(ActivePress {
            category,
            started: now,
            repeat: RepeatTask::start(now, schedule),
        });
        trace!(%category, "press");
    }

    /// Hold increments due at `now`, oldest first.
    pub fn tick(&mut self, now: Time) -> Vec<WeightGesture> {
        let Some(press) = self.press.as_mut() else {
            return Vec::new();
        };
        let due = press.repeat.poll(now);
        vec![WeightGesture::Hold(press.category); due as usize]
    }

    /// Ends the press and reports the resulting discrete gesture, if any.
    pub fn release(&mut self, now: Time) -> Option<WeightGesture> {
        let mut press = self.press.take()?;
        press.repeat.cancel();

        let held = press.repeat.has_fired() || now.since(press.started) >= self.timing.hold_delay_s;
        if held {
            trace!(category = %press.category, "hold released");
            return None;
        }

        let category = press.category;
        let slot = &mut self.last_click[category.index()];
        let within_window = slot.is_some_and(|last| {
            TimeSpan::new(last, last.offset(self.timing.double_click_window_s)).contains(now)
        });

        if within_window {
            *slot = None;
            Some(WeightGesture::DoubleClick(category))
        } else {
            *slot = Some(now);
            Some(WeightGesture::Click(category))
        }
    }

    /// Abandons the current press without producing a gesture
    /// (pointer left the control, component teardown).
    pub fn cancel(&mut self) {
        if let Some(mut press) = self.press.take() {
            press.repeat.cancel();
        }
    }

    pub fn reset(&mut self) {
        self.cancel();
        self.last_click = [None; Category::COUNT];
    }
}
