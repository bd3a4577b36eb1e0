use foundation::time::Time;

/// Delay and period of a [`RepeatTask`], in seconds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RepeatSchedule {
    /// Time from start to the first firing.
    pub delay_s: f64,
    /// Time between subsequent firings. Must be positive.
    pub interval_s: f64,
    /// Upper bound on firings reported by a single `poll`.
    ///
    /// A host that stalls (backgrounded tab, debugger) must not receive
    /// hundreds of queued firings at once when it resumes.
    pub max_catch_up: u32,
}

impl RepeatSchedule {
    pub fn new(delay_s: f64, interval_s: f64) -> Self {
        Self {
            delay_s,
            interval_s,
            max_catch_up: 8,
        }
    }

    pub fn with_max_catch_up(mut self, max_catch_up: u32) -> Self {
        self.max_catch_up = max_catch_up.max(1);
        self
    }
}

/// Cancelable delayed repeat, driven by host-supplied time.
///
/// The task value is the owning token: whoever holds it decides when it stops,
/// either via [`RepeatTask::cancel`] or by dropping it. A cancelled task never
/// fires again, regardless of how far time advances.
///
/// Ordering contract:
/// - Firings happen at `start + delay`, `start + delay + interval`, ...
/// - `poll(now)` reports every firing with due time `<= now` not yet reported,
///   capped at `max_catch_up`; skipped firings are dropped, not deferred.
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatTask {
    schedule: RepeatSchedule,
    next_due: Time,
    fired: u64,
    cancelled: bool,
}

impl RepeatTask {
    pub fn start(now: Time, schedule: RepeatSchedule) -> Self {
        let schedule = RepeatSchedule {
            delay_s: schedule.delay_s.max(0.0),
            interval_s: if schedule.interval_s > 0.0 {
                schedule.interval_s
            } else {
                f64::INFINITY
            },
            max_catch_up: schedule.max_catch_up.max(1),
        };
        Self {
            next_due: now.offset(schedule.delay_s),
            schedule,
            fired: 0,
            cancelled: false,
        }
    }

    /// `true` once the initial delay has elapsed and at least one firing happened.
    pub fn has_fired(&self) -> bool {
        self.fired > 0
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Returns how many firings are due at `now`.
    ///
    /// A non-finite `now` (or start time) never fires.
    pub fn poll(&mut self, now: Time) -> u32 {
        if self.cancelled
            || !now.is_finite()
            || !self.next_due.is_finite()
            || now.0 < self.next_due.0
        {
            return 0;
        }

        let interval = self.schedule.interval_s;
        let overdue = now.0 - self.next_due.0;
        let due = if interval.is_finite() {
            // Float-to-int casts saturate; the add must too.
            let skipped = (overdue / interval).floor().min(u32::MAX as f64) as u64;
            skipped.saturating_add(1)
        } else {
            1
        };

        // Resynchronize to the schedule even when firings are dropped.
        self.next_due = self.next_due.offset(due as f64 * interval);
        let reported = due.min(self.schedule.max_catch_up as u64) as u32;
        self.fired += reported as u64;
        reported
    }
}

#[cfg(test)]
mod tests {
    use super::{RepeatSchedule, RepeatTask};
    use foundation::time::Time;

    fn hold() -> RepeatSchedule {
        RepeatSchedule::new(0.25, 0.02)
    }

    #[test]
    fn nothing_fires_before_delay() {
        let mut t = RepeatTask::start(Time(0.0), hold());
        assert_eq!(t.poll(Time(0.1)), 0);
        assert_eq!(t.poll(Time(0.249)), 0);
        assert!(!t.has_fired());
    }

    #[test]
    fn fires_at_delay_then_every_interval() {
        let mut t = RepeatTask::start(Time(0.0), hold());
        assert_eq!(t.poll(Time(0.25)), 1);
        assert_eq!(t.poll(Time(0.26)), 0);
        assert_eq!(t.poll(Time(0.275)), 1);
        // 0.29 and 0.31 are due.
        assert_eq!(t.poll(Time(0.315)), 2);
        assert!(t.has_fired());
    }

    #[test]
    fn cancel_stops_all_future_firings() {
        let mut t = RepeatTask::start(Time(0.0), hold());
        assert_eq!(t.poll(Time(0.3)), 3);
        t.cancel();
        assert!(!t.is_active());
        assert_eq!(t.poll(Time(10.0)), 0);
    }

    #[test]
    fn catch_up_is_capped_after_a_stall() {
        let mut t = RepeatTask::start(Time(0.0), hold().with_max_catch_up(4));
        assert_eq!(t.poll(Time(5.0)), 4);
        // The schedule resynchronized; the next firing is one interval later.
        assert_eq!(t.poll(Time(5.0)), 0);
        assert_eq!(t.poll(Time(5.025)), 1);
    }

    #[test]
    fn non_finite_times_never_fire() {
        let mut t = RepeatTask::start(Time(0.0), hold());
        assert_eq!(t.poll(Time(f64::NAN)), 0);
        assert_eq!(t.poll(Time(f64::INFINITY)), 0);
        assert!(!t.has_fired());
        assert_eq!(t.poll(Time(0.25)), 1);

        let mut t = RepeatTask::start(Time(f64::NAN), hold());
        for now in [0.0, 0.3, 1.0, 100.0] {
            assert_eq!(t.poll(Time(now)), 0);
        }
    }

    #[test]
    fn tiny_interval_saturates_instead_of_overflowing() {
        let mut t = RepeatTask::start(Time(0.0), RepeatSchedule::new(0.25, 1e-300));
        assert_eq!(t.poll(Time(0.3)), 8);
        assert_eq!(t.poll(Time(1e6)), 8);
    }

    #[test]
    fn non_positive_interval_fires_once() {
        let mut t = RepeatTask::start(Time(0.0), RepeatSchedule::new(0.1, 0.0));
        assert_eq!(t.poll(Time(0.2)), 1);
        assert_eq!(t.poll(Time(100.0)), 0);
    }
}
