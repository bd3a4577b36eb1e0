/// Host-supplied timestamp in seconds.
///
/// The engine never reads a wall clock; every time-dependent call takes a
/// `Time` so gesture handling stays deterministic and replayable.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Time(pub f64); // seconds

impl Time {
    pub fn from_millis(ms: f64) -> Self {
        Time(ms / 1000.0)
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Seconds elapsed since `earlier`, clamped at zero.
    pub fn since(self, earlier: Time) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    pub fn offset(self, seconds: f64) -> Time {
        Time(self.0 + seconds)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, t: Time) -> bool {
        t.0 >= self.start.0 && t.0 <= self.end.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Time, TimeSpan};

    #[test]
    fn from_millis_and_since() {
        let t = Time::from_millis(250.0);
        assert_eq!(t, Time(0.25));
        assert!(t.is_finite());
        assert!(!Time(f64::NAN).is_finite());
        assert_eq!(Time(1.0).since(Time(0.25)), 0.75);
        assert_eq!(Time(0.0).since(Time(1.0)), 0.0);
    }

    #[test]
    fn span_contains_is_inclusive() {
        let s = TimeSpan::new(Time(1.0), Time(2.0));
        assert!(s.contains(Time(1.0)));
        assert!(s.contains(Time(2.0)));
        assert!(!s.contains(Time(2.01)));
    }
}
