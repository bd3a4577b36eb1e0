use foundation::time::Time;

/// Render-frame metadata.
///
/// Unlike a fixed-step simulation, the host supplies the frame time; the
/// index is only used to tag events for traceability.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Host time at the start of the frame.
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, time: Time) -> Self {
        Self { index, time }
    }

    pub fn first(time: Time) -> Self {
        Self::new(0, time)
    }

    /// Advances to the next frame at `time`. Time never runs backwards, and a
    /// non-finite `time` keeps the previous frame time.
    pub fn next(self, time: Time) -> Self {
        let time = if !time.is_finite() || time.0 < self.time.0 {
            self.time
        } else {
            time
        };
        Self::new(self.index + 1, time)
    }
}
