use crate::frame::Frame;

/// What an [`Event`] records.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A click selected a content point.
    Select,
    /// Malformed input was rejected at the boundary.
    Reject,
    /// The visible set was recomputed.
    Filter,
    /// The category weights changed.
    Weights,
    Reset,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Select => "select",
            EventKind::Reject => "reject",
            EventKind::Filter => "filter",
            EventKind::Weights => "weights",
            EventKind::Reset => "reset",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured engine event for traceability.
///
/// `message` is free-form detail for humans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub frame_index: u64,
    pub kind: EventKind,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, frame: Frame, kind: EventKind, message: impl Into<String>) {
        self.events.push(Event {
            frame_index: frame.index,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events of one kind, in emission order.
    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::{EventBus, EventKind};
    use crate::frame::Frame;
    use foundation::time::Time;

    #[test]
    fn records_events_with_frame_index() {
        let mut bus = EventBus::new();
        let f = Frame::new(2, Time(0.1));
        bus.emit(f, EventKind::Select, "a");
        assert_eq!(bus.events().len(), 1);
        assert_eq!(bus.events()[0].frame_index, 2);
        assert_eq!(bus.events()[0].kind.to_string(), "select");
    }

    #[test]
    fn filters_by_kind_in_order() {
        let mut bus = EventBus::new();
        let f = Frame::first(Time(0.0));
        bus.emit(f, EventKind::Select, "a");
        bus.emit(f, EventKind::Reject, "nan");
        bus.emit(f, EventKind::Select, "b");
        let got: Vec<_> = bus.of_kind(EventKind::Select).map(|e| e.message.as_str()).collect();
        assert_eq!(got, vec!["a", "b"]);
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(Frame::first(Time(1.0)), EventKind::Reset, "m");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.events().is_empty());
    }
}
