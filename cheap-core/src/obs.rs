///
/// obs
///
/// A minimal observability seam. The core never picks a logging or
/// metrics backend; it calls out to a caller-supplied `Sink` on
/// structural state transitions so a host application can wire in
/// whatever it likes.
///

/// A structural event raised by the catalog or DAO layer.
#[derive(Clone, Debug)]
pub enum Event {
    AspectageExtended { catalog: String, aspect_def: String },
    HierarchyAdded { catalog: String, hierarchy: String },
    SpeciesTransition { catalog: String, from: &'static str, to: &'static str },
    DaoSave { catalog: String },
    DaoLoad { catalog: String },
    DaoDelete { catalog: String },
}

/// Receives `Event`s as they happen. The default `NullSink` discards
/// everything; a host application supplies its own (e.g. one that calls
/// into `tracing` or increments Prometheus counters).
pub trait Sink {
    fn record(&self, event: &Event);
}

/// Discards every event. The default for a freshly constructed `Catalog`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl Sink for NullSink {
    fn record(&self, _event: &Event) {}
}

#[cfg(test)]
mod tests {
    use super::{Event, NullSink, Sink};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink(RefCell<Vec<String>>);

    impl Sink for RecordingSink {
        fn record(&self, event: &Event) {
            self.0.borrow_mut().push(format!("{event:?}"));
        }
    }

    #[test]
    fn null_sink_discards() {
        NullSink.record(&Event::DaoSave {
            catalog: "c".into(),
        });
    }

    #[test]
    fn recording_sink_collects() {
        let sink = RecordingSink::default();
        sink.record(&Event::DaoSave {
            catalog: "c".into(),
        });
        assert_eq!(sink.0.borrow().len(), 1);
    }
}
