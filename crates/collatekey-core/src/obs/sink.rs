//! Metrics sink boundary.
//!
//! Codec logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::{
    error::CodecErrorKind,
    obs::metrics::{self, EventRegistry, EventReport},
};

///
/// CodecOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CodecOp {
    Encode,
    Decode,
    Extract,
    Reverse,
}

impl CodecOp {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Encode => "encode",
            Self::Decode => "decode",
            Self::Extract => "extract",
            Self::Reverse => "reverse",
        }
    }
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Completed { op: CodecOp, bytes: u64 },
    Failed { op: CodecOp, kind: CodecErrorKind },
    FieldsReversed { fields: u64 },
}

///
/// MetricsSink
///

pub trait MetricsSink: Send + Sync {
    fn record(&self, event: MetricsEvent);
}

impl MetricsSink for EventRegistry {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::Completed { op, bytes } => {
                self.with_state_mut(|m| match op {
                    CodecOp::Encode => {
                        m.ops.encode_calls = m.ops.encode_calls.saturating_add(1);
                        m.ops.bytes_encoded = m.ops.bytes_encoded.saturating_add(bytes);
                    }
                    CodecOp::Decode => {
                        m.ops.decode_calls = m.ops.decode_calls.saturating_add(1);
                        m.ops.bytes_decoded = m.ops.bytes_decoded.saturating_add(bytes);
                    }
                    CodecOp::Extract => {
                        m.ops.extract_calls = m.ops.extract_calls.saturating_add(1);
                    }
                    CodecOp::Reverse => {
                        m.ops.reverse_calls = m.ops.reverse_calls.saturating_add(1);
                    }
                });
            }

            MetricsEvent::Failed { op, kind } => {
                self.with_state_mut(|m| {
                    let entry = m
                        .errors
                        .entry(format!("{}.{}", op.label(), kind.label()))
                        .or_default();
                    *entry = entry.saturating_add(1);
                });
            }

            MetricsEvent::FieldsReversed { fields } => {
                self.with_state_mut(|m| {
                    m.ops.fields_reversed = m.ops.fields_reversed.saturating_add(fields);
                });
            }
        }
    }
}

///
/// GlobalMetricsSink
///
/// Default sink; accumulates into the process-wide registry read by
/// `metrics_report`, whichever thread records.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::global().record(event);
    }
}

/// Snapshot the process-wide metrics state.
#[must_use]
pub fn metrics_report() -> EventReport {
    metrics::global().report()
}

/// Reset the process-wide metrics state.
pub fn metrics_reset_all() {
    metrics::global().reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{codec::Codec, value::Value};
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        thread,
    };

    struct CountingSink {
        calls: AtomicUsize,
    }

    impl MetricsSink for CountingSink {
        fn record(&self, _: MetricsEvent) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn registry_accumulates_and_resets() {
        let registry = EventRegistry::new();

        registry.record(MetricsEvent::Completed {
            op: CodecOp::Encode,
            bytes: 7,
        });
        registry.record(MetricsEvent::Completed {
            op: CodecOp::Encode,
            bytes: 3,
        });
        registry.record(MetricsEvent::Failed {
            op: CodecOp::Decode,
            kind: CodecErrorKind::MalformedInput,
        });
        registry.record(MetricsEvent::FieldsReversed { fields: 2 });

        let report = registry.report();
        assert_eq!(report.counters.ops.encode_calls, 2);
        assert_eq!(report.counters.ops.bytes_encoded, 10);
        assert_eq!(report.counters.ops.fields_reversed, 2);
        assert_eq!(
            report.counters.errors.get("decode.malformed_input").copied(),
            Some(1)
        );
        assert_eq!(report.error_total, 1);

        registry.reset();
        assert_eq!(registry.report(), EventReport::default());
    }

    #[test]
    fn registry_collects_events_from_every_thread() {
        let registry = Arc::new(EventRegistry::new());

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let codec = Codec::default().with_sink(registry.clone());
                thread::spawn(move || codec.encode(&Value::Null))
            })
            .collect();
        for worker in workers {
            worker
                .join()
                .expect("worker should not panic")
                .expect("null should encode");
        }

        let report = registry.report();
        assert_eq!(report.counters.ops.encode_calls, 4);
        assert_eq!(report.counters.ops.bytes_encoded, 8);
    }

    #[test]
    fn global_report_sees_other_threads() {
        // Other tests record into the global registry concurrently, so only
        // growth is asserted.
        let before = metrics_report().counters.ops.encode_calls;

        thread::spawn(|| Codec::default().encode(&Value::Null))
            .join()
            .expect("worker should not panic")
            .expect("null should encode");

        assert!(metrics_report().counters.ops.encode_calls > before);
    }

    #[test]
    fn custom_sinks_receive_every_event() {
        let sink = CountingSink {
            calls: AtomicUsize::new(0),
        };
        sink.record(MetricsEvent::FieldsReversed { fields: 1 });
        sink.record(MetricsEvent::Completed {
            op: CodecOp::Reverse,
            bytes: 4,
        });

        assert_eq!(sink.calls.load(Ordering::SeqCst), 2);
    }
}
