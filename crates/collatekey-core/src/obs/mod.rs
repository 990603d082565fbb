//! Observability: runtime counters and the sink abstraction.
//!
//! Codec logic emits events through `MetricsSink` only; it never touches the
//! counter state directly.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventRegistry, EventReport, EventState};
pub use sink::{CodecOp, GlobalMetricsSink, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all};
