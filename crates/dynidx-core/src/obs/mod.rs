//! Observability: index-maintenance counters and the sink they flow through.
//!
//! Index code never touches metrics state directly; it emits
//! [`MetricsEvent`]s via `sink::record`, and a sink decides what to keep.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, TableCounters};
pub use sink::{
    IndexKind, MetricsEvent, MetricsSink, SkipReason, metrics_report, metrics_reset_all,
    with_metrics_sink,
};
