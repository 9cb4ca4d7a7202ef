//! Metrics sink boundary.
//!
//! Index logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::obs::metrics::{self, EventReport};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// IndexKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IndexKind {
    Local,
    Global,
}

///
/// SkipReason
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SkipReason {
    /// Hash value (or a configured range value) was blank.
    BlankKey,
    /// Delete found no row holding the record's id.
    NotIndexed,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent<'a> {
    IndexDeclared {
        entity: &'a str,
        kind: IndexKind,
    },
    TableEnsured {
        table: &'a str,
        created: bool,
    },
    IndexWrite {
        table: &'a str,
    },
    IndexRemove {
        table: &'a str,
        row_deleted: bool,
    },
    IndexSkip {
        table: &'a str,
        reason: SkipReason,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent<'_>);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into global metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent<'_>) {
        match event {
            MetricsEvent::IndexDeclared { kind, .. } => metrics::with_state_mut(|m| match kind {
                IndexKind::Local => {
                    m.ops.local_indexes_declared = m.ops.local_indexes_declared.saturating_add(1);
                }
                IndexKind::Global => {
                    m.ops.global_indexes_declared =
                        m.ops.global_indexes_declared.saturating_add(1);
                }
            }),

            MetricsEvent::TableEnsured { created, .. } => metrics::with_state_mut(|m| {
                m.ops.tables_ensured = m.ops.tables_ensured.saturating_add(1);
                if created {
                    m.ops.tables_created = m.ops.tables_created.saturating_add(1);
                }
            }),

            MetricsEvent::IndexWrite { table } => metrics::with_state_mut(|m| {
                m.ops.index_writes = m.ops.index_writes.saturating_add(1);
                let entry = m.tables.entry(table.to_string()).or_default();
                entry.writes = entry.writes.saturating_add(1);
            }),

            MetricsEvent::IndexRemove { table, row_deleted } => metrics::with_state_mut(|m| {
                m.ops.index_removes = m.ops.index_removes.saturating_add(1);
                let entry = m.tables.entry(table.to_string()).or_default();
                entry.removes = entry.removes.saturating_add(1);

                if row_deleted {
                    m.ops.index_rows_deleted = m.ops.index_rows_deleted.saturating_add(1);
                    entry.rows_deleted = entry.rows_deleted.saturating_add(1);
                }
            }),

            MetricsEvent::IndexSkip { table, reason } => metrics::with_state_mut(|m| {
                m.ops.index_skips = m.ops.index_skips.saturating_add(1);
                let entry = m.tables.entry(table.to_string()).or_default();
                match reason {
                    SkipReason::BlankKey => {
                        entry.skips_blank_key = entry.skips_blank_key.saturating_add(1);
                    }
                    SkipReason::NotIndexed => {
                        entry.skips_not_indexed = entry.skips_not_indexed.saturating_add(1);
                    }
                }
            }),
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent<'_>) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current thread's metrics state.
#[must_use]
pub fn metrics_report() -> EventReport {
    metrics::report()
}

/// Reset all metrics state on the current thread.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
/// The previous sink is restored on every exit, including unwind.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///
