use serde::Serialize;
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventReport
/// Ephemeral, in-memory counters for index maintenance on this thread.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub ops: EventOps,
    pub tables: BTreeMap<String, TableCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Declarations
    pub local_indexes_declared: u64,
    pub global_indexes_declared: u64,

    // Table provisioning
    pub tables_ensured: u64,
    pub tables_created: u64,

    // Row maintenance
    pub index_writes: u64,
    pub index_removes: u64,
    pub index_rows_deleted: u64,
    pub index_skips: u64,
}

///
/// TableCounters
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TableCounters {
    pub writes: u64,
    pub removes: u64,
    pub rows_deleted: u64,
    pub skips_blank_key: u64,
    pub skips_not_indexed: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventReport> = RefCell::new(EventReport::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventReport) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventReport) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventReport::default());
}

/// Snapshot the current counters.
pub(crate) fn report() -> EventReport {
    with_state(Clone::clone)
}
