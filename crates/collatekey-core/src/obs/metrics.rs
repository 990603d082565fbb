use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    sync::{Mutex, PoisonError},
};

///
/// EventState
/// In-memory counters for codec operations.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventState {
    pub ops: EventOps,

    /// Failures keyed by `<op>.<error kind>`.
    pub errors: BTreeMap<String, u64>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Successful calls
    pub encode_calls: u64,
    pub decode_calls: u64,
    pub extract_calls: u64,
    pub reverse_calls: u64,

    // Bytes produced or consumed
    pub bytes_encoded: u64,
    pub bytes_decoded: u64,

    // Fields complemented by reversal
    pub fields_reversed: u64,
}

impl EventState {
    const EMPTY: Self = Self {
        ops: EventOps::ZERO,
        errors: BTreeMap::new(),
    };
}

impl EventOps {
    const ZERO: Self = Self {
        encode_calls: 0,
        decode_calls: 0,
        extract_calls: 0,
        reverse_calls: 0,
        bytes_encoded: 0,
        bytes_decoded: 0,
        fields_reversed: 0,
    };
}

///
/// EventRegistry
///
/// Counter state shared by every thread that records into it.
///

#[derive(Debug, Default)]
pub struct EventRegistry {
    state: Mutex<EventState>,
}

impl EventRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(EventState::EMPTY),
        }
    }

    /// Borrow metrics immutably.
    pub(crate) fn with_state<R>(&self, f: impl FnOnce(&EventState) -> R) -> R {
        f(&self.state.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Borrow metrics mutably.
    pub(crate) fn with_state_mut<R>(&self, f: impl FnOnce(&mut EventState) -> R) -> R {
        f(&mut self.state.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn reset(&self) {
        self.with_state_mut(|m| *m = EventState::EMPTY);
    }

    #[must_use]
    pub fn report(&self) -> EventReport {
        self.with_state(|m| EventReport {
            error_total: m
                .errors
                .values()
                .fold(0u64, |total, count| total.saturating_add(*count)),
            counters: m.clone(),
        })
    }
}

// Process-wide counters behind `GlobalMetricsSink`.
static GLOBAL_EVENTS: EventRegistry = EventRegistry::new();

pub(crate) fn global() -> &'static EventRegistry {
    &GLOBAL_EVENTS
}

///
/// EventReport
/// Snapshot of one registry's counters.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub counters: EventState,
    pub error_total: u64,
}
