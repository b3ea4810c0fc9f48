//! The replayable event feed: an append-only log plus synchronous listeners.

use serde::{Deserialize, Serialize};
use workid_types::{LedgerEvent, Timestamp};

/// One event in the feed, stamped with its global position and the ledger
/// time of the command that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub seq: u64,
    pub at: Timestamp,
    pub event: LedgerEvent,
}

/// Append-only, sequence-numbered history of every applied command's events.
///
/// Sequence numbers start at 0 and never repeat.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<LoggedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, at: Timestamp, event: LedgerEvent) -> &LoggedEvent {
        let seq = self.entries.len() as u64;
        self.entries.push(LoggedEvent { seq, at, event });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[LoggedEvent] {
        &self.entries
    }

    /// Entries with `seq >= from`.
    pub fn since(&self, from: u64) -> &[LoggedEvent] {
        let start = usize::try_from(from).unwrap_or(usize::MAX).min(self.entries.len());
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub type Listener = Box<dyn Fn(&LoggedEvent) + Send + Sync>;

/// Synchronous fan-out event bus.
///
/// Listeners are invoked inline while the ledger is applying a command;
/// keep handlers fast.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &LoggedEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
