//! WorkID ledger, the composition root.
//!
//! Wires the employee and member card registries, the WID token, the
//! stake vault and governance into one state machine driven by
//! [`Command`]s. Every command is applied atomically and in a single
//! global order; its events are appended to a sequence-numbered
//! [`EventLog`] and fanned out on an [`EventBus`]. The whole state can be
//! captured in a checksummed [`LedgerSnapshot`].

pub mod command;
pub mod config;
pub mod error;
pub mod events;
pub mod ledger;
pub mod shared;
pub mod snapshot;

pub use command::{Command, Outcome, Receipt};
pub use config::LedgerConfig;
pub use error::LedgerError;
pub use events::{EventBus, EventLog, Listener, LoggedEvent};
pub use ledger::{LedgerState, WorkIdLedger};
pub use shared::SharedLedger;
pub use snapshot::{LedgerSnapshot, SNAPSHOT_VERSION};
