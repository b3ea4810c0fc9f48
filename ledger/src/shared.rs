//! Thread-safe handle giving concurrent callers one global command order.

use std::sync::{Arc, Mutex, MutexGuard};
use workid_types::Address;

use crate::command::{Command, Receipt};
use crate::ledger::WorkIdLedger;
use crate::LedgerError;

/// Cloneable handle to a single [`WorkIdLedger`].
///
/// Each `apply` holds the lock for the whole command, so commands from
/// different threads never interleave.
#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<WorkIdLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: WorkIdLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    // A panicking listener can poison the lock; the ledger itself is
    // still consistent because mutation happens before events fan out.
    fn lock(&self) -> MutexGuard<'_, WorkIdLedger> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn apply(&self, caller: &Address, command: Command) -> Result<Receipt, LedgerError> {
        self.lock().apply(caller, command)
    }

    /// Run a read-only closure against a consistent view.
    pub fn read<R>(&self, f: impl FnOnce(&WorkIdLedger) -> R) -> R {
        f(&self.lock())
    }
}
