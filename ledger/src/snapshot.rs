//! Ledger snapshots: the full persisted state plus an integrity checksum.
//!
//! The state is bincode-encoded once; the Blake2b-256 checksum covers the
//! version and those exact bytes, so any bit flip in the stored file is
//! caught before the state is decoded.

use serde::{Deserialize, Serialize};
use std::path::Path;
use workid_types::Timestamp;

use crate::ledger::LedgerState;
use crate::LedgerError;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Blake2b-256 of `version` and `state`.
    pub hash: [u8; 32],
    pub version: u32,
    /// Ledger time at capture. Not covered by the checksum.
    pub taken_at: Timestamp,
    /// bincode-encoded [`LedgerState`].
    pub state: Vec<u8>,
}

impl LedgerSnapshot {
    pub fn create(state: &LedgerState, taken_at: Timestamp) -> Result<Self, LedgerError> {
        let state = bincode::serialize(state).map_err(|e| LedgerError::Snapshot(e.to_string()))?;
        let mut snap = Self {
            hash: [0u8; 32],
            version: SNAPSHOT_VERSION,
            taken_at,
            state,
        };
        snap.hash = snap.compute_hash();
        Ok(snap)
    }

    fn compute_hash(&self) -> [u8; 32] {
        use blake2::digest::consts::U32;
        use blake2::{Blake2b, Digest};

        let mut hasher = Blake2b::<U32>::new();
        hasher.update(self.version.to_le_bytes());
        hasher.update(&self.state);

        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        out
    }

    /// Verify the checksum matches the encoded state.
    pub fn verify(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Hex form of the checksum, for display.
    pub fn hash_hex(&self) -> String {
        self.hash.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Decode the state after checking version and checksum.
    pub fn restore(&self) -> Result<LedgerState, LedgerError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(LedgerError::UnsupportedVersion {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        if !self.verify() {
            return Err(LedgerError::ChecksumMismatch);
        }
        bincode::deserialize(&self.state).map_err(|e| LedgerError::Snapshot(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        bincode::serialize(self).map_err(|e| LedgerError::Snapshot(e.to_string()))
    }

    /// Decode a snapshot envelope. The checksum is checked by [`restore`](Self::restore).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        bincode::deserialize(bytes).map_err(|e| LedgerError::Snapshot(e.to_string()))
    }

    /// Write to `path`, replacing any previous file atomically via a sibling temp file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), LedgerError> {
        let path = path.as_ref();
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, self.to_bytes()?)?;
        std::fs::rename(&tmp, path)?;
        tracing::debug!(path = %path.display(), hash = %self.hash_hex(), "snapshot written");
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }
}
