//! Proposal sessions and their time-derived status.

use serde::{Deserialize, Serialize};
use std::fmt;
use workid_types::{Address, Amount, Timestamp};

/// Sequential session identifier, starting at 0.
pub type SessionId = u64;

/// Lifecycle of a session: `Pending → InProgress → Ended`.
///
/// Never stored; always computed from the session window and `now`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SessionStatus {
    Pending,
    InProgress,
    Ended,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::InProgress => "in progress",
            Self::Ended => "ended",
        };
        f.write_str(label)
    }
}

/// A time-boxed yes/no vote on a textual proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSession {
    pub id: SessionId,
    pub proposer: Address,
    pub description: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub vote_count_yes: Amount,
    pub vote_count_no: Amount,
}

impl ProposalSession {
    pub fn status(&self, now: Timestamp) -> SessionStatus {
        if now < self.start_time {
            SessionStatus::Pending
        } else if now >= self.end_time {
            SessionStatus::Ended
        } else {
            SessionStatus::InProgress
        }
    }

    pub fn is_open(&self, now: Timestamp) -> bool {
        self.status(now) == SessionStatus::InProgress
    }
}
