use thiserror::Error;
use workid_card::CardError;
use workid_stake::StakeError;
use workid_types::{Address, Amount, ErrorKind, Timestamp, TokenId};

use crate::session::SessionStatus;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("{0} doesn't have any employee card")]
    NoCredential(Address),

    #[error("employee card {0} must still be valid to participate in governance")]
    CredentialExpired(TokenId),

    #[error("{0} doesn't have any voting power")]
    NoVotingPower(Address),

    #[error("proposal description can't be empty")]
    EmptyDescription,

    #[error("proposal start {start_time} can't be in the past (now {now})")]
    StartInPast { start_time: Timestamp, now: Timestamp },

    #[error("proposal end {end_time} must be after its start {start_time}")]
    EndBeforeStart {
        start_time: Timestamp,
        end_time: Timestamp,
    },

    #[error("voting session {0} doesn't exist")]
    SessionNotFound(u64),

    #[error("voting session {session_id} isn't open (status: {status})")]
    SessionNotOpen {
        session_id: u64,
        status: SessionStatus,
    },

    #[error("{voter} has already voted on session {session_id}")]
    AlreadyVoted { voter: Address, session_id: u64 },

    #[error("not enough voting power: requested {requested}, available {available}")]
    InsufficientPower { requested: Amount, available: Amount },

    #[error("arithmetic overflow in vote tally")]
    Overflow,

    #[error("card registry: {0}")]
    Card(#[from] CardError),

    #[error("stake vault: {0}")]
    Stake(#[from] StakeError),
}

impl GovernanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoCredential(_) | Self::CredentialExpired(_) => ErrorKind::Unauthorized,
            Self::NoVotingPower(_) | Self::InsufficientPower { .. } => {
                ErrorKind::InsufficientResource
            }
            Self::EmptyDescription | Self::EndBeforeStart { .. } | Self::Overflow => {
                ErrorKind::InvalidArgument
            }
            Self::StartInPast { .. } | Self::SessionNotOpen { .. } => ErrorKind::TemporalViolation,
            Self::SessionNotFound(_) => ErrorKind::NotFound,
            Self::AlreadyVoted { .. } => ErrorKind::AlreadyDone,
            Self::Card(e) => e.kind(),
            Self::Stake(e) => e.kind(),
        }
    }
}
