//! Card registry errors.

use thiserror::Error;
use workid_types::{Address, CardKind, ErrorKind, Timestamp, TokenId};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("caller {0} is not the card issuer")]
    NotIssuer(Address),

    #[error("{owner} already holds card {token_id}; an address can only have 1 card")]
    AlreadyHolds { owner: Address, token_id: TokenId },

    #[error("end time {end_time} must be in the future (now {now})")]
    InvalidEndTime { end_time: Timestamp, now: Timestamp },

    #[error("card {0} does not exist")]
    TokenNotFound(TokenId),

    #[error("{0} does not have any card")]
    NoCard(Address),

    #[error("card URI must not be empty")]
    EmptyUri,

    #[error("cards cannot be issued to the null address")]
    NullOwner,

    #[error("{got} profile cannot be attached to a {expected} card")]
    ProfileMismatch { expected: CardKind, got: CardKind },

    #[error("card id space exhausted")]
    Overflow,
}

impl CardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotIssuer(_) => ErrorKind::Unauthorized,
            Self::AlreadyHolds { .. } => ErrorKind::AlreadyExists,
            Self::InvalidEndTime { .. } => ErrorKind::TemporalViolation,
            Self::TokenNotFound(_) | Self::NoCard(_) => ErrorKind::NotFound,
            Self::EmptyUri | Self::NullOwner | Self::ProfileMismatch { .. } | Self::Overflow => {
                ErrorKind::InvalidArgument
            }
        }
    }
}
