//! Stake-vault errors.

use thiserror::Error;
use workid_token::TokenError;
use workid_types::{Address, ErrorKind, Timestamp};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StakeError {
    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("duration {0}s is not a stake tier (6 months, 1 year, 3 years or 5 years)")]
    InvalidTier(u64),

    #[error("deposit {deposit_id} not found for {owner}")]
    DepositNotFound { owner: Address, deposit_id: u64 },

    #[error("deposit {deposit_id} is locked until {matures_at} (now {now})")]
    TooEarly {
        deposit_id: u64,
        matures_at: Timestamp,
        now: Timestamp,
    },

    #[error("arithmetic overflow in stake accounting")]
    Overflow,

    #[error("token transfer failed: {0}")]
    Token(#[from] TokenError),
}

impl StakeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ZeroAmount | Self::InvalidTier(_) | Self::Overflow => ErrorKind::InvalidArgument,
            Self::DepositNotFound { .. } => ErrorKind::NotFound,
            Self::TooEarly { .. } => ErrorKind::TemporalViolation,
            Self::Token(e) => e.kind(),
        }
    }
}
