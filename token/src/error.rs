//! BaseToken errors.

use workid_types::{Address, Amount, ErrorKind};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("caller {0} is not the token owner")]
    NotOwner(Address),

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    #[error("insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: Amount, available: Amount },

    #[error("the null address cannot send or receive tokens")]
    NullAddress,

    #[error("arithmetic overflow in token accounting")]
    Overflow,
}

impl TokenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotOwner(_) => ErrorKind::Unauthorized,
            Self::ZeroAmount | Self::NullAddress | Self::Overflow => ErrorKind::InvalidArgument,
            Self::InsufficientBalance { .. } | Self::InsufficientAllowance { .. } => {
                ErrorKind::InsufficientResource
            }
        }
    }
}
