//! Error taxonomy shared across crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The category of a rejected operation.
///
/// Every crate-level error maps onto exactly one kind so callers can
/// branch on the category without matching every variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The referenced entity was never created (or no longer exists).
    NotFound,
    /// A uniqueness invariant would be violated.
    AlreadyExists,
    /// The caller lacks the required role or credential.
    Unauthorized,
    /// Malformed, zero or out-of-range input.
    InvalidArgument,
    /// Attempted outside the operation's valid time window.
    TemporalViolation,
    /// The action was already performed and may happen only once.
    AlreadyDone,
    /// Balance, allowance or voting power shortfall.
    InsufficientResource,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
            Self::Unauthorized => "unauthorized",
            Self::InvalidArgument => "invalid_argument",
            Self::TemporalViolation => "temporal_violation",
            Self::AlreadyDone => "already_done",
            Self::InsufficientResource => "insufficient_resource",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse errors for the textual forms of the fundamental types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

impl TypesError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}
