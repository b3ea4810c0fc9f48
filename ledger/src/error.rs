use thiserror::Error;
use workid_card::CardError;
use workid_governance::GovernanceError;
use workid_stake::StakeError;
use workid_token::TokenError;
use workid_types::{Address, ErrorKind};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("token: {0}")]
    Token(#[from] TokenError),

    #[error("stake vault: {0}")]
    Stake(#[from] StakeError),

    #[error("card registry: {0}")]
    Card(#[from] CardError),

    #[error("governance: {0}")]
    Governance(#[from] GovernanceError),

    #[error("{0} holds staked principal and can only be moved by the stake vault")]
    CustodyLocked(Address),

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot encoding error: {0}")]
    Snapshot(String),

    #[error("snapshot checksum mismatch")]
    ChecksumMismatch,

    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Token(e) => e.kind(),
            Self::Stake(e) => e.kind(),
            Self::Card(e) => e.kind(),
            Self::Governance(e) => e.kind(),
            Self::CustodyLocked(_) => ErrorKind::Unauthorized,
            Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            Self::Config(_)
            | Self::Snapshot(_)
            | Self::ChecksumMismatch
            | Self::UnsupportedVersion { .. }
            | Self::Io(_) => ErrorKind::InvalidArgument,
        }
    }
}
