//! Domain events emitted by state-changing operations.
//!
//! Each event carries every field a listener needs to rebuild the change
//! without querying the ledger, so an indexer can reconstruct all state
//! from the feed alone.

use crate::address::Address;
use crate::amount::Amount;
use crate::card::{CardKind, TokenId};
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A yes/no ballot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteChoice {
    Yes,
    No,
}

impl VoteChoice {
    pub fn from_bool(yes: bool) -> Self {
        if yes {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => f.write_str("yes"),
            Self::No => f.write_str("no"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// BaseToken movement. `from` is null for mints, `to` is null for burns.
    Transfer {
        from: Address,
        to: Address,
        amount: Amount,
    },
    /// BaseToken allowance set.
    Approval {
        owner: Address,
        spender: Address,
        amount: Amount,
    },
    CredentialMinted {
        kind: CardKind,
        owner: Address,
        token_id: TokenId,
        uri: String,
    },
    CredentialEnded {
        kind: CardKind,
        token_id: TokenId,
        end_time: Timestamp,
    },
    /// Administrative burn; the card moves to the null address.
    CredentialBurned {
        kind: CardKind,
        owner: Address,
        token_id: TokenId,
    },
    Staked {
        deposit_id: u64,
        owner: Address,
        amount: Amount,
        duration_secs: u64,
        weighted: Amount,
        start_time: Timestamp,
    },
    Unstaked {
        owner: Address,
        deposit_id: u64,
        principal: Amount,
    },
    WeightBurned {
        owner: Address,
        weighted: Amount,
    },
    ProposalSessionRegistered {
        session_id: u64,
        proposer: Address,
        description: String,
        start_time: Timestamp,
        end_time: Timestamp,
    },
    Voted {
        voter: Address,
        session_id: u64,
        choice: VoteChoice,
        power: Amount,
    },
}

impl LedgerEvent {
    /// Short name, used as the structured-log message.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "transfer",
            Self::Approval { .. } => "approval",
            Self::CredentialMinted { .. } => "credential_minted",
            Self::CredentialEnded { .. } => "credential_ended",
            Self::CredentialBurned { .. } => "credential_burned",
            Self::Staked { .. } => "staked",
            Self::Unstaked { .. } => "unstaked",
            Self::WeightBurned { .. } => "weight_burned",
            Self::ProposalSessionRegistered { .. } => "proposal_session_registered",
            Self::Voted { .. } => "voted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_choice_from_bool() {
        assert_eq!(VoteChoice::from_bool(true), VoteChoice::Yes);
        assert_eq!(VoteChoice::from_bool(false), VoteChoice::No);
        assert_eq!(VoteChoice::Yes.to_string(), "yes");
    }

    #[test]
    fn event_names_are_snake_case() {
        let event = LedgerEvent::WeightBurned {
            owner: Address::ZERO,
            weighted: Amount::ZERO,
        };
        assert_eq!(event.name(), "weight_burned");
    }
}
