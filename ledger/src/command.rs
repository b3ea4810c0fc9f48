//! The state-changing command surface and what a successful command returns.

use serde::{Deserialize, Serialize};
use workid_governance::SessionId;
use workid_stake::{DepositId, StakeDeposit};
use workid_types::{Address, Amount, CardKind, CardProfile, Timestamp, TokenId, VoteChoice};

use crate::events::LoggedEvent;

/// One state-changing operation, applied on behalf of an authenticated caller.
///
/// Time fields are Unix seconds. Stake durations are given in seconds and
/// must be one of the four tier lengths.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    // Issuer
    MintCard {
        kind: CardKind,
        owner: Address,
        uri: String,
        #[serde(default)]
        profile: Option<CardProfile>,
    },
    InvalidateCard {
        kind: CardKind,
        token_id: TokenId,
        end_time: Timestamp,
    },
    BurnCard {
        kind: CardKind,
        owner: Address,
    },

    // Token owner
    MintTokens {
        to: Address,
        amount: Amount,
    },
    BurnTokens {
        from: Address,
        amount: Amount,
    },

    // Any holder
    Transfer {
        to: Address,
        amount: Amount,
    },
    Approve {
        spender: Address,
        amount: Amount,
    },
    TransferFrom {
        from: Address,
        to: Address,
        amount: Amount,
    },

    /// Stake directly with the vault.
    Stake {
        duration_secs: u64,
        amount: Amount,
    },
    Unstake {
        deposit_id: DepositId,
    },
    /// Stake through governance; requires a valid employee card.
    GovernanceStake {
        duration_secs: u64,
        amount: Amount,
    },
    GovernanceUnstake {
        deposit_id: DepositId,
    },

    // Governance
    AddProposal {
        description: String,
        start_time: Timestamp,
        end_time: Timestamp,
    },
    Vote {
        session_id: SessionId,
        choice: VoteChoice,
        power: Amount,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MintCard { .. } => "mint_card",
            Self::InvalidateCard { .. } => "invalidate_card",
            Self::BurnCard { .. } => "burn_card",
            Self::MintTokens { .. } => "mint_tokens",
            Self::BurnTokens { .. } => "burn_tokens",
            Self::Transfer { .. } => "transfer",
            Self::Approve { .. } => "approve",
            Self::TransferFrom { .. } => "transfer_from",
            Self::Stake { .. } => "stake",
            Self::Unstake { .. } => "unstake",
            Self::GovernanceStake { .. } => "governance_stake",
            Self::GovernanceUnstake { .. } => "governance_unstake",
            Self::AddProposal { .. } => "add_proposal",
            Self::Vote { .. } => "vote",
        }
    }
}

/// The command-specific result of a successful [`Command`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    CardMinted { kind: CardKind, token_id: TokenId },
    CardInvalidated { kind: CardKind, token_id: TokenId, end_time: Timestamp },
    CardBurned { kind: CardKind, token_id: TokenId },
    TokensMoved,
    Staked { deposit: StakeDeposit },
    Unstaked { deposit: StakeDeposit },
    ProposalRegistered { session_id: SessionId },
    Voted { session_id: SessionId },
}

/// What [`WorkIdLedger::apply`](crate::WorkIdLedger::apply) hands back:
/// the outcome plus every event the command appended to the log, in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub outcome: Outcome,
    pub events: Vec<LoggedEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_tagged_json() {
        let cmd = Command::Vote {
            session_id: 0,
            choice: VoteChoice::Yes,
            power: Amount::parse("0.1").unwrap(),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains(r#""command":"vote""#));
        assert!(json.contains(r#""power":"0.1""#));
        assert_eq!(serde_json::from_str::<Command>(&json).unwrap(), cmd);
    }

    #[test]
    fn mint_card_profile_defaults_to_none() {
        let json = r#"{"command":"mint_card","kind":"Employee","owner":"0x0202020202020202020202020202020202020202","uri":"ipfs://x"}"#;
        let cmd: Command = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            Command::MintCard {
                kind: CardKind::Employee,
                owner: Address::new([2; 20]),
                uri: "ipfs://x".into(),
                profile: None,
            }
        );
        assert_eq!(cmd.name(), "mint_card");
    }
}
