//! WID, the fungible base token that gets staked for voting power.
//!
//! A plain balance ledger: the token owner mints and burns, holders
//! transfer and grant allowances, and spenders pull with `transfer_from`.
//! Every successful mutation queues one [`LedgerEvent`](workid_types::LedgerEvent)
//! which the composition root drains after the command completes.

pub mod error;
pub mod ledger;

pub use error::TokenError;
pub use ledger::BaseToken;
