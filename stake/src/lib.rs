//! Stake vault. Locks WID for a fixed tier and mints voting weight.
//!
//! `weight(d) = principal(d) × multiplier(tier(d))`
//!
//! This crate handles:
//! - The four duration tiers and their multipliers
//! - Custody of staked principal at the vault's own address
//! - Per-deposit weight minting and burning
//! - Maturity checks (no early withdrawal)

pub mod deposit;
pub mod error;
pub mod tier;
pub mod vault;

pub use deposit::{DepositId, StakeDeposit};
pub use error::StakeError;
pub use tier::StakeTier;
pub use vault::StakeVault;
