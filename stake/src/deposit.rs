//! A single time-locked deposit.

use crate::tier::StakeTier;
use serde::{Deserialize, Serialize};
use workid_types::{Address, Amount, Timestamp};

/// Per-owner sequential deposit identifier, starting at 0.
pub type DepositId = u64;

/// A live stake deposit.
///
/// `weighted` is fixed at creation; it is burned together with the
/// deposit on unstake and never changes in between.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeDeposit {
    pub id: DepositId,
    pub owner: Address,
    pub principal: Amount,
    pub tier: StakeTier,
    pub start_time: Timestamp,
    pub weighted: Amount,
}

impl StakeDeposit {
    /// First instant at which the principal may be withdrawn.
    pub fn matures_at(&self) -> Timestamp {
        self.start_time.plus_secs(self.tier.duration_secs())
    }

    pub fn is_mature(&self, now: Timestamp) -> bool {
        self.start_time.has_expired(self.tier.duration_secs(), now)
    }
}
