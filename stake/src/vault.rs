//! The stake vault: custody of principal and accounting of weight.

use crate::deposit::{DepositId, StakeDeposit};
use crate::error::StakeError;
use crate::tier::StakeTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use workid_token::BaseToken;
use workid_types::{Address, Amount, LedgerEvent, Timestamp};

/// Deposits of a single owner.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct OwnerDeposits {
    next_id: DepositId,
    live: BTreeMap<DepositId, StakeDeposit>,
}

/// Locks WID for a tier and mints a non-transferable weighted balance.
///
/// The vault owns the base token ledger it custodies principal in; the
/// principal sits at the vault's own `address`. Each deposit is
/// independent: unstaking one never touches the weight of another.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StakeVault {
    address: Address,
    token: BaseToken,
    deposits: BTreeMap<Address, OwnerDeposits>,
    /// Weighted balance per owner (sum of live deposit weights).
    weights: BTreeMap<Address, Amount>,
    total_weight: Amount,
    #[serde(skip)]
    pending_events: Vec<LedgerEvent>,
}

impl StakeVault {
    /// Create a vault custodying principal at `address` in `token`.
    pub fn new(address: Address, token: BaseToken) -> Self {
        Self {
            address,
            token,
            deposits: BTreeMap::new(),
            weights: BTreeMap::new(),
            total_weight: Amount::ZERO,
            pending_events: Vec::new(),
        }
    }

    /// Custody address; holders approve this address before staking.
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn token(&self) -> &BaseToken {
        &self.token
    }

    pub fn token_mut(&mut self) -> &mut BaseToken {
        &mut self.token
    }

    /// Voting power: the sum of weight over the owner's live deposits.
    pub fn voting_power_of(&self, owner: &Address) -> Amount {
        self.weights.get(owner).copied().unwrap_or(Amount::ZERO)
    }

    /// Total weight across all owners.
    pub fn total_weight(&self) -> Amount {
        self.total_weight
    }

    /// Principal currently held in custody.
    pub fn total_principal(&self) -> Amount {
        self.token.balance_of(&self.address)
    }

    pub fn deposit(&self, owner: &Address, id: DepositId) -> Option<&StakeDeposit> {
        self.deposits.get(owner).and_then(|d| d.live.get(&id))
    }

    /// Live deposits of `owner`, ordered by id.
    pub fn deposits_of(&self, owner: &Address) -> Vec<&StakeDeposit> {
        self.deposits
            .get(owner)
            .map(|d| d.live.values().collect())
            .unwrap_or_default()
    }

    /// Lock `amount` of the caller's WID for `tier`.
    ///
    /// The caller must have approved the vault address for at least
    /// `amount`; a short allowance or balance surfaces as a token error.
    pub fn stake(
        &mut self,
        caller: &Address,
        tier: StakeTier,
        amount: Amount,
        now: Timestamp,
    ) -> Result<StakeDeposit, StakeError> {
        if amount.is_zero() {
            return Err(StakeError::ZeroAmount);
        }
        let weighted = tier.weight_for(amount).ok_or(StakeError::Overflow)?;
        let owner_weight = self
            .voting_power_of(caller)
            .checked_add(weighted)
            .ok_or(StakeError::Overflow)?;
        let total_weight = self
            .total_weight
            .checked_add(weighted)
            .ok_or(StakeError::Overflow)?;
        let id = self
            .deposits
            .get(caller)
            .map(|d| d.next_id)
            .unwrap_or(0);
        let next_id = id.checked_add(1).ok_or(StakeError::Overflow)?;

        // The pull is the last fallible step; nothing has been written yet.
        self.token
            .transfer_from(&self.address, caller, &self.address, amount)?;

        let deposit = StakeDeposit {
            id,
            owner: *caller,
            principal: amount,
            tier,
            start_time: now,
            weighted,
        };
        let entry = self.deposits.entry(*caller).or_default();
        entry.next_id = next_id;
        entry.live.insert(id, deposit.clone());
        self.weights.insert(*caller, owner_weight);
        self.total_weight = total_weight;

        tracing::info!(
            owner = %caller,
            deposit_id = id,
            amount = %amount,
            tier = %tier,
            weighted = %weighted,
            "stake deposited"
        );
        self.pending_events.extend(self.token.take_events());
        self.pending_events.push(LedgerEvent::Staked {
            deposit_id: id,
            owner: *caller,
            amount,
            duration_secs: tier.duration_secs(),
            weighted,
            start_time: now,
        });
        Ok(deposit)
    }

    /// Withdraw a matured deposit: principal back to the caller, weight burned.
    pub fn unstake(
        &mut self,
        caller: &Address,
        deposit_id: DepositId,
        now: Timestamp,
    ) -> Result<StakeDeposit, StakeError> {
        let deposit = self
            .deposit(caller, deposit_id)
            .cloned()
            .ok_or(StakeError::DepositNotFound {
                owner: *caller,
                deposit_id,
            })?;
        if !deposit.is_mature(now) {
            return Err(StakeError::TooEarly {
                deposit_id,
                matures_at: deposit.matures_at(),
                now,
            });
        }
        let owner_weight = self
            .voting_power_of(caller)
            .checked_sub(deposit.weighted)
            .ok_or(StakeError::Overflow)?;
        let total_weight = self
            .total_weight
            .checked_sub(deposit.weighted)
            .ok_or(StakeError::Overflow)?;

        self.token.transfer(&self.address, caller, deposit.principal)?;

        if let Some(entry) = self.deposits.get_mut(caller) {
            entry.live.remove(&deposit_id);
        }
        if owner_weight.is_zero() {
            self.weights.remove(caller);
        } else {
            self.weights.insert(*caller, owner_weight);
        }
        self.total_weight = total_weight;

        tracing::info!(
            owner = %caller,
            deposit_id,
            principal = %deposit.principal,
            weighted = %deposit.weighted,
            "stake withdrawn"
        );
        self.pending_events.extend(self.token.take_events());
        self.pending_events.push(LedgerEvent::Unstaked {
            owner: *caller,
            deposit_id,
            principal: deposit.principal,
        });
        self.pending_events.push(LedgerEvent::WeightBurned {
            owner: *caller,
            weighted: deposit.weighted,
        });
        Ok(deposit)
    }

    /// Drain queued events, including those of the custodied token.
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        let mut events = std::mem::take(&mut self.pending_events);
        events.extend(self.token.take_events());
        events
    }
}
