//! The WID balance ledger.

use crate::error::TokenError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use workid_types::{Address, Amount, LedgerEvent, WID_DECIMALS};

/// Owner-controlled fungible token.
///
/// All checks run before any balance is touched, so a rejected call
/// leaves the ledger exactly as it was.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BaseToken {
    name: String,
    symbol: String,
    /// The only address allowed to mint and burn.
    owner: Address,
    balances: BTreeMap<Address, Amount>,
    /// (holder, spender) → remaining allowance.
    allowances: BTreeMap<(Address, Address), Amount>,
    total_supply: Amount,
    #[serde(skip)]
    pending_events: Vec<LedgerEvent>,
}

impl BaseToken {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, owner: Address) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            owner,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
            total_supply: Amount::ZERO,
            pending_events: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u32 {
        WID_DECIMALS
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn balance_of(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or(Amount::ZERO)
    }

    pub fn allowance(&self, holder: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*holder, *spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Create `amount` new tokens for `to`. Owner only.
    pub fn mint(&mut self, caller: &Address, to: &Address, amount: Amount) -> Result<(), TokenError> {
        self.require_owner(caller)?;
        if amount.is_zero() {
            return Err(TokenError::ZeroAmount);
        }
        if to.is_zero() {
            return Err(TokenError::NullAddress);
        }
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.total_supply = supply;
        self.balances.insert(*to, balance);
        tracing::info!(to = %to, amount = %amount, "minted base token");
        self.pending_events.push(LedgerEvent::Transfer {
            from: Address::ZERO,
            to: *to,
            amount,
        });
        Ok(())
    }

    /// Destroy `amount` tokens held by `from`. Owner only.
    pub fn burn(&mut self, caller: &Address, from: &Address, amount: Amount) -> Result<(), TokenError> {
        self.require_owner(caller)?;
        if amount.is_zero() {
            return Err(TokenError::ZeroAmount);
        }
        let available = self.balance_of(from);
        let balance = available
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance {
                needed: amount,
                available,
            })?;
        let supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(TokenError::Overflow)?;

        self.total_supply = supply;
        self.set_balance(from, balance);
        tracing::info!(from = %from, amount = %amount, "burned base token");
        self.pending_events.push(LedgerEvent::Transfer {
            from: *from,
            to: Address::ZERO,
            amount,
        });
        Ok(())
    }

    /// Move `amount` from the caller to `to`.
    pub fn transfer(&mut self, caller: &Address, to: &Address, amount: Amount) -> Result<(), TokenError> {
        self.move_balance(caller, to, amount)
    }

    /// Allow `spender` to pull up to `amount` from the caller. Overwrites any previous allowance.
    pub fn approve(&mut self, caller: &Address, spender: &Address, amount: Amount) -> Result<(), TokenError> {
        if caller.is_zero() || spender.is_zero() {
            return Err(TokenError::NullAddress);
        }
        self.allowances.insert((*caller, *spender), amount);
        tracing::info!(owner = %caller, spender = %spender, amount = %amount, "approved base token spender");
        self.pending_events.push(LedgerEvent::Approval {
            owner: *caller,
            spender: *spender,
            amount,
        });
        Ok(())
    }

    /// `spender` moves `amount` from `from` to `to`, consuming allowance.
    pub fn transfer_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let allowed = self.allowance(from, spender);
        let remaining = allowed
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientAllowance {
                needed: amount,
                available: allowed,
            })?;
        self.move_balance(from, to, amount)?;
        self.allowances.insert((*from, *spender), remaining);
        Ok(())
    }

    /// Drain the events queued by successful mutations since the last call.
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn require_owner(&self, caller: &Address) -> Result<(), TokenError> {
        if *caller != self.owner {
            return Err(TokenError::NotOwner(*caller));
        }
        Ok(())
    }

    fn move_balance(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<(), TokenError> {
        if from.is_zero() || to.is_zero() {
            return Err(TokenError::NullAddress);
        }
        let available = self.balance_of(from);
        let from_balance = available
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance {
                needed: amount,
                available,
            })?;
        if from != to {
            let to_balance = self
                .balance_of(to)
                .checked_add(amount)
                .ok_or(TokenError::Overflow)?;
            self.set_balance(from, from_balance);
            self.set_balance(to, to_balance);
        }
        tracing::debug!(from = %from, to = %to, amount = %amount, "transferred base token");
        self.pending_events.push(LedgerEvent::Transfer {
            from: *from,
            to: *to,
            amount,
        });
        Ok(())
    }

    fn set_balance(&mut self, holder: &Address, balance: Amount) {
        if balance.is_zero() {
            self.balances.remove(holder);
        } else {
            self.balances.insert(*holder, balance);
        }
    }
}
