//! The card registry.

use crate::credential::Credential;
use crate::error::CardError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use workid_types::{Address, CardKind, CardProfile, LedgerEvent, Timestamp, TokenId};

/// Issues and tracks cards of one [`CardKind`].
///
/// Invariant: `holders` and `credentials` describe the same set of cards;
/// every address appears in `holders` at most once.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CredentialRegistry {
    kind: CardKind,
    name: String,
    symbol: String,
    /// The only address allowed to mint, invalidate and burn.
    issuer: Address,
    next_token_id: TokenId,
    credentials: BTreeMap<TokenId, Credential>,
    holders: BTreeMap<Address, TokenId>,
    #[serde(skip)]
    pending_events: Vec<LedgerEvent>,
}

impl CredentialRegistry {
    pub fn new(
        kind: CardKind,
        name: impl Into<String>,
        symbol: impl Into<String>,
        issuer: Address,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            symbol: symbol.into(),
            issuer,
            next_token_id: 1,
            credentials: BTreeMap::new(),
            holders: BTreeMap::new(),
            pending_events: Vec::new(),
        }
    }

    pub fn kind(&self) -> CardKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn issuer(&self) -> Address {
        self.issuer
    }

    /// Number of cards currently in existence (burned cards excluded).
    pub fn total_supply(&self) -> usize {
        self.credentials.len()
    }

    /// Issue a card to `owner` with no profile record.
    pub fn mint(&mut self, caller: &Address, owner: &Address, uri: &str) -> Result<TokenId, CardError> {
        self.issue(caller, owner, uri, None)
    }

    /// Issue a card to `owner`, storing a typed profile alongside it.
    pub fn mint_with_profile(
        &mut self,
        caller: &Address,
        owner: &Address,
        uri: &str,
        profile: CardProfile,
    ) -> Result<TokenId, CardError> {
        if profile.kind() != self.kind {
            return Err(CardError::ProfileMismatch {
                expected: self.kind,
                got: profile.kind(),
            });
        }
        self.issue(caller, owner, uri, Some(profile))
    }

    /// Set the end of validity of a card. A later call may move it either way.
    pub fn invalidate(
        &mut self,
        caller: &Address,
        token_id: TokenId,
        end_time: Timestamp,
        now: Timestamp,
    ) -> Result<(), CardError> {
        self.require_issuer(caller)?;
        if end_time <= now {
            return Err(CardError::InvalidEndTime { end_time, now });
        }
        let credential = self
            .credentials
            .get_mut(&token_id)
            .ok_or(CardError::TokenNotFound(token_id))?;
        credential.expiry = Some(end_time);

        tracing::info!(kind = %self.kind, token_id, end_time = %end_time, "card end time set");
        self.pending_events.push(LedgerEvent::CredentialEnded {
            kind: self.kind,
            token_id,
            end_time,
        });
        Ok(())
    }

    /// Destroy `owner`'s card, freeing the address for a future mint.
    pub fn burn(&mut self, caller: &Address, owner: &Address) -> Result<TokenId, CardError> {
        self.require_issuer(caller)?;
        let token_id = self
            .holders
            .remove(owner)
            .ok_or(CardError::NoCard(*owner))?;
        self.credentials.remove(&token_id);

        tracing::info!(kind = %self.kind, owner = %owner, token_id, "card burned");
        self.pending_events.push(LedgerEvent::CredentialBurned {
            kind: self.kind,
            owner: *owner,
            token_id,
        });
        Ok(token_id)
    }

    pub fn is_valid(&self, token_id: TokenId, now: Timestamp) -> Result<bool, CardError> {
        self.credential(token_id).map(|c| c.is_valid(now))
    }

    pub fn credential_id_of(&self, owner: &Address) -> Result<TokenId, CardError> {
        self.holders
            .get(owner)
            .copied()
            .ok_or(CardError::NoCard(*owner))
    }

    pub fn token_uri(&self, token_id: TokenId) -> Result<&str, CardError> {
        self.credential(token_id).map(|c| c.uri.as_str())
    }

    pub fn owner_of(&self, token_id: TokenId) -> Result<Address, CardError> {
        self.credential(token_id).map(|c| c.owner)
    }

    pub fn expiry_of(&self, token_id: TokenId) -> Result<Option<Timestamp>, CardError> {
        self.credential(token_id).map(|c| c.expiry)
    }

    pub fn profile_of(&self, token_id: TokenId) -> Result<Option<&CardProfile>, CardError> {
        self.credential(token_id).map(|c| c.profile.as_ref())
    }

    /// 1 if `owner` holds a card, else 0.
    pub fn balance_of(&self, owner: &Address) -> u64 {
        u64::from(self.holders.contains_key(owner))
    }

    pub fn credential(&self, token_id: TokenId) -> Result<&Credential, CardError> {
        self.credentials
            .get(&token_id)
            .ok_or(CardError::TokenNotFound(token_id))
    }

    /// Drain the events queued by successful mutations since the last call.
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn issue(
        &mut self,
        caller: &Address,
        owner: &Address,
        uri: &str,
        profile: Option<CardProfile>,
    ) -> Result<TokenId, CardError> {
        self.require_issuer(caller)?;
        if owner.is_zero() {
            return Err(CardError::NullOwner);
        }
        if let Some(&token_id) = self.holders.get(owner) {
            return Err(CardError::AlreadyHolds {
                owner: *owner,
                token_id,
            });
        }
        if uri.trim().is_empty() {
            return Err(CardError::EmptyUri);
        }
        let token_id = self.next_token_id;
        let next = token_id.checked_add(1).ok_or(CardError::Overflow)?;

        self.next_token_id = next;
        self.credentials.insert(
            token_id,
            Credential {
                token_id,
                owner: *owner,
                uri: uri.to_string(),
                expiry: None,
                profile,
            },
        );
        self.holders.insert(*owner, token_id);

        tracing::info!(kind = %self.kind, owner = %owner, token_id, "card minted");
        self.pending_events.push(LedgerEvent::CredentialMinted {
            kind: self.kind,
            owner: *owner,
            token_id,
            uri: uri.to_string(),
        });
        Ok(token_id)
    }

    fn require_issuer(&self, caller: &Address) -> Result<(), CardError> {
        if *caller != self.issuer {
            return Err(CardError::NotIssuer(*caller));
        }
        Ok(())
    }
}
