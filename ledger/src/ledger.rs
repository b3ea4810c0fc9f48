//! The WorkID ledger: one totally ordered, atomic command stream over the
//! card registries, the WID token, the stake vault and governance.

use serde::{Deserialize, Serialize};
use workid_card::CredentialRegistry;
use workid_governance::{
    GovernanceCoordinator, GovernanceError, ProposalSession, SessionId, SessionStatus,
};
use workid_stake::{StakeDeposit, StakeTier, StakeVault};
use workid_token::BaseToken;
use workid_types::{
    Address, Amount, CardKind, CardProfile, Clock, LedgerEvent, Timestamp, TokenId,
};

use crate::command::{Command, Outcome, Receipt};
use crate::config::LedgerConfig;
use crate::events::{EventBus, EventLog, Listener, LoggedEvent};
use crate::snapshot::LedgerSnapshot;
use crate::LedgerError;

/// Everything that survives a restart.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerState {
    /// Owns the employee registry and the vault (which owns the token).
    pub governance: GovernanceCoordinator,
    pub members: CredentialRegistry,
    pub log: EventLog,
}

impl LedgerState {
    pub fn genesis(config: &LedgerConfig) -> Self {
        let employees = CredentialRegistry::new(
            CardKind::Employee,
            config.card_name.clone(),
            config.card_symbol.clone(),
            config.issuer,
        );
        let members = CredentialRegistry::new(
            CardKind::Member,
            config.member_card_name.clone(),
            config.member_card_symbol.clone(),
            config.issuer,
        );
        let token = BaseToken::new(
            config.token_name.clone(),
            config.token_symbol.clone(),
            config.token_owner,
        );
        let vault = StakeVault::new(config.vault_address, token);
        Self {
            governance: GovernanceCoordinator::new(config.governance_address, employees, vault),
            members,
            log: EventLog::new(),
        }
    }
}

/// The composition root.
///
/// Every component validates fully before it mutates, and events are only
/// queued by successful mutations, so a failed [`apply`](Self::apply)
/// leaves both state and log untouched.
pub struct WorkIdLedger {
    state: LedgerState,
    clock: Box<dyn Clock>,
    bus: EventBus,
}

impl WorkIdLedger {
    pub fn new(config: &LedgerConfig, clock: Box<dyn Clock>) -> Self {
        tracing::info!(
            issuer = %config.issuer,
            token_owner = %config.token_owner,
            vault = %config.vault_address,
            "ledger initialised"
        );
        Self::from_state(LedgerState::genesis(config), clock)
    }

    pub fn from_state(state: LedgerState, clock: Box<dyn Clock>) -> Self {
        Self {
            state,
            clock,
            bus: EventBus::new(),
        }
    }

    /// Rebuild from a snapshot after checking its version and checksum.
    pub fn from_snapshot(snapshot: &LedgerSnapshot, clock: Box<dyn Clock>) -> Result<Self, LedgerError> {
        Ok(Self::from_state(snapshot.restore()?, clock))
    }

    pub fn snapshot(&self) -> Result<LedgerSnapshot, LedgerError> {
        LedgerSnapshot::create(&self.state, self.now())
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Register a listener for every event appended from now on.
    pub fn subscribe(&mut self, listener: Listener) {
        self.bus.subscribe(listener);
    }

    // ── Commands ────────────────────────────────────────────────────────

    /// Apply one command as `caller` at the clock's current time.
    pub fn apply(&mut self, caller: &Address, command: Command) -> Result<Receipt, LedgerError> {
        let now = self.now();
        let name = command.name();
        let outcome = match self.execute(caller, command, now) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(command = name, caller = %caller, kind = %e.kind(), error = %e, "command rejected");
                return Err(e);
            }
        };

        let mut events = Vec::new();
        for event in self.drain_component_events() {
            let logged = self.state.log.append(now, event).clone();
            self.bus.emit(&logged);
            events.push(logged);
        }
        tracing::debug!(command = name, caller = %caller, events = events.len(), "command applied");
        Ok(Receipt { outcome, events })
    }

    /// Token commands never debit the vault's custody account directly.
    fn check_custody(&self, caller: &Address, command: &Command) -> Result<(), LedgerError> {
        let vault = self.vault_address();
        let debited = match command {
            Command::Transfer { .. } | Command::Approve { .. } => Some(caller),
            Command::TransferFrom { from, .. } | Command::BurnTokens { from, .. } => Some(from),
            _ => None,
        };
        match debited {
            Some(account) if *account == vault => Err(LedgerError::CustodyLocked(vault)),
            _ => Ok(()),
        }
    }

    fn execute(&mut self, caller: &Address, command: Command, now: Timestamp) -> Result<Outcome, LedgerError> {
        self.check_custody(caller, &command)?;
        let outcome = match command {
            Command::MintCard {
                kind,
                owner,
                uri,
                profile,
            } => {
                let registry = self.registry_mut(kind);
                let token_id = match profile {
                    Some(profile) => registry.mint_with_profile(caller, &owner, &uri, profile)?,
                    None => registry.mint(caller, &owner, &uri)?,
                };
                Outcome::CardMinted { kind, token_id }
            }
            Command::InvalidateCard {
                kind,
                token_id,
                end_time,
            } => {
                self.registry_mut(kind)
                    .invalidate(caller, token_id, end_time, now)?;
                Outcome::CardInvalidated {
                    kind,
                    token_id,
                    end_time,
                }
            }
            Command::BurnCard { kind, owner } => {
                let token_id = self.registry_mut(kind).burn(caller, &owner)?;
                Outcome::CardBurned { kind, token_id }
            }
            Command::MintTokens { to, amount } => {
                self.token_mut().mint(caller, &to, amount)?;
                Outcome::TokensMoved
            }
            Command::BurnTokens { from, amount } => {
                self.token_mut().burn(caller, &from, amount)?;
                Outcome::TokensMoved
            }
            Command::Transfer { to, amount } => {
                self.token_mut().transfer(caller, &to, amount)?;
                Outcome::TokensMoved
            }
            Command::Approve { spender, amount } => {
                self.token_mut().approve(caller, &spender, amount)?;
                Outcome::TokensMoved
            }
            Command::TransferFrom { from, to, amount } => {
                self.token_mut().transfer_from(caller, &from, &to, amount)?;
                Outcome::TokensMoved
            }
            Command::Stake {
                duration_secs,
                amount,
            } => {
                let tier = StakeTier::from_duration_secs(duration_secs)?;
                let deposit = self.state.governance.vault_mut().stake(caller, tier, amount, now)?;
                Outcome::Staked { deposit }
            }
            Command::Unstake { deposit_id } => {
                let deposit = self.state.governance.vault_mut().unstake(caller, deposit_id, now)?;
                Outcome::Unstaked { deposit }
            }
            Command::GovernanceStake {
                duration_secs,
                amount,
            } => {
                let tier = StakeTier::from_duration_secs(duration_secs)?;
                let deposit = self.state.governance.stake(caller, tier, amount, now)?;
                Outcome::Staked { deposit }
            }
            Command::GovernanceUnstake { deposit_id } => {
                let deposit = self.state.governance.unstake(caller, deposit_id, now)?;
                Outcome::Unstaked { deposit }
            }
            Command::AddProposal {
                description,
                start_time,
                end_time,
            } => {
                let session_id = self.state.governance.add_proposal(
                    caller,
                    &description,
                    start_time,
                    end_time,
                    now,
                )?;
                Outcome::ProposalRegistered { session_id }
            }
            Command::Vote {
                session_id,
                choice,
                power,
            } => {
                self.state
                    .governance
                    .vote_on_proposal(caller, session_id, choice, power, now)?;
                Outcome::Voted { session_id }
            }
        };
        Ok(outcome)
    }

    fn drain_component_events(&mut self) -> Vec<LedgerEvent> {
        let mut events = self.state.governance.take_events();
        events.extend(self.state.members.take_events());
        events
    }

    fn registry_mut(&mut self, kind: CardKind) -> &mut CredentialRegistry {
        match kind {
            CardKind::Employee => self.state.governance.registry_mut(),
            CardKind::Member => &mut self.state.members,
        }
    }

    fn token_mut(&mut self) -> &mut BaseToken {
        self.state.governance.vault_mut().token_mut()
    }

    // ── Card queries ────────────────────────────────────────────────────

    pub fn registry(&self, kind: CardKind) -> &CredentialRegistry {
        match kind {
            CardKind::Employee => self.state.governance.registry(),
            CardKind::Member => &self.state.members,
        }
    }

    pub fn is_valid(&self, kind: CardKind, token_id: TokenId) -> Result<bool, LedgerError> {
        Ok(self.registry(kind).is_valid(token_id, self.now())?)
    }

    pub fn credential_id_of(&self, kind: CardKind, owner: &Address) -> Result<TokenId, LedgerError> {
        Ok(self.registry(kind).credential_id_of(owner)?)
    }

    pub fn token_uri(&self, kind: CardKind, token_id: TokenId) -> Result<&str, LedgerError> {
        Ok(self.registry(kind).token_uri(token_id)?)
    }

    pub fn card_owner_of(&self, kind: CardKind, token_id: TokenId) -> Result<Address, LedgerError> {
        Ok(self.registry(kind).owner_of(token_id)?)
    }

    pub fn card_expiry_of(&self, kind: CardKind, token_id: TokenId) -> Result<Option<Timestamp>, LedgerError> {
        Ok(self.registry(kind).expiry_of(token_id)?)
    }

    pub fn card_profile_of(&self, kind: CardKind, token_id: TokenId) -> Result<Option<&CardProfile>, LedgerError> {
        Ok(self.registry(kind).profile_of(token_id)?)
    }

    // ── Token and stake queries ─────────────────────────────────────────

    pub fn token(&self) -> &BaseToken {
        self.state.governance.vault().token()
    }

    pub fn balance_of(&self, holder: &Address) -> Amount {
        self.token().balance_of(holder)
    }

    pub fn allowance(&self, holder: &Address, spender: &Address) -> Amount {
        self.token().allowance(holder, spender)
    }

    pub fn voting_power_of(&self, owner: &Address) -> Amount {
        self.state.governance.vault().voting_power_of(owner)
    }

    pub fn deposits_of(&self, owner: &Address) -> Vec<&StakeDeposit> {
        self.state.governance.vault().deposits_of(owner)
    }

    pub fn vault_address(&self) -> Address {
        self.state.governance.vault().address()
    }

    // ── Governance queries ──────────────────────────────────────────────

    pub fn governance(&self) -> &GovernanceCoordinator {
        &self.state.governance
    }

    pub fn proposal_session(&self, session_id: SessionId) -> Result<&ProposalSession, LedgerError> {
        self.state
            .governance
            .session(session_id)
            .ok_or_else(|| GovernanceError::SessionNotFound(session_id).into())
    }

    pub fn session_status(&self, session_id: SessionId) -> Result<SessionStatus, LedgerError> {
        Ok(self.proposal_session(session_id)?.status(self.now()))
    }

    pub fn voter_status(&self, session_id: SessionId, owner: &Address) -> Result<bool, LedgerError> {
        Ok(self.state.governance.has_voted(session_id, owner)?)
    }

    // ── Event feed ──────────────────────────────────────────────────────

    pub fn events(&self) -> &[LoggedEvent] {
        self.state.log.entries()
    }

    pub fn events_since(&self, seq: u64) -> &[LoggedEvent] {
        self.state.log.since(seq)
    }
}

impl std::fmt::Debug for WorkIdLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkIdLedger")
            .field("now", &self.now())
            .field("events", &self.state.log.len())
            .field("bus", &self.bus)
            .finish()
    }
}
