//! Governance coordinator. Every action is gated on card validity and stake.

use crate::error::GovernanceError;
use crate::session::{ProposalSession, SessionId, SessionStatus};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use workid_card::{CardError, CredentialRegistry};
use workid_stake::{DepositId, StakeDeposit, StakeTier, StakeVault};
use workid_types::{Address, Amount, LedgerEvent, Timestamp, TokenId, VoteChoice};

/// Owns the proposal sessions and the collaborators it consults.
///
/// The employee-card registry and the stake vault are handed over once at
/// construction and never replaced. The gate reads both on every call; no
/// card or stake state is cached here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernanceCoordinator {
    address: Address,
    registry: CredentialRegistry,
    vault: StakeVault,
    sessions: Vec<ProposalSession>,
    /// session → addresses that have voted. Only ever grows.
    voters: BTreeMap<SessionId, BTreeSet<Address>>,
    #[serde(skip)]
    pending_events: Vec<LedgerEvent>,
}

impl GovernanceCoordinator {
    pub fn new(address: Address, registry: CredentialRegistry, vault: StakeVault) -> Self {
        Self {
            address,
            registry,
            vault,
            sessions: Vec::new(),
            voters: BTreeMap::new(),
            pending_events: Vec::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn registry(&self) -> &CredentialRegistry {
        &self.registry
    }

    /// Issuer-side access; the registry still authenticates the caller.
    pub fn registry_mut(&mut self) -> &mut CredentialRegistry {
        &mut self.registry
    }

    pub fn vault(&self) -> &StakeVault {
        &self.vault
    }

    /// Holder/owner-side access to the vault and its token.
    pub fn vault_mut(&mut self) -> &mut StakeVault {
        &mut self.vault
    }

    // ── Gate ────────────────────────────────────────────────────────────

    /// Caller holds a card and the card is valid at `now`.
    fn require_credential(&self, caller: &Address, now: Timestamp) -> Result<TokenId, GovernanceError> {
        let token_id = self
            .registry
            .credential_id_of(caller)
            .map_err(|e| match e {
                CardError::NoCard(owner) => GovernanceError::NoCredential(owner),
                other => GovernanceError::Card(other),
            })?;
        if !self.registry.is_valid(token_id, now)? {
            return Err(GovernanceError::CredentialExpired(token_id));
        }
        Ok(token_id)
    }

    /// Card gate plus nonzero voting power. Returns the caller's power.
    fn require_voter(&self, caller: &Address, now: Timestamp) -> Result<Amount, GovernanceError> {
        self.require_credential(caller, now)?;
        let power = self.vault.voting_power_of(caller);
        if power.is_zero() {
            return Err(GovernanceError::NoVotingPower(*caller));
        }
        Ok(power)
    }

    fn session_ref(&self, session_id: SessionId) -> Result<&ProposalSession, GovernanceError> {
        usize::try_from(session_id)
            .ok()
            .and_then(|idx| self.sessions.get(idx))
            .ok_or(GovernanceError::SessionNotFound(session_id))
    }

    // ── Commands ────────────────────────────────────────────────────────

    /// Register a new proposal session.
    ///
    /// `start_time` must be strictly after `now`, and `end_time` strictly
    /// after `start_time`.
    pub fn add_proposal(
        &mut self,
        caller: &Address,
        description: &str,
        start_time: Timestamp,
        end_time: Timestamp,
        now: Timestamp,
    ) -> Result<SessionId, GovernanceError> {
        self.require_voter(caller, now)?;
        if description.trim().is_empty() {
            return Err(GovernanceError::EmptyDescription);
        }
        if start_time <= now {
            return Err(GovernanceError::StartInPast { start_time, now });
        }
        if end_time <= start_time {
            return Err(GovernanceError::EndBeforeStart {
                start_time,
                end_time,
            });
        }
        let session_id = self.sessions.len() as SessionId;
        self.sessions.push(ProposalSession {
            id: session_id,
            proposer: *caller,
            description: description.to_string(),
            start_time,
            end_time,
            vote_count_yes: Amount::ZERO,
            vote_count_no: Amount::ZERO,
        });

        tracing::info!(
            session_id,
            proposer = %caller,
            start = %start_time,
            end = %end_time,
            "proposal session registered"
        );
        self.pending_events.push(LedgerEvent::ProposalSessionRegistered {
            session_id,
            proposer: *caller,
            description: description.to_string(),
            start_time,
            end_time,
        });
        Ok(session_id)
    }

    /// Cast the caller's single ballot on a session with `power` of its weight.
    ///
    /// `power` may be any amount up to the caller's current voting power;
    /// the same power may be spent again on other sessions.
    pub fn vote_on_proposal(
        &mut self,
        caller: &Address,
        session_id: SessionId,
        choice: VoteChoice,
        power: Amount,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let available = self.require_voter(caller, now)?;
        let session = self.session_ref(session_id)?;
        let status = session.status(now);
        if status != SessionStatus::InProgress {
            return Err(GovernanceError::SessionNotOpen { session_id, status });
        }
        if self
            .voters
            .get(&session_id)
            .is_some_and(|set| set.contains(caller))
        {
            return Err(GovernanceError::AlreadyVoted {
                voter: *caller,
                session_id,
            });
        }
        if power > available {
            return Err(GovernanceError::InsufficientPower {
                requested: power,
                available,
            });
        }
        let tally = match choice {
            VoteChoice::Yes => session.vote_count_yes,
            VoteChoice::No => session.vote_count_no,
        };
        let tally = tally.checked_add(power).ok_or(GovernanceError::Overflow)?;

        let idx = session_id as usize;
        match choice {
            VoteChoice::Yes => self.sessions[idx].vote_count_yes = tally,
            VoteChoice::No => self.sessions[idx].vote_count_no = tally,
        }
        self.voters.entry(session_id).or_default().insert(*caller);

        tracing::info!(voter = %caller, session_id, choice = %choice, power = %power, "vote recorded");
        self.pending_events.push(LedgerEvent::Voted {
            voter: *caller,
            session_id,
            choice,
            power,
        });
        Ok(())
    }

    /// Stake through governance; requires a valid card but no prior power.
    pub fn stake(
        &mut self,
        caller: &Address,
        tier: StakeTier,
        amount: Amount,
        now: Timestamp,
    ) -> Result<StakeDeposit, GovernanceError> {
        self.require_credential(caller, now)?;
        Ok(self.vault.stake(caller, tier, amount, now)?)
    }

    /// Unstake through governance; requires a valid card.
    pub fn unstake(
        &mut self,
        caller: &Address,
        deposit_id: DepositId,
        now: Timestamp,
    ) -> Result<StakeDeposit, GovernanceError> {
        self.require_credential(caller, now)?;
        Ok(self.vault.unstake(caller, deposit_id, now)?)
    }

    // ── Guarded queries ─────────────────────────────────────────────────

    pub fn get_one_proposal_session(
        &self,
        caller: &Address,
        session_id: SessionId,
        now: Timestamp,
    ) -> Result<&ProposalSession, GovernanceError> {
        self.require_voter(caller, now)?;
        self.session_ref(session_id)
    }

    pub fn get_voting_session_status(
        &self,
        caller: &Address,
        session_id: SessionId,
        now: Timestamp,
    ) -> Result<SessionStatus, GovernanceError> {
        self.require_voter(caller, now)?;
        Ok(self.session_ref(session_id)?.status(now))
    }

    /// Whether the caller has voted on the session.
    pub fn get_voter_status(
        &self,
        caller: &Address,
        session_id: SessionId,
        now: Timestamp,
    ) -> Result<bool, GovernanceError> {
        self.require_voter(caller, now)?;
        self.has_voted(session_id, caller)
    }

    pub fn get_voting_power(&self, caller: &Address, now: Timestamp) -> Result<Amount, GovernanceError> {
        self.require_voter(caller, now)
    }

    /// Where to approve WID before staking. Needs a valid card only.
    pub fn get_staking_contract_address(
        &self,
        caller: &Address,
        now: Timestamp,
    ) -> Result<Address, GovernanceError> {
        self.require_credential(caller, now)?;
        Ok(self.vault.address())
    }

    pub fn get_sessions(
        &self,
        caller: &Address,
        now: Timestamp,
    ) -> Result<&[ProposalSession], GovernanceError> {
        self.require_voter(caller, now)?;
        Ok(&self.sessions)
    }

    // ── Unguarded read surface ──────────────────────────────────────────

    pub fn session(&self, session_id: SessionId) -> Option<&ProposalSession> {
        self.session_ref(session_id).ok()
    }

    pub fn session_status(&self, session_id: SessionId, now: Timestamp) -> Option<SessionStatus> {
        self.session(session_id).map(|s| s.status(now))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn has_voted(&self, session_id: SessionId, owner: &Address) -> Result<bool, GovernanceError> {
        self.session_ref(session_id)?;
        Ok(self
            .voters
            .get(&session_id)
            .is_some_and(|set| set.contains(owner)))
    }

    /// Drain queued events from the coordinator and both collaborators.
    ///
    /// Only one component mutates per command, so concatenation preserves
    /// emission order.
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        let mut events = self.registry.take_events();
        events.extend(self.vault.take_events());
        events.extend(std::mem::take(&mut self.pending_events));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workid_token::BaseToken;
    use workid_types::{CardKind, ErrorKind};

    const NOW: u64 = 1_700_000_000;
    const DAY: u64 = 24 * 3600;

    fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    fn ts(secs: u64) -> Timestamp {
        Timestamp::new(secs)
    }

    fn units(n: u64) -> Amount {
        Amount::from_units(n)
    }

    fn tenth() -> Amount {
        Amount::parse("0.1").unwrap()
    }

    fn owner() -> Address {
        addr(1)
    }

    fn make_gov() -> GovernanceCoordinator {
        let registry =
            CredentialRegistry::new(CardKind::Employee, "WorkID Employee Card", "WEC", owner());
        let vault = StakeVault::new(addr(100), BaseToken::new("WorkID", "WID", owner()));
        GovernanceCoordinator::new(addr(200), registry, vault)
    }

    fn give_card(gov: &mut GovernanceCoordinator, who: Address) {
        gov.registry_mut()
            .mint(&owner(), &who, "ipfs://card")
            .unwrap();
    }

    fn give_power(gov: &mut GovernanceCoordinator, who: Address, tier: StakeTier, amount: Amount) {
        let vault_addr = gov.vault().address();
        let token = gov.vault_mut().token_mut();
        token.mint(&owner(), &who, amount).unwrap();
        token.approve(&who, &vault_addr, amount).unwrap();
        gov.stake(&who, tier, amount, ts(NOW)).unwrap();
    }

    /// Card + 1 WID staked for six months = 0.1 voting power.
    fn make_employee(gov: &mut GovernanceCoordinator, who: Address) {
        give_card(gov, who);
        give_power(gov, who, StakeTier::SixMonths, units(1));
    }

    fn with_session(gov: &mut GovernanceCoordinator, who: Address) -> SessionId {
        gov.add_proposal(&who, "description", ts(NOW + 60), ts(NOW + DAY), ts(NOW))
            .unwrap()
    }

    // ── Gate ────────────────────────────────────────────────────────────

    #[test]
    fn test_no_card_rejected_everywhere() {
        let mut gov = make_gov();
        let e = addr(2);
        let now = ts(NOW);
        let expected = GovernanceError::NoCredential(e);

        assert_eq!(
            gov.add_proposal(&e, "description", ts(NOW + 1), ts(NOW + DAY), now),
            Err(expected.clone())
        );
        assert_eq!(gov.get_one_proposal_session(&e, 0, now), Err(expected.clone()));
        assert_eq!(gov.get_voting_session_status(&e, 0, now), Err(expected.clone()));
        assert_eq!(gov.get_voter_status(&e, 0, now), Err(expected.clone()));
        assert_eq!(gov.get_voting_power(&e, now), Err(expected.clone()));
        assert_eq!(gov.get_staking_contract_address(&e, now), Err(expected.clone()));
        assert_eq!(
            gov.vote_on_proposal(&e, 0, VoteChoice::No, tenth(), now),
            Err(expected.clone())
        );
        assert_eq!(
            gov.stake(&e, StakeTier::SixMonths, Amount::ZERO, now).unwrap_err(),
            expected.clone()
        );
        assert_eq!(gov.unstake(&e, 0, now).unwrap_err(), expected.clone());
        assert_eq!(expected.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_expired_card_rejected() {
        let mut gov = make_gov();
        let e = addr(2);
        make_employee(&mut gov, e);
        gov.registry_mut()
            .invalidate(&owner(), 1, ts(NOW + 10), ts(NOW))
            .unwrap();

        let err = gov
            .add_proposal(&e, "description", ts(NOW + 20), ts(NOW + DAY), ts(NOW + 10))
            .unwrap_err();
        assert_eq!(err, GovernanceError::CredentialExpired(1));
        assert_eq!(
            gov.get_staking_contract_address(&e, ts(NOW + 10)),
            Err(GovernanceError::CredentialExpired(1))
        );
    }

    #[test]
    fn test_card_without_stake_has_no_voting_power() {
        let mut gov = make_gov();
        let e = addr(2);
        give_card(&mut gov, e);

        let err = gov
            .add_proposal(&e, "description", ts(NOW + 1), ts(NOW + DAY), ts(NOW))
            .unwrap_err();
        assert_eq!(err, GovernanceError::NoVotingPower(e));
        assert_eq!(err.kind(), ErrorKind::InsufficientResource);
        assert_eq!(gov.get_voting_power(&e, ts(NOW)), Err(GovernanceError::NoVotingPower(e)));
    }

    #[test]
    fn test_staking_address_needs_only_card() {
        let mut gov = make_gov();
        let e = addr(2);
        give_card(&mut gov, e);
        assert_eq!(gov.get_staking_contract_address(&e, ts(NOW)), Ok(addr(100)));
    }

    // ── Voting power ────────────────────────────────────────────────────

    #[test]
    fn test_voting_power_per_tier() {
        let expected = ["0.1", "0.2", "0.6", "1"];
        for (i, tier) in StakeTier::ALL.into_iter().enumerate() {
            let mut gov = make_gov();
            let e = addr(2);
            give_card(&mut gov, e);
            give_power(&mut gov, e, tier, units(1));
            assert_eq!(
                gov.get_voting_power(&e, ts(NOW)),
                Ok(Amount::parse(expected[i]).unwrap())
            );
        }
    }

    #[test]
    fn test_unstake_through_governance() {
        let mut gov = make_gov();
        let e = addr(2);
        give_card(&mut gov, e);
        give_power(&mut gov, e, StakeTier::SixMonths, units(1));
        give_power(&mut gov, e, StakeTier::OneYear, units(1));
        assert_eq!(gov.get_voting_power(&e, ts(NOW)), Ok(Amount::parse("0.3").unwrap()));
        assert_eq!(gov.vault().token().balance_of(&e), Amount::ZERO);

        let seven_months = ts(NOW + 7 * 30 * DAY);
        gov.unstake(&e, 0, seven_months).unwrap();
        assert_eq!(gov.vault().token().balance_of(&e), units(1));
        assert_eq!(gov.get_voting_power(&e, seven_months), Ok(Amount::parse("0.2").unwrap()));
    }

    // ── add_proposal ────────────────────────────────────────────────────

    #[test]
    fn test_proposal_start_in_past_rejected() {
        let mut gov = make_gov();
        let e = addr(2);
        make_employee(&mut gov, e);

        let err = gov
            .add_proposal(&e, "description", ts(NOW - DAY), ts(NOW + DAY), ts(NOW))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TemporalViolation);
        // start == now is also in the past.
        let err = gov
            .add_proposal(&e, "description", ts(NOW), ts(NOW + DAY), ts(NOW))
            .unwrap_err();
        assert_eq!(
            err,
            GovernanceError::StartInPast {
                start_time: ts(NOW),
                now: ts(NOW),
            }
        );
    }

    #[test]
    fn test_proposal_end_before_start_rejected() {
        let mut gov = make_gov();
        let e = addr(2);
        make_employee(&mut gov, e);

        let err = gov
            .add_proposal(&e, "description", ts(NOW + DAY), ts(NOW + 60), ts(NOW))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(gov
            .add_proposal(&e, "description", ts(NOW + DAY), ts(NOW + DAY), ts(NOW))
            .is_err());
    }

    #[test]
    fn test_proposal_empty_description_rejected() {
        let mut gov = make_gov();
        let e = addr(2);
        make_employee(&mut gov, e);
        assert_eq!(
            gov.add_proposal(&e, "", ts(NOW + 60), ts(NOW + DAY), ts(NOW)),
            Err(GovernanceError::EmptyDescription)
        );
        assert_eq!(
            gov.add_proposal(&e, "   ", ts(NOW + 60), ts(NOW + DAY), ts(NOW)),
            Err(GovernanceError::EmptyDescription)
        );
        assert_eq!(gov.session_count(), 0);
    }

    #[test]
    fn test_proposal_registered_from_zero() {
        let mut gov = make_gov();
        let e = addr(2);
        make_employee(&mut gov, e);
        gov.take_events();

        assert_eq!(with_session(&mut gov, e), 0);
        assert_eq!(with_session(&mut gov, e), 1);
        let events = gov.take_events();
        assert_eq!(
            events[0],
            LedgerEvent::ProposalSessionRegistered {
                session_id: 0,
                proposer: e,
                description: "description".into(),
                start_time: ts(NOW + 60),
                end_time: ts(NOW + DAY),
            }
        );

        let session = gov.get_one_proposal_session(&e, 0, ts(NOW)).unwrap();
        assert_eq!(session.start_time, ts(NOW + 60));
        assert_eq!(session.end_time, ts(NOW + DAY));
        assert_eq!(session.description, "description");
        assert_eq!(gov.get_sessions(&e, ts(NOW)).unwrap().len(), 2);
    }

    // ── Session queries ─────────────────────────────────────────────────

    #[test]
    fn test_unknown_session() {
        let mut gov = make_gov();
        let e = addr(2);
        make_employee(&mut gov, e);
        let now = ts(NOW);

        assert_eq!(
            gov.get_one_proposal_session(&e, 0, now),
            Err(GovernanceError::SessionNotFound(0))
        );
        assert_eq!(
            gov.get_voting_session_status(&e, 0, now),
            Err(GovernanceError::SessionNotFound(0))
        );
        assert_eq!(gov.get_voter_status(&e, 0, now), Err(GovernanceError::SessionNotFound(0)));
        assert_eq!(
            gov.vote_on_proposal(&e, 0, VoteChoice::No, tenth(), now),
            Err(GovernanceError::SessionNotFound(0))
        );
        assert_eq!(gov.get_one_proposal_session(&e, u64::MAX, now).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_status_follows_clock() {
        let mut gov = make_gov();
        let e = addr(2);
        make_employee(&mut gov, e);
        let id = with_session(&mut gov, e);

        assert_eq!(gov.get_voting_session_status(&e, id, ts(NOW)), Ok(SessionStatus::Pending));
        assert_eq!(
            gov.get_voting_session_status(&e, id, ts(NOW + 61)),
            Ok(SessionStatus::InProgress)
        );
        assert_eq!(
            gov.get_voting_session_status(&e, id, ts(NOW + DAY)),
            Ok(SessionStatus::Ended)
        );
    }

    // ── vote_on_proposal ────────────────────────────────────────────────

    #[test]
    fn test_vote_before_start_rejected() {
        let mut gov = make_gov();
        let e = addr(2);
        make_employee(&mut gov, e);
        let id = with_session(&mut gov, e);

        let err = gov
            .vote_on_proposal(&e, id, VoteChoice::No, tenth(), ts(NOW))
            .unwrap_err();
        assert_eq!(
            err,
            GovernanceError::SessionNotOpen {
                session_id: id,
                status: SessionStatus::Pending,
            }
        );
        assert_eq!(err.kind(), ErrorKind::TemporalViolation);
    }

    #[test]
    fn test_vote_after_end_rejected() {
        let mut gov = make_gov();
        let e = addr(2);
        make_employee(&mut gov, e);
        let id = with_session(&mut gov, e);
        let err = gov
            .vote_on_proposal(&e, id, VoteChoice::Yes, tenth(), ts(NOW + DAY))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TemporalViolation);
    }

    #[test]
    fn test_vote_yes_recorded() {
        let mut gov = make_gov();
        let e = addr(2);
        make_employee(&mut gov, e);
        let id = with_session(&mut gov, e);
        gov.take_events();

        let now = ts(NOW + 61);
        assert_eq!(gov.get_voter_status(&e, id, now), Ok(false));
        gov.vote_on_proposal(&e, id, VoteChoice::Yes, tenth(), now).unwrap();

        let session = gov.get_one_proposal_session(&e, id, now).unwrap();
        assert_eq!(session.vote_count_yes, tenth());
        assert_eq!(session.vote_count_no, Amount::ZERO);
        assert_eq!(gov.get_voter_status(&e, id, now), Ok(true));
        assert_eq!(
            gov.take_events(),
            vec![LedgerEvent::Voted {
                voter: e,
                session_id: id,
                choice: VoteChoice::Yes,
                power: tenth(),
            }]
        );
    }

    #[test]
    fn test_vote_no_recorded() {
        let mut gov = make_gov();
        let e = addr(2);
        make_employee(&mut gov, e);
        let id = with_session(&mut gov, e);
        let now = ts(NOW + 61);
        gov.vote_on_proposal(&e, id, VoteChoice::No, tenth(), now).unwrap();
        let session = gov.session(id).unwrap();
        assert_eq!(session.vote_count_no, tenth());
        assert_eq!(session.vote_count_yes, Amount::ZERO);
    }

    #[test]
    fn test_second_vote_rejected() {
        let mut gov = make_gov();
        let e = addr(2);
        make_employee(&mut gov, e);
        let id = with_session(&mut gov, e);
        let now = ts(NOW + 61);
        gov.vote_on_proposal(&e, id, VoteChoice::No, tenth(), now).unwrap();

        let err = gov
            .vote_on_proposal(&e, id, VoteChoice::Yes, tenth(), now)
            .unwrap_err();
        assert_eq!(err, GovernanceError::AlreadyVoted { voter: e, session_id: id });
        assert_eq!(err.kind(), ErrorKind::AlreadyDone);
        assert_eq!(gov.session(id).unwrap().vote_count_yes, Amount::ZERO);
    }

    #[test]
    fn test_vote_above_power_rejected() {
        let mut gov = make_gov();
        let e = addr(2);
        make_employee(&mut gov, e);
        let id = with_session(&mut gov, e);
        let now = ts(NOW + 61);

        let err = gov
            .vote_on_proposal(&e, id, VoteChoice::Yes, units(2), now)
            .unwrap_err();
        assert_eq!(
            err,
            GovernanceError::InsufficientPower {
                requested: units(2),
                available: tenth(),
            }
        );
        assert_eq!(gov.get_voter_status(&e, id, now), Ok(false));
    }

    #[test]
    fn test_partial_power_and_reuse_across_sessions() {
        let mut gov = make_gov();
        let e = addr(2);
        make_employee(&mut gov, e);
        let first = with_session(&mut gov, e);
        let second = with_session(&mut gov, e);
        let now = ts(NOW + 61);
        let half = Amount::parse("0.05").unwrap();

        gov.vote_on_proposal(&e, first, VoteChoice::Yes, half, now).unwrap();
        gov.vote_on_proposal(&e, second, VoteChoice::Yes, tenth(), now).unwrap();
        assert_eq!(gov.session(first).unwrap().vote_count_yes, half);
        assert_eq!(gov.session(second).unwrap().vote_count_yes, tenth());
    }

    #[test]
    fn test_two_voters_tally() {
        let mut gov = make_gov();
        let a = addr(2);
        let b = addr(3);
        make_employee(&mut gov, a);
        give_card(&mut gov, b);
        give_power(&mut gov, b, StakeTier::FiveYears, units(2));
        let id = with_session(&mut gov, a);
        let now = ts(NOW + 61);

        gov.vote_on_proposal(&a, id, VoteChoice::Yes, tenth(), now).unwrap();
        gov.vote_on_proposal(&b, id, VoteChoice::No, units(2), now).unwrap();
        let session = gov.session(id).unwrap();
        assert_eq!(session.vote_count_yes, tenth());
        assert_eq!(session.vote_count_no, units(2));
        assert_eq!(gov.has_voted(id, &a), Ok(true));
        assert_eq!(gov.has_voted(id, &addr(9)), Ok(false));
    }
}
