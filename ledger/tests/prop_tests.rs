use proptest::prelude::*;

use workid_ledger::{Command, LedgerConfig, WorkIdLedger};
use workid_nullables::NullClock;
use workid_types::{Address, Amount, CardKind, Timestamp, VoteChoice};

const T0: u64 = 1_700_000_000;
const DURATIONS: [u64; 5] = [15_768_000, 31_536_000, 94_608_000, 157_680_000, 42];

fn addr(n: u8) -> Address {
    Address::new([n; 20])
}

/// A caller index plus a command; index 0 is the issuer/token owner.
fn op_strategy() -> impl Strategy<Value = (u8, Command, u64)> {
    let who = 0u8..4;
    let amount = (0u64..4).prop_map(Amount::from_units);
    let target = (1u8..4).prop_map(|n| addr(n + 1));
    let command = prop_oneof![
        target.clone().prop_map(|owner| Command::MintCard {
            kind: CardKind::Employee,
            owner,
            uri: "ipfs://card".into(),
            profile: None,
        }),
        target.clone().prop_map(|owner| Command::BurnCard { kind: CardKind::Employee, owner }),
        (1u64..4, 0u64..100).prop_map(|(token_id, dt)| Command::InvalidateCard {
            kind: CardKind::Employee,
            token_id,
            end_time: Timestamp::new(T0 + dt),
        }),
        (target.clone(), amount.clone()).prop_map(|(to, amount)| Command::MintTokens { to, amount }),
        amount.clone().prop_map(|amount| Command::Approve {
            spender: LedgerConfig::default().vault_address,
            amount,
        }),
        (0usize..5, amount.clone()).prop_map(|(i, amount)| Command::GovernanceStake {
            duration_secs: DURATIONS[i],
            amount,
        }),
        (0u64..3).prop_map(|deposit_id| Command::GovernanceUnstake { deposit_id }),
        (0u64..50, 1u64..200).prop_map(|(start, len)| Command::AddProposal {
            description: "proposal".into(),
            start_time: Timestamp::new(T0 + start),
            end_time: Timestamp::new(T0 + start + len),
        }),
        (0u64..3, any::<bool>(), amount).prop_map(|(session_id, yes, power)| Command::Vote {
            session_id,
            choice: VoteChoice::from_bool(yes),
            power: Amount::new(power.raw() / 10),
        }),
    ];
    (who, command, 0u64..40)
}

proptest! {
    /// A rejected command changes neither state nor event log; an accepted
    /// one appends exactly the events its receipt reports.
    #[test]
    fn commands_are_all_or_nothing(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let config = LedgerConfig::default();
        let clock = NullClock::new(T0);
        let mut ledger = WorkIdLedger::new(&config, Box::new(clock.clone()));

        for (who, command, dt) in ops {
            clock.advance(dt);
            let caller = if who == 0 { config.issuer } else { addr(who + 1) };
            let before = ledger.snapshot().unwrap();
            let log_len = ledger.events().len();

            match ledger.apply(&caller, command) {
                Ok(receipt) => {
                    prop_assert_eq!(ledger.events().len(), log_len + receipt.events.len());
                    prop_assert_eq!(&ledger.events()[log_len..], &receipt.events[..]);
                }
                Err(_) => {
                    let after = ledger.snapshot().unwrap();
                    prop_assert_eq!(before.hash, after.hash);
                }
            }

            // Weighted supply always equals the sum of per-owner power.
            let total: u128 = (2u8..5).map(|n| ledger.voting_power_of(&addr(n)).raw()).sum();
            prop_assert_eq!(ledger.governance().vault().total_weight().raw(), total);
            // Custody always equals live principal.
            prop_assert_eq!(
                ledger.balance_of(&config.vault_address),
                ledger.governance().vault().total_principal()
            );
        }
    }
}
