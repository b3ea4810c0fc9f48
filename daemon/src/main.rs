//! `workid`: drive a WorkID ledger snapshot from the command line.
//!
//! Each invocation loads the snapshot, runs one command or query, prints
//! the result, and (for state-changing commands) writes the snapshot back.

mod cli;

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;
use std::path::Path;

use cli::{CardCmd, Cli, Command, GovCmd, KindArg, StakeCmd, TokenCmd};
use workid_ledger::{Command as LedgerCommand, LedgerConfig, LedgerSnapshot, Receipt, WorkIdLedger};
use workid_nullables::NullClock;
use workid_types::{Address, CardKind, CardProfile, Clock, SystemClock, Timestamp};
use workid_utils::{format_duration, init_logging, LogFormat};

impl KindArg {
    fn kind(self) -> CardKind {
        if self.member {
            CardKind::Member
        } else {
            CardKind::Employee
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<LedgerConfig> {
    let mut config = match &cli.config {
        Some(path) => LedgerConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LedgerConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    Ok(config)
}

fn make_clock(now: Option<u64>) -> Box<dyn Clock> {
    match now {
        Some(secs) => Box::new(NullClock::new(secs)),
        None => Box::new(SystemClock),
    }
}

fn open_ledger(state: &Path, clock: Box<dyn Clock>) -> anyhow::Result<WorkIdLedger> {
    if !state.exists() {
        bail!(
            "no ledger at {} (run `workid init` first)",
            state.display()
        );
    }
    let snapshot = LedgerSnapshot::read_from(state)
        .with_context(|| format!("reading snapshot {}", state.display()))?;
    Ok(WorkIdLedger::from_snapshot(&snapshot, clock)?)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn caller(cli: &Cli) -> anyhow::Result<Address> {
    cli.caller
        .context("this command needs --caller (or WORKID_CALLER)")
}

/// Translate a state-changing subcommand into a ledger command.
fn to_ledger_command(command: &Command, ledger: &WorkIdLedger) -> anyhow::Result<Option<LedgerCommand>> {
    let cmd = match command {
        Command::Card(CardCmd::Mint {
            owner,
            uri,
            profile,
            kind,
        }) => {
            let profile = match profile {
                Some(path) => {
                    let raw = std::fs::read_to_string(path)
                        .with_context(|| format!("reading profile {}", path.display()))?;
                    Some(serde_json::from_str::<CardProfile>(&raw).context("parsing profile")?)
                }
                None => None,
            };
            LedgerCommand::MintCard {
                kind: kind.kind(),
                owner: *owner,
                uri: uri.clone(),
                profile,
            }
        }
        Command::Card(CardCmd::Invalidate {
            token_id,
            end_time,
            kind,
        }) => LedgerCommand::InvalidateCard {
            kind: kind.kind(),
            token_id: *token_id,
            end_time: Timestamp::new(*end_time),
        },
        Command::Card(CardCmd::Burn { owner, kind }) => LedgerCommand::BurnCard {
            kind: kind.kind(),
            owner: *owner,
        },
        Command::Token(TokenCmd::Mint { to, amount }) => LedgerCommand::MintTokens {
            to: *to,
            amount: *amount,
        },
        Command::Token(TokenCmd::Burn { from, amount }) => LedgerCommand::BurnTokens {
            from: *from,
            amount: *amount,
        },
        Command::Token(TokenCmd::Transfer { to, amount }) => LedgerCommand::Transfer {
            to: *to,
            amount: *amount,
        },
        Command::Token(TokenCmd::Approve { spender, amount }) => LedgerCommand::Approve {
            spender: spender.unwrap_or_else(|| ledger.vault_address()),
            amount: *amount,
        },
        Command::Stake(StakeCmd::Deposit {
            duration,
            amount,
            direct,
        }) => {
            let duration_secs = duration.duration_secs();
            if *direct {
                LedgerCommand::Stake {
                    duration_secs,
                    amount: *amount,
                }
            } else {
                LedgerCommand::GovernanceStake {
                    duration_secs,
                    amount: *amount,
                }
            }
        }
        Command::Stake(StakeCmd::Withdraw { deposit_id, direct }) => {
            if *direct {
                LedgerCommand::Unstake {
                    deposit_id: *deposit_id,
                }
            } else {
                LedgerCommand::GovernanceUnstake {
                    deposit_id: *deposit_id,
                }
            }
        }
        Command::Gov(GovCmd::Propose {
            description,
            start,
            end,
        }) => LedgerCommand::AddProposal {
            description: description.clone(),
            start_time: Timestamp::new(*start),
            end_time: Timestamp::new(*end),
        },
        Command::Gov(GovCmd::Vote {
            session,
            choice,
            power,
        }) => LedgerCommand::Vote {
            session_id: *session,
            choice: *choice,
            power: *power,
        },
        _ => return Ok(None),
    };
    Ok(Some(cmd))
}

fn run_query(cli: &Cli, ledger: &WorkIdLedger) -> anyhow::Result<()> {
    match &cli.command {
        Command::Card(CardCmd::Valid { token_id, kind }) => {
            println!("{}", ledger.is_valid(kind.kind(), *token_id)?);
        }
        Command::Card(CardCmd::Uri { token_id, kind }) => {
            println!("{}", ledger.token_uri(kind.kind(), *token_id)?);
        }
        Command::Card(CardCmd::Id { owner, kind }) => {
            println!("{}", ledger.credential_id_of(kind.kind(), owner)?);
        }
        Command::Card(CardCmd::Show { token_id, kind }) => {
            print_json(ledger.registry(kind.kind()).credential(*token_id)?)?;
        }
        Command::Token(TokenCmd::Balance { holder }) => {
            println!("{} {}", ledger.balance_of(holder), ledger.token().symbol());
        }
        Command::Stake(StakeCmd::Power { owner }) => {
            let owner = match owner {
                Some(owner) => *owner,
                None => caller(cli)?,
            };
            let now = ledger.now();
            println!("voting power: {}", ledger.voting_power_of(&owner));
            for deposit in ledger.deposits_of(&owner) {
                let remaining = deposit.matures_at().as_secs().saturating_sub(now.as_secs());
                let lock = if remaining == 0 {
                    "mature".to_string()
                } else {
                    format!("unlocks in {}", format_duration(remaining))
                };
                println!(
                    "  #{} {} {} for {} -> weight {} ({lock})",
                    deposit.id,
                    deposit.principal,
                    ledger.token().symbol(),
                    deposit.tier,
                    deposit.weighted,
                );
            }
        }
        Command::Gov(GovCmd::Session { id }) => {
            print_json(ledger.proposal_session(*id)?)?;
        }
        Command::Gov(GovCmd::Status { id }) => {
            println!("{}", ledger.session_status(*id)?);
        }
        Command::Gov(GovCmd::Voted { id, owner }) => {
            let owner = match owner {
                Some(owner) => *owner,
                None => caller(cli)?,
            };
            println!("{}", ledger.voter_status(*id, &owner)?);
        }
        Command::Events { since } => {
            for logged in ledger.events_since(*since) {
                print_json(logged)?;
            }
        }
        other => bail!("{other:?} is not a query"),
    }
    Ok(())
}

fn init(cli: &Cli, config: &LedgerConfig, clock: Box<dyn Clock>, force: bool) -> anyhow::Result<()> {
    if cli.state.exists() && !force {
        bail!(
            "{} already exists (pass --force to overwrite)",
            cli.state.display()
        );
    }
    let ledger = WorkIdLedger::new(config, clock);
    let snapshot = ledger.snapshot()?;
    snapshot.write_to(&cli.state)?;
    tracing::info!(path = %cli.state.display(), hash = %snapshot.hash_hex(), "ledger initialised");
    println!("{}", cli.state.display());
    Ok(())
}

fn print_receipt(receipt: &Receipt) -> anyhow::Result<()> {
    for logged in &receipt.events {
        print_json(logged)?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let format: LogFormat = config.log_format.parse()?;
    init_logging(format, &config.log_level)?;

    let clock = make_clock(cli.now);

    if let Command::Init { force } = cli.command {
        return init(&cli, &config, clock, force);
    }

    let mut ledger = open_ledger(&cli.state, clock)?;
    match to_ledger_command(&cli.command, &ledger)? {
        Some(command) => {
            let caller = caller(&cli)?;
            let name = command.name();
            let receipt = ledger
                .apply(&caller, command)
                .map_err(|e| anyhow::anyhow!("{name} failed ({}): {e}", e.kind()))?;
            print_receipt(&receipt)?;
            ledger.snapshot()?.write_to(&cli.state)?;
            tracing::info!(command = name, events = receipt.events.len(), "snapshot saved");
        }
        None => run_query(&cli, &ledger)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("workid").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn queries_do_not_map_to_commands() {
        let ledger = WorkIdLedger::new(&LedgerConfig::default(), make_clock(Some(0)));
        for args in [
            &["card", "valid", "--token-id", "1"][..],
            &["gov", "status", "--id", "0"],
            &["events"],
        ] {
            assert!(to_ledger_command(&cli(args).command, &ledger).unwrap().is_none());
        }
    }

    #[test]
    fn approve_defaults_to_vault() {
        let ledger = WorkIdLedger::new(&LedgerConfig::default(), make_clock(Some(0)));
        let cmd = to_ledger_command(&cli(&["token", "approve", "--amount", "1"]).command, &ledger)
            .unwrap()
            .unwrap();
        assert_eq!(
            cmd,
            LedgerCommand::Approve {
                spender: ledger.vault_address(),
                amount: workid_types::Amount::from_units(1),
            }
        );
    }

    #[test]
    fn stake_routes_through_governance_unless_direct() {
        let ledger = WorkIdLedger::new(&LedgerConfig::default(), make_clock(Some(0)));
        let gov = to_ledger_command(
            &cli(&["stake", "deposit", "--duration", "6m", "--amount", "1"]).command,
            &ledger,
        )
        .unwrap();
        assert!(matches!(gov, Some(LedgerCommand::GovernanceStake { duration_secs: 15_768_000, .. })));

        let direct = to_ledger_command(
            &cli(&["stake", "withdraw", "--deposit-id", "0", "--direct"]).command,
            &ledger,
        )
        .unwrap();
        assert_eq!(direct, Some(LedgerCommand::Unstake { deposit_id: 0 }));
    }

    #[test]
    fn open_ledger_requires_init() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_ledger(&dir.path().join("missing.state"), make_clock(None)).unwrap_err();
        assert!(err.to_string().contains("workid init"));
    }

    #[test]
    fn init_then_open_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workid.state");
        let path_str = path.to_str().unwrap();
        let parsed = cli(&["--state", path_str, "init"]);
        init(&parsed, &LedgerConfig::default(), make_clock(Some(5)), false).unwrap();
        assert!(init(&parsed, &LedgerConfig::default(), make_clock(Some(5)), false).is_err());

        let ledger = open_ledger(&path, make_clock(Some(5))).unwrap();
        assert!(ledger.events().is_empty());
        assert_eq!(ledger.now(), Timestamp::new(5));
    }
}
