//! Command-line surface of the `workid` binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use workid_stake::StakeTier;
use workid_types::{Address, Amount, VoteChoice};

#[derive(Parser, Debug)]
#[command(name = "workid", version, about = "WorkID cards, staking and governance ledger")]
pub struct Cli {
    /// Path to a TOML configuration file. CLI flags and env vars override it.
    #[arg(long, global = true, env = "WORKID_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ledger snapshot file.
    #[arg(long, global = true, default_value = "./workid.state", env = "WORKID_STATE")]
    pub state: PathBuf,

    /// Address acting for state-changing commands.
    #[arg(long, global = true, env = "WORKID_CALLER")]
    pub caller: Option<Address>,

    /// Override the clock with a fixed Unix time (seconds).
    #[arg(long, global = true, env = "WORKID_NOW")]
    pub now: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "WORKID_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, global = true, env = "WORKID_LOG_FORMAT")]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty ledger snapshot from the configuration.
    Init {
        /// Overwrite an existing snapshot.
        #[arg(long)]
        force: bool,
    },
    /// Employee and member cards.
    #[command(subcommand)]
    Card(CardCmd),
    /// The WID base token.
    #[command(subcommand)]
    Token(TokenCmd),
    /// Time-locked staking.
    #[command(subcommand)]
    Stake(StakeCmd),
    /// Proposals and votes.
    #[command(subcommand)]
    Gov(GovCmd),
    /// Print the event log as JSON lines.
    Events {
        /// First sequence number to print.
        #[arg(long, default_value_t = 0)]
        since: u64,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct KindArg {
    /// Operate on the member-card registry instead of employee cards.
    #[arg(long)]
    pub member: bool,
}

#[derive(Subcommand, Debug)]
pub enum CardCmd {
    /// Issue a card (issuer only).
    Mint {
        #[arg(long)]
        owner: Address,
        #[arg(long)]
        uri: String,
        /// JSON file holding an `Employee` or `Member` profile record.
        #[arg(long)]
        profile: Option<PathBuf>,
        #[command(flatten)]
        kind: KindArg,
    },
    /// Set a card's end of validity (issuer only).
    Invalidate {
        #[arg(long)]
        token_id: u64,
        #[arg(long)]
        end_time: u64,
        #[command(flatten)]
        kind: KindArg,
    },
    /// Destroy an address's card (issuer only).
    Burn {
        #[arg(long)]
        owner: Address,
        #[command(flatten)]
        kind: KindArg,
    },
    /// Is the card valid now?
    Valid {
        #[arg(long)]
        token_id: u64,
        #[command(flatten)]
        kind: KindArg,
    },
    Uri {
        #[arg(long)]
        token_id: u64,
        #[command(flatten)]
        kind: KindArg,
    },
    /// Card id held by an address.
    Id {
        #[arg(long)]
        owner: Address,
        #[command(flatten)]
        kind: KindArg,
    },
    /// Full card record as JSON.
    Show {
        #[arg(long)]
        token_id: u64,
        #[command(flatten)]
        kind: KindArg,
    },
}

#[derive(Subcommand, Debug)]
pub enum TokenCmd {
    /// Mint WID (token owner only).
    Mint {
        #[arg(long)]
        to: Address,
        #[arg(long)]
        amount: Amount,
    },
    /// Burn WID (token owner only).
    Burn {
        #[arg(long)]
        from: Address,
        #[arg(long)]
        amount: Amount,
    },
    Transfer {
        #[arg(long)]
        to: Address,
        #[arg(long)]
        amount: Amount,
    },
    /// Approve a spender; defaults to the stake vault.
    Approve {
        #[arg(long)]
        spender: Option<Address>,
        #[arg(long)]
        amount: Amount,
    },
    Balance {
        #[arg(long)]
        holder: Address,
    },
}

#[derive(Subcommand, Debug)]
pub enum StakeCmd {
    /// Lock WID for a tier: 6m, 1y, 3y, 5y, or the tier length in seconds.
    Deposit {
        #[arg(long, value_parser = parse_tier)]
        duration: StakeTier,
        #[arg(long)]
        amount: Amount,
        /// Bypass the governance card check and stake with the vault directly.
        #[arg(long)]
        direct: bool,
    },
    /// Withdraw a matured deposit.
    Withdraw {
        #[arg(long)]
        deposit_id: u64,
        #[arg(long)]
        direct: bool,
    },
    /// Voting power and live deposits of an address (defaults to the caller).
    Power {
        #[arg(long)]
        owner: Option<Address>,
    },
}

#[derive(Subcommand, Debug)]
pub enum GovCmd {
    /// Register a proposal session.
    Propose {
        #[arg(long)]
        description: String,
        /// Unix seconds; must be in the future.
        #[arg(long)]
        start: u64,
        #[arg(long)]
        end: u64,
    },
    Vote {
        #[arg(long)]
        session: u64,
        #[arg(long, value_parser = parse_choice)]
        choice: VoteChoice,
        #[arg(long)]
        power: Amount,
    },
    /// Session record as JSON.
    Session {
        #[arg(long)]
        id: u64,
    },
    Status {
        #[arg(long)]
        id: u64,
    },
    /// Has an address voted (defaults to the caller)?
    Voted {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        owner: Option<Address>,
    },
}

pub fn parse_tier(s: &str) -> Result<StakeTier, String> {
    let secs = match s.trim().to_ascii_lowercase().as_str() {
        "6m" | "6mo" => StakeTier::SixMonths.duration_secs(),
        "1y" => StakeTier::OneYear.duration_secs(),
        "3y" => StakeTier::ThreeYears.duration_secs(),
        "5y" => StakeTier::FiveYears.duration_secs(),
        other => other
            .parse::<u64>()
            .map_err(|_| format!("unknown duration '{s}' (use 6m, 1y, 3y, 5y or seconds)"))?,
    };
    StakeTier::from_duration_secs(secs).map_err(|e| e.to_string())
}

pub fn parse_choice(s: &str) -> Result<VoteChoice, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Ok(VoteChoice::Yes),
        "no" | "n" | "false" => Ok(VoteChoice::No),
        _ => Err(format!("unknown choice '{s}' (use yes or no)")),
    }
}
