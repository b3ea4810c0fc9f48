//! Fundamental types for WorkID.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, amounts, timestamps and clocks, the error taxonomy, the domain
//! event feed, and the typed card profile records.

pub mod address;
pub mod amount;
pub mod card;
pub mod error;
pub mod event;
pub mod time;

pub use address::Address;
pub use amount::{Amount, WID_DECIMALS, WID_UNIT};
pub use card::{CardKind, CardProfile, EmployeeProfile, MemberProfile, TokenId};
pub use error::{ErrorKind, TypesError};
pub use event::{LedgerEvent, VoteChoice};
pub use time::{Clock, SystemClock, Timestamp};
