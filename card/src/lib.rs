//! Credential registry for WorkID cards.
//!
//! A card is a non-transferable token bound to one address. The issuer
//! mints at most one card per address, may later set (or move) its end
//! time, and may burn it to free the address. Validity is never stored:
//! a card is valid while it has no end time or its end time is still in
//! the future.

pub mod credential;
pub mod error;
pub mod registry;

pub use credential::Credential;
pub use error::CardError;
pub use registry::CredentialRegistry;
