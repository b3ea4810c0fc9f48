//! Governance for WorkID.
//!
//! Every action is gated on two facts re-read on each call: the caller
//! holds a valid employee card, and the caller has staked WID for a
//! nonzero voting weight. Proposals are time-boxed sessions whose status
//! (Pending → InProgress → Ended) is derived from the clock on read.
//!
//! Key principle: one address = one ballot per session, weighted by a
//! caller-chosen share of its voting power.

pub mod coordinator;
pub mod error;
pub mod session;

pub use coordinator::GovernanceCoordinator;
pub use error::GovernanceError;
pub use session::{ProposalSession, SessionId, SessionStatus};
