//! A single issued card.

use serde::{Deserialize, Serialize};
use workid_types::{Address, CardProfile, Timestamp, TokenId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token_id: TokenId,
    pub owner: Address,
    /// Opaque locator of the off-chain metadata (`scheme://identifier`).
    pub uri: String,
    /// End of validity. `None` means valid indefinitely; once set it is never cleared.
    pub expiry: Option<Timestamp>,
    /// Typed profile captured at issuance, if the issuer supplied one.
    pub profile: Option<CardProfile>,
}

impl Credential {
    /// `expiry is unset OR expiry > now`.
    pub fn is_valid(&self, now: Timestamp) -> bool {
        match self.expiry {
            None => true,
            Some(end) => end > now,
        }
    }
}
