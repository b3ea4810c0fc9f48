//! Credential ("card") kinds and their typed profile records.
//!
//! The off-chain metadata blob behind a card's URI is free-form; the
//! ledger's own bookkeeping keeps the issuance-time profile as a fixed
//! record with named fields instead.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an issued card, unique within its registry.
pub type TokenId = u64;

/// Which family of card a registry issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Employment card; gates governance.
    Employee,
    /// Membership card.
    Member,
}

impl CardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile captured when an employee card is issued.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub first_name: String,
    pub last_name: String,
    /// `DD/MM/YYYY`, as entered by the issuer.
    pub birth_date: String,
    /// `DD/MM/YYYY`, as entered by the issuer.
    pub start_date: String,
    pub service: String,
    pub role: String,
    pub contract_type: String,
    pub contract_category: String,
}

/// Profile captured when a member card is issued.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub first_name: String,
    pub last_name: String,
    pub start_date: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardProfile {
    Employee(EmployeeProfile),
    Member(MemberProfile),
}

impl CardProfile {
    /// The card kind this profile belongs to.
    pub fn kind(&self) -> CardKind {
        match self {
            Self::Employee(_) => CardKind::Employee,
            Self::Member(_) => CardKind::Member,
        }
    }

    /// "First Last", for display.
    pub fn full_name(&self) -> String {
        let (first, last) = match self {
            Self::Employee(p) => (&p.first_name, &p.last_name),
            Self::Member(p) => (&p.first_name, &p.last_name),
        };
        format!("{first} {last}")
    }
}
