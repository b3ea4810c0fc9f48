//! Ledger configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use workid_types::Address;

use crate::LedgerError;

/// Wiring for a [`WorkIdLedger`](crate::WorkIdLedger).
///
/// Can be loaded from a TOML file via [`LedgerConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default, so
/// an empty file is a valid dev configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Administrative address allowed to mint, invalidate and burn cards.
    #[serde(default = "default_issuer")]
    pub issuer: Address,

    /// Address allowed to mint and burn WID.
    #[serde(default = "default_issuer")]
    pub token_owner: Address,

    /// Custody address of the stake vault. Holders approve this address.
    #[serde(default = "default_vault_address")]
    pub vault_address: Address,

    #[serde(default = "default_governance_address")]
    pub governance_address: Address,

    #[serde(default = "default_card_name")]
    pub card_name: String,

    #[serde(default = "default_card_symbol")]
    pub card_symbol: String,

    #[serde(default = "default_member_card_name")]
    pub member_card_name: String,

    #[serde(default = "default_member_card_symbol")]
    pub member_card_symbol: String,

    #[serde(default = "default_token_name")]
    pub token_name: String,

    #[serde(default = "default_token_symbol")]
    pub token_symbol: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_issuer() -> Address {
    Address::new([0x01; 20])
}

fn default_vault_address() -> Address {
    Address::new([0xaa; 20])
}

fn default_governance_address() -> Address {
    Address::new([0xbb; 20])
}

fn default_card_name() -> String {
    "WorkID Employee Card".to_string()
}

fn default_card_symbol() -> String {
    "WEC".to_string()
}

fn default_member_card_name() -> String {
    "WorkID Member Card".to_string()
}

fn default_member_card_symbol() -> String {
    "WMC".to_string()
}

fn default_token_name() -> String {
    "WorkID".to_string()
}

fn default_token_symbol() -> String {
    "WID".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl LedgerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| LedgerError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, LedgerError> {
        let config: Self = toml::from_str(s).map_err(|e| LedgerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, LedgerError> {
        toml::to_string_pretty(self).map_err(|e| LedgerError::Config(e.to_string()))
    }

    /// Role addresses must be non-null, and the vault must not share an
    /// address with anything that can hold or move WID on its own.
    pub fn validate(&self) -> Result<(), LedgerError> {
        let roles = [
            ("issuer", self.issuer),
            ("token_owner", self.token_owner),
            ("vault_address", self.vault_address),
            ("governance_address", self.governance_address),
        ];
        for (name, address) in roles {
            if address.is_zero() {
                return Err(LedgerError::Config(format!("{name} can't be the null address")));
            }
        }
        if self.vault_address == self.token_owner
            || self.vault_address == self.issuer
            || self.vault_address == self.governance_address
        {
            return Err(LedgerError::Config(
                "vault_address must differ from issuer, token_owner and governance_address".into(),
            ));
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
            token_owner: default_issuer(),
            vault_address: default_vault_address(),
            governance_address: default_governance_address(),
            card_name: default_card_name(),
            card_symbol: default_card_symbol(),
            member_card_name: default_member_card_name(),
            member_card_symbol: default_member_card_symbol(),
            token_name: default_token_name(),
            token_symbol: default_token_symbol(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = LedgerConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = LedgerConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = LedgerConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.card_name, "WorkID Employee Card");
        assert_eq!(config.card_symbol, "WEC");
        assert_eq!(config.token_symbol, "WID");
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            issuer = "0x2222222222222222222222222222222222222222"
            log_level = "debug"
        "#;
        let config = LedgerConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.issuer, Address::new([0x22; 20]));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.token_owner, Address::new([0x01; 20])); // default
    }

    #[test]
    fn bad_address_rejected() {
        let err = LedgerConfig::from_toml_str(r#"issuer = "0x12""#).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }

    #[test]
    fn null_or_clashing_roles_rejected() {
        let toml = r#"vault_address = "0x0000000000000000000000000000000000000000""#;
        assert!(LedgerConfig::from_toml_str(toml).is_err());

        let clash = LedgerConfig {
            vault_address: Address::new([0x01; 20]),
            ..LedgerConfig::default()
        };
        assert!(clash.validate().is_err());

        let shared = LedgerConfig {
            governance_address: LedgerConfig::default().vault_address,
            ..LedgerConfig::default()
        };
        let err = shared.validate().unwrap_err();
        assert!(err.to_string().contains("governance_address"));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = LedgerConfig::from_toml_file("/nonexistent/workid.toml").unwrap_err();
        assert!(err.to_string().contains("workid.toml"));
    }
}
