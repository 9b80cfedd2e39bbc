//! Configuration

use std::path::Path;

use floada_cardano::DEFAULT_FEE_LOVELACE;
use floada_error::{FloadaError, Result};
use floada_hd_key::paths;
use floada_hd_key::{DerivationConfig, KeyDerivationEngine};
use floada_traits::Network;
use serde::{Deserialize, Serialize};

use crate::codec::AddressCodec;
use crate::compat::CompatibilityValidator;
use crate::cosigner::TransactionCoSigner;

pub const ENV_NETWORK: &str = "FLOADA_NETWORK";
pub const ENV_DERIVATION_PATH: &str = "FLOADA_DERIVATION_PATH";
pub const ENV_ACCEPT_LEGACY_WIF: &str = "FLOADA_ACCEPT_LEGACY_WIF";
pub const ENV_DEFAULT_FEE: &str = "FLOADA_DEFAULT_FEE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloadaConfig {
    pub network: Network,
    pub derivation_path: String,
    pub accept_legacy_wif: bool,
    /// Fee applied when a transfer does not name one, smallest unit
    pub default_fee: u64,
}

impl Default for FloadaConfig {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            derivation_path: paths::FLO.to_string(),
            accept_legacy_wif: true,
            default_fee: DEFAULT_FEE_LOVELACE,
        }
    }
}

impl FloadaConfig {
    /// Reads a JSON config file, then applies environment overrides.
    /// Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| FloadaError::IoError(format!("{}: {e}", path.display())))?;
        let mut config = Self::from_json(&text)?;
        config.apply_env()?;
        Ok(config)
    }

    /// Defaults plus environment overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| FloadaError::ConfigError(e.to_string()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| FloadaError::ConfigError(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Applies `FLOADA_*` variables from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by the `FLOADA_*` names.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(network) = lookup(ENV_NETWORK) {
            self.network = network.parse()?;
        }
        if let Some(path) = lookup(ENV_DERIVATION_PATH) {
            self.derivation_path = path.trim().to_string();
        }
        if let Some(flag) = lookup(ENV_ACCEPT_LEGACY_WIF) {
            self.accept_legacy_wif = parse_bool(ENV_ACCEPT_LEGACY_WIF, &flag)?;
        }
        if let Some(fee) = lookup(ENV_DEFAULT_FEE) {
            self.default_fee = fee.trim().parse().map_err(|_| {
                FloadaError::ConfigError(format!("{ENV_DEFAULT_FEE} must be an integer, got '{fee}'"))
            })?;
        }
        Ok(())
    }

    pub fn derivation_config(&self) -> DerivationConfig {
        DerivationConfig {
            path: self.derivation_path.clone(),
            accept_legacy_wif: self.accept_legacy_wif,
        }
    }

    /// Builds the derivation engine; fails on an unusable path.
    pub fn engine(&self) -> Result<KeyDerivationEngine> {
        KeyDerivationEngine::new(self.derivation_config())
    }

    pub fn codec(&self) -> AddressCodec {
        AddressCodec::new()
    }

    pub fn validator(&self) -> CompatibilityValidator {
        CompatibilityValidator::new(self.codec())
    }

    pub fn cosigner(&self) -> TransactionCoSigner {
        TransactionCoSigner::new(self.codec())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(FloadaError::ConfigError(format!(
            "{key} must be a boolean, got '{other}'"
        ))),
    }
}
