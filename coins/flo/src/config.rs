use floada_traits::Network;
use serde::{Deserialize, Serialize};

/// FLO network configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub network: Network,
    pub name: String,
    pub currency_symbol: String,
    pub decimals: u8,
    pub pubkey_address_version: u8,
    pub script_address_version: u8,
    pub wif_version: u8,
    pub explorer: String,
}

/// Pay-to-pubkey-hash version byte, mainnet (addresses start with `F`)
pub const MAINNET_PUBKEY_VERSION: u8 = 0x23;
/// Pay-to-pubkey-hash version byte, testnet (addresses start with `o`)
pub const TESTNET_PUBKEY_VERSION: u8 = 0x73;
/// Pay-to-script-hash version byte, mainnet
pub const MAINNET_SCRIPT_VERSION: u8 = 0x5E;
/// Pay-to-script-hash version byte, testnet
pub const TESTNET_SCRIPT_VERSION: u8 = 0x3A;

/// 1 FLO = 100,000,000 satoshi
pub const SATOSHI_PER_FLO: u64 = 100_000_000;

impl NetworkConfig {
    /// FLO mainnet
    pub fn mainnet() -> Self {
        Self {
            network: Network::Mainnet,
            name: "FLO Mainnet".to_string(),
            currency_symbol: "FLO".to_string(),
            decimals: 8,
            pubkey_address_version: MAINNET_PUBKEY_VERSION,
            script_address_version: MAINNET_SCRIPT_VERSION,
            wif_version: floada_hd_key::wif::FLO_MAINNET_WIF_VERSION,
            explorer: "https://flosight.ranchimall.net".to_string(),
        }
    }

    /// FLO testnet
    pub fn testnet() -> Self {
        Self {
            network: Network::Testnet,
            name: "FLO Testnet".to_string(),
            currency_symbol: "tFLO".to_string(),
            decimals: 8,
            pubkey_address_version: TESTNET_PUBKEY_VERSION,
            script_address_version: TESTNET_SCRIPT_VERSION,
            wif_version: floada_hd_key::wif::FLO_TESTNET_WIF_VERSION,
            explorer: "https://testnet-flosight.ranchimall.net".to_string(),
        }
    }

    /// Configuration for `network`
    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Mainnet => Self::mainnet(),
            Network::Testnet => Self::testnet(),
        }
    }

    pub fn is_mainnet(&self) -> bool {
        self.network == Network::Mainnet
    }

    /// Explorer page for an address
    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.explorer, address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet() {
        let config = NetworkConfig::mainnet();
        assert!(config.is_mainnet());
        assert_eq!(config.pubkey_address_version, 0x23);
        assert_eq!(config.wif_version, 0xA3);
    }

    #[test]
    fn test_testnet() {
        let config = NetworkConfig::for_network(Network::Testnet);
        assert!(!config.is_mainnet());
        assert_eq!(config.pubkey_address_version, 0x73);
        assert_eq!(config.wif_version, 0xEF);
    }

    #[test]
    fn test_address_url() {
        let url = NetworkConfig::mainnet().address_url("FGWP1xKhDP5RmV525TmUoEwX9mTZwp3sJn");
        assert!(url.ends_with("/address/FGWP1xKhDP5RmV525TmUoEwX9mTZwp3sJn"));
    }
}
