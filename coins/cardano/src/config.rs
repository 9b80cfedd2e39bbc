use floada_error::Result;
use floada_traits::{Amount, Network};
use serde::{Deserialize, Serialize};

/// Cardano-style network configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub network_id: u8,
    pub name: String,
    pub currency_symbol: String,
    pub decimals: u8,
    pub explorer: String,
    pub address_prefix: String,
}

/// Cardano network IDs
pub const MAINNET_NETWORK_ID: u8 = 1;
pub const TESTNET_NETWORK_ID: u8 = 0; // Preview/Preprod

/// Enterprise (payment key only) address header, high nibble
pub const ENTERPRISE_HEADER: u8 = 0x60;

/// Human-readable parts
pub const MAINNET_HRP: &str = "addr";
pub const TESTNET_HRP: &str = "addr_test";

/// Lovelace is the smallest unit (1 ADA = 1,000,000 Lovelace)
pub const LOVELACE_PER_ADA: u64 = 1_000_000;

/// Flat transfer fee estimate used when the caller supplies none (0.17 ADA)
pub const DEFAULT_FEE_LOVELACE: u64 = 170_000;

/// Minimum UTXO value (depends on era, ~1 ADA typically)
pub const MIN_UTXO_LOVELACE: u64 = 1_000_000;

impl NetworkConfig {
    /// Cardano Mainnet configuration
    pub fn mainnet() -> Self {
        NetworkConfig {
            network_id: MAINNET_NETWORK_ID,
            name: "Cardano Mainnet".to_string(),
            currency_symbol: "ADA".to_string(),
            decimals: 6,
            explorer: "https://cardanoscan.io".to_string(),
            address_prefix: MAINNET_HRP.to_string(),
        }
    }

    /// Cardano Preview Testnet configuration
    pub fn preview() -> Self {
        NetworkConfig {
            network_id: TESTNET_NETWORK_ID,
            name: "Cardano Preview".to_string(),
            currency_symbol: "tADA".to_string(),
            decimals: 6,
            explorer: "https://preview.cardanoscan.io".to_string(),
            address_prefix: TESTNET_HRP.to_string(),
        }
    }

    /// Configuration for `network`
    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Mainnet => Self::mainnet(),
            Network::Testnet => Self::preview(),
        }
    }

    /// Check if mainnet
    pub fn is_mainnet(&self) -> bool {
        self.network_id == MAINNET_NETWORK_ID
    }

    /// Enterprise address header for this network
    pub fn enterprise_header(&self) -> u8 {
        ENTERPRISE_HEADER | (self.network_id & 0x0F)
    }
}

/// Network id carried in the low nibble of the address header
pub fn network_id(network: Network) -> u8 {
    match network {
        Network::Mainnet => MAINNET_NETWORK_ID,
        Network::Testnet => TESTNET_NETWORK_ID,
    }
}

/// Converts a decimal ADA string to lovelace without floating point.
pub fn ada_to_lovelace(ada: &str) -> Result<u64> {
    Amount::parse(ada, 6)?.to_u64()
}

/// Renders lovelace as ADA with two decimals, rounding half up.
pub fn format_lovelace(lovelace: u64) -> String {
    let cents = (u128::from(lovelace) + 5_000) / 10_000;
    format!("{}.{:02}", cents / 100, cents % 100)
}

/// Lovelace as an exact ADA [`Amount`]
pub fn lovelace_amount(lovelace: u64) -> Amount {
    Amount::from_smallest_unit(u128::from(lovelace), 6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers() {
        assert_eq!(NetworkConfig::mainnet().enterprise_header(), 0x61);
        assert_eq!(NetworkConfig::preview().enterprise_header(), 0x60);
    }

    #[test]
    fn test_for_network() {
        assert!(NetworkConfig::for_network(Network::Mainnet).is_mainnet());
        assert!(!NetworkConfig::for_network(Network::Testnet).is_mainnet());
        assert_eq!(network_id(Network::Testnet), TESTNET_NETWORK_ID);
    }

    #[test]
    fn test_ada_to_lovelace() {
        assert_eq!(ada_to_lovelace("1").unwrap(), 1_000_000);
        assert_eq!(ada_to_lovelace("0.17").unwrap(), DEFAULT_FEE_LOVELACE);
        assert_eq!(ada_to_lovelace("2.000001").unwrap(), 2_000_001);
        assert!(ada_to_lovelace("0.0000001").is_err());
        assert!(ada_to_lovelace("abc").is_err());
    }

    #[test]
    fn test_format_lovelace() {
        assert_eq!(format_lovelace(1_000_000), "1.00");
        assert_eq!(format_lovelace(170_000), "0.17");
        assert_eq!(format_lovelace(1_234_567), "1.23");
        assert_eq!(format_lovelace(1_235_000), "1.24");
        assert_eq!(format_lovelace(0), "0.00");
    }

    #[test]
    fn test_lovelace_amount_display() {
        assert_eq!(lovelace_amount(1_500_000).to_string(), "1.500000");
    }
}
