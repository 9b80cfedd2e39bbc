//! Standard derivation paths

/// SLIP-44 coin type registered for FLO
pub const FLO_COIN_TYPE: u32 = 216;

/// BIP-44 FLO: m/44'/216'/0'/0/0
pub const FLO: &str = "m/44'/216'/0'/0/0";

/// BIP-44 Bitcoin: m/44'/0'/0'/0/0, for keys exported from Bitcoin-family wallets
pub const BITCOIN_LEGACY: &str = "m/44'/0'/0'/0/0";

/// Mnemonic lengths accepted by BIP-39
pub const SUPPORTED_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// BIP-44 path for a FLO account and address index.
pub fn flo_path(account: u32, index: u32) -> String {
    format!("m/44'/{FLO_COIN_TYPE}'/{account}'/0/{index}")
}
