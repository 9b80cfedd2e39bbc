//! # Floada FLO
//!
//! FLO support for floada.
//!
//! ## Features
//!
//! - Mainnet and testnet network parameters
//! - Base58Check pay-to-pubkey-hash addresses (`F…` / `o…`)
//! - Deterministic recoverable ECDSA transfer signatures
//!
//! ## Example
//!
//! ```rust
//! use floada_flo::FloAddress;
//! use floada_traits::Network;
//!
//! let pubkey = hex::decode("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798").unwrap();
//! let address = FloAddress::from_public_key(&pubkey, Network::Mainnet);
//! assert_eq!(address.as_str(), "FGWP1xKhDP5RmV525TmUoEwX9mTZwp3sJn");
//! ```
//!
//! FLO keys are ordinary secp256k1 keys, so a FLO WIF key also controls the
//! Cardano-style address built from the same HASH160.

pub mod address;
pub mod config;
pub mod signer;

pub use address::{
    base58check_checksum, decode_base58check, encode_base58check, Base58CheckParts, FloAddress,
    ADDRESS_FORMATS,
};
pub use config::{
    NetworkConfig, MAINNET_PUBKEY_VERSION, SATOSHI_PER_FLO, TESTNET_PUBKEY_VERSION,
};
pub use signer::{FloSigner, FLO_SIGNATURE_LEN, FLO_SIGNING_TAG};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pubkey_versions() {
        assert_eq!(MAINNET_PUBKEY_VERSION, 0x23);
        assert_eq!(TESTNET_PUBKEY_VERSION, 0x73);
    }

    #[test]
    fn test_satoshi_per_flo() {
        assert_eq!(SATOSHI_PER_FLO, 100_000_000);
    }

    #[test]
    fn test_address_formats_cover_both_networks() {
        assert_eq!(ADDRESS_FORMATS.len(), 2);
        assert!(ADDRESS_FORMATS.iter().all(|f| f.tag.chain() == floada_traits::Chain::Flo));
    }
}
