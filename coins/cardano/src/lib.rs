//! # Floada Cardano
//!
//! Cardano-style chain support for floada.
//!
//! ## Features
//!
//! - Enterprise addresses (`addr1…` / `addr_test1…`) over a secp256k1 HASH160
//! - Deterministic BIP-340 Schnorr transfer signatures
//! - Lovelace/ADA conversions and the default transfer fee
//!
//! ## Example
//!
//! ```rust
//! use floada_cardano::CardanoAddress;
//! use floada_traits::Network;
//!
//! let pubkey = hex::decode("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798").unwrap();
//! let address = CardanoAddress::enterprise(&pubkey, Network::Mainnet).unwrap();
//! assert!(address.to_bech32().starts_with("addr1"));
//! ```
//!
//! ## Addresses
//!
//! Addresses here carry a 20-byte HASH160 of a compressed secp256k1 key
//! behind the enterprise header (`0x60 | network_id`), so the key that
//! controls a FLO address also controls the matching `addr` address.

pub mod address;
pub mod config;
pub mod signer;

pub use address::{
    checksum_from_text, decode_bech32, encode_bech32, match_bech32_format, Bech32Parts,
    CardanoAddress, ADDRESS_FORMATS,
};
pub use config::{
    ada_to_lovelace, format_lovelace, lovelace_amount, NetworkConfig, DEFAULT_FEE_LOVELACE,
    LOVELACE_PER_ADA, MAINNET_HRP, MAINNET_NETWORK_ID, MIN_UTXO_LOVELACE, TESTNET_HRP,
    TESTNET_NETWORK_ID,
};
pub use signer::{CardanoSigner, CARDANO_SIGNATURE_LEN, CARDANO_SIGNING_TAG};
