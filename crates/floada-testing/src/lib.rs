//! # Floada Testing Infrastructure
//!
//! Shared fixtures for the floada crates:
//! - Edge case keys, mnemonics, addresses and amounts
//! - Known-answer vectors tying one key to both address forms
//! - Property-based testing strategies
//! - Single-character corruption helpers for checksum tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use floada_testing::*;
//!
//! for key in EdgeCaseKeys::valid_only() {
//!     KeyPair::from_private_key(&key).unwrap();
//! }
//!
//! proptest! {
//!     #[test]
//!     fn test_address_roundtrip(key in valid_private_key_bytes(), tag in network_tag()) {
//!         // ...
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use floada_traits::NetworkTag;
use proptest::prelude::*;
use std::ops::Range;

// ============================================================================
// Edge Case Key Material
// ============================================================================

/// Edge case private keys for secp256k1 boundary conditions
pub struct EdgeCaseKeys;

impl EdgeCaseKeys {
    /// All zeros (not a valid scalar)
    pub const ALL_ZEROS: [u8; 32] = [0u8; 32];

    /// All ones (above the curve order)
    pub const ALL_ONES: [u8; 32] = [0xFF; 32];

    /// Scalar 1, whose public key is the generator
    pub const ONE: [u8; 32] = {
        let mut k = [0u8; 32];
        k[31] = 1;
        k
    };

    /// Key with alternating bits
    pub const ALTERNATING: [u8; 32] = [0xAA; 32];

    /// Key with only bit 255 set
    pub const SINGLE_BIT_255: [u8; 32] = {
        let mut k = [0u8; 32];
        k[0] = 0x80;
        k
    };

    /// secp256k1 curve order (n), not a valid scalar
    pub const SECP256K1_ORDER: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
        0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B,
        0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
    ];

    /// n - 1, the largest valid scalar
    pub const SECP256K1_ORDER_MINUS_1: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
        0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B,
        0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x40,
    ];

    /// Every edge case key
    pub fn all() -> Vec<[u8; 32]> {
        let mut keys = Self::valid_only();
        keys.extend(Self::invalid_only());
        keys
    }

    /// Keys in `[1, n-1]`
    pub fn valid_only() -> Vec<[u8; 32]> {
        vec![
            Self::ONE,
            Self::ALTERNATING,
            Self::SINGLE_BIT_255,
            Self::SECP256K1_ORDER_MINUS_1,
        ]
    }

    /// Keys outside `[1, n-1]`
    pub fn invalid_only() -> Vec<[u8; 32]> {
        vec![Self::ALL_ZEROS, Self::ALL_ONES, Self::SECP256K1_ORDER]
    }
}

// ============================================================================
// Edge Case Mnemonics
// ============================================================================

/// Edge case mnemonic phrases
pub struct EdgeCaseMnemonics;

impl EdgeCaseMnemonics {
    /// Standard 12-word test mnemonic
    pub const STANDARD_12: &'static str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    /// Standard 24-word test mnemonic
    pub const STANDARD_24: &'static str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";

    /// All "zoo" words with a checksum word
    pub const ALL_ZOO: &'static str = "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong";

    /// Mixed case, normalized before use
    pub const MIXED_CASE: &'static str =
        "ABANDON abandon ABANDON abandon ABANDON abandon ABANDON abandon ABANDON abandon ABANDON about";

    /// Extra whitespace, normalized before use
    pub const EXTRA_WHITESPACE: &'static str =
        "  abandon   abandon  abandon abandon abandon abandon abandon abandon abandon abandon abandon   about  ";

    /// Phrases that must derive successfully
    pub fn valid() -> Vec<&'static str> {
        vec![
            Self::STANDARD_12,
            Self::STANDARD_24,
            Self::ALL_ZOO,
            Self::MIXED_CASE,
            Self::EXTRA_WHITESPACE,
        ]
    }

    /// Phrases with a word count outside 12/15/18/21/24
    pub fn wrong_word_count() -> Vec<&'static str> {
        vec![
            "abandon",
            "abandon abandon abandon",
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon",
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon",
        ]
    }

    /// Phrases with a supported word count but bad content
    pub fn malformed() -> Vec<&'static str> {
        vec![
            // bad checksum
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon wrong",
            // word outside the English list
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon floada",
        ]
    }
}

// ============================================================================
// Edge Case Addresses
// ============================================================================

/// Edge case addresses
pub struct EdgeCaseAddresses;

impl EdgeCaseAddresses {
    /// Bitcoin P2PKH: valid Base58Check, unknown version byte
    pub const BTC_P2PKH: &'static str = "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA";

    /// Bitcoin P2WPKH: valid bech32, unknown hrp
    pub const BTC_P2WPKH: &'static str = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";

    /// Strings that are not addresses in any supported encoding
    pub fn malformed() -> Vec<&'static str> {
        vec![
            "",
            "not_an_address",
            "0x742d35Cc6634C0532925a3b844Bc9e7595f5fFb9",
            "addr1",
            "F5qnh1L14u32",
        ]
    }

    /// Well-formed addresses of chains this crate does not know
    pub fn foreign() -> Vec<&'static str> {
        vec![Self::BTC_P2PKH, Self::BTC_P2WPKH]
    }
}

// ============================================================================
// Edge Case Amounts
// ============================================================================

/// Edge case amounts for overflow and precision
pub struct EdgeCaseAmounts;

impl EdgeCaseAmounts {
    /// Zero amount
    pub const ZERO: u64 = 0;

    /// One lovelace / satoshi
    pub const MIN: u64 = 1;

    /// Maximum u64
    pub const MAX_U64: u64 = u64::MAX;

    /// ADA max supply in lovelace (45 billion ADA)
    pub const ADA_MAX_SUPPLY: u64 = 45_000_000_000 * 1_000_000;

    /// Default transfer fee in lovelace
    pub const DEFAULT_FEE: u64 = 170_000;

    /// Pairs whose sum overflows u64
    pub fn overflow_test_pairs() -> Vec<(u64, u64)> {
        vec![
            (u64::MAX, 1),
            (u64::MAX / 2, u64::MAX / 2 + 2),
            (u64::MAX - 1, 2),
        ]
    }
}

// ============================================================================
// Known-Answer Vectors
// ============================================================================

/// One key and every encoding of it.
#[derive(Debug, Clone, Copy)]
pub struct KnownVector {
    /// Input secret (hex scalar, WIF or mnemonic)
    pub secret: &'static str,
    /// Compressed public key, hex
    pub public_key: &'static str,
    /// HASH160 of the public key, hex
    pub public_key_hash: &'static str,
    /// FLO mainnet address
    pub flo_mainnet: &'static str,
    /// FLO testnet address
    pub flo_testnet: &'static str,
    /// Cardano-style mainnet address
    pub cardano_mainnet: &'static str,
    /// Cardano-style testnet address
    pub cardano_testnet: &'static str,
}

impl KnownVector {
    /// Expected address for `tag`
    pub fn address(&self, tag: NetworkTag) -> &'static str {
        match tag {
            NetworkTag::FloMainnet => self.flo_mainnet,
            NetworkTag::FloTestnet => self.flo_testnet,
            NetworkTag::CardanoMainnet => self.cardano_mainnet,
            NetworkTag::CardanoTestnet => self.cardano_testnet,
        }
    }

    /// The public key hash as bytes
    pub fn hash(&self) -> [u8; 20] {
        let mut out = [0u8; 20];
        // Vectors are compile-time constants of the right length.
        if let Ok(bytes) = hex::decode(self.public_key_hash) {
            out.copy_from_slice(&bytes);
        }
        out
    }
}

/// Known-answer vectors.
pub struct KnownVectors;

impl KnownVectors {
    /// Private key 1: the public key is the generator point
    pub const GENERATOR: KnownVector = KnownVector {
        secret: "0000000000000000000000000000000000000000000000000000000000000001",
        public_key: "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
        public_key_hash: "751e76e8199196d454941c45d1b3a323f1433bd6",
        flo_mainnet: "FGWP1xKhDP5RmV525TmUoEwX9mTZwp3sJn",
        flo_testnet: "oTYdneAk1p9XCADx32QybGiTW852p1CKGT",
        cardano_mainnet: "addr1v963uahgrxged4z5jswyt5dn5v3lzsem6csn7zkh",
        cardano_testnet: "addr_test1vp63uahgrxged4z5jswyt5dn5v3lzsem6cf97pug",
    };

    /// A Bitcoin-family compressed WIF key
    pub const LEGACY_WIF: KnownVector = KnownVector {
        secret: "L1aW4aubDFB7yfras2S1mN3bqg9nwySY8nkoLmJebSLD5BWv3ENZ",
        public_key: "021af0625ebd8da5ae06ebe2ebe1088926cdafe4c618ac888d4d378edb8460e3d8",
        public_key_hash: "0020bee080cfdeb430cf723d952dc88b6bb74241",
        flo_mainnet: "F5qnh1L14u32MFSwoWawMV3TB1USApzgjx",
        flo_testnet: "oGt3ThB3sL77mvbsm5ES9WpPXN5u345yXL",
        cardano_mainnet: "addr1vyqzp0hqsr8aadpseaerm9fdez9khd6zgye7pwq8",
        cardano_testnet: "addr_test1vqqzp0hqsr8aadpseaerm9fdez9khd6zgyqgpd2c",
    };

    /// The same key as [`Self::LEGACY_WIF`] in FLO mainnet WIF form
    pub const FLO_WIF: &'static str = "RBsa5EX5LdEw5nKUDgFGdTMeYtBdAcvyqFZMvfRxnBi7vmUrRPtr";

    /// The same key as [`Self::LEGACY_WIF`] in FLO testnet WIF form
    pub const FLO_TESTNET_WIF: &'static str =
        "cRwVXVuSeJsP97KrFSF98gYfTuTCcRYECpuGTBmA6YzDKvatAYcP";

    /// Every vector
    pub fn all() -> Vec<KnownVector> {
        vec![Self::GENERATOR, Self::LEGACY_WIF]
    }
}

// ============================================================================
// Corruption Helpers
// ============================================================================

/// The Base58 alphabet
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// The bech32 data-part charset
pub const BECH32_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Replaces the character at `index` with the next one in `alphabet`,
/// so the result stays well-formed but differs in exactly one place.
///
/// Returns `None` if `index` is out of range or the character is not in
/// `alphabet`.
pub fn corrupt_char(text: &str, index: usize, alphabet: &str) -> Option<String> {
    let mut chars: Vec<char> = text.chars().collect();
    let current = *chars.get(index)?;
    let alphabet: Vec<char> = alphabet.chars().collect();
    let position = alphabet.iter().position(|&c| c == current)?;
    chars[index] = alphabet[(position + 1) % alphabet.len()];
    Some(chars.into_iter().collect())
}

/// Index range of the data part (after the last `1`) of a bech32 string.
pub fn bech32_data_range(address: &str) -> Range<usize> {
    match address.rfind('1') {
        Some(separator) => separator + 1..address.len(),
        None => 0..0,
    }
}

/// Every single-character corruption of `address` that stays within the
/// alphabet of its encoding.
pub fn single_char_corruptions(address: &str) -> Vec<String> {
    let bech32 = address.starts_with("addr");
    let (range, alphabet) = if bech32 {
        (bech32_data_range(address), BECH32_CHARSET)
    } else {
        (0..address.len(), BASE58_ALPHABET)
    };
    range
        .filter_map(|i| corrupt_char(address, i, alphabet))
        .collect()
}

/// Characters a bech32 data part can never contain
pub const BECH32_EXCLUDED: [char; 4] = ['1', 'b', 'i', 'o'];

/// Every single-character corruption of a bech32 data part that leaves the
/// charset: each of [`BECH32_EXCLUDED`], and a case flip of letters.
pub fn bech32_out_of_charset_corruptions(address: &str) -> Vec<String> {
    let chars: Vec<char> = address.chars().collect();
    let mut out = Vec::new();
    for i in bech32_data_range(address) {
        let current = chars[i];
        let mut replacements = BECH32_EXCLUDED.to_vec();
        if current.is_ascii_alphabetic() {
            replacements.push(if current.is_ascii_lowercase() {
                current.to_ascii_uppercase()
            } else {
                current.to_ascii_lowercase()
            });
        }
        for replacement in replacements {
            let mut corrupted = chars.clone();
            corrupted[i] = replacement;
            out.push(corrupted.into_iter().collect());
        }
    }
    out
}

// ============================================================================
// Property-Based Testing Strategies
// ============================================================================

/// Valid secp256k1 private keys (every byte in 1..=254 keeps the scalar below n)
pub fn valid_private_key_bytes() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(1u8..=254u8)
}

/// Any public key hash
pub fn public_key_hash() -> impl Strategy<Value = [u8; 20]> {
    prop::array::uniform20(any::<u8>())
}

/// Any network tag
pub fn network_tag() -> impl Strategy<Value = NetworkTag> {
    prop::sample::select(NetworkTag::ALL.to_vec())
}

/// Positive transfer amounts within ADA supply
pub fn valid_amount() -> impl Strategy<Value = u64> {
    1u64..=EdgeCaseAmounts::ADA_MAX_SUPPLY
}

/// Fee amounts
pub fn valid_fee() -> impl Strategy<Value = u64> {
    0u64..=10_000_000u64
}

/// Raw `(txid, vout, value)` inputs with distinct outpoints
pub fn distinct_inputs(max: usize) -> impl Strategy<Value = Vec<([u8; 32], u32, u64)>> {
    prop::collection::btree_map(
        (prop::array::uniform32(any::<u8>()), 0u32..16),
        1u64..=1_000_000_000,
        0..=max,
    )
    .prop_map(|map| {
        map.into_iter()
            .map(|((txid, vout), value)| (txid, vout, value))
            .collect()
    })
}
