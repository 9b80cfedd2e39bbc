//! # Floada Traits
//!
//! Shared vocabulary for the floada crates: which chain and network an
//! address belongs to, how each network encodes addresses, how amounts are
//! expressed, and the [`SignatureScheme`] seam each chain crate implements.
//!
//! ## Core Types
//!
//! - [`Chain`] / [`Network`] / [`NetworkTag`] - where an address lives
//! - [`AddressFormat`] - one row of the address codec's dispatch table
//! - [`Amount`] - exact fixed-point amounts in a chain's smallest unit
//! - [`SignatureScheme`] - digest, sign and verify for one chain
//!
//! ## Example
//!
//! ```
//! use floada_traits::prelude::*;
//!
//! let tag = NetworkTag::new(Chain::Cardano, Network::Testnet);
//! assert_eq!(tag, NetworkTag::CardanoTestnet);
//! assert!(tag.network().is_testnet());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use floada_error::{FloadaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of a HASH160 public-key hash.
pub const PUBLIC_KEY_HASH_LEN: usize = 20;

/// Length of a compressed SEC1 secp256k1 public key.
pub const COMPRESSED_PUBLIC_KEY_LEN: usize = 33;

/// A HASH160 digest of a compressed public key.
pub type PublicKeyHash = [u8; PUBLIC_KEY_HASH_LEN];

// ============================================================================
// Chains and networks
// ============================================================================

/// The two chains sharing one secp256k1 key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// FLO, a Bitcoin-family chain with Base58Check addresses
    Flo,
    /// Cardano-style chain with bech32 addresses
    Cardano,
}

impl Chain {
    /// Ticker symbol of the chain's native currency
    pub fn symbol(&self) -> &'static str {
        match self {
            Chain::Flo => "FLO",
            Chain::Cardano => "ADA",
        }
    }

    /// Decimal places of the smallest unit
    pub fn decimals(&self) -> u8 {
        match self {
            Chain::Flo => 8,
            Chain::Cardano => 6,
        }
    }

    /// Stable one-byte identifier used in canonical serialization
    pub fn id(&self) -> u8 {
        match self {
            Chain::Flo => 0x01,
            Chain::Cardano => 0x02,
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chain::Flo => write!(f, "flo"),
            Chain::Cardano => write!(f, "cardano"),
        }
    }
}

/// Mainnet or testnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production network
    #[default]
    Mainnet,
    /// Test network
    Testnet,
}

impl Network {
    /// Returns true for [`Network::Testnet`]
    pub fn is_testnet(&self) -> bool {
        matches!(self, Network::Testnet)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = FloadaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" | "preview" | "preprod" => Ok(Network::Testnet),
            other => Err(FloadaError::ConfigError(format!("unknown network '{other}'"))),
        }
    }
}

/// A (chain, network) pair identifying an address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkTag {
    /// FLO mainnet
    FloMainnet,
    /// FLO testnet
    FloTestnet,
    /// Cardano-style mainnet
    CardanoMainnet,
    /// Cardano-style testnet
    CardanoTestnet,
}

impl NetworkTag {
    /// All tags, in table order.
    pub const ALL: [NetworkTag; 4] = [
        NetworkTag::FloMainnet,
        NetworkTag::FloTestnet,
        NetworkTag::CardanoMainnet,
        NetworkTag::CardanoTestnet,
    ];

    /// Builds a tag from its parts
    pub fn new(chain: Chain, network: Network) -> Self {
        match (chain, network) {
            (Chain::Flo, Network::Mainnet) => NetworkTag::FloMainnet,
            (Chain::Flo, Network::Testnet) => NetworkTag::FloTestnet,
            (Chain::Cardano, Network::Mainnet) => NetworkTag::CardanoMainnet,
            (Chain::Cardano, Network::Testnet) => NetworkTag::CardanoTestnet,
        }
    }

    /// The chain part
    pub fn chain(&self) -> Chain {
        match self {
            NetworkTag::FloMainnet | NetworkTag::FloTestnet => Chain::Flo,
            NetworkTag::CardanoMainnet | NetworkTag::CardanoTestnet => Chain::Cardano,
        }
    }

    /// The network part
    pub fn network(&self) -> Network {
        match self {
            NetworkTag::FloMainnet | NetworkTag::CardanoMainnet => Network::Mainnet,
            NetworkTag::FloTestnet | NetworkTag::CardanoTestnet => Network::Testnet,
        }
    }

    /// Stable one-byte identifier: chain id in the high nibble, testnet bit low.
    pub fn id(&self) -> u8 {
        (self.chain().id() << 4) | u8::from(self.network().is_testnet())
    }

    /// Inverse of [`NetworkTag::id`]
    pub fn from_id(id: u8) -> Option<Self> {
        NetworkTag::ALL.into_iter().find(|tag| tag.id() == id)
    }
}

impl fmt::Display for NetworkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.chain(), self.network())
    }
}

// ============================================================================
// Address formats
// ============================================================================

/// How a network renders `(publicKeyHash)` as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressEncoding {
    /// `Base58(version ‖ hash ‖ SHA256d(version ‖ hash)[..4])`
    Base58Check {
        /// Version byte
        version: u8,
    },
    /// `bech32(hrp, header ‖ hash)`
    Bech32 {
        /// Human-readable part
        hrp: &'static str,
        /// Header byte preceding the hash
        header: u8,
    },
}

/// One entry of the address dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressFormat {
    /// Address space this entry encodes
    pub tag: NetworkTag,
    /// Encoding parameters
    pub encoding: AddressEncoding,
}

impl AddressFormat {
    /// Creates a Base58Check entry
    pub const fn base58check(tag: NetworkTag, version: u8) -> Self {
        Self {
            tag,
            encoding: AddressEncoding::Base58Check { version },
        }
    }

    /// Creates a bech32 entry
    pub const fn bech32(tag: NetworkTag, hrp: &'static str, header: u8) -> Self {
        Self {
            tag,
            encoding: AddressEncoding::Bech32 { hrp, header },
        }
    }
}

// ============================================================================
// Amounts
// ============================================================================

/// A chain amount held exactly in its smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount {
    /// The value in the smallest unit of the currency
    pub value: u128,
    /// Number of decimal places (8 for FLO, 6 for ADA)
    pub decimals: u8,
}

impl Amount {
    /// Creates a new Amount from the smallest unit value
    pub fn from_smallest_unit(value: u128, decimals: u8) -> Self {
        Self { value, decimals }
    }

    /// Parses a decimal string such as `"1.5"` without going through floats.
    pub fn parse(text: &str, decimals: u8) -> Result<Self> {
        let text = text.trim();
        let invalid = || FloadaError::InvalidAmount(format!("'{text}' is not a decimal amount"));
        let (whole, frac) = match text.split_once('.') {
            Some((w, f)) => (w, f),
            None => (text, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > decimals as usize {
            return Err(FloadaError::InvalidAmount(format!(
                "'{text}' has more than {decimals} decimal places"
            )));
        }

        let overflow = || FloadaError::AmountOverflow(text.to_string());
        let scale = 10u128.checked_pow(decimals as u32).ok_or_else(overflow)?;
        let whole_units: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let frac_units: u128 = if frac.is_empty() {
            0
        } else {
            let padded = format!("{frac:0<width$}", width = decimals as usize);
            padded.parse().map_err(|_| invalid())?
        };
        let value = whole_units
            .checked_mul(scale)
            .and_then(|v| v.checked_add(frac_units))
            .ok_or_else(overflow)?;
        Ok(Self { value, decimals })
    }

    /// Returns the value in the smallest unit
    pub fn smallest_unit(&self) -> u128 {
        self.value
    }

    /// Returns the value as `u64`, failing if it does not fit
    pub fn to_u64(&self) -> Result<u64> {
        u64::try_from(self.value).map_err(|_| FloadaError::AmountOverflow(self.value.to_string()))
    }

    /// Returns zero amount with the specified decimals
    pub fn zero(decimals: u8) -> Self {
        Self { value: 0, decimals }
    }

    /// Checks if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.decimals == 0 {
            return write!(f, "{}", self.value);
        }
        let scale = 10u128.pow(self.decimals as u32);
        write!(
            f,
            "{}.{:0width$}",
            self.value / scale,
            self.value % scale,
            width = self.decimals as usize
        )
    }
}

// ============================================================================
// Signature schemes
// ============================================================================

/// Identifies a signature algorithm on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeId {
    /// RFC 6979 recoverable ECDSA, 65-byte signatures
    EcdsaRecoverable,
    /// BIP-340 Schnorr, 64-byte signatures
    Schnorr,
}

/// A chain's transaction signature scheme.
///
/// Implementations are deterministic: the same key and digest always
/// produce the same signature bytes.
pub trait SignatureScheme: Send + Sync {
    /// Wire identifier of the algorithm
    fn id(&self) -> SchemeId;

    /// The chain whose transactions this scheme signs
    fn chain(&self) -> Chain;

    /// Fixed signature length in bytes
    fn signature_len(&self) -> usize;

    /// Domain-separated digest of canonical payload bytes
    fn digest(&self, payload: &[u8]) -> [u8; 32];

    /// Signs a digest with a 32-byte secp256k1 private key
    fn sign_digest(&self, private_key: &[u8; 32], digest: &[u8; 32]) -> Result<Vec<u8>>;

    /// Verifies a signature over `digest` against a compressed public key
    fn verify_digest(
        &self,
        public_key: &[u8; COMPRESSED_PUBLIC_KEY_LEN],
        digest: &[u8; 32],
        signature: &[u8],
    ) -> Result<bool>;
}

/// Represents a transaction hash/ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHash(pub String);

impl TxHash {
    /// Creates a new TxHash from a string
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Returns the hash as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AddressEncoding, AddressFormat, Amount, Chain, Network, NetworkTag, PublicKeyHash,
        SchemeId, SignatureScheme, TxHash, COMPRESSED_PUBLIC_KEY_LEN, PUBLIC_KEY_HASH_LEN,
    };
}
