//! Wallet Import Format (WIF) private keys.
//!
//! `Base58Check(version ‖ key[32] ‖ [0x01 if compressed])`. The version byte
//! selects the network; it is looked up in [`WIF_VERSIONS`].

use crate::hashing::{base58check_decode, base58check_encode, Base58CheckError};
use crate::keypair::{KeyPair, PRIVATE_KEY_LEN};
use floada_error::{FloadaError, Result};
use floada_traits::Network;
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

/// FLO mainnet WIF version byte (keys start with `R`)
pub const FLO_MAINNET_WIF_VERSION: u8 = 0xA3;
/// FLO testnet WIF version byte (keys start with `c`)
pub const FLO_TESTNET_WIF_VERSION: u8 = 0xEF;
/// Bitcoin-family mainnet WIF version byte (keys start with `5`, `K` or `L`)
pub const LEGACY_MAINNET_WIF_VERSION: u8 = 0x80;

/// Length of a compressed WIF string.
pub const COMPRESSED_WIF_LEN: usize = 52;
/// Length of an uncompressed WIF string.
pub const UNCOMPRESSED_WIF_LEN: usize = 51;

const COMPRESSION_FLAG: u8 = 0x01;

/// One row of the WIF version table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WifVersion {
    /// Leading version byte
    pub version: u8,
    /// Network the key belongs to
    pub network: Network,
    /// Accepted only when legacy keys are enabled
    pub legacy: bool,
}

/// Known WIF version bytes.
pub const WIF_VERSIONS: [WifVersion; 3] = [
    WifVersion {
        version: FLO_MAINNET_WIF_VERSION,
        network: Network::Mainnet,
        legacy: false,
    },
    WifVersion {
        version: FLO_TESTNET_WIF_VERSION,
        network: Network::Testnet,
        legacy: false,
    },
    WifVersion {
        version: LEGACY_MAINNET_WIF_VERSION,
        network: Network::Mainnet,
        legacy: true,
    },
];

/// A decoded WIF key.
pub struct WifKey {
    /// Raw private key scalar
    pub private_key: Zeroizing<[u8; PRIVATE_KEY_LEN]>,
    /// Network named by the version byte
    pub network: Network,
    /// Whether the key carried the compressed-public-key flag
    pub compressed: bool,
    /// The version byte as found
    pub version: u8,
}

impl fmt::Debug for WifKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WifKey")
            .field("private_key", &"[REDACTED]")
            .field("network", &self.network)
            .field("compressed", &self.compressed)
            .field("version", &format_args!("{:#04x}", self.version))
            .finish()
    }
}

/// Decodes a WIF string.
///
/// Every failure is reported as [`FloadaError::MalformedSecret`]; the key text
/// never appears in the error.
pub fn decode_wif(text: &str, accept_legacy: bool) -> Result<WifKey> {
    let mut body = base58check_decode(text.trim()).map_err(|e| match e {
        Base58CheckError::InvalidBase58 => FloadaError::malformed_secret("not valid base58"),
        Base58CheckError::TooShort => FloadaError::malformed_secret("too short"),
        Base58CheckError::ChecksumMismatch => {
            FloadaError::malformed_secret("WIF checksum mismatch")
        }
    })?;

    let compressed = match body.len() {
        33 => false,
        34 if body[33] == COMPRESSION_FLAG => true,
        34 => {
            body.zeroize();
            return Err(FloadaError::malformed_secret("invalid compression flag"));
        }
        n => {
            body.zeroize();
            return Err(FloadaError::malformed_secret(format!(
                "decoded WIF has {n} bytes, expected 33 or 34"
            )));
        }
    };

    let version = body[0];
    let entry = WIF_VERSIONS
        .iter()
        .find(|v| v.version == version && (accept_legacy || !v.legacy));
    let Some(entry) = entry else {
        body.zeroize();
        return Err(FloadaError::malformed_secret(format!(
            "unknown WIF version byte {version:#04x}"
        )));
    };

    let mut key = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
    key.copy_from_slice(&body[1..1 + PRIVATE_KEY_LEN]);
    body.zeroize();

    Ok(WifKey {
        private_key: key,
        network: entry.network,
        compressed,
        version,
    })
}

/// Encodes a key pair as a compressed FLO WIF for `network`.
pub fn encode_wif(key_pair: &KeyPair, network: Network) -> Zeroizing<String> {
    let version = match network {
        Network::Mainnet => FLO_MAINNET_WIF_VERSION,
        Network::Testnet => FLO_TESTNET_WIF_VERSION,
    };
    let mut body = Zeroizing::new(Vec::with_capacity(2 + PRIVATE_KEY_LEN));
    body.push(version);
    body.extend_from_slice(key_pair.private_key_bytes());
    body.push(COMPRESSION_FLAG);
    Zeroizing::new(base58check_encode(&body))
}
