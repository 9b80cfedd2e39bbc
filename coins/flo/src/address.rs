use floada_error::{FloadaError, Result};
use floada_hd_key::hashing::{self, base58check_decode, base58check_encode, Base58CheckError};
use floada_hd_key::hash160;
use floada_traits::{
    AddressEncoding, AddressFormat, Network, NetworkTag, PublicKeyHash, PUBLIC_KEY_HASH_LEN,
};

use crate::config::{MAINNET_PUBKEY_VERSION, TESTNET_PUBKEY_VERSION};

/// FLO entries of the address dispatch table
pub const ADDRESS_FORMATS: [AddressFormat; 2] = [
    AddressFormat::base58check(NetworkTag::FloMainnet, MAINNET_PUBKEY_VERSION),
    AddressFormat::base58check(NetworkTag::FloTestnet, TESTNET_PUBKEY_VERSION),
];

/// Version byte, hash and checksum recovered from Base58Check text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Base58CheckParts {
    pub version: u8,
    pub hash: PublicKeyHash,
    pub checksum: [u8; hashing::CHECKSUM_LEN],
}

/// Renders `version ‖ hash` as Base58Check text.
pub fn encode_base58check(version: u8, hash: &PublicKeyHash) -> String {
    let mut body = [0u8; 1 + PUBLIC_KEY_HASH_LEN];
    body[0] = version;
    body[1..].copy_from_slice(hash);
    base58check_encode(&body)
}

/// The Base58Check checksum of `version ‖ hash`.
pub fn base58check_checksum(version: u8, hash: &PublicKeyHash) -> [u8; hashing::CHECKSUM_LEN] {
    let mut body = [0u8; 1 + PUBLIC_KEY_HASH_LEN];
    body[0] = version;
    body[1..].copy_from_slice(hash);
    hashing::checksum(&body)
}

/// Splits Base58Check address text without interpreting the version byte.
///
/// The checksum is verified before the length so that any corruption of a
/// well-formed address reports [`FloadaError::ChecksumMismatch`].
pub fn decode_base58check(address: &str) -> Result<Base58CheckParts> {
    let body = base58check_decode(address).map_err(|e| match e {
        Base58CheckError::ChecksumMismatch => FloadaError::ChecksumMismatch {
            address: address.to_string(),
        },
        other => FloadaError::MalformedAddress {
            address: address.to_string(),
            reason: other.to_string(),
        },
    })?;
    if body.len() != 1 + PUBLIC_KEY_HASH_LEN {
        return Err(FloadaError::MalformedAddress {
            address: address.to_string(),
            reason: format!("payload is {} bytes, expected 21", body.len()),
        });
    }
    let mut hash = [0u8; PUBLIC_KEY_HASH_LEN];
    hash.copy_from_slice(&body[1..]);
    Ok(Base58CheckParts {
        version: body[0],
        hash,
        checksum: base58check_checksum(body[0], &hash),
    })
}

/// A FLO pay-to-pubkey-hash address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloAddress {
    pub network: Network,
    pub public_key_hash: PublicKeyHash,
    pub encoded: String,
}

impl FloAddress {
    /// Address for a compressed public key
    pub fn from_public_key(public_key: &[u8], network: Network) -> Self {
        Self::from_hash(hash160(public_key), network)
    }

    /// Address for a HASH160
    pub fn from_hash(public_key_hash: PublicKeyHash, network: Network) -> Self {
        let version = version_for(network);
        Self {
            network,
            public_key_hash,
            encoded: encode_base58check(version, &public_key_hash),
        }
    }

    /// Parses FLO address text.
    pub fn parse(address: &str) -> Result<Self> {
        let parts = decode_base58check(address)?;
        let format = ADDRESS_FORMATS
            .iter()
            .find(|f| f.encoding == AddressEncoding::Base58Check { version: parts.version })
            .ok_or_else(|| FloadaError::UnknownNetworkPrefix {
                prefix: format!("{:#04x}", parts.version),
            })?;
        Ok(Self {
            network: format.tag.network(),
            public_key_hash: parts.hash,
            encoded: address.to_string(),
        })
    }

    /// Returns true if `address` parses as a FLO address
    pub fn validate(address: &str) -> bool {
        Self::parse(address).is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    pub fn is_mainnet(&self) -> bool {
        self.network == Network::Mainnet
    }
}

fn version_for(network: Network) -> u8 {
    match network {
        Network::Mainnet => MAINNET_PUBKEY_VERSION,
        Network::Testnet => TESTNET_PUBKEY_VERSION,
    }
}
