//! The canonical secp256k1 key pair shared by both chains.

use crate::hashing::hash160;
use floada_error::{FloadaError, Result};
use floada_traits::{PublicKeyHash, COMPRESSED_PUBLIC_KEY_LEN};
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use std::fmt;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Length of a raw secp256k1 private key.
pub const PRIVATE_KEY_LEN: usize = 32;

/// A secp256k1 key pair with a compressed public key.
///
/// The private half lives in zeroize-on-drop storage and is redacted from
/// `Debug` output. `public_key` is always `private_key · G`.
#[derive(Clone)]
pub struct KeyPair {
    private_key: Zeroizing<[u8; PRIVATE_KEY_LEN]>,
    public_key: [u8; COMPRESSED_PUBLIC_KEY_LEN],
}

impl KeyPair {
    /// Builds a key pair from a raw scalar, rejecting 0 and values >= n.
    pub fn from_private_key(bytes: &[u8; PRIVATE_KEY_LEN]) -> Result<Self> {
        let secret_key = SecretKey::from_slice(bytes)
            .map_err(|_| FloadaError::malformed_secret("private key scalar out of range"))?;
        let secp = Secp256k1::signing_only();
        let public_key = PublicKey::from_secret_key(&secp, &secret_key).serialize();
        Ok(Self {
            private_key: Zeroizing::new(*bytes),
            public_key,
        })
    }

    /// Raw private key bytes
    pub fn private_key_bytes(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.private_key
    }

    /// Compressed SEC1 public key bytes
    pub fn public_key_bytes(&self) -> &[u8; COMPRESSED_PUBLIC_KEY_LEN] {
        &self.public_key
    }

    /// Lower-case hex of the compressed public key
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key)
    }

    /// HASH160 of the compressed public key, the payload of both address forms
    pub fn public_key_hash(&self) -> PublicKeyHash {
        hash160(&self.public_key)
    }

    /// Recomputes the public key from the private key and compares.
    pub fn verify_consistency(&self) -> bool {
        let Ok(secret_key) = SecretKey::from_slice(self.private_key.as_ref()) else {
            return false;
        };
        let secp = Secp256k1::signing_only();
        PublicKey::from_secret_key(&secp, &secret_key).serialize() == self.public_key
    }
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key
            && bool::from(self.private_key[..].ct_eq(&other.private_key[..]))
    }
}

impl Eq for KeyPair {}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key", &"[REDACTED]")
            .field("public_key", &self.public_key_hex())
            .finish()
    }
}

/// Checks that `bytes` is a valid compressed secp256k1 public key.
pub fn parse_public_key(bytes: &[u8]) -> Result<[u8; COMPRESSED_PUBLIC_KEY_LEN]> {
    if bytes.len() != COMPRESSED_PUBLIC_KEY_LEN {
        return Err(FloadaError::InvalidPublicKey(format!(
            "expected {COMPRESSED_PUBLIC_KEY_LEN} bytes, got {}",
            bytes.len()
        )));
    }
    let key = PublicKey::from_slice(bytes)
        .map_err(|e| FloadaError::InvalidPublicKey(e.to_string()))?;
    Ok(key.serialize())
}
