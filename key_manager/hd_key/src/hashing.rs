//! Hash primitives and Base58Check shared by WIF keys and FLO addresses.

use floada_traits::{PublicKeyHash, PUBLIC_KEY_HASH_LEN};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Length of a Base58Check checksum.
pub const CHECKSUM_LEN: usize = 4;

/// SHA256(SHA256(data))
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

/// RIPEMD160(SHA256(data))
pub fn hash160(data: &[u8]) -> PublicKeyHash {
    let sha = Sha256::digest(data);
    let digest = Ripemd160::digest(sha);
    let mut out = [0u8; PUBLIC_KEY_HASH_LEN];
    out.copy_from_slice(&digest);
    out
}

/// BIP-340 style tagged hash: `SHA256(SHA256(tag) ‖ SHA256(tag) ‖ data)`.
pub fn tagged_hash(tag: &str, data: &[u8]) -> [u8; 32] {
    let tag_hash = Sha256::digest(tag.as_bytes());
    let mut hasher = Sha256::new();
    hasher.update(tag_hash);
    hasher.update(tag_hash);
    hasher.update(data);
    hasher.finalize().into()
}

/// First four bytes of `SHA256d(data)`.
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = sha256d(data);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

/// Base58Check failure, mapped by callers onto their own error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Base58CheckError {
    /// Input contains characters outside the Base58 alphabet
    #[error("not valid base58")]
    InvalidBase58,
    /// Decoded data is shorter than a checksum plus one byte
    #[error("decoded data too short")]
    TooShort,
    /// Trailing checksum does not match the body
    #[error("checksum mismatch")]
    ChecksumMismatch,
}

/// Encodes `body ‖ checksum(body)` in Base58.
pub fn base58check_encode(body: &[u8]) -> String {
    let mut data = Vec::with_capacity(body.len() + CHECKSUM_LEN);
    data.extend_from_slice(body);
    data.extend_from_slice(&checksum(body));
    bs58::encode(data).into_string()
}

/// Decodes Base58Check text and returns the body without its checksum.
pub fn base58check_decode(text: &str) -> Result<Vec<u8>, Base58CheckError> {
    let mut data = bs58::decode(text)
        .into_vec()
        .map_err(|_| Base58CheckError::InvalidBase58)?;
    if data.len() <= CHECKSUM_LEN {
        return Err(Base58CheckError::TooShort);
    }
    let split = data.len() - CHECKSUM_LEN;
    let expected = checksum(&data[..split]);
    if data[split..] != expected {
        return Err(Base58CheckError::ChecksumMismatch);
    }
    data.truncate(split);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash160_generator() {
        let pubkey =
            hex::decode("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
                .unwrap();
        assert_eq!(
            hex::encode(hash160(&pubkey)),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }

    #[test]
    fn test_sha256d_empty() {
        assert_eq!(
            hex::encode(sha256d(b"")),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn test_tagged_hash_differs_by_tag() {
        assert_ne!(tagged_hash("a", b"data"), tagged_hash("b", b"data"));
        assert_eq!(tagged_hash("a", b"data"), tagged_hash("a", b"data"));
    }

    #[test]
    fn test_base58check_roundtrip() {
        let body = [0x23u8, 1, 2, 3, 4, 5];
        let text = base58check_encode(&body);
        assert_eq!(base58check_decode(&text).unwrap(), body);
    }

    #[test]
    fn test_base58check_rejects() {
        assert_eq!(base58check_decode("0OIl"), Err(Base58CheckError::InvalidBase58));
        assert_eq!(base58check_decode("1"), Err(Base58CheckError::TooShort));

        let mut data = vec![0x23u8, 9, 9, 9];
        data.extend_from_slice(&[0, 0, 0, 0]);
        let bad = bs58::encode(data).into_string();
        assert_eq!(base58check_decode(&bad), Err(Base58CheckError::ChecksumMismatch));
    }
}
