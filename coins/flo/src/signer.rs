//! Recoverable ECDSA transfer signatures.
//!
//! Layout: `[27 + 4 + recovery_id] ‖ r[32] ‖ s[32]`, the compressed-key
//! header convention of Bitcoin-family message signatures. Nonces follow
//! RFC 6979, so signing is deterministic.

use floada_error::{FloadaError, Result};
use floada_hd_key::sha256d;
use floada_traits::{Chain, SchemeId, SignatureScheme, COMPRESSED_PUBLIC_KEY_LEN};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};

/// Domain tag prefixed to every signed FLO payload.
pub const FLO_SIGNING_TAG: &str = "FLO Signed Transfer:\n";

/// Length of a FLO signature.
pub const FLO_SIGNATURE_LEN: usize = 65;

const COMPRESSED_HEADER_BASE: u8 = 27 + 4;

/// FLO transfer signer
pub struct FloSigner {
    secp: Secp256k1<All>,
}

impl FloSigner {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::new(),
        }
    }

    /// Recovers the compressed public key that produced `signature`.
    pub fn recover(&self, digest: &[u8; 32], signature: &[u8]) -> Result<[u8; 33]> {
        let recoverable = parse_signature(signature)?;
        let message = message_from_digest(digest)?;
        let public_key = self
            .secp
            .recover_ecdsa(&message, &recoverable)
            .map_err(|e| FloadaError::SigningError(format!("public key recovery failed: {e}")))?;
        Ok(public_key.serialize())
    }
}

impl Default for FloSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureScheme for FloSigner {
    fn id(&self) -> SchemeId {
        SchemeId::EcdsaRecoverable
    }

    fn chain(&self) -> Chain {
        Chain::Flo
    }

    fn signature_len(&self) -> usize {
        FLO_SIGNATURE_LEN
    }

    fn digest(&self, payload: &[u8]) -> [u8; 32] {
        let tag = FLO_SIGNING_TAG.as_bytes();
        let mut data = Vec::with_capacity(1 + tag.len() + payload.len());
        // Tag is shorter than 0xfd, so its compact-size prefix is one byte.
        data.push(tag.len() as u8);
        data.extend_from_slice(tag);
        data.extend_from_slice(payload);
        sha256d(&data)
    }

    fn sign_digest(&self, private_key: &[u8; 32], digest: &[u8; 32]) -> Result<Vec<u8>> {
        let secret_key = SecretKey::from_slice(private_key)
            .map_err(|e| FloadaError::SigningError(format!("invalid signing key: {e}")))?;
        let message = message_from_digest(digest)?;
        let (recovery_id, compact) = self
            .secp
            .sign_ecdsa_recoverable(&message, &secret_key)
            .serialize_compact();

        let mut signature = Vec::with_capacity(FLO_SIGNATURE_LEN);
        signature.push(COMPRESSED_HEADER_BASE + recovery_id.to_i32() as u8);
        signature.extend_from_slice(&compact);
        Ok(signature)
    }

    fn verify_digest(
        &self,
        public_key: &[u8; COMPRESSED_PUBLIC_KEY_LEN],
        digest: &[u8; 32],
        signature: &[u8],
    ) -> Result<bool> {
        let expected = PublicKey::from_slice(public_key)
            .map_err(|e| FloadaError::InvalidPublicKey(e.to_string()))?;
        let recoverable = parse_signature(signature)?;
        let message = message_from_digest(digest)?;

        let Ok(recovered) = self.secp.recover_ecdsa(&message, &recoverable) else {
            return Ok(false);
        };
        if recovered != expected {
            return Ok(false);
        }
        Ok(self
            .secp
            .verify_ecdsa(&message, &recoverable.to_standard(), &expected)
            .is_ok())
    }
}

fn message_from_digest(digest: &[u8; 32]) -> Result<Message> {
    Message::from_slice(digest).map_err(|e| FloadaError::SigningError(e.to_string()))
}

fn parse_signature(signature: &[u8]) -> Result<RecoverableSignature> {
    if signature.len() != FLO_SIGNATURE_LEN {
        return Err(FloadaError::SigningError(format!(
            "signature is {} bytes, expected {FLO_SIGNATURE_LEN}",
            signature.len()
        )));
    }
    let header = signature[0];
    if !(COMPRESSED_HEADER_BASE..COMPRESSED_HEADER_BASE + 4).contains(&header) {
        return Err(FloadaError::SigningError(format!(
            "unsupported signature header {header}"
        )));
    }
    let recovery_id = RecoveryId::from_i32(i32::from(header - COMPRESSED_HEADER_BASE))
        .map_err(|e| FloadaError::SigningError(e.to_string()))?;
    RecoverableSignature::from_compact(&signature[1..], recovery_id)
        .map_err(|e| FloadaError::SigningError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use floada_hd_key::KeyPair;

    fn key_pair(seed: u8) -> KeyPair {
        KeyPair::from_private_key(&[seed; 32]).unwrap()
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = FloSigner::new();
        let pair = key_pair(0x11);
        let digest = signer.digest(b"payload");
        let signature = signer.sign_digest(pair.private_key_bytes(), &digest).unwrap();

        assert_eq!(signature.len(), FLO_SIGNATURE_LEN);
        assert!(signer.verify_digest(pair.public_key_bytes(), &digest, &signature).unwrap());
    }

    #[test]
    fn test_deterministic() {
        let signer = FloSigner::new();
        let pair = key_pair(0x22);
        let digest = signer.digest(b"same payload");
        let a = signer.sign_digest(pair.private_key_bytes(), &digest).unwrap();
        let b = signer.sign_digest(pair.private_key_bytes(), &digest).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_recover_matches_signer() {
        let signer = FloSigner::new();
        let pair = key_pair(0x33);
        let digest = signer.digest(b"recover me");
        let signature = signer.sign_digest(pair.private_key_bytes(), &digest).unwrap();
        assert_eq!(&signer.recover(&digest, &signature).unwrap(), pair.public_key_bytes());
    }

    #[test]
    fn test_wrong_key_or_digest_fails() {
        let signer = FloSigner::new();
        let pair = key_pair(0x44);
        let other = key_pair(0x55);
        let digest = signer.digest(b"original");
        let signature = signer.sign_digest(pair.private_key_bytes(), &digest).unwrap();

        assert!(!signer.verify_digest(other.public_key_bytes(), &digest, &signature).unwrap());
        let tampered = signer.digest(b"tampered");
        assert!(!signer.verify_digest(pair.public_key_bytes(), &tampered, &signature).unwrap());
    }

    #[test]
    fn test_malformed_signature() {
        let signer = FloSigner::new();
        let pair = key_pair(0x66);
        let digest = signer.digest(b"x");
        assert!(signer.verify_digest(pair.public_key_bytes(), &digest, &[0u8; 64]).is_err());

        let mut signature = signer.sign_digest(pair.private_key_bytes(), &digest).unwrap();
        signature[0] = 27;
        assert!(signer.verify_digest(pair.public_key_bytes(), &digest, &signature).is_err());
    }

    #[test]
    fn test_digest_is_domain_separated() {
        let signer = FloSigner::new();
        assert_ne!(signer.digest(b"payload"), sha256d(b"payload"));
    }
}
