//! BIP-340 Schnorr transfer signatures for the Cardano-style chain.
//!
//! Signed without auxiliary randomness, so the same key and payload always
//! produce the same 64 bytes.

use floada_error::{FloadaError, Result};
use floada_hd_key::tagged_hash;
use floada_traits::{Chain, SchemeId, SignatureScheme, COMPRESSED_PUBLIC_KEY_LEN};
use secp256k1::{schnorr, All, KeyPair, Message, PublicKey, Secp256k1, SecretKey};

/// BIP-340 tag for transfer digests
pub const CARDANO_SIGNING_TAG: &str = "floada/cardano-transfer";

/// Length of a Schnorr signature
pub const CARDANO_SIGNATURE_LEN: usize = 64;

/// Cardano-style transfer signer
pub struct CardanoSigner {
    secp: Secp256k1<All>,
}

impl CardanoSigner {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::new(),
        }
    }
}

impl Default for CardanoSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureScheme for CardanoSigner {
    fn id(&self) -> SchemeId {
        SchemeId::Schnorr
    }

    fn chain(&self) -> Chain {
        Chain::Cardano
    }

    fn signature_len(&self) -> usize {
        CARDANO_SIGNATURE_LEN
    }

    fn digest(&self, payload: &[u8]) -> [u8; 32] {
        tagged_hash(CARDANO_SIGNING_TAG, payload)
    }

    fn sign_digest(&self, private_key: &[u8; 32], digest: &[u8; 32]) -> Result<Vec<u8>> {
        let secret_key = SecretKey::from_slice(private_key)
            .map_err(|e| FloadaError::SigningError(format!("invalid signing key: {e}")))?;
        let key_pair = KeyPair::from_secret_key(&self.secp, &secret_key);
        let message = Message::from_slice(digest)
            .map_err(|e| FloadaError::SigningError(e.to_string()))?;

        let signature = self.secp.sign_schnorr_no_aux_rand(&message, &key_pair);
        let raw: &[u8; CARDANO_SIGNATURE_LEN] = signature.as_ref();
        Ok(raw.to_vec())
    }

    fn verify_digest(
        &self,
        public_key: &[u8; COMPRESSED_PUBLIC_KEY_LEN],
        digest: &[u8; 32],
        signature: &[u8],
    ) -> Result<bool> {
        if signature.len() != CARDANO_SIGNATURE_LEN {
            return Err(FloadaError::SigningError(format!(
                "signature is {} bytes, expected {CARDANO_SIGNATURE_LEN}",
                signature.len()
            )));
        }
        let public_key = PublicKey::from_slice(public_key)
            .map_err(|e| FloadaError::InvalidPublicKey(e.to_string()))?;
        let (x_only, _parity) = public_key.x_only_public_key();
        let signature = schnorr::Signature::from_slice(signature)
            .map_err(|e| FloadaError::SigningError(e.to_string()))?;
        let message = Message::from_slice(digest)
            .map_err(|e| FloadaError::SigningError(e.to_string()))?;

        Ok(self.secp.verify_schnorr(&signature, &message, &x_only).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floada_hd_key::KeyPair as FloadaKeyPair;

    fn key_pair(seed: u8) -> FloadaKeyPair {
        FloadaKeyPair::from_private_key(&[seed; 32]).unwrap()
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = CardanoSigner::new();
        let pair = key_pair(0x11);
        let digest = signer.digest(b"payload");
        let signature = signer.sign_digest(pair.private_key_bytes(), &digest).unwrap();

        assert_eq!(signature.len(), CARDANO_SIGNATURE_LEN);
        assert!(signer.verify_digest(pair.public_key_bytes(), &digest, &signature).unwrap());
    }

    #[test]
    fn test_deterministic() {
        let signer = CardanoSigner::new();
        let pair = key_pair(0x22);
        let digest = signer.digest(b"same payload");
        let a = signer.sign_digest(pair.private_key_bytes(), &digest).unwrap();
        let b = signer.sign_digest(pair.private_key_bytes(), &digest).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_wrong_key_fails() {
        let signer = CardanoSigner::new();
        let digest = signer.digest(b"payload");
        let signature = signer.sign_digest(key_pair(0x33).private_key_bytes(), &digest).unwrap();
        assert!(!signer
            .verify_digest(key_pair(0x44).public_key_bytes(), &digest, &signature)
            .unwrap());
    }

    #[test]
    fn test_tampered_signature_fails() {
        let signer = CardanoSigner::new();
        let pair = key_pair(0x55);
        let digest = signer.digest(b"payload");
        let mut signature = signer.sign_digest(pair.private_key_bytes(), &digest).unwrap();
        signature[63] ^= 0x01;
        let verified = signer.verify_digest(pair.public_key_bytes(), &digest, &signature);
        assert!(!matches!(verified, Ok(true)));
    }

    #[test]
    fn test_wrong_length_rejected() {
        let signer = CardanoSigner::new();
        let pair = key_pair(0x66);
        let digest = signer.digest(b"payload");
        assert!(signer.verify_digest(pair.public_key_bytes(), &digest, &[0u8; 65]).is_err());
    }

    #[test]
    fn test_digest_is_domain_separated() {
        let signer = CardanoSigner::new();
        assert_ne!(signer.digest(b"payload"), tagged_hash("other", b"payload"));
    }
}
