//! Transaction co-signing.
//!
//! A request moves `Received → Validated → Signed → Returned`, or
//! `Received → Rejected` on the first failed check. There are no retries;
//! a rejected request has to be resubmitted.

use std::fmt;

use floada_cardano::CardanoSigner;
use floada_error::{FloadaError, Result};
use floada_flo::FloSigner;
use floada_hd_key::{hash160, sha256d, KeyPair};
use floada_traits::{
    Chain, NetworkTag, SchemeId, SignatureScheme, TxHash, COMPRESSED_PUBLIC_KEY_LEN,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::codec::{AddressCodec, DecodedAddress};
use crate::ct_eq;
use crate::payload::SigningPayload;

// ============================================================================
// Session state
// ============================================================================

/// Where a signing request is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SigningState {
    Received,
    Validated,
    Signed,
    Returned,
    Rejected,
}

impl SigningState {
    fn can_move_to(self, next: SigningState) -> bool {
        matches!(
            (self, next),
            (SigningState::Received, SigningState::Validated)
                | (SigningState::Received, SigningState::Rejected)
                | (SigningState::Validated, SigningState::Signed)
                | (SigningState::Signed, SigningState::Returned)
        )
    }

    /// `Returned` and `Rejected` end a session.
    pub fn is_terminal(self) -> bool {
        matches!(self, SigningState::Returned | SigningState::Rejected)
    }
}

impl fmt::Display for SigningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SigningState::Received => "received",
            SigningState::Validated => "validated",
            SigningState::Signed => "signed",
            SigningState::Returned => "returned",
            SigningState::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// One signing request and the states it passed through.
#[derive(Debug)]
pub struct SigningSession {
    history: Vec<SigningState>,
    outcome: Option<Result<SignedTransaction>>,
}

impl SigningSession {
    fn new() -> Self {
        Self {
            history: vec![SigningState::Received],
            outcome: None,
        }
    }

    fn advance(&mut self, next: SigningState) {
        debug_assert!(self.state().can_move_to(next), "{} -> {next}", self.state());
        self.history.push(next);
    }

    fn reject(mut self, error: FloadaError) -> Self {
        tracing::warn!(code = ?error.code(), %error, "signing request rejected");
        self.advance(SigningState::Rejected);
        self.outcome = Some(Err(error));
        self
    }

    /// Current state
    pub fn state(&self) -> SigningState {
        self.history
            .last()
            .copied()
            .unwrap_or(SigningState::Received)
    }

    /// Every state entered, in order
    pub fn history(&self) -> &[SigningState] {
        &self.history
    }

    /// The signed transaction, once returned
    pub fn signed(&self) -> Option<&SignedTransaction> {
        self.outcome.as_ref().and_then(|r| r.as_ref().ok())
    }

    /// The rejection reason, if rejected
    pub fn error(&self) -> Option<&FloadaError> {
        self.outcome.as_ref().and_then(|r| r.as_ref().err())
    }

    pub fn into_result(self) -> Result<SignedTransaction> {
        self.outcome.unwrap_or_else(|| {
            Err(FloadaError::TransactionBuildError(
                "signing session ended without an outcome".into(),
            ))
        })
    }
}

// ============================================================================
// Signed transactions
// ============================================================================

/// A payload together with the signature over its canonical bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub payload: SigningPayload,
    pub network_tag: NetworkTag,
    pub payload_bytes: Vec<u8>,
    pub digest: [u8; 32],
    pub signature: Vec<u8>,
    pub signer_public_key: [u8; COMPRESSED_PUBLIC_KEY_LEN],
    pub scheme: SchemeId,
}

impl SignedTransaction {
    /// Checks the transaction against the FLO and Cardano-style tables.
    pub fn verify(&self) -> Result<bool> {
        self.verify_with(&AddressCodec::new())
    }

    /// Re-renders the payload and requires it to match the signed bytes,
    /// requires the signer to own `payload.from`, then checks the digest and
    /// signature.
    ///
    /// Errors only when a payload address does not decode.
    pub fn verify_with(&self, codec: &AddressCodec) -> Result<bool> {
        let scheme = scheme_for_id(self.scheme);
        if let Some(reason) = self.mismatch(scheme.as_ref(), codec)? {
            tracing::warn!(reason, network = %self.network_tag, "signed transaction rejected");
            return Ok(false);
        }
        let digest = scheme.digest(&self.payload_bytes);
        if !ct_eq(&digest, &self.digest) {
            return Ok(false);
        }
        scheme.verify_digest(&self.signer_public_key, &digest, &self.signature)
    }

    fn mismatch(
        &self,
        scheme: &dyn SignatureScheme,
        codec: &AddressCodec,
    ) -> Result<Option<&'static str>> {
        if scheme.chain() != self.network_tag.chain() {
            return Ok(Some("scheme does not belong to the network"));
        }
        let from = codec
            .decode(&self.payload.from)
            .map_err(|e| FloadaError::decode(&self.payload.from, e))?;
        let to = codec
            .decode(&self.payload.to)
            .map_err(|e| FloadaError::decode(&self.payload.to, e))?;
        if from.network_tag != self.network_tag {
            return Ok(Some("sender is on another network"));
        }
        if !ct_eq(&self.payload.encode_with(&from, &to), &self.payload_bytes) {
            return Ok(Some("payload does not match signed bytes"));
        }
        if !ct_eq(&hash160(&self.signer_public_key), &from.public_key_hash) {
            return Ok(Some("signer does not own the sending address"));
        }
        Ok(None)
    }

    /// `SHA256d(payload_bytes ‖ signature)`, hex
    pub fn tx_hash(&self) -> TxHash {
        let mut data = Vec::with_capacity(self.payload_bytes.len() + self.signature.len());
        data.extend_from_slice(&self.payload_bytes);
        data.extend_from_slice(&self.signature);
        TxHash::new(hex::encode(sha256d(&data)))
    }

    pub fn chain(&self) -> Chain {
        self.network_tag.chain()
    }

    /// Serializable form for persisting or transmitting.
    pub fn to_envelope(&self) -> TransactionEnvelope {
        TransactionEnvelope {
            tx_hash: self.tx_hash().0,
            network: self.network_tag,
            scheme: self.scheme,
            payload: self.payload.clone(),
            payload_bytes: hex::encode(&self.payload_bytes),
            digest: hex::encode(self.digest),
            signature: hex::encode(&self.signature),
            signer_public_key: hex::encode(self.signer_public_key),
        }
    }
}

/// JSON form of a [`SignedTransaction`]; byte fields are lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    pub tx_hash: String,
    pub network: NetworkTag,
    pub scheme: SchemeId,
    pub payload: SigningPayload,
    pub payload_bytes: String,
    pub digest: String,
    pub signature: String,
    pub signer_public_key: String,
}

impl TryFrom<TransactionEnvelope> for SignedTransaction {
    type Error = FloadaError;

    fn try_from(envelope: TransactionEnvelope) -> Result<Self> {
        let digest: [u8; 32] = hex::decode(&envelope.digest)?
            .try_into()
            .map_err(|_| FloadaError::TransactionBuildError("digest must be 32 bytes".into()))?;
        let signer_public_key = floada_hd_key::parse_public_key(&hex::decode(
            &envelope.signer_public_key,
        )?)?;
        let signed = SignedTransaction {
            payload: envelope.payload,
            network_tag: envelope.network,
            payload_bytes: hex::decode(&envelope.payload_bytes)?,
            digest,
            signature: hex::decode(&envelope.signature)?,
            signer_public_key,
            scheme: envelope.scheme,
        };
        if signed.tx_hash().as_str() != envelope.tx_hash {
            return Err(FloadaError::TransactionBuildError(
                "transaction hash does not match contents".into(),
            ));
        }
        Ok(signed)
    }
}

fn scheme_for_id(id: SchemeId) -> Box<dyn SignatureScheme> {
    match id {
        SchemeId::EcdsaRecoverable => Box::new(FloSigner::new()),
        SchemeId::Schnorr => Box::new(CardanoSigner::new()),
    }
}

// ============================================================================
// Co-signer
// ============================================================================

/// Validates payloads and signs them with the sending chain's scheme.
pub struct TransactionCoSigner {
    codec: AddressCodec,
    schemes: Vec<Box<dyn SignatureScheme>>,
}

impl fmt::Debug for TransactionCoSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schemes: Vec<SchemeId> = self.schemes.iter().map(|s| s.id()).collect();
        f.debug_struct("TransactionCoSigner")
            .field("codec", &self.codec)
            .field("schemes", &schemes)
            .finish()
    }
}

impl Default for TransactionCoSigner {
    fn default() -> Self {
        Self::new(AddressCodec::new())
    }
}

impl TransactionCoSigner {
    /// Co-signer with recoverable ECDSA for FLO and Schnorr for Cardano.
    pub fn new(codec: AddressCodec) -> Self {
        Self {
            codec,
            schemes: vec![Box::new(FloSigner::new()), Box::new(CardanoSigner::new())],
        }
    }

    /// Replaces the scheme registered for `scheme.chain()`.
    pub fn with_scheme(mut self, scheme: Box<dyn SignatureScheme>) -> Self {
        self.schemes.retain(|s| s.chain() != scheme.chain());
        self.schemes.push(scheme);
        self
    }

    pub fn codec(&self) -> &AddressCodec {
        &self.codec
    }

    fn scheme(&self, chain: Chain) -> Result<&dyn SignatureScheme> {
        self.schemes
            .iter()
            .find(|s| s.chain() == chain)
            .map(|s| s.as_ref())
            .ok_or_else(|| {
                FloadaError::TransactionBuildError(format!("no signature scheme for {chain}"))
            })
    }

    /// Signs `payload` with `key_pair`.
    pub fn sign(&self, key_pair: &KeyPair, payload: SigningPayload) -> Result<SignedTransaction> {
        self.sign_session(key_pair, payload).into_result()
    }

    /// Runs a signing request and returns the whole session.
    pub fn sign_session(&self, key_pair: &KeyPair, payload: SigningPayload) -> SigningSession {
        let mut session = SigningSession::new();

        let (from, to, scheme) = match self.validate(key_pair, &payload) {
            Ok(validated) => validated,
            Err(e) => return session.reject(e),
        };
        session.advance(SigningState::Validated);

        let signed = match sign_validated(scheme, key_pair, payload, &from, &to) {
            Ok(signed) => signed,
            Err(e) => {
                // No transition leaves Validated on a signer failure.
                tracing::error!(%e, "signing failed after validation");
                session.outcome = Some(Err(e));
                return session;
            }
        };
        session.advance(SigningState::Signed);

        tracing::info!(
            network = %signed.network_tag,
            amount = signed.payload.amount,
            fee = signed.payload.fee,
            tx_hash = %signed.tx_hash(),
            "transaction signed"
        );
        session.outcome = Some(Ok(signed));
        session.advance(SigningState::Returned);
        session
    }

    fn validate(
        &self,
        key_pair: &KeyPair,
        payload: &SigningPayload,
    ) -> Result<(DecodedAddress, DecodedAddress, &dyn SignatureScheme)> {
        let from = self
            .codec
            .decode(&payload.from)
            .map_err(|e| FloadaError::decode(&payload.from, e))?;
        let to = self
            .codec
            .decode(&payload.to)
            .map_err(|e| FloadaError::decode(&payload.to, e))?;

        if from.network_tag != to.network_tag {
            return Err(FloadaError::ChainMismatch {
                from: from.network_tag.to_string(),
                to: to.network_tag.to_string(),
            });
        }

        if payload.amount == 0 {
            return Err(FloadaError::InvalidAmount("amount must be positive".into()));
        }
        let required = payload.required()?;

        let mut seen = HashSet::with_capacity(payload.inputs.len());
        if let Some(dup) = payload.inputs.iter().find(|i| !seen.insert(i.outpoint())) {
            return Err(FloadaError::TransactionBuildError(format!(
                "duplicate input {}:{}",
                hex::encode(dup.txid),
                dup.vout
            )));
        }
        if !payload.inputs.is_empty() {
            let available = payload.total_input()?;
            if available < required {
                return Err(FloadaError::InsufficientFunds {
                    available,
                    required,
                });
            }
        }

        if !ct_eq(&key_pair.public_key_hash(), &from.public_key_hash) {
            return Err(FloadaError::SigningKeyMismatch {
                address: payload.from.clone(),
            });
        }

        let scheme = self.scheme(from.network_tag.chain())?;
        Ok((from, to, scheme))
    }
}

fn sign_validated(
    scheme: &dyn SignatureScheme,
    key_pair: &KeyPair,
    payload: SigningPayload,
    from: &DecodedAddress,
    to: &DecodedAddress,
) -> Result<SignedTransaction> {
    let payload_bytes = payload.encode_with(from, to);
    let digest = scheme.digest(&payload_bytes);
    let signature = scheme.sign_digest(key_pair.private_key_bytes(), &digest)?;
    if signature.len() != scheme.signature_len() {
        return Err(FloadaError::SigningError(format!(
            "scheme produced {} bytes, expected {}",
            signature.len(),
            scheme.signature_len()
        )));
    }

    Ok(SignedTransaction {
        payload,
        network_tag: from.network_tag,
        payload_bytes,
        digest,
        signature,
        signer_public_key: *key_pair.public_key_bytes(),
        scheme: scheme.id(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::TxInput;

    const PRIVATE_KEY: &str = "820b967776cab711e0e05a8d04385e71d4333b2be73f39edfd73d2d3ea9e1312";
    const FLO_FROM: &str = "F5qnh1L14u32MFSwoWawMV3TB1USApzgjx";
    const FLO_TO: &str = "FGWP1xKhDP5RmV525TmUoEwX9mTZwp3sJn";
    const ADA_FROM: &str = "addr1vyqzp0hqsr8aadpseaerm9fdez9khd6zgye7pwq8";
    const ADA_TO: &str = "addr1v963uahgrxged4z5jswyt5dn5v3lzsem6csn7zkh";
    const ADA_TEST_TO: &str = "addr_test1vp63uahgrxged4z5jswyt5dn5v3lzsem6cf97pug";

    fn key_pair() -> KeyPair {
        let bytes: [u8; 32] = hex::decode(PRIVATE_KEY).unwrap().try_into().unwrap();
        KeyPair::from_private_key(&bytes).unwrap()
    }

    fn other_key_pair() -> KeyPair {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        KeyPair::from_private_key(&bytes).unwrap()
    }

    #[test]
    fn test_flo_sign_and_verify() {
        let cosigner = TransactionCoSigner::default();
        let payload = SigningPayload::new(FLO_FROM, FLO_TO, 1_000_000).with_fee(170_000);
        let signed = cosigner.sign(&key_pair(), payload).unwrap();

        assert_eq!(signed.scheme, SchemeId::EcdsaRecoverable);
        assert_eq!(signed.signature.len(), 65);
        assert_eq!(signed.network_tag, NetworkTag::FloMainnet);
        assert!(signed.verify().unwrap());
    }

    #[test]
    fn test_cardano_sign_and_verify() {
        let cosigner = TransactionCoSigner::default();
        let payload = SigningPayload::new(ADA_FROM, ADA_TO, 1_000_000).with_fee(170_000);
        let signed = cosigner.sign(&key_pair(), payload).unwrap();

        assert_eq!(signed.scheme, SchemeId::Schnorr);
        assert_eq!(signed.signature.len(), 64);
        assert!(signed.verify().unwrap());
    }

    #[test]
    fn test_signing_is_deterministic() {
        let cosigner = TransactionCoSigner::default();
        for (from, to) in [(FLO_FROM, FLO_TO), (ADA_FROM, ADA_TO)] {
            let payload = SigningPayload::new(from, to, 42).with_nonce(3);
            let a = cosigner.sign(&key_pair(), payload.clone()).unwrap();
            let b = cosigner.sign(&key_pair(), payload).unwrap();
            assert_eq!(a.signature, b.signature);
            assert_eq!(a.tx_hash(), b.tx_hash());
        }
    }

    #[test]
    fn test_session_history_on_success() {
        let cosigner = TransactionCoSigner::default();
        let session = cosigner.sign_session(&key_pair(), SigningPayload::new(FLO_FROM, FLO_TO, 1));
        assert_eq!(
            session.history(),
            &[
                SigningState::Received,
                SigningState::Validated,
                SigningState::Signed,
                SigningState::Returned
            ]
        );
        assert!(session.state().is_terminal());
        assert!(session.signed().is_some());
    }

    #[test]
    fn test_session_history_on_rejection() {
        let cosigner = TransactionCoSigner::default();
        let session =
            cosigner.sign_session(&other_key_pair(), SigningPayload::new(FLO_FROM, FLO_TO, 1));
        assert_eq!(
            session.history(),
            &[SigningState::Received, SigningState::Rejected]
        );
        assert!(matches!(
            session.error(),
            Some(FloadaError::SigningKeyMismatch { .. })
        ));
        assert!(session.signed().is_none());
    }

    #[test]
    fn test_chain_mismatch() {
        let cosigner = TransactionCoSigner::default();
        let err = cosigner
            .sign(&key_pair(), SigningPayload::new(FLO_FROM, ADA_TO, 1))
            .unwrap_err();
        assert!(matches!(err, FloadaError::ChainMismatch { .. }));

        let err = cosigner
            .sign(&key_pair(), SigningPayload::new(ADA_FROM, ADA_TEST_TO, 1))
            .unwrap_err();
        assert!(matches!(err, FloadaError::ChainMismatch { .. }));
    }

    #[test]
    fn test_amount_checks() {
        let cosigner = TransactionCoSigner::default();
        let err = cosigner
            .sign(&key_pair(), SigningPayload::new(FLO_FROM, FLO_TO, 0))
            .unwrap_err();
        assert!(matches!(err, FloadaError::InvalidAmount(_)));

        let err = cosigner
            .sign(
                &key_pair(),
                SigningPayload::new(FLO_FROM, FLO_TO, u64::MAX).with_fee(1),
            )
            .unwrap_err();
        assert!(matches!(err, FloadaError::AmountOverflow(_)));
    }

    #[test]
    fn test_insufficient_funds() {
        let cosigner = TransactionCoSigner::default();
        let payload = SigningPayload::new(FLO_FROM, FLO_TO, 1_000_000)
            .with_fee(170_000)
            .with_inputs(vec![
                TxInput::new([1; 32], 0, 600_000),
                TxInput::new([2; 32], 0, 500_000),
            ]);
        let err = cosigner.sign(&key_pair(), payload).unwrap_err();
        match err {
            FloadaError::InsufficientFunds {
                available,
                required,
            } => {
                assert_eq!(available, 1_100_000);
                assert_eq!(required, 1_170_000);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_inputs() {
        let cosigner = TransactionCoSigner::default();
        let input = TxInput::new([1; 32], 0, 5_000_000);
        let payload = SigningPayload::new(FLO_FROM, FLO_TO, 1).with_inputs(vec![input, input]);
        let err = cosigner.sign(&key_pair(), payload).unwrap_err();
        assert!(matches!(err, FloadaError::TransactionBuildError(_)));
    }

    #[test]
    fn test_tampered_transaction_fails_verify() {
        let cosigner = TransactionCoSigner::default();
        let mut signed = cosigner
            .sign(&key_pair(), SigningPayload::new(ADA_FROM, ADA_TO, 10))
            .unwrap();
        let last = signed.payload_bytes.len() - 1;
        signed.payload_bytes[last] ^= 1;
        assert!(!signed.verify().unwrap());

        let mut signed = cosigner
            .sign(&key_pair(), SigningPayload::new(FLO_FROM, FLO_TO, 10))
            .unwrap();
        signed.signer_public_key = *other_key_pair().public_key_bytes();
        assert!(!signed.verify().unwrap());
    }

    #[test]
    fn test_edited_envelope_payload_fails_verify() {
        let cosigner = TransactionCoSigner::default();
        let signed = cosigner
            .sign(&key_pair(), SigningPayload::new(FLO_FROM, FLO_TO, 10).with_fee(5))
            .unwrap();

        let mut amount = signed.to_envelope();
        amount.payload.amount = 999_999_999;
        let mut to = signed.to_envelope();
        to.payload.to = FLO_FROM.to_string();
        let mut fee = signed.to_envelope();
        fee.payload.fee = 0;

        for envelope in [amount, to, fee] {
            // tx_hash covers only bytes and signature, so the envelope still parses
            let restored = SignedTransaction::try_from(envelope).unwrap();
            assert!(!restored.verify().unwrap());
        }
    }

    #[test]
    fn test_signer_must_own_sender() {
        let cosigner = TransactionCoSigner::default();
        let mut signed = cosigner
            .sign(&key_pair(), SigningPayload::new(ADA_FROM, ADA_TO, 10))
            .unwrap();
        // A valid signature by another key over the same bytes
        let scheme = CardanoSigner::new();
        signed.signature = scheme
            .sign_digest(other_key_pair().private_key_bytes(), &signed.digest)
            .unwrap();
        signed.signer_public_key = *other_key_pair().public_key_bytes();
        assert!(!signed.verify().unwrap());
    }

    #[test]
    fn test_scheme_must_match_network() {
        let cosigner = TransactionCoSigner::default();
        let mut signed = cosigner
            .sign(&key_pair(), SigningPayload::new(FLO_FROM, FLO_TO, 10))
            .unwrap();
        signed.scheme = SchemeId::Schnorr;
        assert!(!signed.verify().unwrap());
    }

    #[test]
    fn test_envelope_json() {
        let cosigner = TransactionCoSigner::default();
        let signed = cosigner
            .sign(&key_pair(), SigningPayload::new(FLO_FROM, FLO_TO, 10))
            .unwrap();
        let json = serde_json::to_string(&signed.to_envelope()).unwrap();
        let envelope: TransactionEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(envelope.network, NetworkTag::FloMainnet);

        let restored = SignedTransaction::try_from(envelope.clone()).unwrap();
        assert_eq!(restored, signed);

        let mut forged = envelope;
        forged.tx_hash = "00".repeat(32);
        assert!(SignedTransaction::try_from(forged).is_err());
    }

    #[test]
    fn test_missing_scheme() {
        let codec = AddressCodec::new();
        let cosigner = TransactionCoSigner {
            codec,
            schemes: vec![Box::new(FloSigner::new())],
        };
        let err = cosigner
            .sign(&key_pair(), SigningPayload::new(ADA_FROM, ADA_TO, 1))
            .unwrap_err();
        assert!(matches!(err, FloadaError::TransactionBuildError(_)));
    }
}
