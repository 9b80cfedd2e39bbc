//! End-to-end import, compatibility and co-signing across both chains.

use floada_core::{
    AddressCodec, CompatibilityValidator, CrossChainIdentity, FloadaConfig, MemoryWalletStore,
    SigningPayload, SigningState, TransactionCoSigner, TxInput, WalletStore,
};
use floada_error::FloadaError;
use floada_hd_key::{encode_wif, KeyDerivationEngine, Secret};
use floada_testing::{EdgeCaseAddresses, EdgeCaseMnemonics, KnownVectors};
use floada_traits::{Chain, Network, NetworkTag, SchemeId};

fn engine() -> KeyDerivationEngine {
    FloadaConfig::default().engine().unwrap()
}

#[test]
fn test_wif_import_sign_and_verify() {
    let engine = engine();
    let codec = AddressCodec::new();
    let validator = CompatibilityValidator::new(codec.clone());
    let cosigner = TransactionCoSigner::new(codec.clone());
    let vector = KnownVectors::LEGACY_WIF;

    let identity = CrossChainIdentity::import(
        &engine,
        &codec,
        Secret::parse(vector.secret).unwrap(),
        Network::Mainnet,
    )
    .unwrap();
    assert_eq!(identity.flo().encoded, vector.flo_mainnet);
    assert_eq!(identity.cardano().encoded, vector.cardano_mainnet);
    assert!(validator
        .is_compatible(&identity.flo().encoded, &identity.cardano().encoded)
        .unwrap());

    let payload = SigningPayload::new(
        identity.flo().encoded.clone(),
        KnownVectors::GENERATOR.flo_mainnet,
        1_000_000,
    )
    .with_fee(170_000);
    let signed = cosigner.sign(identity.key_pair(), payload).unwrap();

    assert_eq!(signed.scheme, SchemeId::EcdsaRecoverable);
    assert_eq!(hex::encode(signed.signer_public_key), vector.public_key);
    assert!(signed.verify().unwrap());
}

#[test]
fn test_flo_wif_forms_import_to_same_identity() {
    let engine = engine();
    let codec = AddressCodec::new();
    let mut addresses = Vec::new();
    for wif in [
        KnownVectors::LEGACY_WIF.secret,
        KnownVectors::FLO_WIF,
        KnownVectors::FLO_TESTNET_WIF,
    ] {
        let identity = CrossChainIdentity::import(
            &engine,
            &codec,
            Secret::parse(wif).unwrap(),
            Network::Mainnet,
        )
        .unwrap();
        addresses.push(identity.cardano().encoded.clone());
    }
    addresses.dedup();
    assert_eq!(addresses, vec![KnownVectors::LEGACY_WIF.cardano_mainnet]);
}

#[test]
fn test_mnemonic_import_signs_on_cardano() {
    let engine = engine();
    let codec = AddressCodec::new();
    let identity = CrossChainIdentity::import(
        &engine,
        &codec,
        Secret::parse(EdgeCaseMnemonics::STANDARD_12).unwrap(),
        Network::Testnet,
    )
    .unwrap();
    assert_eq!(
        identity.flo().network_tag,
        NetworkTag::new(Chain::Flo, Network::Testnet)
    );

    let cosigner = TransactionCoSigner::new(codec);
    let payload = SigningPayload::new(
        identity.cardano().encoded.clone(),
        KnownVectors::GENERATOR.cardano_testnet,
        2_500_000,
    )
    .with_fee(170_000)
    .with_inputs(vec![TxInput::new([7; 32], 0, 5_000_000)]);
    let session = cosigner.sign_session(identity.key_pair(), payload);

    assert_eq!(session.state(), SigningState::Returned);
    let signed = session.into_result().unwrap();
    assert_eq!(signed.scheme, SchemeId::Schnorr);
    assert!(signed.verify().unwrap());
}

#[test]
fn test_export_then_reimport() {
    let engine = engine();
    let codec = AddressCodec::new();
    let original = CrossChainIdentity::import(
        &engine,
        &codec,
        Secret::parse(EdgeCaseMnemonics::STANDARD_24).unwrap(),
        Network::Mainnet,
    )
    .unwrap();

    let wif = encode_wif(original.key_pair(), Network::Mainnet);
    let reimported = CrossChainIdentity::import(
        &engine,
        &codec,
        Secret::parse(&wif).unwrap(),
        Network::Mainnet,
    )
    .unwrap();
    assert_eq!(original.key_pair(), reimported.key_pair());
    assert_eq!(original.cardano(), reimported.cardano());
}

#[test]
fn test_wrong_word_count_is_unsupported() {
    let engine = engine();
    for phrase in EdgeCaseMnemonics::wrong_word_count() {
        let err = engine.derive(Secret::parse(phrase).unwrap()).unwrap_err();
        assert!(
            matches!(err, FloadaError::UnsupportedDerivationPath { .. }),
            "{phrase}: {err:?}"
        );
    }
}

#[test]
fn test_foreign_addresses_fail_compatibility() {
    let validator = CompatibilityValidator::default();
    for foreign in EdgeCaseAddresses::foreign() {
        let err = validator
            .is_compatible(KnownVectors::GENERATOR.flo_mainnet, foreign)
            .unwrap_err();
        match err {
            FloadaError::DecodeError { source, .. } => {
                assert!(matches!(*source, FloadaError::UnknownNetworkPrefix { .. }))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

#[test]
fn test_signing_with_unrelated_key_is_rejected() {
    let engine = engine();
    let codec = AddressCodec::new();
    let signer = engine
        .derive(Secret::parse(EdgeCaseMnemonics::STANDARD_12).unwrap())
        .unwrap();
    let cosigner = TransactionCoSigner::new(codec);
    let session = cosigner.sign_session(
        &signer,
        SigningPayload::new(
            KnownVectors::LEGACY_WIF.flo_mainnet,
            KnownVectors::GENERATOR.flo_mainnet,
            1,
        ),
    );
    assert_eq!(session.state(), SigningState::Rejected);
    assert!(matches!(
        session.error(),
        Some(FloadaError::SigningKeyMismatch { .. })
    ));
}

#[tokio::test]
async fn test_imported_identity_round_trips_through_store() {
    let engine = engine();
    let codec = AddressCodec::new();
    let store = MemoryWalletStore::new();
    let identity = CrossChainIdentity::import(
        &engine,
        &codec,
        Secret::parse(KnownVectors::FLO_WIF).unwrap(),
        Network::Mainnet,
    )
    .unwrap();

    let record = store
        .create(identity.to_wallet_record("imported"))
        .await
        .unwrap();
    let found = store
        .get_by_address(&identity.cardano().encoded)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, record.id);
    assert_eq!(found.flo_address, KnownVectors::LEGACY_WIF.flo_mainnet);

    let again = store.create(identity.to_wallet_record("twice")).await;
    assert!(matches!(again, Err(FloadaError::WalletExists(_))));
}
