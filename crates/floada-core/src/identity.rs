//! Wallet import: one secret, one key pair, an address on each chain.

use floada_error::Result;
use floada_hd_key::{KeyDerivationEngine, KeyPair, Secret};
use floada_traits::{Chain, Network, NetworkTag};

use crate::codec::{AddressCodec, AddressRecord};
use crate::store::WalletRecord;

/// A derived key pair together with its FLO and Cardano-style addresses.
#[derive(Debug)]
pub struct CrossChainIdentity {
    key_pair: KeyPair,
    network: Network,
    flo: AddressRecord,
    cardano: AddressRecord,
}

impl CrossChainIdentity {
    /// Derives the key pair for `secret` and renders both addresses on
    /// `network`. The secret is consumed.
    pub fn import(
        engine: &KeyDerivationEngine,
        codec: &AddressCodec,
        secret: Secret,
        network: Network,
    ) -> Result<Self> {
        let key_pair = engine.derive(secret)?;
        Self::from_key_pair(codec, key_pair, network)
    }

    pub fn from_key_pair(codec: &AddressCodec, key_pair: KeyPair, network: Network) -> Result<Self> {
        let hash = key_pair.public_key_hash();
        let flo = codec.record(&hash, NetworkTag::new(Chain::Flo, network))?;
        let cardano = codec.record(&hash, NetworkTag::new(Chain::Cardano, network))?;
        tracing::info!(
            %network,
            flo = %flo.encoded,
            cardano = %cardano.encoded,
            "imported cross-chain identity"
        );
        Ok(Self {
            key_pair,
            network,
            flo,
            cardano,
        })
    }

    pub fn flo(&self) -> &AddressRecord {
        &self.flo
    }

    pub fn cardano(&self) -> &AddressRecord {
        &self.cardano
    }

    /// Address record for `chain`
    pub fn address(&self, chain: Chain) -> &AddressRecord {
        match chain {
            Chain::Flo => &self.flo,
            Chain::Cardano => &self.cardano,
        }
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn public_key_hex(&self) -> String {
        self.key_pair.public_key_hex()
    }

    /// Public record for storage; carries no private material.
    pub fn to_wallet_record(&self, name: impl Into<String>) -> WalletRecord {
        WalletRecord::new(
            name,
            self.flo.encoded.clone(),
            self.cardano.encoded.clone(),
            self.public_key_hex(),
        )
    }
}
