//! Wallet records and the store interface.
//!
//! Records are public data only. The key material that produced them is
//! never stored; re-import the secret to sign.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use floada_error::{FloadaError, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A stored cross-chain wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRecord {
    pub id: Uuid,
    pub name: String,
    pub flo_address: String,
    pub cardano_address: String,
    /// Compressed public key, hex
    pub public_key: String,
    pub created_at: DateTime<Utc>,
}

impl WalletRecord {
    pub fn new(
        name: impl Into<String>,
        flo_address: impl Into<String>,
        cardano_address: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            flo_address: flo_address.into(),
            cardano_address: cardano_address.into(),
            public_key: public_key.into(),
            created_at: Utc::now(),
        }
    }

    /// True if either address is `address`. Base58 is case-sensitive and
    /// bech32 is not.
    pub fn has_address(&self, address: &str) -> bool {
        self.flo_address == address || self.cardano_address.eq_ignore_ascii_case(address)
    }
}

/// CRUD-by-key over wallet records.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Stores a new record. Fails with [`FloadaError::WalletExists`] if either
    /// address is already stored.
    async fn create(&self, record: WalletRecord) -> Result<WalletRecord>;

    async fn get(&self, id: Uuid) -> Result<WalletRecord>;

    /// Looks a record up by its FLO or Cardano-style address.
    async fn get_by_address(&self, address: &str) -> Result<Option<WalletRecord>>;

    /// All records, oldest first
    async fn list(&self) -> Result<Vec<WalletRecord>>;

    async fn rename(&self, id: Uuid, name: &str) -> Result<WalletRecord>;

    async fn remove(&self, id: Uuid) -> Result<WalletRecord>;
}

/// Process-memory [`WalletStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryWalletStore {
    wallets: Arc<RwLock<HashMap<Uuid, WalletRecord>>>,
}

impl MemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WalletStore for MemoryWalletStore {
    async fn create(&self, record: WalletRecord) -> Result<WalletRecord> {
        let mut wallets = self.wallets.write().await;
        if let Some(existing) = wallets.values().find(|w| {
            w.id == record.id
                || w.has_address(&record.flo_address)
                || w.has_address(&record.cardano_address)
        }) {
            return Err(FloadaError::WalletExists(existing.id.to_string()));
        }
        wallets.insert(record.id, record.clone());
        tracing::debug!(id = %record.id, flo = %record.flo_address, "wallet stored");
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<WalletRecord> {
        self.wallets
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| FloadaError::WalletNotFound(id.to_string()))
    }

    async fn get_by_address(&self, address: &str) -> Result<Option<WalletRecord>> {
        let address = address.trim();
        Ok(self
            .wallets
            .read()
            .await
            .values()
            .find(|w| w.has_address(address))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<WalletRecord>> {
        let mut all: Vec<WalletRecord> = self.wallets.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn rename(&self, id: Uuid, name: &str) -> Result<WalletRecord> {
        let mut wallets = self.wallets.write().await;
        let record = wallets
            .get_mut(&id)
            .ok_or_else(|| FloadaError::WalletNotFound(id.to_string()))?;
        record.name = name.to_string();
        Ok(record.clone())
    }

    async fn remove(&self, id: Uuid) -> Result<WalletRecord> {
        self.wallets
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| FloadaError::WalletNotFound(id.to_string()))
    }
}
