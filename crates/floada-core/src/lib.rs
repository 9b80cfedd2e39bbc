//! # Floada Core
//!
//! The cross-chain half of floada: one secp256k1 key, two address
//! encodings, and a co-signer that only signs for the key it was given.
//!
//! - [`AddressCodec`]: table-driven encode/decode between address text and
//!   `(public key hash, network tag)`
//! - [`CompatibilityValidator`]: do two addresses share key material?
//! - [`TransactionCoSigner`]: validate a [`SigningPayload`] and sign it with
//!   the scheme of the sending chain
//! - [`CrossChainIdentity`]: the import flow, secret in, both addresses out
//! - [`WalletStore`]: CRUD-by-key over public wallet records
//!
//! Every component is built explicitly from a [`FloadaConfig`]; nothing here
//! is a global.

pub mod codec;
pub mod compat;
pub mod config;
pub mod cosigner;
pub mod identity;
pub mod payload;
pub mod store;

pub use codec::{AddressCodec, AddressRecord, DecodedAddress};
pub use compat::{CompatibilityReport, CompatibilityValidator};
pub use config::FloadaConfig;
pub use cosigner::{
    SignedTransaction, SigningSession, SigningState, TransactionCoSigner, TransactionEnvelope,
};
pub use identity::CrossChainIdentity;
pub use payload::{SigningPayload, TxInput, PAYLOAD_MAGIC, PAYLOAD_VERSION};
pub use store::{MemoryWalletStore, WalletRecord, WalletStore};

use subtle::ConstantTimeEq;

// ============================================================================
// SECURITY: constant-time comparison
// ============================================================================

/// Constant-time equality comparison for key material and key hashes.
///
/// # Example
/// ```
/// use floada_core::ct_eq;
///
/// assert!(ct_eq(b"same hash", b"same hash"));
/// assert!(!ct_eq(b"same hash", b"diff hash"));
/// ```
#[inline]
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
