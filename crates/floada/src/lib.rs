//! # Floada - one key, two chains
//!
//! Floada derives a single secp256k1 key from a FLO private key (WIF) or a
//! BIP-39 mnemonic, renders it as both a FLO Base58Check address and a
//! Cardano-style bech32 address, checks whether two addresses share a key,
//! and co-signs transfers on either chain.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `default` | Core plus both chain crates |
//! | `core` | Derivation engine, codec, validator, co-signer, wallet store |
//! | `flo` | Re-export of the FLO chain crate |
//! | `cardano` | Re-export of the Cardano-style chain crate |
//! | `all-chains` | `flo` + `cardano` |
//!
//! ## Example
//!
//! ```
//! use floada::prelude::*;
//!
//! let config = FloadaConfig::default();
//! let engine = config.engine().unwrap();
//! let codec = config.codec();
//!
//! let secret = Secret::parse("L1aW4aubDFB7yfras2S1mN3bqg9nwySY8nkoLmJebSLD5BWv3ENZ").unwrap();
//! let identity = CrossChainIdentity::import(&engine, &codec, secret, Network::Mainnet).unwrap();
//!
//! let validator = config.validator();
//! assert!(validator
//!     .is_compatible(&identity.flo().encoded, &identity.cardano().encoded)
//!     .unwrap());
//!
//! let payload = SigningPayload::new(
//!     identity.flo().encoded.clone(),
//!     "FGWP1xKhDP5RmV525TmUoEwX9mTZwp3sJn",
//!     1_000_000,
//! )
//! .with_fee(config.default_fee);
//! let signed = config.cosigner().sign(identity.key_pair(), payload).unwrap();
//! assert!(signed.verify().unwrap());
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

// ============================================================================
// Core re-exports
// ============================================================================

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use floada_traits as traits;

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use floada_core as core;

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use floada_error as error;

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use floada_hd_key as keys;

// ============================================================================
// Chain-specific re-exports
// ============================================================================

/// FLO addresses, network parameters and recoverable ECDSA signing
#[cfg(feature = "flo")]
#[cfg_attr(docsrs, doc(cfg(feature = "flo")))]
pub mod flo {
    pub use floada_flo::*;
}

/// Cardano-style addresses, lovelace amounts and Schnorr signing
#[cfg(feature = "cardano")]
#[cfg_attr(docsrs, doc(cfg(feature = "cardano")))]
pub mod cardano {
    pub use floada_cardano::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports
///
/// ```
/// use floada::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "core")]
    pub use floada_traits::prelude::*;

    #[cfg(feature = "core")]
    pub use floada_error::{FloadaError, Result};

    #[cfg(feature = "core")]
    pub use floada_hd_key::{KeyDerivationEngine, KeyPair, Secret};

    #[cfg(feature = "core")]
    pub use floada_core::{
        ct_eq, AddressCodec, AddressRecord, CompatibilityValidator, CrossChainIdentity,
        FloadaConfig, MemoryWalletStore, SignedTransaction, SigningPayload, TransactionCoSigner,
        TxInput, WalletRecord, WalletStore,
    };
}

// ============================================================================
// Version information
// ============================================================================

/// Returns the floada version
pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns the chains whose crates are re-exported
pub fn enabled_chains() -> Vec<&'static str> {
    #[allow(unused_mut)]
    let mut chains = Vec::new();

    #[cfg(feature = "flo")]
    chains.push("flo");

    #[cfg(feature = "cardano")]
    chains.push("cardano");

    chains
}
