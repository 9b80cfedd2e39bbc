//! # floada_hd_key
//!
//! Secret handling and key derivation for floada.
//!
//! A caller hands over a [`Secret`] (a WIF private key or a BIP-39 mnemonic);
//! [`KeyDerivationEngine::derive`] turns it into the single secp256k1
//! [`KeyPair`] that backs both the FLO and the Cardano-style address.
//!
//! ```
//! use floada_hd_key::{DerivationConfig, KeyDerivationEngine, Secret};
//!
//! let engine = KeyDerivationEngine::new(DerivationConfig::default())?;
//! let secret = Secret::parse("RBsa5EX5LdEw5nKUDgFGdTMeYtBdAcvyqFZMvfRxnBi7vmUrRPtr")?;
//! let key_pair = engine.derive(secret)?;
//! assert!(key_pair.verify_consistency());
//! # Ok::<(), floada_error::FloadaError>(())
//! ```

#![forbid(unsafe_code)]

pub mod engine;
pub mod hashing;
pub mod keypair;
pub mod paths;
pub mod secret;
pub mod wif;

pub use engine::{DerivationConfig, KeyDerivationEngine};
pub use hashing::{hash160, sha256d, tagged_hash};
pub use keypair::{parse_public_key, KeyPair, PRIVATE_KEY_LEN};
pub use secret::{Secret, SecretFingerprint, SecretKind};
pub use wif::{decode_wif, encode_wif, WifKey};
