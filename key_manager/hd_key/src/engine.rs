//! Key derivation engine: secret in, [`KeyPair`] out.

use crate::keypair::{KeyPair, PRIVATE_KEY_LEN};
use crate::paths::{self, SUPPORTED_WORD_COUNTS};
use crate::secret::Secret;
use crate::wif::decode_wif;
use bip32::{DerivationPath, XPrv};
use bip39::{Language, Mnemonic};
use floada_error::{FloadaError, Result};
use std::str::FromStr;
use zeroize::Zeroizing;

/// Derivation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationConfig {
    /// BIP-32 path applied to mnemonic seeds
    pub path: String,
    /// Accept Bitcoin-family `0x80` WIF keys as FLO mainnet keys
    pub accept_legacy_wif: bool,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            path: paths::FLO.to_string(),
            accept_legacy_wif: true,
        }
    }
}

/// Turns a [`Secret`] into the canonical [`KeyPair`].
///
/// Both secret forms converge on the same key type; the engine holds only
/// configuration and is safe to share across threads.
#[derive(Debug, Clone)]
pub struct KeyDerivationEngine {
    path: DerivationPath,
    path_text: String,
    accept_legacy_wif: bool,
}

impl KeyDerivationEngine {
    /// Creates an engine, validating the derivation path up front.
    pub fn new(config: DerivationConfig) -> Result<Self> {
        let path = DerivationPath::from_str(&config.path).map_err(|e| {
            FloadaError::UnsupportedDerivationPath {
                path: config.path.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            path,
            path_text: config.path,
            accept_legacy_wif: config.accept_legacy_wif,
        })
    }

    /// The configured derivation path as text
    pub fn path(&self) -> &str {
        &self.path_text
    }

    /// Derives the key pair for `secret`, consuming it.
    pub fn derive(&self, secret: Secret) -> Result<KeyPair> {
        tracing::debug!(kind = %secret.kind(), "deriving key pair");
        let key_pair = match &secret {
            Secret::PrivateKey(wif) => {
                let decoded = decode_wif(wif, self.accept_legacy_wif)?;
                KeyPair::from_private_key(&decoded.private_key)?
            }
            Secret::Mnemonic { phrase, passphrase } => {
                self.derive_from_mnemonic(phrase, passphrase)?
            }
        };
        tracing::debug!(public_key = %key_pair.public_key_hex(), "derived key pair");
        Ok(key_pair)
    }

    fn derive_from_mnemonic(&self, phrase: &str, passphrase: &str) -> Result<KeyPair> {
        let word_count = phrase.split_whitespace().count();
        if !SUPPORTED_WORD_COUNTS.contains(&word_count) {
            return Err(FloadaError::UnsupportedDerivationPath {
                path: self.path_text.clone(),
                reason: format!("{word_count}-word mnemonics are not supported"),
            });
        }

        let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase)
            .map_err(|e| FloadaError::malformed_secret(mnemonic_error_reason(&e)))?;
        let seed = Zeroizing::new(mnemonic.to_seed(passphrase));

        #[cfg(feature = "debug-derivation")]
        tracing::trace!(path = %self.path_text, "deriving child key");

        let child = XPrv::derive_from_path(&seed[..], &self.path).map_err(|e| {
            FloadaError::UnsupportedDerivationPath {
                path: self.path_text.clone(),
                reason: e.to_string(),
            }
        })?;
        let key_bytes: Zeroizing<[u8; PRIVATE_KEY_LEN]> =
            Zeroizing::new(child.private_key().to_bytes().into());
        KeyPair::from_private_key(&key_bytes)
    }
}

// bip39's Display for some variants echoes the offending word.
fn mnemonic_error_reason(err: &bip39::Error) -> &'static str {
    match err {
        bip39::Error::UnknownWord(_) => "mnemonic contains a word outside the English list",
        bip39::Error::InvalidChecksum => "mnemonic checksum mismatch",
        bip39::Error::BadWordCount(_) => "unsupported mnemonic word count",
        _ => "invalid mnemonic",
    }
}
