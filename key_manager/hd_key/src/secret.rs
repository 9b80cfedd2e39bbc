//! Caller-supplied secrets and their classification.

use crate::hashing::tagged_hash;
use crate::wif::{COMPRESSED_WIF_LEN, UNCOMPRESSED_WIF_LEN};
use bip39::Language;
use floada_error::{FloadaError, Result};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const FINGERPRINT_TAG: &str = "floada/secret-fingerprint";

/// Which form a secret arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretKind {
    /// Base58Check WIF private key
    PrivateKey,
    /// BIP-39 mnemonic phrase
    Mnemonic,
}

impl fmt::Display for SecretKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretKind::PrivateKey => write!(f, "private-key"),
            SecretKind::Mnemonic => write!(f, "mnemonic"),
        }
    }
}

/// Raw key material. Consumed by derivation and zeroized on drop.
#[derive(Clone)]
pub enum Secret {
    /// A WIF-encoded private key
    PrivateKey(Zeroizing<String>),
    /// A normalised mnemonic phrase with its (possibly empty) passphrase
    Mnemonic {
        /// Lower-case words separated by single spaces
        phrase: Zeroizing<String>,
        /// BIP-39 passphrase
        passphrase: Zeroizing<String>,
    },
}

impl Secret {
    /// Classifies `input` as a WIF key or a mnemonic phrase.
    ///
    /// Only the shape is checked here; checksums and word lists are verified
    /// during derivation.
    pub fn parse(input: &str) -> Result<Self> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        match tokens.as_slice() {
            [single] if looks_like_wif(single) => {
                Ok(Secret::PrivateKey(Zeroizing::new((*single).to_string())))
            }
            [_, _, ..] if tokens.iter().all(|t| t.chars().all(|c| c.is_ascii_alphabetic())) => {
                Ok(Secret::mnemonic_from_tokens(&tokens))
            }
            // A lone word is a phrase of the wrong length, not an unknown format
            [single] if is_english_word(single) => Ok(Secret::mnemonic_from_tokens(&tokens)),
            _ => Err(FloadaError::InvalidSecretFormat),
        }
    }

    fn mnemonic_from_tokens(tokens: &[&str]) -> Self {
        let phrase = tokens
            .iter()
            .map(|t| t.to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        Secret::Mnemonic {
            phrase: Zeroizing::new(phrase),
            passphrase: Zeroizing::new(String::new()),
        }
    }

    /// Parses a mnemonic and attaches a BIP-39 passphrase.
    pub fn mnemonic_with_passphrase(phrase: &str, passphrase: &str) -> Result<Self> {
        match Secret::parse(phrase)? {
            Secret::Mnemonic { phrase, .. } => Ok(Secret::Mnemonic {
                phrase,
                passphrase: Zeroizing::new(passphrase.to_string()),
            }),
            Secret::PrivateKey(_) => Err(FloadaError::InvalidSecretFormat),
        }
    }

    /// The form this secret arrived in
    pub fn kind(&self) -> SecretKind {
        match self {
            Secret::PrivateKey(_) => SecretKind::PrivateKey,
            Secret::Mnemonic { .. } => SecretKind::Mnemonic,
        }
    }

    /// Non-reversible identifier for caching derived key pairs.
    pub fn fingerprint(&self) -> SecretFingerprint {
        let mut data = Zeroizing::new(Vec::new());
        match self {
            Secret::PrivateKey(wif) => {
                data.push(0x01);
                data.extend_from_slice(wif.as_bytes());
            }
            Secret::Mnemonic { phrase, passphrase } => {
                data.push(0x02);
                data.extend_from_slice(phrase.as_bytes());
                data.push(0x00);
                data.extend_from_slice(passphrase.as_bytes());
            }
        }
        SecretFingerprint(tagged_hash(FINGERPRINT_TAG, &data))
    }
}

impl FromStr for Secret {
    type Err = FloadaError;

    fn from_str(s: &str) -> Result<Self> {
        Secret::parse(s)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({}, [REDACTED])", self.kind())
    }
}

fn is_english_word(token: &str) -> bool {
    let word = token.to_ascii_lowercase();
    Language::English.word_list().contains(&word.as_str())
}

fn looks_like_wif(token: &str) -> bool {
    (token.len() == COMPRESSED_WIF_LEN || token.len() == UNCOMPRESSED_WIF_LEN)
        && token.chars().all(|c| BASE58_ALPHABET.contains(c))
}

/// Tagged SHA-256 of a normalised secret.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SecretFingerprint([u8; 32]);

impl SecretFingerprint {
    /// Raw fingerprint bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lower-case hex of the fingerprint
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for SecretFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretFingerprint({})", &self.to_hex()[..16])
    }
}
