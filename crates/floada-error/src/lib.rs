//! # Floada Error
//!
//! Unified error types for the floada toolkit: key derivation, the FLO and
//! Cardano-style address codec, cross-chain compatibility checks and the
//! transaction co-signer all report failures through [`FloadaError`].
//!
//! Error values never carry secret material. Variants that concern a secret
//! describe *what* was wrong with it, never its contents.
//!
//! ## Example
//!
//! ```
//! use floada_error::{FloadaError, Result};
//!
//! fn require_amount(amount: u64) -> Result<u64> {
//!     if amount == 0 {
//!         return Err(FloadaError::InvalidAmount("amount must be positive".to_string()));
//!     }
//!     Ok(amount)
//! }
//!
//! assert!(require_amount(0).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use thiserror::Error;

/// The main error type for floada operations.
#[derive(Error, Debug)]
pub enum FloadaError {
    // ============ Secret Errors ============
    /// Input is neither a WIF private key nor a mnemonic phrase
    #[error("Secret is neither a WIF private key nor a mnemonic phrase")]
    InvalidSecretFormat,

    /// Secret looked like a WIF key or mnemonic but failed validation
    #[error("Malformed secret: {reason}")]
    MalformedSecret {
        /// What failed (never the secret itself)
        reason: String,
    },

    /// Mnemonic word count or derivation path is not supported
    #[error("Unsupported derivation path '{path}': {reason}")]
    UnsupportedDerivationPath {
        /// The derivation path that was requested
        path: String,
        /// Why it cannot be used
        reason: String,
    },

    // ============ Address Errors ============
    /// Address checksum does not verify
    #[error("Checksum mismatch for address '{address}'")]
    ChecksumMismatch {
        /// The offending address text
        address: String,
    },

    /// Version byte, human-readable part or header is not a known network
    #[error("Unknown network prefix '{prefix}'")]
    UnknownNetworkPrefix {
        /// The unrecognised prefix, rendered as text
        prefix: String,
    },

    /// Address is not parseable under any supported encoding
    #[error("Malformed address '{address}': {reason}")]
    MalformedAddress {
        /// The offending address text
        address: String,
        /// Parse failure detail
        reason: String,
    },

    /// An address supplied to a higher-level operation failed to decode
    #[error("Failed to decode address '{address}': {source}")]
    DecodeError {
        /// The address that failed to decode
        address: String,
        /// The underlying codec failure
        #[source]
        source: Box<FloadaError>,
    },

    /// Sender and recipient live on different chains or networks
    #[error("Chain mismatch: sender is {from}, recipient is {to}")]
    ChainMismatch {
        /// Network of the sender address
        from: String,
        /// Network of the recipient address
        to: String,
    },

    // ============ Balance/Amount Errors ============
    /// Declared inputs do not cover amount plus fee
    #[error("Insufficient funds: available {available}, required {required}")]
    InsufficientFunds {
        /// Sum of declared inputs (in smallest unit)
        available: u64,
        /// Amount plus fee (in smallest unit)
        required: u64,
    },

    /// Amount overflow during calculation
    #[error("Amount overflow: {0}")]
    AmountOverflow(String),

    /// Invalid amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    // ============ Transaction Errors ============
    /// Key pair does not control the sender address
    #[error("Signing key does not control sender address '{address}'")]
    SigningKeyMismatch {
        /// The sender address
        address: String,
    },

    /// Transaction payload is structurally invalid
    #[error("Failed to build transaction: {0}")]
    TransactionBuildError(String),

    /// Signature creation or parsing failed
    #[error("Failed to sign transaction: {0}")]
    SigningError(String),

    /// Public key bytes are not a valid curve point
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    // ============ Wallet Store Errors ============
    /// Wallet already exists
    #[error("Wallet already exists: {0}")]
    WalletExists(String),

    /// Wallet not found
    #[error("Wallet not found: {0}")]
    WalletNotFound(String),

    // ============ Parsing Errors ============
    /// Hex decode error
    #[error("Hex decode error: {0}")]
    HexError(String),

    // ============ IO Errors ============
    /// File IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenient Result type using FloadaError
pub type Result<T> = std::result::Result<T, FloadaError>;

impl FloadaError {
    /// Shorthand for [`FloadaError::MalformedSecret`].
    pub fn malformed_secret(reason: impl Into<String>) -> Self {
        FloadaError::MalformedSecret {
            reason: reason.into(),
        }
    }

    /// Wraps a codec failure for `address` into [`FloadaError::DecodeError`].
    pub fn decode(address: impl Into<String>, source: FloadaError) -> Self {
        FloadaError::DecodeError {
            address: address.into(),
            source: Box::new(source),
        }
    }
}

// ============ From implementations for common error types ============

impl From<std::io::Error> for FloadaError {
    fn from(err: std::io::Error) -> Self {
        FloadaError::IoError(err.to_string())
    }
}

impl From<hex::FromHexError> for FloadaError {
    fn from(err: hex::FromHexError) -> Self {
        FloadaError::HexError(err.to_string())
    }
}

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum ErrorCode {
    /// Invalid secret format
    InvalidSecretFormat = 1001,
    /// Malformed secret
    MalformedSecret = 1002,
    /// Unsupported derivation path
    UnsupportedDerivationPath = 1003,
    /// Checksum mismatch
    ChecksumMismatch = 2001,
    /// Unknown network prefix
    UnknownNetworkPrefix = 2002,
    /// Malformed address
    MalformedAddress = 2003,
    /// Decode error
    DecodeError = 2004,
    /// Chain mismatch
    ChainMismatch = 2005,
    /// Insufficient funds
    InsufficientFunds = 3001,
    /// Amount overflow
    AmountOverflow = 3002,
    /// Invalid amount
    InvalidAmount = 3003,
    /// Signing key mismatch
    SigningKeyMismatch = 4001,
    /// Transaction build error
    TransactionBuildError = 4002,
    /// Signing error
    SigningError = 4003,
    /// Invalid public key
    InvalidPublicKey = 4004,
    /// Wallet exists
    WalletExists = 5001,
    /// Wallet not found
    WalletNotFound = 5002,
    /// Hex, IO or configuration failure
    Internal = 9001,
}

impl FloadaError {
    /// Returns the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            FloadaError::InvalidSecretFormat => ErrorCode::InvalidSecretFormat,
            FloadaError::MalformedSecret { .. } => ErrorCode::MalformedSecret,
            FloadaError::UnsupportedDerivationPath { .. } => ErrorCode::UnsupportedDerivationPath,
            FloadaError::ChecksumMismatch { .. } => ErrorCode::ChecksumMismatch,
            FloadaError::UnknownNetworkPrefix { .. } => ErrorCode::UnknownNetworkPrefix,
            FloadaError::MalformedAddress { .. } => ErrorCode::MalformedAddress,
            FloadaError::DecodeError { .. } => ErrorCode::DecodeError,
            FloadaError::ChainMismatch { .. } => ErrorCode::ChainMismatch,
            FloadaError::InsufficientFunds { .. } => ErrorCode::InsufficientFunds,
            FloadaError::AmountOverflow(_) => ErrorCode::AmountOverflow,
            FloadaError::InvalidAmount(_) => ErrorCode::InvalidAmount,
            FloadaError::SigningKeyMismatch { .. } => ErrorCode::SigningKeyMismatch,
            FloadaError::TransactionBuildError(_) => ErrorCode::TransactionBuildError,
            FloadaError::SigningError(_) => ErrorCode::SigningError,
            FloadaError::InvalidPublicKey(_) => ErrorCode::InvalidPublicKey,
            FloadaError::WalletExists(_) => ErrorCode::WalletExists,
            FloadaError::WalletNotFound(_) => ErrorCode::WalletNotFound,
            FloadaError::HexError(_) | FloadaError::IoError(_) | FloadaError::ConfigError(_) => {
                ErrorCode::Internal
            }
        }
    }

    /// Returns true if repeating the same call could succeed.
    ///
    /// Every validation failure is deterministic, so only IO is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FloadaError::IoError(_))
    }

    /// Fixed, user-facing sentence for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            FloadaError::InvalidSecretFormat | FloadaError::MalformedSecret { .. } => {
                "Invalid private key"
            }
            FloadaError::UnsupportedDerivationPath { .. } => "Unsupported recovery phrase",
            FloadaError::ChecksumMismatch { .. }
            | FloadaError::UnknownNetworkPrefix { .. }
            | FloadaError::MalformedAddress { .. }
            | FloadaError::DecodeError { .. } => "Invalid address",
            FloadaError::ChainMismatch { .. } => "Recipient is on a different network",
            FloadaError::InsufficientFunds { .. } => "Insufficient funds",
            FloadaError::AmountOverflow(_) | FloadaError::InvalidAmount(_) => "Invalid amount",
            FloadaError::SigningKeyMismatch { .. } => "Key does not control the sending address",
            FloadaError::TransactionBuildError(_)
            | FloadaError::SigningError(_)
            | FloadaError::InvalidPublicKey(_) => "Transaction could not be signed",
            FloadaError::WalletExists(_) => "Wallet already imported",
            FloadaError::WalletNotFound(_) => "Wallet not found",
            FloadaError::HexError(_) | FloadaError::IoError(_) | FloadaError::ConfigError(_) => {
                "Internal error"
            }
        }
    }
}
