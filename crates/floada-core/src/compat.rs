//! Cross-chain compatibility: two addresses are compatible when they carry
//! the same public key hash, whatever their encodings.

use floada_error::{FloadaError, Result};
use floada_traits::{Network, NetworkTag, PublicKeyHash};
use serde::{Deserialize, Serialize};

use crate::codec::{AddressCodec, DecodedAddress};
use crate::ct_eq;

/// Outcome of [`CompatibilityValidator::check`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    /// Both addresses are controlled by the same key
    pub same_key: bool,
    /// Both addresses are on the same network class
    pub same_network: bool,
    pub a: CompatibilitySide,
    pub b: CompatibilitySide,
}

/// One decoded side of a compatibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilitySide {
    pub address: String,
    pub network_tag: NetworkTag,
    #[serde(with = "hex::serde")]
    pub public_key_hash: PublicKeyHash,
}

/// Checks address pairs without access to any secret.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityValidator {
    codec: AddressCodec,
}

impl CompatibilityValidator {
    pub fn new(codec: AddressCodec) -> Self {
        Self { codec }
    }

    fn decode(&self, address: &str) -> Result<DecodedAddress> {
        self.codec
            .decode(address)
            .map_err(|e| FloadaError::decode(address, e))
    }

    /// True iff both addresses decode to the same public key hash.
    pub fn is_compatible(&self, a: &str, b: &str) -> Result<bool> {
        let left = self.decode(a)?;
        let right = self.decode(b)?;
        Ok(ct_eq(&left.public_key_hash, &right.public_key_hash))
    }

    /// Like [`is_compatible`](Self::is_compatible), also reporting both sides.
    pub fn check(&self, a: &str, b: &str) -> Result<CompatibilityReport> {
        let left = self.decode(a)?;
        let right = self.decode(b)?;
        let network = |d: &DecodedAddress| -> Network { d.network_tag.network() };

        let report = CompatibilityReport {
            same_key: ct_eq(&left.public_key_hash, &right.public_key_hash),
            same_network: network(&left) == network(&right),
            a: CompatibilitySide {
                address: a.trim().to_string(),
                network_tag: left.network_tag,
                public_key_hash: left.public_key_hash,
            },
            b: CompatibilitySide {
                address: b.trim().to_string(),
                network_tag: right.network_tag,
                public_key_hash: right.public_key_hash,
            },
        };
        tracing::debug!(
            a = %report.a.network_tag,
            b = %report.b.network_tag,
            same_key = report.same_key,
            "compatibility check"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLO_G: &str = "FGWP1xKhDP5RmV525TmUoEwX9mTZwp3sJn";
    const ADDR_G: &str = "addr1v963uahgrxged4z5jswyt5dn5v3lzsem6csn7zkh";
    const ADDR_TEST_G: &str = "addr_test1vp63uahgrxged4z5jswyt5dn5v3lzsem6cf97pug";
    const FLO_OTHER: &str = "F5qnh1L14u32MFSwoWawMV3TB1USApzgjx";

    #[test]
    fn test_same_key_compatible() {
        let validator = CompatibilityValidator::default();
        assert!(validator.is_compatible(FLO_G, ADDR_G).unwrap());
        assert!(validator.is_compatible(ADDR_G, FLO_G).unwrap());
        assert!(validator.is_compatible(FLO_G, FLO_G).unwrap());
    }

    #[test]
    fn test_different_keys_incompatible() {
        let validator = CompatibilityValidator::default();
        assert!(!validator.is_compatible(FLO_OTHER, ADDR_G).unwrap());
    }

    #[test]
    fn test_check_reports_network_class() {
        let validator = CompatibilityValidator::default();
        let report = validator.check(FLO_G, ADDR_TEST_G).unwrap();
        assert!(report.same_key);
        assert!(!report.same_network);

        let report = validator.check(FLO_G, ADDR_G).unwrap();
        assert!(report.same_key && report.same_network);
    }

    #[test]
    fn test_decode_error_wraps_cause() {
        let validator = CompatibilityValidator::default();
        let err = validator.is_compatible(FLO_G, "not-an-address").unwrap_err();
        match err {
            FloadaError::DecodeError { address, source } => {
                assert_eq!(address, "not-an-address");
                assert!(matches!(*source, FloadaError::MalformedAddress { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
