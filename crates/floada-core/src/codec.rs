//! Table-driven address codec.
//!
//! Every supported network contributes one [`AddressFormat`] row; encoding
//! and decoding dispatch on the row's [`AddressEncoding`] rather than on the
//! chain, so adding a network is a table change.

use floada_cardano::{decode_bech32, encode_bech32, match_bech32_format, Bech32Parts};
use floada_error::{FloadaError, Result};
use floada_flo::{base58check_checksum, decode_base58check, encode_base58check};
use floada_traits::{AddressEncoding, AddressFormat, NetworkTag, PublicKeyHash};
use serde::{Deserialize, Serialize};

/// An address with its decoded parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressRecord {
    pub network_tag: NetworkTag,
    #[serde(with = "hex::serde")]
    pub public_key_hash: PublicKeyHash,
    /// Base58Check checksum bytes, or the packed 30-bit bech32 checksum
    #[serde(with = "hex::serde")]
    pub checksum: [u8; 4],
    pub encoded: String,
}

/// `(publicKeyHash, networkTag)` recovered from address text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodedAddress {
    pub public_key_hash: PublicKeyHash,
    pub network_tag: NetworkTag,
}

/// Bidirectional codec over a table of address formats.
#[derive(Debug, Clone)]
pub struct AddressCodec {
    formats: Vec<AddressFormat>,
}

impl Default for AddressCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressCodec {
    /// Codec over the FLO and Cardano-style tables.
    pub fn new() -> Self {
        let formats = floada_flo::ADDRESS_FORMATS
            .iter()
            .chain(floada_cardano::ADDRESS_FORMATS.iter())
            .copied()
            .collect();
        Self { formats }
    }

    /// Codec over a caller-supplied table.
    pub fn with_formats(formats: Vec<AddressFormat>) -> Self {
        Self { formats }
    }

    /// Registered formats, in lookup order
    pub fn formats(&self) -> &[AddressFormat] {
        &self.formats
    }

    fn format_for(&self, tag: NetworkTag) -> Result<&AddressFormat> {
        self.formats
            .iter()
            .find(|f| f.tag == tag)
            .ok_or_else(|| FloadaError::UnknownNetworkPrefix {
                prefix: tag.to_string(),
            })
    }

    /// Renders `hash` as address text for `tag`.
    pub fn encode(&self, hash: &PublicKeyHash, tag: NetworkTag) -> Result<String> {
        Ok(self.record(hash, tag)?.encoded)
    }

    /// Renders `hash` for `tag` and returns the full record.
    pub fn record(&self, hash: &PublicKeyHash, tag: NetworkTag) -> Result<AddressRecord> {
        let format = self.format_for(tag)?;
        let (encoded, checksum) = match format.encoding {
            AddressEncoding::Base58Check { version } => (
                encode_base58check(version, hash),
                base58check_checksum(version, hash),
            ),
            AddressEncoding::Bech32 { hrp, header } => {
                let encoded = encode_bech32(hrp, header, hash)?;
                let checksum = decode_bech32(&encoded)?.checksum;
                (encoded, checksum)
            }
        };
        tracing::debug!(network = %tag, address = %encoded, "encoded address");
        Ok(AddressRecord {
            network_tag: tag,
            public_key_hash: *hash,
            checksum,
            encoded,
        })
    }

    /// Recovers `(hash, tag)` from address text.
    pub fn decode(&self, address: &str) -> Result<DecodedAddress> {
        let record = self.decode_record(address)?;
        Ok(DecodedAddress {
            public_key_hash: record.public_key_hash,
            network_tag: record.network_tag,
        })
    }

    /// Recovers the full record from address text.
    ///
    /// Errors: [`FloadaError::ChecksumMismatch`], [`FloadaError::UnknownNetworkPrefix`],
    /// [`FloadaError::MalformedAddress`].
    pub fn decode_record(&self, address: &str) -> Result<AddressRecord> {
        let address = address.trim();
        if self.has_bech32_hrp(address) {
            // The hrp is ours, so a bad character or mixed case in the rest is corruption
            let parts = decode_bech32(address).map_err(|e| match e {
                FloadaError::MalformedAddress { address, .. } => {
                    FloadaError::ChecksumMismatch { address }
                }
                other => other,
            })?;
            return self.bech32_record(address, &parts);
        }
        if looks_like_bech32(address) {
            let parts = decode_bech32(address)?;
            return self.bech32_record(address, &parts);
        }

        let parts = decode_base58check(address)?;
        let format = self
            .formats
            .iter()
            .find(|f| f.encoding == AddressEncoding::Base58Check { version: parts.version })
            .ok_or_else(|| FloadaError::UnknownNetworkPrefix {
                prefix: format!("{:#04x}", parts.version),
            })?;
        Ok(AddressRecord {
            network_tag: format.tag,
            public_key_hash: parts.hash,
            checksum: parts.checksum,
            encoded: address.to_string(),
        })
    }

    /// Text that starts with a table hrp and the `1` separator, ignoring
    /// case, with room for a checksum after it.
    fn has_bech32_hrp(&self, address: &str) -> bool {
        self.formats.iter().any(|f| match f.encoding {
            AddressEncoding::Bech32 { hrp, .. } => {
                address
                    .get(..hrp.len())
                    .is_some_and(|prefix| prefix.eq_ignore_ascii_case(hrp))
                    && address[hrp.len()..].starts_with('1')
                    && address.len() > hrp.len() + 1 + BECH32_CHECKSUM_CHARS
            }
            AddressEncoding::Base58Check { .. } => false,
        })
    }

    fn bech32_record(&self, address: &str, parts: &Bech32Parts) -> Result<AddressRecord> {
        let (format, public_key_hash) = match_bech32_format(address, parts, &self.formats)?;
        Ok(AddressRecord {
            network_tag: format.tag,
            public_key_hash,
            checksum: parts.checksum,
            encoded: address.to_ascii_lowercase(),
        })
    }
}

const BECH32_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const BECH32_CHECKSUM_CHARS: usize = 6;

/// Single-case text with a `1` separator and a data part drawn from the
/// bech32 charset. Base58 addresses are mixed-case in practice.
fn looks_like_bech32(address: &str) -> bool {
    let single_case = address == address.to_ascii_lowercase() || address == address.to_ascii_uppercase();
    let Some((hrp, data)) = address.rsplit_once('1') else {
        return false;
    };
    single_case
        && !hrp.is_empty()
        && data.len() >= 6
        && data
            .chars()
            .all(|c| BECH32_CHARSET.contains(c.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH_G: &str = "751e76e8199196d454941c45d1b3a323f1433bd6";

    fn hash_g() -> PublicKeyHash {
        hex::decode(HASH_G).unwrap().try_into().unwrap()
    }

    #[test]
    fn test_encode_all_tags() {
        let codec = AddressCodec::new();
        let hash = hash_g();
        assert_eq!(
            codec.encode(&hash, NetworkTag::FloMainnet).unwrap(),
            "FGWP1xKhDP5RmV525TmUoEwX9mTZwp3sJn"
        );
        assert_eq!(
            codec.encode(&hash, NetworkTag::FloTestnet).unwrap(),
            "oTYdneAk1p9XCADx32QybGiTW852p1CKGT"
        );
        assert_eq!(
            codec.encode(&hash, NetworkTag::CardanoMainnet).unwrap(),
            "addr1v963uahgrxged4z5jswyt5dn5v3lzsem6csn7zkh"
        );
        assert_eq!(
            codec.encode(&hash, NetworkTag::CardanoTestnet).unwrap(),
            "addr_test1vp63uahgrxged4z5jswyt5dn5v3lzsem6cf97pug"
        );
    }

    #[test]
    fn test_decode_all_tags() {
        let codec = AddressCodec::new();
        for tag in NetworkTag::ALL {
            let encoded = codec.encode(&hash_g(), tag).unwrap();
            let decoded = codec.decode(&encoded).unwrap();
            assert_eq!(decoded.network_tag, tag);
            assert_eq!(decoded.public_key_hash, hash_g());
        }
    }

    #[test]
    fn test_record_checksum_matches_decode() {
        let codec = AddressCodec::new();
        for tag in NetworkTag::ALL {
            let record = codec.record(&hash_g(), tag).unwrap();
            assert_eq!(codec.decode_record(&record.encoded).unwrap(), record);
        }
    }

    #[test]
    fn test_bech32_checksum_value() {
        let codec = AddressCodec::new();
        let record = codec
            .decode_record("addr1vyqzp0hqsr8aadpseaerm9fdez9khd6zgye7pwq8")
            .unwrap();
        assert_eq!(u32::from_be_bytes(record.checksum), 0x33e0b807);
    }

    #[test]
    fn test_uppercase_bech32() {
        let codec = AddressCodec::new();
        let decoded = codec
            .decode("ADDR1V963UAHGRXGED4Z5JSWYT5DN5V3LZSEM6CSN7ZKH")
            .unwrap();
        assert_eq!(decoded.network_tag, NetworkTag::CardanoMainnet);
        assert_eq!(decoded.public_key_hash, hash_g());
    }

    #[test]
    fn test_foreign_addresses() {
        let codec = AddressCodec::new();
        // Bitcoin P2PKH: valid checksum, unknown version byte
        assert!(matches!(
            codec.decode("1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA"),
            Err(FloadaError::UnknownNetworkPrefix { .. })
        ));
        // Bitcoin segwit v0: valid bech32, unknown hrp
        assert!(matches!(
            codec.decode("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"),
            Err(FloadaError::UnknownNetworkPrefix { .. })
        ));
    }

    #[test]
    fn test_garbage() {
        let codec = AddressCodec::new();
        for text in ["", "hello world", "0x1234567890abcdef", "addr1"] {
            assert!(codec.decode(text).is_err(), "accepted {text:?}");
        }
    }

    #[test]
    fn test_bech32_corruption_outside_charset() {
        let codec = AddressCodec::new();
        let address = "addr1vyqzp0hqsr8aadpseaerm9fdez9khd6zgye7pwq8";
        let mut corrupted = vec![
            address.replacen("vyqzp", "vybzp", 1),
            address.replacen("0hqsr", "0hisr", 1),
            address.replacen("pwq8", "pwo8", 1),
            address.replacen("zgye", "zg1e", 1),
            address.replacen("vyqzp", "vyQzp", 1),
        ];
        corrupted.push("ADDR1V963UAHGRXGED4Z5JSWYT5DN5V3LZSEM6CSN7ZKh".to_string());
        for text in corrupted {
            assert!(
                matches!(codec.decode(&text), Err(FloadaError::ChecksumMismatch { .. })),
                "{text}"
            );
        }
    }

    #[test]
    fn test_restricted_table() {
        let codec = AddressCodec::with_formats(floada_flo::ADDRESS_FORMATS.to_vec());
        assert!(codec.encode(&hash_g(), NetworkTag::FloMainnet).is_ok());
        assert!(matches!(
            codec.encode(&hash_g(), NetworkTag::CardanoMainnet),
            Err(FloadaError::UnknownNetworkPrefix { .. })
        ));
        assert!(matches!(
            codec.decode("addr1v963uahgrxged4z5jswyt5dn5v3lzsem6csn7zkh"),
            Err(FloadaError::UnknownNetworkPrefix { .. })
        ));
    }
}
