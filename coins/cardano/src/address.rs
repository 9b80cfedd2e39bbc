use bech32::primitives::decode::UncheckedHrpstring;
use bech32::{Bech32, Fe32, Hrp};
use floada_error::{FloadaError, Result};
use floada_hd_key::hash160;
use floada_traits::{
    AddressEncoding, AddressFormat, Network, NetworkTag, PublicKeyHash, PUBLIC_KEY_HASH_LEN,
};

use crate::config::{
    network_id, ENTERPRISE_HEADER, MAINNET_HRP, MAINNET_NETWORK_ID, TESTNET_HRP,
    TESTNET_NETWORK_ID,
};

/// Cardano-style entries of the address dispatch table
pub const ADDRESS_FORMATS: [AddressFormat; 2] = [
    AddressFormat::bech32(
        NetworkTag::CardanoMainnet,
        MAINNET_HRP,
        ENTERPRISE_HEADER | MAINNET_NETWORK_ID,
    ),
    AddressFormat::bech32(
        NetworkTag::CardanoTestnet,
        TESTNET_HRP,
        ENTERPRISE_HEADER | TESTNET_NETWORK_ID,
    ),
];

/// Number of trailing bech32 checksum characters.
const CHECKSUM_CHARS: usize = 6;

/// Human-readable part, payload bytes and checksum recovered from bech32 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bech32Parts {
    /// Lower-cased human-readable part
    pub hrp: String,
    /// Decoded data part, `header ‖ hash` for addresses this crate writes
    pub payload: Vec<u8>,
    /// The 30-bit bech32 checksum, big-endian
    pub checksum: [u8; 4],
}

impl Bech32Parts {
    /// First payload byte
    pub fn header(&self) -> Option<u8> {
        self.payload.first().copied()
    }

    /// The hash after the header, if the payload is exactly `header ‖ hash`
    pub fn key_hash(&self) -> Option<PublicKeyHash> {
        if self.payload.len() != 1 + PUBLIC_KEY_HASH_LEN {
            return None;
        }
        let mut hash = [0u8; PUBLIC_KEY_HASH_LEN];
        hash.copy_from_slice(&self.payload[1..]);
        Some(hash)
    }

    fn payload_error(&self, address: &str) -> FloadaError {
        FloadaError::MalformedAddress {
            address: address.to_string(),
            reason: format!(
                "payload is {} bytes, expected {}",
                self.payload.len(),
                1 + PUBLIC_KEY_HASH_LEN
            ),
        }
    }
}

/// Renders `header ‖ hash` as bech32 under `hrp`.
pub fn encode_bech32(hrp: &str, header: u8, hash: &PublicKeyHash) -> Result<String> {
    let malformed = |reason: String| FloadaError::MalformedAddress {
        address: hrp.to_string(),
        reason,
    };
    let parsed = Hrp::parse(hrp).map_err(|e| malformed(e.to_string()))?;
    let mut data = Vec::with_capacity(1 + PUBLIC_KEY_HASH_LEN);
    data.push(header);
    data.extend_from_slice(hash);

    bech32::encode::<Bech32>(parsed, &data).map_err(|e| malformed(e.to_string()))
}

/// Splits bech32 address text without interpreting the hrp or payload.
///
/// The checksum covers the human-readable part, so it is verified first:
/// any single-character corruption reports [`FloadaError::ChecksumMismatch`].
pub fn decode_bech32(address: &str) -> Result<Bech32Parts> {
    let malformed = |reason: String| FloadaError::MalformedAddress {
        address: address.to_string(),
        reason,
    };

    let unchecked = UncheckedHrpstring::new(address).map_err(|e| malformed(e.to_string()))?;
    let hrp = unchecked.hrp().as_str().to_ascii_lowercase();
    let checksum = checksum_from_text(address).ok_or_else(|| malformed("missing checksum".into()))?;

    let checked = unchecked
        .validate_and_remove_checksum::<Bech32>()
        .map_err(|_| FloadaError::ChecksumMismatch {
            address: address.to_string(),
        })?;
    Ok(Bech32Parts {
        hrp,
        payload: checked.byte_iter().collect(),
        checksum,
    })
}

/// Looks up the table row for decoded bech32 parts, then extracts the hash.
///
/// Errors: [`FloadaError::UnknownNetworkPrefix`] for an hrp/header pair not
/// in `formats`, then [`FloadaError::MalformedAddress`] for a bad length.
pub fn match_bech32_format<'a>(
    address: &str,
    parts: &Bech32Parts,
    formats: &'a [AddressFormat],
) -> Result<(&'a AddressFormat, PublicKeyHash)> {
    let header = parts.header().ok_or_else(|| parts.payload_error(address))?;
    let format = formats
        .iter()
        .find(|f| match f.encoding {
            AddressEncoding::Bech32 { hrp, header: h } => hrp == parts.hrp && h == header,
            AddressEncoding::Base58Check { .. } => false,
        })
        .ok_or_else(|| FloadaError::UnknownNetworkPrefix {
            prefix: format!("{}/{:#04x}", parts.hrp, header),
        })?;
    let hash = parts.key_hash().ok_or_else(|| parts.payload_error(address))?;
    Ok((format, hash))
}

/// Packs the six trailing checksum characters (30 bits) into four bytes.
pub fn checksum_from_text(address: &str) -> Option<[u8; 4]> {
    let (_, data_part) = address.rsplit_once('1')?;
    if data_part.len() < CHECKSUM_CHARS {
        return None;
    }
    let tail = &data_part[data_part.len() - CHECKSUM_CHARS..];
    let mut value: u32 = 0;
    for c in tail.chars() {
        let fe = Fe32::from_char(c.to_ascii_lowercase()).ok()?;
        value = (value << 5) | u32::from(fe.to_u8());
    }
    Some(value.to_be_bytes())
}

/// A Cardano-style enterprise address over a secp256k1 HASH160
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardanoAddress {
    pub network: Network,
    pub network_id: u8,
    pub payment_key_hash: PublicKeyHash,
    pub bech32: String,
}

impl CardanoAddress {
    /// Enterprise address for a compressed public key
    pub fn enterprise(public_key: &[u8], network: Network) -> Result<Self> {
        Self::from_hash(hash_key(public_key), network)
    }

    /// Enterprise address for a HASH160
    pub fn from_hash(payment_key_hash: PublicKeyHash, network: Network) -> Result<Self> {
        let network_id = network_id(network);
        let (hrp, header) = match network {
            Network::Mainnet => (MAINNET_HRP, ENTERPRISE_HEADER | MAINNET_NETWORK_ID),
            Network::Testnet => (TESTNET_HRP, ENTERPRISE_HEADER | TESTNET_NETWORK_ID),
        };
        let bech32 = encode_bech32(hrp, header, &payment_key_hash)?;
        Ok(Self {
            network,
            network_id,
            payment_key_hash,
            bech32,
        })
    }

    /// Parses Cardano-style address text.
    pub fn parse(address: &str) -> Result<Self> {
        let parts = decode_bech32(address)?;
        let (format, payment_key_hash) = match_bech32_format(address, &parts, &ADDRESS_FORMATS)?;
        let network = format.tag.network();
        Ok(Self {
            network,
            network_id: network_id(network),
            payment_key_hash,
            bech32: address.to_ascii_lowercase(),
        })
    }

    /// Get the bech32 encoded address
    pub fn to_bech32(&self) -> &str {
        &self.bech32
    }

    /// Check if this is a mainnet address
    pub fn is_mainnet(&self) -> bool {
        self.network_id == MAINNET_NETWORK_ID
    }

    /// Validate a Cardano-style address string
    pub fn validate(address: &str) -> bool {
        Self::parse(address).is_ok()
    }
}

/// Payment key hash: HASH160 of the compressed secp256k1 key
pub fn hash_key(public_key: &[u8]) -> PublicKeyHash {
    hash160(public_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATOR_PUBKEY: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    fn pubkey() -> Vec<u8> {
        hex::decode(GENERATOR_PUBKEY).unwrap()
    }

    #[test]
    fn test_enterprise_address_mainnet() {
        let addr = CardanoAddress::enterprise(&pubkey(), Network::Mainnet).unwrap();
        assert_eq!(addr.to_bech32(), "addr1v963uahgrxged4z5jswyt5dn5v3lzsem6csn7zkh");
        assert!(addr.is_mainnet());
    }

    #[test]
    fn test_enterprise_address_testnet() {
        let addr = CardanoAddress::enterprise(&pubkey(), Network::Testnet).unwrap();
        assert_eq!(
            addr.to_bech32(),
            "addr_test1vp63uahgrxged4z5jswyt5dn5v3lzsem6cf97pug"
        );
        assert!(!addr.is_mainnet());
    }

    #[test]
    fn test_address_deterministic() {
        let addr1 = CardanoAddress::enterprise(&pubkey(), Network::Mainnet).unwrap();
        let addr2 = CardanoAddress::enterprise(&pubkey(), Network::Mainnet).unwrap();
        assert_eq!(addr1, addr2);
    }

    #[test]
    fn test_parse_roundtrip() {
        let addr = CardanoAddress::enterprise(&pubkey(), Network::Testnet).unwrap();
        let parsed = CardanoAddress::parse(addr.to_bech32()).unwrap();
        assert_eq!(parsed, addr);
    }

    #[test]
    fn test_parse_uppercase() {
        let upper = "addr1v963uahgrxged4z5jswyt5dn5v3lzsem6csn7zkh".to_uppercase();
        let parsed = CardanoAddress::parse(&upper).unwrap();
        assert_eq!(
            hex::encode(parsed.payment_key_hash),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }

    #[test]
    fn test_checksum_from_text() {
        let checksum = checksum_from_text("addr1vyqzp0hqsr8aadpseaerm9fdez9khd6zgye7pwq8").unwrap();
        assert_eq!(u32::from_be_bytes(checksum), 0x33e0b807);
        assert!(checksum_from_text("no-separator").is_none());
    }

    #[test]
    fn test_corrupted_data_char() {
        let err = CardanoAddress::parse("addr1v963uahgrxged4z5jswyt5dn5v3lzsem6csn7zkq").unwrap_err();
        assert!(matches!(err, FloadaError::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_unknown_hrp() {
        // A valid bech32 string with a foreign human-readable part
        let foreign = encode_bech32("stake", 0xE1, &[1u8; 20]).unwrap();
        let err = CardanoAddress::parse(&foreign).unwrap_err();
        assert!(matches!(err, FloadaError::UnknownNetworkPrefix { .. }));
    }

    #[test]
    fn test_header_network_mismatch() {
        // Mainnet hrp carrying the testnet header
        let mixed = encode_bech32(MAINNET_HRP, 0x60, &[2u8; 20]).unwrap();
        let err = CardanoAddress::parse(&mixed).unwrap_err();
        assert!(matches!(err, FloadaError::UnknownNetworkPrefix { .. }));
    }

    #[test]
    fn test_foreign_hrp_before_length() {
        // Segwit v0 data is not header ‖ hash160, but the hrp is what disqualifies it
        let err = CardanoAddress::parse("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4").unwrap_err();
        assert!(matches!(err, FloadaError::UnknownNetworkPrefix { .. }));
    }

    #[test]
    fn test_wrong_payload_length() {
        let hrp = Hrp::parse(MAINNET_HRP).unwrap();
        let short = bech32::encode::<Bech32>(hrp, &[0x61, 1, 2, 3]).unwrap();
        let err = CardanoAddress::parse(&short).unwrap_err();
        assert!(matches!(err, FloadaError::MalformedAddress { .. }));

        let parts = decode_bech32(&short).unwrap();
        assert_eq!(parts.header(), Some(0x61));
        assert_eq!(parts.key_hash(), None);
    }

    #[test]
    fn test_validate_invalid_address() {
        assert!(!CardanoAddress::validate("invalid"));
        assert!(!CardanoAddress::validate("btc1qxyz"));
        assert!(!CardanoAddress::validate("0x1234567890"));
        assert!(!CardanoAddress::validate("FGWP1xKhDP5RmV525TmUoEwX9mTZwp3sJn"));
    }
}
