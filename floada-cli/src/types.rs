//! Command inputs and JSON outputs

use anyhow::{anyhow, bail, Context, Result};
use floada_core::{AddressRecord, CompatibilityReport, TransactionEnvelope, TxInput};
use floada_traits::Network;
use serde::Serialize;

/// `sign` arguments, before the amount is resolved against the sending chain.
#[derive(Debug, Clone)]
pub struct TransferArgs {
    pub from: String,
    pub to: String,
    pub amount: Option<u64>,
    pub value: Option<String>,
    pub fee: Option<u64>,
    pub nonce: u64,
    pub inputs: Vec<String>,
}

/// Parses `TXID:VOUT:VALUE`, with the txid as 64 hex characters.
pub fn parse_input(text: &str) -> Result<TxInput> {
    let mut parts = text.split(':');
    let (Some(txid), Some(vout), Some(value), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        bail!("input '{text}' is not TXID:VOUT:VALUE");
    };
    let txid: [u8; 32] = hex::decode(txid)
        .with_context(|| format!("input '{text}' has a non-hex txid"))?
        .try_into()
        .map_err(|_| anyhow!("input '{text}' txid must be 32 bytes"))?;
    let vout = vout
        .parse()
        .with_context(|| format!("input '{text}' has a bad output index"))?;
    let value = value
        .parse()
        .with_context(|| format!("input '{text}' has a bad value"))?;
    Ok(TxInput::new(txid, vout, value))
}

#[derive(Debug, Serialize)]
pub struct DeriveOutput {
    pub kind: String,
    pub fingerprint: String,
    pub network: Network,
    pub public_key: String,
    pub flo: AddressRecord,
    pub cardano: AddressRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wif: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyOutput {
    pub valid: bool,
    pub tx_hash: String,
}

/// Everything a command can print.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Output {
    Derive(Box<DeriveOutput>),
    Address(AddressRecord),
    Compat(CompatibilityReport),
    Signed(Box<TransactionEnvelope>),
    Verify(VerifyOutput),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        let txid = "ab".repeat(32);
        let input = parse_input(&format!("{txid}:3:1500")).unwrap();
        assert_eq!(input.txid, [0xab; 32]);
        assert_eq!(input.vout, 3);
        assert_eq!(input.value, 1500);
    }

    #[test]
    fn test_parse_input_rejects_bad_shapes() {
        let txid = "ab".repeat(32);
        for bad in [
            String::from("abc"),
            format!("{txid}:1"),
            format!("{txid}:1:2:3"),
            format!("{}:1:2", "ab".repeat(31)),
            format!("{}:1:2", "zz".repeat(32)),
            format!("{txid}:-1:2"),
            format!("{txid}:1:lots"),
        ] {
            assert!(parse_input(&bad).is_err(), "{bad}");
        }
    }
}
