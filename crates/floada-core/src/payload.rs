//! Unsigned transfer payloads and their canonical byte form.
//!
//! ```text
//! "FLDA" | version u8 | from.tag u8 | from.hash[20] | to.tag u8 | to.hash[20]
//! | amount u64 | fee u64 | nonce u64 | input_count u32
//! | inputs sorted by (txid, vout): txid[32] vout u32 value u64
//! ```
//!
//! Integers are big-endian. Addresses go in decoded, so any textual variant
//! of an address serializes identically.

use floada_error::{FloadaError, Result};
use serde::{Deserialize, Serialize};

use crate::codec::{AddressCodec, DecodedAddress};

/// Leading magic of canonical payload bytes.
pub const PAYLOAD_MAGIC: &[u8; 4] = b"FLDA";

/// Canonical layout version.
pub const PAYLOAD_VERSION: u8 = 1;

const HEADER_LEN: usize = 4 + 1 + 2 * 21 + 3 * 8 + 4;
const INPUT_LEN: usize = 32 + 4 + 8;

/// An output being spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxInput {
    #[serde(with = "hex::serde")]
    pub txid: [u8; 32],
    pub vout: u32,
    pub value: u64,
}

impl TxInput {
    pub fn new(txid: [u8; 32], vout: u32, value: u64) -> Self {
        Self { txid, vout, value }
    }

    /// `(txid, vout)`, the identity of the spent output
    pub fn outpoint(&self) -> ([u8; 32], u32) {
        (self.txid, self.vout)
    }
}

/// An unsigned transfer.
///
/// `inputs` may be empty for account-style transfers; the nonce then
/// distinguishes otherwise identical payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningPayload {
    pub from: String,
    pub to: String,
    /// Smallest unit of the sending chain
    pub amount: u64,
    pub fee: u64,
    #[serde(default)]
    pub nonce: u64,
    #[serde(default)]
    pub inputs: Vec<TxInput>,
}

impl SigningPayload {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: u64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
            fee: 0,
            nonce: 0,
            inputs: Vec::new(),
        }
    }

    pub fn with_fee(mut self, fee: u64) -> Self {
        self.fee = fee;
        self
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<TxInput>) -> Self {
        self.inputs = inputs;
        self
    }

    /// `amount + fee`, or [`FloadaError::AmountOverflow`].
    pub fn required(&self) -> Result<u64> {
        self.amount.checked_add(self.fee).ok_or_else(|| {
            FloadaError::AmountOverflow(format!("amount {} + fee {}", self.amount, self.fee))
        })
    }

    /// Sum of input values, or [`FloadaError::AmountOverflow`].
    pub fn total_input(&self) -> Result<u64> {
        self.inputs.iter().try_fold(0u64, |acc, input| {
            acc.checked_add(input.value)
                .ok_or_else(|| FloadaError::AmountOverflow("input values overflow u64".into()))
        })
    }

    /// Inputs in canonical `(txid, vout)` order.
    pub fn sorted_inputs(&self) -> Vec<TxInput> {
        let mut inputs = self.inputs.clone();
        inputs.sort_by_key(TxInput::outpoint);
        inputs
    }

    /// Decodes both addresses and renders the canonical bytes.
    pub fn canonical_bytes(&self, codec: &AddressCodec) -> Result<Vec<u8>> {
        let from = codec
            .decode(&self.from)
            .map_err(|e| FloadaError::decode(&self.from, e))?;
        let to = codec
            .decode(&self.to)
            .map_err(|e| FloadaError::decode(&self.to, e))?;
        Ok(self.encode_with(&from, &to))
    }

    /// Renders the canonical bytes for already-decoded addresses.
    pub fn encode_with(&self, from: &DecodedAddress, to: &DecodedAddress) -> Vec<u8> {
        let inputs = self.sorted_inputs();
        let mut out = Vec::with_capacity(HEADER_LEN + inputs.len() * INPUT_LEN);
        out.extend_from_slice(PAYLOAD_MAGIC);
        out.push(PAYLOAD_VERSION);
        for address in [from, to] {
            out.push(address.network_tag.id());
            out.extend_from_slice(&address.public_key_hash);
        }
        out.extend_from_slice(&self.amount.to_be_bytes());
        out.extend_from_slice(&self.fee.to_be_bytes());
        out.extend_from_slice(&self.nonce.to_be_bytes());
        out.extend_from_slice(&(inputs.len() as u32).to_be_bytes());
        for input in &inputs {
            out.extend_from_slice(&input.txid);
            out.extend_from_slice(&input.vout.to_be_bytes());
            out.extend_from_slice(&input.value.to_be_bytes());
        }
        out
    }
}
