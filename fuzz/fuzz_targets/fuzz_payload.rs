#![no_main]

use arbitrary::Arbitrary;
use floada_core::{AddressCodec, SigningPayload, TxInput};
use floada_traits::NetworkTag;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Transfer {
    from_hash: [u8; 20],
    to_hash: [u8; 20],
    cardano: bool,
    amount: u64,
    fee: u64,
    nonce: u64,
    inputs: Vec<([u8; 32], u32, u64)>,
}

fuzz_target!(|transfer: Transfer| {
    let codec = AddressCodec::new();
    let tag = if transfer.cardano {
        NetworkTag::CardanoMainnet
    } else {
        NetworkTag::FloMainnet
    };
    let (Ok(from), Ok(to)) = (
        codec.encode(&transfer.from_hash, tag),
        codec.encode(&transfer.to_hash, tag),
    ) else {
        return;
    };
    let inputs: Vec<TxInput> = transfer
        .inputs
        .iter()
        .map(|&(txid, vout, value)| TxInput::new(txid, vout, value))
        .collect();
    let mut outpoints: Vec<_> = inputs.iter().map(TxInput::outpoint).collect();
    outpoints.sort();
    outpoints.dedup();
    if outpoints.len() != inputs.len() {
        // duplicate outpoints are rejected before serialization matters
        return;
    }
    let payload = SigningPayload::new(from, to, transfer.amount)
        .with_fee(transfer.fee)
        .with_nonce(transfer.nonce)
        .with_inputs(inputs.clone());

    // Serialization never fails for decodable addresses and ignores input order
    let bytes = payload.canonical_bytes(&codec).expect("addresses decode");
    let mut reversed = inputs;
    reversed.reverse();
    let other = payload.clone().with_inputs(reversed);
    assert_eq!(bytes, other.canonical_bytes(&codec).expect("addresses decode"));
});
