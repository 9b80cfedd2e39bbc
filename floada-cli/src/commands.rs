//! Command handlers

use std::io::{self, BufRead, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use floada_core::{
    CrossChainIdentity, FloadaConfig, SignedTransaction, SigningPayload, TransactionEnvelope,
};
use floada_hd_key::{encode_wif, Secret};
use floada_traits::Amount;
use zeroize::Zeroizing;

use crate::types::{parse_input, DeriveOutput, Output, TransferArgs, VerifyOutput};

/// Reads a secret from `reader`, trimming surrounding whitespace.
pub fn read_secret_from<R: BufRead>(mut reader: R) -> Result<Zeroizing<String>> {
    let mut buf = Zeroizing::new(String::new());
    reader
        .read_to_string(&mut buf)
        .context("reading secret")?;
    let secret = Zeroizing::new(buf.trim().to_string());
    if secret.is_empty() {
        bail!("no secret provided");
    }
    Ok(secret)
}

fn read_secret(secret_env: Option<&str>) -> Result<Secret> {
    let text = match secret_env {
        Some(var) => Zeroizing::new(
            std::env::var(var).with_context(|| format!("environment variable {var} is not set"))?,
        ),
        None => read_secret_from(io::stdin().lock())?,
    };
    Ok(Secret::parse(text.trim())?)
}

fn identity(config: &FloadaConfig, secret: Secret) -> Result<CrossChainIdentity> {
    let engine = config.engine()?;
    let codec = config.codec();
    Ok(CrossChainIdentity::import(&engine, &codec, secret, config.network)?)
}

pub fn derive(
    config: &FloadaConfig,
    secret_env: Option<&str>,
    path: Option<String>,
    export_wif: bool,
) -> Result<Output> {
    let mut config = config.clone();
    if let Some(path) = path {
        config.derivation_path = path;
    }
    let secret = read_secret(secret_env)?;
    let kind = secret.kind();
    let fingerprint = secret.fingerprint().to_hex();
    let identity = identity(&config, secret)?;
    tracing::info!(%kind, fingerprint = %&fingerprint[..16], "derived identity");

    let wif = export_wif.then(|| encode_wif(identity.key_pair(), config.network).to_string());
    Ok(Output::Derive(Box::new(DeriveOutput {
        kind: kind.to_string(),
        fingerprint,
        network: identity.network(),
        public_key: identity.public_key_hex(),
        flo: identity.flo().clone(),
        cardano: identity.cardano().clone(),
        wif,
    })))
}

pub fn decode(config: &FloadaConfig, address: &str) -> Result<Output> {
    Ok(Output::Address(config.codec().decode_record(address)?))
}

pub fn compat(config: &FloadaConfig, a: &str, b: &str) -> Result<Output> {
    Ok(Output::Compat(config.validator().check(a, b)?))
}

/// Resolves the transfer amount in the sending chain's smallest unit.
fn resolve_amount(config: &FloadaConfig, args: &TransferArgs) -> Result<u64> {
    match (&args.amount, &args.value) {
        (Some(units), _) => Ok(*units),
        (None, Some(value)) => {
            let chain = config.codec().decode(&args.from)?.network_tag.chain();
            Ok(Amount::parse(value, chain.decimals())?.to_u64()?)
        }
        (None, None) => bail!("either --amount or --value is required"),
    }
}

pub fn sign(config: &FloadaConfig, args: TransferArgs, secret_env: Option<&str>) -> Result<Output> {
    let amount = resolve_amount(config, &args)?;
    let inputs = args
        .inputs
        .iter()
        .map(|text| parse_input(text))
        .collect::<Result<Vec<_>>>()?;
    let payload = SigningPayload::new(args.from, args.to, amount)
        .with_fee(args.fee.unwrap_or(config.default_fee))
        .with_nonce(args.nonce)
        .with_inputs(inputs);

    let identity = identity(config, read_secret(secret_env)?)?;
    let session = config.cosigner().sign_session(identity.key_pair(), payload);
    tracing::debug!(history = ?session.history(), "signing session finished");
    let signed = session.into_result()?;
    Ok(Output::Signed(Box::new(signed.to_envelope())))
}

/// Parses an envelope and checks its digest and signature.
pub fn verify_envelope(json: &str) -> Result<VerifyOutput> {
    let envelope: TransactionEnvelope =
        serde_json::from_str(json).context("parsing transaction envelope")?;
    let tx_hash = envelope.tx_hash.clone();
    let signed = SignedTransaction::try_from(envelope)?;
    Ok(VerifyOutput {
        valid: signed.verify()?,
        tx_hash,
    })
}

pub fn verify(file: Option<&Path>) -> Result<Output> {
    let json = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut json = String::new();
            io::stdin().read_to_string(&mut json)?;
            json
        }
    };
    Ok(Output::Verify(verify_envelope(&json)?))
}
