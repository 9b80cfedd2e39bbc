//! Floada CLI
//!
//! Derives cross-chain addresses from a FLO key or mnemonic, decodes and
//! compares addresses, and co-signs transfers. Secrets are read from standard
//! input or from a named environment variable, never from arguments. Every
//! command prints JSON on stdout; logs go to stderr.

mod commands;
mod config;
mod types;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Floada: one key on FLO and a Cardano-style chain
#[derive(Debug, Parser)]
#[command(name = "floada")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file (FLOADA_* environment variables still override it)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<std::path::PathBuf>,

    /// Network class: mainnet or testnet
    #[arg(long, global = true, value_name = "NETWORK")]
    network: Option<String>,

    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Derive the key pair and both addresses from a secret
    Derive {
        /// Read the secret from this environment variable instead of stdin
        #[arg(long, value_name = "VAR")]
        secret_env: Option<String>,

        /// BIP-32 path for mnemonics (overrides config)
        #[arg(long, value_name = "PATH")]
        path: Option<String>,

        /// Also print the key as a FLO WIF for the selected network
        #[arg(long)]
        export_wif: bool,
    },

    /// Decode an address into its network tag, key hash and checksum
    Decode {
        /// FLO or Cardano-style address
        address: String,
    },

    /// Check whether two addresses are controlled by the same key
    Compat {
        /// First address
        a: String,
        /// Second address
        b: String,
    },

    /// Sign a transfer with the key derived from a secret
    Sign {
        /// Sender address, must belong to the secret
        #[arg(long, value_name = "ADDRESS")]
        from: String,

        /// Recipient address on the same chain and network
        #[arg(long, value_name = "ADDRESS")]
        to: String,

        /// Amount in the smallest unit (lovelace or satoshi)
        #[arg(long, value_name = "UNITS", conflicts_with = "value", required_unless_present = "value")]
        amount: Option<u64>,

        /// Amount as a decimal in whole coins, e.g. 1.5
        #[arg(long, value_name = "DECIMAL")]
        value: Option<String>,

        /// Fee in the smallest unit (defaults to the configured fee)
        #[arg(long, value_name = "UNITS")]
        fee: Option<u64>,

        /// Account nonce
        #[arg(long, default_value_t = 0)]
        nonce: u64,

        /// Spent output as TXID:VOUT:VALUE (repeatable)
        #[arg(long = "input", value_name = "TXID:VOUT:VALUE")]
        inputs: Vec<String>,

        /// Read the secret from this environment variable instead of stdin
        #[arg(long, value_name = "VAR")]
        secret_env: Option<String>,
    },

    /// Verify a signed transaction envelope
    Verify {
        /// Envelope JSON file; stdin when omitted
        #[arg(long, value_name = "PATH")]
        file: Option<std::path::PathBuf>,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::load(cli.config.as_deref(), cli.network.as_deref())?;
    tracing::debug!(network = %config.network, path = %config.derivation_path, "configuration loaded");

    let output = match cli.command {
        Commands::Derive {
            secret_env,
            path,
            export_wif,
        } => commands::derive(&config, secret_env.as_deref(), path, export_wif)?,
        Commands::Decode { address } => commands::decode(&config, &address)?,
        Commands::Compat { a, b } => commands::compat(&config, &a, &b)?,
        Commands::Sign {
            from,
            to,
            amount,
            value,
            fee,
            nonce,
            inputs,
            secret_env,
        } => commands::sign(
            &config,
            types::TransferArgs {
                from,
                to,
                amount,
                value,
                fee,
                nonce,
                inputs,
            },
            secret_env.as_deref(),
        )?,
        Commands::Verify { file } => commands::verify(file.as_deref())?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_sign_requires_an_amount() {
        let parsed = Cli::try_parse_from(["floada", "sign", "--from", "a", "--to", "b"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from([
            "floada", "sign", "--from", "a", "--to", "b", "--amount", "5", "--value", "1.0",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_sign_collects_inputs() {
        let cli = Cli::try_parse_from([
            "floada",
            "--network",
            "testnet",
            "sign",
            "--from",
            "a",
            "--to",
            "b",
            "--value",
            "1.5",
            "--input",
            "00:0:1",
            "--input",
            "01:1:2",
        ])
        .unwrap();
        assert_eq!(cli.network.as_deref(), Some("testnet"));
        match cli.command {
            Commands::Sign { inputs, value, .. } => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(value.as_deref(), Some("1.5"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_secret_is_not_an_argument() {
        let parsed = Cli::try_parse_from(["floada", "derive", "--secret", "abandon"]);
        assert!(parsed.is_err());
    }
}
