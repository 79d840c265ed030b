//! Movly Signer CLI
//!
//! Generates signer keys and produces withdrawal authorizations for the Movly
//! operations contract. Results are printed to stdout as JSON; logs go to
//! stderr.
//!
//! # Usage
//!
//! ```text
//! movly-signer keygen --count 3
//! SIGNER_PRIVATE_KEY=0x... movly-signer address
//! SIGNER_PRIVATE_KEY=0x... movly-signer sign --beneficiary terra1... --amount 100 --nonce 1
//! movly-signer verify --beneficiary terra1... --amount 100 --nonce 1 --signature 0x...
//! ```

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use common::EvmAddress;
use movly_signer::config::Config;
use movly_signer::{decode_signature_hex, verify_authorization, WithdrawalSigner};
use serde_json::json;
use tracing::info;

#[derive(Parser)]
#[command(name = "movly-signer")]
#[command(about = "Withdrawal signer for the Movly operations contract", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate fresh signer key pairs
    Keygen {
        /// Number of key pairs to generate
        #[arg(short, long, default_value_t = 1)]
        count: u32,
    },

    /// Print the address of the configured signer
    Address,

    /// Sign a withdrawal authorization
    Sign {
        /// Terra address allowed to withdraw
        #[arg(long)]
        beneficiary: String,

        /// Amount in token base units
        #[arg(long)]
        amount: u128,

        /// Single-use withdrawal nonce
        #[arg(long)]
        nonce: u64,
    },

    /// Recover the signer of a withdrawal authorization
    Verify {
        #[arg(long)]
        beneficiary: String,

        #[arg(long)]
        amount: u128,

        #[arg(long)]
        nonce: u64,

        /// 65-byte signature as hex
        #[arg(long)]
        signature: String,

        /// Fail unless the signature recovers to this address
        #[arg(long)]
        expected: Option<String>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    init_logging();

    match cli.command {
        Commands::Keygen { count } => {
            let keys: Vec<_> = (0..count)
                .map(|_| {
                    let signer = WithdrawalSigner::random();
                    json!({
                        "address": signer.address().to_string(),
                        "private_key": signer.private_key_hex(),
                    })
                })
                .collect();

            info!(count, "Generated signer keys");
            println!("{}", serde_json::to_string_pretty(&keys)?);
        }

        Commands::Address => {
            let signer = Config::load()?.signer()?;
            println!("{}", signer.address());
        }

        Commands::Sign {
            beneficiary,
            amount,
            nonce,
        } => {
            let signer = Config::load()?.signer()?;
            let authorization = signer.sign_withdrawal(&beneficiary, amount, nonce)?;

            info!(
                signer = %signer.address(),
                beneficiary = %beneficiary,
                amount = %amount,
                nonce,
                "Withdrawal authorized"
            );

            let output = authorization.to_sign_output()?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Verify {
            beneficiary,
            amount,
            nonce,
            signature,
            expected,
        } => {
            let bytes = decode_signature_hex(&signature)?;
            let expected = expected
                .as_deref()
                .map(EvmAddress::parse)
                .transpose()?;

            let recovered =
                verify_authorization(&beneficiary, amount, nonce, &bytes, expected.as_ref())?;
            if expected.is_some() {
                info!(%recovered, "Signature matches expected signer");
            }
            println!("{}", recovered);
        }
    }

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,movly_signer=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
