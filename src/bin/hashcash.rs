//! Reference CLI harness for the proof-of-work cores.
//!
//! The wire format is inherited: hex strings are lowercase without `0x` and
//! run least-significant byte first on both input and output. The
//! `--normal-order` flag switches both directions to natural byte order for
//! callers that do not need compatibility with the legacy tool.

use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use fec8::{pow32, pow64};

#[derive(Parser)]
#[command(name = "hashcash", about = "Hashcash proof-of-work token generator")]
struct Cli {
    /// Parse and print hex in natural byte order instead of the legacy
    /// reversed order.
    #[arg(long, global = true)]
    normal_order: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Version-1 hashcash tokens.
    Hashcash1 {
        #[command(subcommand)]
        action: Action,
    },
}

#[derive(Subcommand)]
enum Action {
    /// Mine a key for a value. With `<limit> <timeout>` this runs the
    /// 32-byte SHA-256 core; with just `<timeout>` it runs the 64-byte
    /// SHA-512 core.
    Create {
        value_hex: String,
        /// Either `<timeout>` or `<limit> <timeout>`; `-1` disables the
        /// corresponding check.
        #[arg(num_args = 1..=2, value_name = "LIMIT/TIMEOUT", allow_negative_numbers = true)]
        budget: Vec<i32>,
    },
    /// Print the leading-zero-bit count for a key/value pair. The core is
    /// picked from the key length (32 or 64 bytes).
    Verify {
        key_hex: String,
        value_hex: String,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Commands::Hashcash1 { action } = cli.command;
    match action {
        Action::Create { value_hex, budget } => cmd_create(&value_hex, &budget, cli.normal_order),
        Action::Verify { key_hex, value_hex } => {
            cmd_verify(&key_hex, &value_hex, cli.normal_order)
        }
    }
}

fn cmd_create(value_hex: &str, budget: &[i32], normal_order: bool) -> Result<()> {
    let value = parse_hex(value_hex, normal_order)?;

    let key_hex = match *budget {
        [timeout] => format_hex(&pow64::create(&value, timeout), normal_order),
        [limit, timeout] => {
            let value: [u8; 32] = value
                .as_slice()
                .try_into()
                .context("the 32-byte core needs a 32-byte value")?;
            format_hex(&pow32::create(&value, limit, timeout), normal_order)
        }
        _ => bail!("expected <timeout> or <limit> <timeout>"),
    };

    println!("{key_hex}");
    Ok(())
}

fn cmd_verify(key_hex: &str, value_hex: &str, normal_order: bool) -> Result<()> {
    let key = parse_hex(key_hex, normal_order)?;
    let value = parse_hex(value_hex, normal_order)?;

    let count = match key.len() {
        32 => {
            let key: [u8; 32] = key.as_slice().try_into().context("key length")?;
            let value: [u8; 32] = value
                .as_slice()
                .try_into()
                .context("the 32-byte core needs a 32-byte value")?;
            pow32::verify(&key, &value)
        }
        64 => {
            let key: [u8; 64] = key.as_slice().try_into().context("key length")?;
            pow64::verify(&key, &value)
        }
        n => bail!("key must be 32 or 64 bytes, got {n}"),
    };

    println!("{count}");
    Ok(())
}

fn parse_hex(s: &str, normal_order: bool) -> Result<Vec<u8>> {
    // Odd-length input grows a leading zero nibble, like the legacy parser.
    let padded;
    let s = if s.len() % 2 == 1 {
        padded = format!("0{s}");
        padded.as_str()
    } else {
        s
    };

    let mut bytes = hex::decode(s).with_context(|| format!("malformed hex {s:?}"))?;
    if !normal_order {
        bytes.reverse();
    }
    Ok(bytes)
}

fn format_hex(bytes: &[u8], normal_order: bool) -> String {
    if normal_order {
        hex::encode(bytes)
    } else {
        let reversed: Vec<u8> = bytes.iter().rev().copied().collect();
        hex::encode(reversed)
    }
}
