//! Command-line interface.
//!
//! SOPS invokes the helper with a single subcommand and talks to it over
//! stdin/stdout. Each subcommand is also accepted as a long flag
//! (`--encrypt`, `--decrypt`, `--key-provider`, `--key`).

pub mod decrypt;
pub mod encrypt;
pub mod key_provider;

use std::io::{self, Write};

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

use crate::core::resolver::Resolver;
use crate::error::Result;

/// age encryption helper for SOPS.
#[derive(Parser)]
#[command(
    name = "sops-age-helper",
    about = "age encrypt/decrypt/key-provider helper for SOPS",
    after_help = "Keys are read from AGE_KEY_FILE, SOPS_AGE_KEY_FILE, AGE_KEY or SOPS_AGE_KEY.\n\
                  Recipients fall back to AGE_RECIPIENTS_FILE, SOPS_AGE_RECIPIENTS_FILE,\n\
                  AGE_RECIPIENTS or SOPS_AGE_RECIPIENTS."
)]
pub struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Encrypt a payload for the configured recipients
    #[command(long_flag = "encrypt")]
    Encrypt,

    /// Decrypt a payload with the private keys sent by SOPS
    #[command(long_flag = "decrypt")]
    Decrypt,

    /// Provide recipients and private keys to SOPS
    #[command(
        name = "key-provider",
        long_flag = "key-provider",
        alias = "key",
        long_flag_alias = "key"
    )]
    KeyProvider,

    /// Print version
    #[command(hide = true)]
    Version,
}

impl Command {
    /// Name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Command::Encrypt => "encrypt",
            Command::Decrypt => "decrypt",
            Command::KeyProvider => "key-provider",
            Command::Version => "version",
        }
    }
}

/// Write the version line followed by usage.
///
/// Shown for a missing or unrecognised subcommand, on stdout, exit 0.
pub fn print_usage<W: Write>(output: &mut W) -> Result<()> {
    print_version(output)?;
    write!(output, "{}", Cli::command().render_help())?;
    output.flush()?;
    Ok(())
}

/// Whether a parse failure means "not a known subcommand" and should fall
/// back to usage instead of clap's error exit.
pub fn is_unrecognized(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::InvalidSubcommand | ErrorKind::UnknownArgument
    )
}

/// Print `Version <crate version>`.
pub fn print_version<W: Write>(output: &mut W) -> Result<()> {
    writeln!(output, "Version {}", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

/// Execute a command against the process stdin/stdout and environment.
pub fn execute(command: Command) -> Result<()> {
    let resolver = Resolver::system();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    match command {
        Command::Encrypt => encrypt::run(&mut input, &mut output, &resolver),
        Command::Decrypt => decrypt::run(&mut input, &mut output),
        Command::KeyProvider => key_provider::run(&mut input, &mut output, &resolver),
        Command::Version => print_version(&mut output),
    }
}
