//! Command-line front ends for the `mashlf` and `prand` binaries.

use std::io::{self, IsTerminal};

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::{
    error::{ConfigError, MashError},
    options::{Distribution, MashOptions},
};

/// Re-wrap standard input into lines of random length.
///
/// `-V` is the debug switch, so there is no short version flag.
#[derive(Parser, Debug)]
#[command(name = "mashlf", about, disable_version_flag = true)]
pub struct MashlfCli {
    /// Pseudo-random seed.
    #[arg(short = 's', long, value_parser = parse_unsigned, default_value = "0")]
    pub seed: u64,

    /// Minimum line length, in code points.
    #[arg(
        short = 'i',
        long = "min-length",
        value_parser = parse_signed,
        default_value = "1",
        allow_negative_numbers = true
    )]
    pub min_length: i64,

    /// Maximum line length, in code points.
    #[arg(
        short = 'a',
        long = "max-length",
        value_parser = parse_signed,
        default_value = "8191",
        allow_negative_numbers = true
    )]
    pub max_length: i64,

    /// Line length distribution.
    #[arg(short = 'd', long, value_enum, default_value_t = Distribution::Uniform)]
    pub distribution: Distribution,

    /// Log debug diagnostics.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Debug switch letters; `e` sends diagnostics to standard output.
    #[arg(short = 'V', long = "debug-switch", value_name = "SWITCHES")]
    pub debug_switch: Option<String>,
}

impl MashlfCli {
    /// Filter options selected on the command line.
    #[must_use]
    pub fn options(&self) -> MashOptions {
        MashOptions {
            min_length: self.min_length,
            max_length: self.max_length,
            seed: self.seed,
            distribution: self.distribution,
        }
    }

    /// Where diagnostics go.
    #[must_use]
    pub fn diagnostics(&self) -> Diagnostics {
        match &self.debug_switch {
            Some(switches) if switches.contains('e') => Diagnostics::Stdout,
            _ => Diagnostics::Stderr,
        }
    }
}

/// Write pseudo-random bytes to standard output.
#[derive(Parser, Debug)]
#[command(name = "prand", version, about)]
pub struct PrandCli {
    /// Pseudo-random seed; 0 is an alias for 1.
    #[arg(short = 's', long, value_parser = parse_unsigned, default_value = "0")]
    pub seed: u64,

    /// Log debug diagnostics.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Number of bytes to write.
    #[arg(value_parser = parse_byte_count, allow_negative_numbers = true)]
    pub bytes: u64,
}

/// Destination of log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostics {
    /// Standard error.
    Stderr,
    /// Standard output, interleaved with data.
    Stdout,
}

/// Everything that ends a binary early, mapped onto its exit status.
#[derive(Debug, Error)]
pub enum CliError {
    /// The command line did not parse, or asked for help.
    #[error(transparent)]
    Args(#[from] clap::Error),
    /// The options parsed but describe an invalid run.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Reading input or writing output failed mid-stream.
    #[error(transparent)]
    Stream(MashError),
}

impl From<MashError> for CliError {
    fn from(err: MashError) -> Self {
        match err {
            MashError::Config(config) => CliError::Config(config),
            stream => CliError::Stream(stream),
        }
    }
}

impl CliError {
    /// Process exit status: `0` for `--help` and friends, `1` for a rejected
    /// command line or configuration, `2` for a failed stream.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Args(err) if !err.use_stderr() => 0,
            CliError::Args(_) | CliError::Config(_) => 1,
            CliError::Stream(err) => err.exit_code(),
        }
    }

    /// Prints the error where the user will see it. `clap` output goes
    /// through `clap`, since no subscriber is installed yet at that point.
    pub fn report(&self) {
        match self {
            CliError::Args(err) => {
                let _ = err.print();
            }
            other => tracing::error!("{other}"),
        }
    }
}

/// Installs the global `tracing` subscriber for a binary.
///
/// `RUST_LOG` wins when set; otherwise the level is `debug` with `verbose`
/// and `warn` without.
pub fn init_tracing(verbose: bool, diagnostics: Diagnostics) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let (writer, ansi) = match diagnostics {
        Diagnostics::Stderr => (BoxMakeWriter::new(io::stderr), io::stderr().is_terminal()),
        Diagnostics::Stdout => (BoxMakeWriter::new(io::stdout), io::stdout().is_terminal()),
    };
    // A second call (tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(ansi)
                .with_writer(writer),
        )
        .try_init();
}

/// Parses an integer the way C's `strtol(s, .., 0)` picks its radix: `0x`
/// for hexadecimal, a leading `0` for octal, decimal otherwise. Unlike
/// `strtol`, trailing garbage is rejected.
///
/// # Errors
///
/// A message suitable for a command-line error.
pub fn parse_signed(s: &str) -> Result<i64, String> {
    let t = s.trim();
    let (negative, digits) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };
    let magnitude = parse_radix(digits).ok_or_else(|| format!("`{s}` is not an integer"))?;
    let value = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i64::try_from(value).map_err(|_| format!("`{s}` is out of range"))
}

/// Unsigned counterpart of [`parse_signed`].
///
/// # Errors
///
/// A message suitable for a command-line error.
pub fn parse_unsigned(s: &str) -> Result<u64, String> {
    let t = s.trim();
    let digits = t.strip_prefix('+').unwrap_or(t);
    parse_radix(digits).ok_or_else(|| format!("`{s}` is not an unsigned integer"))
}

fn parse_byte_count(s: &str) -> Result<u64, String> {
    let value = parse_signed(s)?;
    u64::try_from(value).map_err(|_| "bytes to output can not be negative".to_string())
}

fn parse_radix(digits: &str) -> Option<u64> {
    let (radix, body) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };
    if body.is_empty() || body.starts_with(['+', '-']) {
        return None;
    }
    u64::from_str_radix(body, radix).ok()
}
