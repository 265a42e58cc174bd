//! `prand`: write a reproducible pseudo-random byte dump to standard output.

use std::{
    io::{self, BufWriter},
    process::ExitCode,
};

use clap::Parser;
use mashlf::{
    MashError,
    cli::{CliError, Diagnostics, PrandCli, init_tracing},
    prand,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.report();
            ExitCode::from(err.exit_code())
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = PrandCli::try_parse()?;
    init_tracing(cli.verbose, Diagnostics::Stderr);
    tracing::debug!(?cli, "command line");
    if cli.seed == 0 {
        tracing::warn!("seed value 0 is an alias for 1");
    }

    prand::emit(cli.seed, cli.bytes, BufWriter::new(io::stdout().lock()))
        .map_err(MashError::Write)?;
    Ok(())
}
