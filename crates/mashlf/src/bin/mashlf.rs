//! `mashlf`: re-wrap standard input into lines of random length.

use std::{
    io::{self, BufWriter},
    process::ExitCode,
};

use clap::Parser;
use mashlf::{
    cli::{CliError, MashlfCli, init_tracing},
    mash,
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
    let cli = MashlfCli::try_parse()?;
    init_tracing(cli.verbose, cli.diagnostics());
    tracing::debug!(?cli, "command line");

    mash(cli.options(), io::stdin().lock(), BufWriter::new(io::stdout().lock()))?;
    Ok(())
}
