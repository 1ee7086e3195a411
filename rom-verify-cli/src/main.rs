//! rom-verify CLI
//!
//! Checks a directory tree of zipped ROM dumps against a reference DAT and
//! writes the list of entries that are still missing.

mod cli_types;
mod error;
mod logging;
mod verify;

use clap::Parser;

use crate::cli_types::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);

    if let Err(e) = verify::run_verify(&cli) {
        log::error!("{e}");
        std::process::exit(e.exit_code());
    }
}
