//! zxp - export ZX Spectrum attribute graphics projects

use std::process::ExitCode;

use clap::Parser;
use zxpaint::cli::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG still wins over -v.
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    cli::run(cli)
}
