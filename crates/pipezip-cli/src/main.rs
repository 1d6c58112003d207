//! Pipezip CLI - packs paths into a ZIP archive on stdout, or unpacks a ZIP
//! archive from stdin.

mod cli;
mod commands;
mod error;
mod logger;
mod output;
mod progress;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    logger::init(cli.verbose, cli.quiet).context("failed to install logger")?;

    let formatter = output::create_formatter(cli.verbose, cli.quiet);

    if cli.is_unpack() {
        commands::unpack::execute(&cli, &*formatter)
    } else {
        commands::pack::execute(&cli, &*formatter)
    }
}
