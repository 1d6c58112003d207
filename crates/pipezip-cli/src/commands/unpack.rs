//! Unpack command implementation.

use crate::cli::Cli;
use crate::error::convert_archive_error;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use pipezip_core::LogObserver;
use pipezip_core::UnpackConfig;
use pipezip_core::unpack;
use std::env;
use std::io;

/// Shown whenever a run extracts nothing, including an empty archive.
pub const NOTHING_EXTRACTED: &str = "Invalid input params: enter path to files";

pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let output_dir = match &cli.directory {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };
    log::debug!("unpacking stdin into {}", output_dir.display());

    let config = UnpackConfig::default();
    let stdin = io::stdin().lock();

    let report = if !cli.quiet && CliProgress::should_show() {
        let mut progress = CliProgress::new("Unpacking");
        unpack(stdin, &output_dir, &config, &mut progress)
    } else {
        let mut observer = LogObserver::new();
        unpack(stdin, &output_dir, &config, &mut observer)
    };

    formatter.format_unpack_result(&report);

    if report.extracted.is_empty() {
        formatter.format_error(&anyhow!(NOTHING_EXTRACTED));
    }

    report.into_result().map_err(convert_archive_error)?;

    Ok(())
}
