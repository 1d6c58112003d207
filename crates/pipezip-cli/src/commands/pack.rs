//! Pack command implementation.

use crate::cli::Cli;
use crate::error::convert_archive_error;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use pipezip_core::LogObserver;
use pipezip_core::PackConfig;
use pipezip_core::pack_to_stream;
use std::io;

pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let sources = cli.trimmed_paths();
    log::debug!("packing {} input(s)", sources.len());

    let config = PackConfig::default()
        .with_compression_level(cli.compression_level)
        .with_follow_symlinks(!cli.no_follow_symlinks);

    let stdout = io::stdout().lock();

    // Use progress bar if stderr is a terminal and output is not suppressed
    let result = if !cli.quiet && CliProgress::should_show() {
        let mut progress = CliProgress::new("Packing");
        pack_to_stream(&sources, stdout, &config, &mut progress)
    } else {
        let mut observer = LogObserver::new();
        pack_to_stream(&sources, stdout, &config, &mut observer)
    };

    let report = result.map_err(convert_archive_error)?;
    formatter.format_pack_result(&report);

    Ok(())
}
