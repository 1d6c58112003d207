//! Error conversion utilities for CLI.
//!
//! Converts pipezip-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use pipezip_core::ArchiveError;

/// Converts `ArchiveError` to user-friendly anyhow error with context
pub fn convert_archive_error(err: ArchiveError) -> anyhow::Error {
    match err {
        ArchiveError::SourceNotFound { path } => {
            anyhow!(
                "Cannot pack '{}': no such file or directory\n\
                 HINT: Check the path; arguments are taken relative to the current directory.",
                path.display()
            )
        }
        ArchiveError::SourceUnreadable { path, source } => {
            anyhow!(
                "Cannot read '{}': {}\n\
                 HINT: Check file permissions.",
                path.display(),
                source
            )
        }
        ArchiveError::Walk { path, reason } => {
            anyhow!(
                "Cannot traverse '{}': {}\n\
                 HINT: Use --no-follow-symlinks if the tree contains looping links.",
                path.display(),
                reason
            )
        }
        ArchiveError::SinkUnwritable(io_err) => {
            anyhow!(
                "Cannot write archive to stdout: {io_err}\n\
                 HINT: Redirect stdout to a file or pipe, e.g. `pipezip dir > dir.zip`."
            )
        }
        ArchiveError::ContainerRead(reason) => {
            anyhow!(
                "Invalid archive on stdin: {reason}\n\
                 HINT: The archive may be truncated or not a ZIP file."
            )
        }
        ArchiveError::DestinationUnwritable { path, source } => {
            anyhow!(
                "Cannot write '{}': {}\n\
                 HINT: Check permissions of the extraction directory.",
                path.display(),
                source
            )
        }
        ArchiveError::PathTraversal { name } => {
            anyhow!(
                "Security violation: archive entry '{name}' points outside the extraction directory\n\
                 HINT: This archive may be malicious. Do not extract from untrusted sources."
            )
        }
        ArchiveError::InvalidEntryName { path } => {
            anyhow!(
                "Cannot pack '{}': path is not valid UTF-8\n\
                 HINT: Rename the file or leave it out of the inputs.",
                path.display()
            )
        }
        other => anyhow::Error::from(other),
    }
}
