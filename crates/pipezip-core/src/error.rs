//! Error types for pack and unpack operations.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while packing or unpacking an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A pack input path does not exist.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The missing source path.
        path: PathBuf,
    },

    /// A pack input path exists but cannot be opened or read.
    #[error("cannot read source {path}: {source}")]
    SourceUnreadable {
        /// The unreadable source path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The output sink rejected a write.
    #[error("cannot write archive: {0}")]
    SinkUnwritable(std::io::Error),

    /// The archive stream is malformed or truncated.
    #[error("invalid archive: {0}")]
    ContainerRead(String),

    /// A directory or file could not be created during extraction.
    #[error("cannot write {path}: {source}")]
    DestinationUnwritable {
        /// The destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An entry name would resolve outside the output directory.
    #[error("path traversal detected: {name}")]
    PathTraversal {
        /// The offending entry name as stored in the archive.
        name: String,
    },

    /// Directory traversal failed (permissions, filesystem loop).
    #[error("cannot traverse {path}: {reason}")]
    Walk {
        /// Path being traversed when the failure occurred.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// An entry path cannot be represented as an archive name.
    #[error("path is not valid UTF-8: {path}")]
    InvalidEntryName {
        /// The offending filesystem path.
        path: PathBuf,
    },

    /// Compression level outside the supported range.
    #[error("invalid compression level {level}: must be 0-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },
}

impl ArchiveError {
    /// Returns `true` if the error was caused by a pack input.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipezip_core::ArchiveError;
    /// use std::path::PathBuf;
    ///
    /// let err = ArchiveError::SourceNotFound {
    ///     path: PathBuf::from("missing.txt"),
    /// };
    /// assert!(err.is_source_error());
    ///
    /// let err = ArchiveError::ContainerRead("truncated".to_string());
    /// assert!(!err.is_source_error());
    /// ```
    #[must_use]
    pub const fn is_source_error(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. } | Self::SourceUnreadable { .. } | Self::Walk { .. }
        )
    }

    /// Returns `true` if the archive stream itself could not be decoded.
    #[must_use]
    pub const fn is_container_error(&self) -> bool {
        matches!(self, Self::ContainerRead(_))
    }

    /// Returns the filesystem path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::SourceNotFound { path }
            | Self::SourceUnreadable { path, .. }
            | Self::DestinationUnwritable { path, .. }
            | Self::Walk { path, .. }
            | Self::InvalidEntryName { path } => Some(path),
            _ => None,
        }
    }

    pub(crate) fn source_unreadable(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::SourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::SourceUnreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub(crate) fn destination(path: &Path, source: std::io::Error) -> Self {
        Self::DestinationUnwritable {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Zip errors only arise while decoding an incoming archive; write-side
/// failures are mapped to [`ArchiveError::SinkUnwritable`] at the call site.
impl From<zip::result::ZipError> for ArchiveError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::ContainerRead(err.to_string())
    }
}
