//! Pack and unpack operation reporting.

use std::path::PathBuf;
use std::time::Duration;

use crate::ArchiveError;

/// Report of a pack operation.
///
/// `entries` lists every archive name in the order it was written. Each
/// name appears once; inputs that map to an already used name are counted
/// in `entries_skipped` instead.
///
/// # Examples
///
/// ```
/// use pipezip_core::PackReport;
///
/// let mut report = PackReport::new();
/// report.entries.push("testData/a.txt".to_string());
/// report.files_added = 1;
/// report.bytes_read = 3;
///
/// assert_eq!(report.total_entries(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackReport {
    /// Archive names in write order.
    pub entries: Vec<String>,

    /// Number of file entries written.
    pub files_added: usize,

    /// Number of directory entries written.
    pub directories_added: usize,

    /// Total bytes read from source files (uncompressed).
    pub bytes_read: u64,

    /// Size of the finished archive in bytes, when known.
    pub archive_size: u64,

    /// Number of traversed paths that were not archived.
    pub entries_skipped: usize,

    /// Duration of the pack operation.
    pub duration: Duration,

    /// Warnings generated while packing.
    pub warnings: Vec<String>,
}

impl PackReport {
    /// Creates a new empty pack report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the number of entries written to the archive.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.entries.len()
    }

    /// Returns the space saved by compression, as a percentage.
    ///
    /// Returns 0.0 when nothing was read or the archive size is unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipezip_core::PackReport;
    ///
    /// let mut report = PackReport::new();
    /// report.bytes_read = 1000;
    /// report.archive_size = 250;
    /// assert_eq!(report.compression_percentage(), 75.0);
    /// ```
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_read == 0 || self.archive_size == 0 {
            return 0.0;
        }
        let ratio = self.archive_size as f64 / self.bytes_read as f64;
        ((1.0 - ratio) * 100.0).max(0.0)
    }
}

/// Report of an unpack operation.
///
/// Unpacking is best-effort: when an entry fails, processing stops and the
/// error is stored in `error` while `extracted` still lists everything
/// created before the failure.
#[derive(Debug, Default)]
pub struct UnpackReport {
    /// Filesystem paths created, in archive order.
    pub extracted: Vec<PathBuf>,

    /// Number of files written.
    pub files_extracted: usize,

    /// Number of directories created from directory entries.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the unpack operation.
    pub duration: Duration,

    /// Error that stopped extraction, if any.
    pub error: Option<ArchiveError>,
}

impl UnpackReport {
    /// Creates a new empty unpack report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns total number of paths created.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.extracted.len()
    }

    /// Returns `true` if every entry in the stream was extracted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Converts the report into a `Result`, failing if extraction stopped
    /// early.
    ///
    /// # Errors
    ///
    /// Returns the error that interrupted extraction.
    pub fn into_result(mut self) -> crate::Result<Self> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}
