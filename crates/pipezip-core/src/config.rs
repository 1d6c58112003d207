//! Configuration for pack and unpack operations.

use crate::ArchiveError;
use crate::Result;

/// Reference chunk size for streaming file contents (2 KB).
pub const DEFAULT_CHUNK_SIZE: usize = 2048;

/// Configuration for packing paths into an archive.
///
/// # Examples
///
/// ```
/// use pipezip_core::PackConfig;
///
/// // Deflate at level 6, symlinks followed
/// let config = PackConfig::default();
///
/// // Store entries without compression
/// let stored = PackConfig::default().with_compression_level(0);
/// assert_eq!(stored.compression_level, Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct PackConfig {
    /// Compression level (0-9).
    ///
    /// `Some(0)` stores entries uncompressed, `1-9` deflates, `None` uses
    /// the deflate default.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,

    /// Size of the buffer used to stream each source file.
    ///
    /// Default: 2048 bytes.
    pub chunk_size: usize,

    /// Follow symbolic links while traversing inputs.
    ///
    /// When `false`, symlinks are skipped with a warning.
    ///
    /// Default: `true`.
    pub follow_symlinks: bool,

    /// Record Unix permission bits of source files in the archive.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            compression_level: Some(6),
            chunk_size: DEFAULT_CHUNK_SIZE,
            follow_symlinks: true,
            preserve_permissions: true,
        }
    }
}

impl PackConfig {
    /// Creates a new `PackConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level.
    ///
    /// # Panics
    ///
    /// Panics if the level is greater than 9.
    /// Use `validate()` for non-panicking validation.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        assert!(level <= 9, "compression level must be 0-9");
        self.compression_level = Some(level);
        self
    }

    /// Sets the chunk size used when streaming files.
    ///
    /// A size of zero is clamped to one byte.
    #[must_use]
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    /// Sets whether to follow symlinks.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Sets whether to record permissions.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is set above 9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && level > 9
        {
            return Err(ArchiveError::InvalidCompressionLevel { level });
        }
        Ok(())
    }
}

/// Configuration for unpacking an archive stream.
///
/// # Examples
///
/// ```
/// use pipezip_core::UnpackConfig;
///
/// let config = UnpackConfig::default();
/// assert!(config.confine_paths);
/// ```
#[derive(Debug, Clone)]
pub struct UnpackConfig {
    /// Size of the buffer used to stream each entry to disk.
    ///
    /// Default: 2048 bytes.
    pub chunk_size: usize,

    /// Reject entry names that would resolve outside the output directory.
    ///
    /// Default: `true`.
    pub confine_paths: bool,
}

impl Default for UnpackConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            confine_paths: true,
        }
    }
}

impl UnpackConfig {
    /// Creates a new `UnpackConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chunk size used when writing entries.
    #[must_use]
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    /// Sets whether entry names are confined to the output directory.
    ///
    /// Disabling confinement lets `..` and absolute entry names write
    /// anywhere the process can. Only use it for trusted archives.
    #[must_use]
    pub fn with_confine_paths(mut self, confine: bool) -> Self {
        self.confine_paths = confine;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_config_defaults() {
        let config = PackConfig::default();
        assert_eq!(config.compression_level, Some(6));
        assert_eq!(config.chunk_size, 2048);
        assert!(config.follow_symlinks);
        assert!(config.preserve_permissions);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pack_config_builder() {
        let config = PackConfig::new()
            .with_compression_level(0)
            .with_chunk_size(16)
            .with_follow_symlinks(false)
            .with_preserve_permissions(false);

        assert_eq!(config.compression_level, Some(0));
        assert_eq!(config.chunk_size, 16);
        assert!(!config.follow_symlinks);
        assert!(!config.preserve_permissions);
    }

    #[test]
    fn test_chunk_size_clamped() {
        assert_eq!(PackConfig::new().with_chunk_size(0).chunk_size, 1);
        assert_eq!(UnpackConfig::new().with_chunk_size(0).chunk_size, 1);
    }

    #[test]
    #[should_panic(expected = "compression level must be 0-9")]
    fn test_with_compression_level_panics() {
        let _ = PackConfig::new().with_compression_level(10);
    }

    #[test]
    fn test_validate_rejects_out_of_range_level() {
        let config = PackConfig {
            compression_level: Some(42),
            ..PackConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::InvalidCompressionLevel { level: 42 }
        ));
    }

    #[test]
    fn test_unpack_config_builder() {
        let config = UnpackConfig::new()
            .with_chunk_size(512)
            .with_confine_paths(false);
        assert_eq!(config.chunk_size, 512);
        assert!(!config.confine_paths);
    }
}
