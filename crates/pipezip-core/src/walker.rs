//! Directory tree traversal for packing.
//!
//! [`list_entries`] flattens an input path into the sequence of paths that
//! end up in the archive: every non-directory, plus every directory that has
//! no children (so it can be recreated on extraction). Non-empty directories
//! are implied by their contents and are not listed themselves.
//!
//! Children are visited in the order the filesystem lists them. No sorting
//! is applied.

use crate::ArchiveError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// A path produced by traversal, flagged as directory or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Filesystem path of the entry.
    pub path: PathBuf,

    /// `true` for an empty directory that must be archived explicitly.
    pub is_dir: bool,

    /// `true` when the entry is a symlink that was not followed.
    pub is_symlink: bool,
}

impl FileEntry {
    /// Creates a non-directory entry.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
            is_symlink: false,
        }
    }

    /// Creates a directory entry.
    #[must_use]
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: true,
            is_symlink: false,
        }
    }
}

/// Lists every entry under `path` in traversal order.
///
/// - A path that does not exist, or is not a directory, yields `[path]`.
///   Opening a missing path fails later, when its contents are read.
/// - An empty directory yields itself.
/// - Otherwise each child is visited in listing order: non-directories are
///   appended, directories contribute their own traversal.
///
/// Traversal is iterative (`walkdir` keeps its own stack), so deep trees do
/// not grow the call stack. When `follow_symlinks` is set, a symlink that
/// leads back to one of its ancestors is reported as an error.
///
/// # Errors
///
/// Returns `ArchiveError::Walk` if a directory cannot be read or a
/// filesystem loop is found.
///
/// # Examples
///
/// ```no_run
/// use pipezip_core::walker::list_entries;
/// use std::path::Path;
///
/// for entry in list_entries(Path::new("testData"), true)? {
///     println!("{} (dir: {})", entry.path.display(), entry.is_dir);
/// }
/// # Ok::<(), pipezip_core::ArchiveError>(())
/// ```
pub fn list_entries(path: &Path, follow_symlinks: bool) -> Result<Vec<FileEntry>> {
    let is_dir = if follow_symlinks {
        path.is_dir()
    } else {
        std::fs::symlink_metadata(path).is_ok_and(|m| m.is_dir())
    };

    if !is_dir {
        let mut entry = FileEntry::file(path);
        entry.is_symlink = !follow_symlinks && path.is_symlink();
        return Ok(vec![entry]);
    }

    let mut entries = Vec::new();
    // Directory seen last, waiting to learn whether it has children
    let mut pending_dir: Option<(PathBuf, usize)> = None;

    for item in WalkDir::new(path).follow_links(follow_symlinks) {
        let item = item.map_err(|e| walk_error(path, &e))?;
        let depth = item.depth();

        if let Some((dir, dir_depth)) = pending_dir.take()
            && depth <= dir_depth
        {
            entries.push(FileEntry::directory(dir));
        }

        if item.file_type().is_dir() {
            pending_dir = Some((item.into_path(), depth));
        } else {
            let is_symlink = item.path_is_symlink() && !follow_symlinks;
            entries.push(FileEntry {
                path: item.into_path(),
                is_dir: false,
                is_symlink,
            });
        }
    }

    if let Some((dir, _)) = pending_dir {
        entries.push(FileEntry::directory(dir));
    }

    Ok(entries)
}

fn walk_error(root: &Path, err: &walkdir::Error) -> ArchiveError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let reason = if let Some(ancestor) = err.loop_ancestor() {
        format!("filesystem loop back to {}", ancestor.display())
    } else if let Some(io) = err.io_error() {
        io.to_string()
    } else {
        err.to_string()
    };
    ArchiveError::Walk { path, reason }
}
