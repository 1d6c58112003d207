//! Archive entry naming.
//!
//! Entry names are computed per input: each input's root is its own
//! normalized parent directory, so packing `a/b` and `c/d` together yields
//! names starting with `b/` and `d/`.

use crate::ArchiveError;
use crate::Result;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Lexically normalizes a path.
///
/// Removes `.` components and folds `name/..` pairs. Leading `..`
/// components that cannot be folded are kept. The filesystem is never
/// touched, so symlinks are not resolved.
///
/// # Examples
///
/// ```
/// use pipezip_core::naming::normalize_path;
/// use std::path::Path;
///
/// assert_eq!(normalize_path(Path::new("./a/./b/../c")), Path::new("a/c"));
/// assert_eq!(normalize_path(Path::new("../x")), Path::new("../x"));
/// ```
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                // `/..` is still `/`
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}

/// Returns the root that entry names for `input` are made relative to.
///
/// This is the normalized parent of `input`. An input without a parent
/// (such as `/`) uses itself. Inputs like `.` or `..` have no name of their
/// own; callers resolve them to an absolute path first.
///
/// # Examples
///
/// ```
/// use pipezip_core::naming::archive_root;
/// use std::path::Path;
///
/// assert_eq!(archive_root(Path::new("./_test/testData/")), Path::new("_test"));
/// assert_eq!(archive_root(Path::new("file.txt")), Path::new(""));
/// ```
#[must_use]
pub fn archive_root(input: &Path) -> PathBuf {
    let normalized = normalize_path(input);
    match normalized.parent() {
        Some(parent) => parent.to_path_buf(),
        None => normalized,
    }
}

/// Computes the archive name of `path` relative to `root`.
///
/// The result always uses `/` separators. Root and drive-prefix components
/// are dropped, `..` components that survive normalization are kept.
/// Directories get a trailing `/`.
///
/// Returns `Ok(None)` when the relative name is empty, which happens when
/// the entry is the root itself.
///
/// # Errors
///
/// Returns `ArchiveError::InvalidEntryName` if a component is not valid
/// UTF-8.
///
/// # Examples
///
/// ```
/// use pipezip_core::naming::archive_name;
/// use std::path::Path;
///
/// let name = archive_name(Path::new("_test/testData/a.txt"), Path::new("_test"), false)?;
/// assert_eq!(name.as_deref(), Some("testData/a.txt"));
///
/// let name = archive_name(Path::new("_test/testData/sub"), Path::new("_test"), true)?;
/// assert_eq!(name.as_deref(), Some("testData/sub/"));
/// # Ok::<(), pipezip_core::ArchiveError>(())
/// ```
pub fn archive_name(path: &Path, root: &Path, is_dir: bool) -> Result<Option<String>> {
    let normalized = normalize_path(path);
    let root = normalize_path(root);
    let relative = relativize(&normalized, &root);

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| ArchiveError::InvalidEntryName {
                    path: path.to_path_buf(),
                })?;
                parts.push(part);
            }
            Component::ParentDir => parts.push(".."),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    if parts.is_empty() {
        return Ok(None);
    }

    let mut name = parts.join("/");
    if is_dir {
        name.push('/');
    }
    Ok(Some(name))
}

/// Makes `path` relative to `root`, climbing with `..` where they diverge.
fn relativize(path: &Path, root: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix(root) {
        return stripped.to_path_buf();
    }

    let path_parts: Vec<_> = path.components().collect();
    let root_parts: Vec<_> = root.components().collect();
    let common = path_parts
        .iter()
        .zip(&root_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..root_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }
    relative
}
