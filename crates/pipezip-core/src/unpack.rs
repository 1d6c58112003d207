//! Streaming ZIP extraction.
//!
//! The archive is read front to back from a plain [`Read`], so it can come
//! from a pipe. Extraction is best-effort: entries are written as they
//! arrive, and the first failure stops the run without undoing earlier
//! entries. The failure is carried in the returned [`UnpackReport`].

use crate::ArchiveError;
use crate::ArchiveObserver;
use crate::Result;
use crate::UnpackConfig;
use crate::UnpackReport;
use crate::copy::CopyBuffer;
use crate::copy::CopyError;
use crate::copy::copy_chunked;
use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use zip::read::read_zipfile_from_stream;

/// Extracts the ZIP stream in `reader` under `output_dir`.
///
/// Entries whose name ends in `/` become directories; every other entry
/// becomes a file, with missing parent directories created first. Existing
/// files are overwritten.
///
/// This never returns an error directly. Everything extracted before a
/// failure stays on disk and is listed in [`UnpackReport::extracted`]; the
/// failure itself is in [`UnpackReport::error`].
///
/// # Examples
///
/// ```no_run
/// use pipezip_core::NoopObserver;
/// use pipezip_core::UnpackConfig;
/// use pipezip_core::unpack;
/// use std::path::Path;
///
/// let stdin = std::io::stdin().lock();
/// let report = unpack(stdin, Path::new("."), &UnpackConfig::default(), &mut NoopObserver);
/// for path in &report.extracted {
///     println!("{}", path.display());
/// }
/// if let Some(err) = &report.error {
///     eprintln!("stopped early: {err}");
/// }
/// ```
pub fn unpack<R: Read>(
    reader: R,
    output_dir: &Path,
    config: &UnpackConfig,
    observer: &mut dyn ArchiveObserver,
) -> UnpackReport {
    let start = Instant::now();
    let mut report = UnpackReport::new();

    if let Err(err) = unpack_entries(reader, output_dir, config, observer, &mut report) {
        log::debug!("extraction stopped after {} items: {err}", report.total_items());
        report.error = Some(err);
    }

    report.duration = start.elapsed();
    observer.on_complete();
    report
}

fn unpack_entries<R: Read>(
    mut reader: R,
    output_dir: &Path,
    config: &UnpackConfig,
    observer: &mut dyn ArchiveObserver,
    report: &mut UnpackReport,
) -> Result<()> {
    let mut buffer = CopyBuffer::new(config.chunk_size);
    let mut current = 0;

    // Local headers are read until the central directory is reached
    while let Some(mut entry) = read_zipfile_from_stream(&mut reader)? {
        current += 1;
        let name = entry.name().to_string();
        observer.on_entry_start(&name, current, None);

        let destination = destination_path(output_dir, &name, config.confine_paths)?;

        if is_directory_name(&name) {
            fs::create_dir_all(&destination)
                .map_err(|e| ArchiveError::destination(&destination, e))?;
            report.directories_created += 1;
        } else {
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent).map_err(|e| ArchiveError::destination(parent, e))?;
            }

            let file = File::create(&destination)
                .map_err(|e| ArchiveError::destination(&destination, e))?;
            let mut writer = BufWriter::new(file);

            let written =
                copy_chunked(&mut entry, &mut writer, &mut buffer, observer).map_err(|e| match e {
                    CopyError::Read(e) => ArchiveError::ContainerRead(e.to_string()),
                    CopyError::Write(e) => ArchiveError::destination(&destination, e),
                })?;
            writer
                .flush()
                .map_err(|e| ArchiveError::destination(&destination, e))?;

            report.files_extracted += 1;
            report.bytes_written += written;
        }

        report.extracted.push(destination);
        observer.on_entry_complete(&name);
    }

    Ok(())
}

/// Returns `true` for names that denote a directory entry.
fn is_directory_name(name: &str) -> bool {
    name.ends_with('/')
}

/// Resolves an entry name against `output_dir`.
///
/// With `confine` set, names that would land outside `output_dir` (absolute
/// paths, drive prefixes, any `..` component) are rejected.
fn destination_path(output_dir: &Path, name: &str, confine: bool) -> Result<PathBuf> {
    let relative = Path::new(name);

    if confine {
        let escapes = relative.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(ArchiveError::PathTraversal {
                name: name.to_string(),
            });
        }
    }

    Ok(output_dir.join(relative))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Allow unwrap in tests for brevity
mod tests {
    use super::*;
    use crate::NoopObserver;
    use std::io::Cursor;
    use tempfile::TempDir;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn build_zip(entries: &[(&str, Option<&[u8]>)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, content) in entries {
            match content {
                Some(data) => {
                    zip.start_file(*name, options).unwrap();
                    zip.write_all(data).unwrap();
                }
                None => zip.add_directory(*name, options).unwrap(),
            }
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_unpack_files_and_directories() {
        let data = build_zip(&[
            ("testData/a.txt", Some(b"abc".as_slice())),
            ("testData/sub/", None),
            ("testData/deep/nested/b.txt", Some(b"nested".as_slice())),
        ]);
        let temp = TempDir::new().unwrap();

        let report = unpack(
            Cursor::new(data),
            temp.path(),
            &UnpackConfig::default(),
            &mut NoopObserver,
        );

        assert!(report.is_complete());
        assert_eq!(report.files_extracted, 2);
        assert_eq!(report.directories_created, 1);
        assert_eq!(report.bytes_written, 9);
        assert_eq!(report.extracted.len(), 3);
        assert_eq!(
            fs::read_to_string(temp.path().join("testData/a.txt")).unwrap(),
            "abc"
        );
        assert!(temp.path().join("testData/sub").is_dir());
        assert_eq!(
            fs::read_to_string(temp.path().join("testData/deep/nested/b.txt")).unwrap(),
            "nested"
        );
    }

    #[test]
    fn test_unpack_overwrites_existing_file() {
        let data = build_zip(&[("file.txt", Some(b"new".as_slice()))]);
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("file.txt"), "old content").unwrap();

        let report = unpack(
            Cursor::new(data),
            temp.path(),
            &UnpackConfig::default(),
            &mut NoopObserver,
        );

        assert!(report.is_complete());
        assert_eq!(
            fs::read_to_string(temp.path().join("file.txt")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_unpack_empty_input_extracts_nothing() {
        let temp = TempDir::new().unwrap();

        let report = unpack(
            Cursor::new(Vec::new()),
            temp.path(),
            &UnpackConfig::default(),
            &mut NoopObserver,
        );

        assert!(report.extracted.is_empty());
    }

    #[test]
    fn test_unpack_garbage_input_extracts_nothing() {
        let temp = TempDir::new().unwrap();

        let report = unpack(
            Cursor::new(b"this is not a zip archive at all".to_vec()),
            temp.path(),
            &UnpackConfig::default(),
            &mut NoopObserver,
        );

        assert!(report.extracted.is_empty());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_unpack_truncated_keeps_earlier_entries() {
        let big = vec![b'x'; 64 * 1024];
        let data = build_zip(&[("first.txt", Some(b"first".as_slice())), ("second.bin", Some(big.as_slice()))]);
        // Cut inside the second entry's data
        let cut = data.len() - 32 * 1024;
        let temp = TempDir::new().unwrap();

        let report = unpack(
            Cursor::new(data[..cut].to_vec()),
            temp.path(),
            &UnpackConfig::default(),
            &mut NoopObserver,
        );

        assert!(!report.is_complete());
        assert_eq!(report.extracted, vec![temp.path().join("first.txt")]);
        assert_eq!(
            fs::read_to_string(temp.path().join("first.txt")).unwrap(),
            "first"
        );
    }

    #[test]
    fn test_unpack_rejects_parent_traversal() {
        let data = build_zip(&[("ok.txt", Some(b"ok".as_slice())), ("../escape.txt", Some(b"bad".as_slice()))]);
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        fs::create_dir(&out).unwrap();

        let report = unpack(
            Cursor::new(data),
            &out,
            &UnpackConfig::default(),
            &mut NoopObserver,
        );

        assert_eq!(report.extracted, vec![out.join("ok.txt")]);
        assert!(matches!(
            report.error,
            Some(ArchiveError::PathTraversal { .. })
        ));
        assert!(!temp.path().join("escape.txt").exists());
    }

    #[test]
    fn test_destination_path_confinement() {
        let out = Path::new("out");

        assert_eq!(
            destination_path(out, "a/b.txt", true).unwrap(),
            Path::new("out/a/b.txt")
        );
        assert!(destination_path(out, "../x", true).is_err());
        assert!(destination_path(out, "a/../../x", true).is_err());
        assert!(destination_path(out, "/etc/passwd", true).is_err());
        assert_eq!(
            destination_path(out, "../x", false).unwrap(),
            Path::new("out/../x")
        );
    }

    #[test]
    fn test_unpack_unconfined_allows_parent() {
        let data = build_zip(&[("../sibling.txt", Some(b"sibling".as_slice()))]);
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        fs::create_dir(&out).unwrap();

        let config = UnpackConfig::default().with_confine_paths(false);
        let report = unpack(Cursor::new(data), &out, &config, &mut NoopObserver);

        assert!(report.is_complete());
        assert_eq!(
            fs::read_to_string(temp.path().join("sibling.txt")).unwrap(),
            "sibling"
        );
    }

    #[test]
    fn test_unpack_reports_entries_without_total() {
        #[derive(Default)]
        struct Recorder {
            started: Vec<(String, usize, Option<usize>)>,
            bytes: u64,
        }

        impl ArchiveObserver for Recorder {
            fn on_entry_start(&mut self, name: &str, current: usize, total: Option<usize>) {
                self.started.push((name.to_string(), current, total));
            }

            fn on_bytes_written(&mut self, bytes: u64) {
                self.bytes += bytes;
            }

            fn on_entry_complete(&mut self, _name: &str) {}
        }

        let data = build_zip(&[("d/", None), ("d/f.txt", Some(b"12345".as_slice()))]);
        let temp = TempDir::new().unwrap();
        let mut recorder = Recorder::default();

        unpack(
            Cursor::new(data),
            temp.path(),
            &UnpackConfig::default(),
            &mut recorder,
        );

        assert_eq!(
            recorder.started,
            vec![("d/".to_string(), 1, None), ("d/f.txt".to_string(), 2, None)]
        );
        assert_eq!(recorder.bytes, 5);
    }
}
