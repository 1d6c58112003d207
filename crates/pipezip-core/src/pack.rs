//! ZIP archive creation.
//!
//! Inputs are traversed one after another, each with its own root (the
//! input's parent), and every traversed path becomes one archive entry.
//! Packing is all-or-nothing: the first failure aborts the operation.

use crate::ArchiveError;
use crate::ArchiveObserver;
use crate::NoopObserver;
use crate::PackConfig;
use crate::PackReport;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::CopyError;
use crate::copy::copy_chunked;
use crate::naming::archive_name;
use crate::naming::archive_root;
use crate::naming::normalize_path;
use crate::walker::FileEntry;
use crate::walker::list_entries;
use std::collections::HashMap;
use std::fs::File;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;

/// Buffer size used when copying a finished spool file to its sink.
const SPOOL_COPY_SIZE: usize = 64 * 1024;

/// Packs `sources` into a ZIP archive written to `writer`.
///
/// Each source is traversed with [`list_entries`]; entry names are relative
/// to that source's parent directory, so the source's own name is the first
/// component. Directories are stored as zero-length entries with a trailing
/// `/`, files are streamed in `config.chunk_size` chunks. When several
/// inputs map to the same name, only the last one is written and the
/// earlier ones are skipped with a warning.
///
/// The returned report lists every archive name in write order.
///
/// # Errors
///
/// Returns an error, and stops writing, if:
/// - A source path does not exist or cannot be read
/// - A directory cannot be traversed
/// - The writer fails
/// - The configuration is invalid
///
/// # Examples
///
/// ```no_run
/// use pipezip_core::NoopObserver;
/// use pipezip_core::PackConfig;
/// use pipezip_core::pack;
/// use std::fs::File;
/// use std::path::Path;
///
/// let mut output = File::create("output.zip")?;
/// let report = pack(
///     &[Path::new("testData")],
///     &mut output,
///     &PackConfig::default(),
///     &mut NoopObserver,
/// )?;
/// for name in &report.entries {
///     println!("added {name}");
/// }
/// # Ok::<(), pipezip_core::ArchiveError>(())
/// ```
pub fn pack<W: Write + Seek, P: AsRef<Path>>(
    sources: &[P],
    writer: W,
    config: &PackConfig,
    observer: &mut dyn ArchiveObserver,
) -> Result<PackReport> {
    config.validate()?;

    let start = Instant::now();
    let mut report = PackReport::new();
    let mut zip = ZipWriter::new(writer);
    let options = entry_options(config);

    // Single pass over the inputs so the observer knows the total up front
    let planned = plan_entries(sources, config)?;
    let total = planned.len();
    let mut buffer = CopyBuffer::new(config.chunk_size);
    // ZIP writers reject repeated names, so keep the last occurrence only
    let last_index: HashMap<String, usize> = planned
        .iter()
        .enumerate()
        .filter(|(_, (entry, _))| !entry.is_symlink)
        .filter_map(|(idx, (_, name))| name.clone().map(|name| (name, idx)))
        .collect();

    for (idx, (entry, name)) in planned.into_iter().enumerate() {
        let Some(name) = name else {
            let msg = format!("Skipped entry with empty name: {}", entry.path.display());
            skip_entry(&mut report, observer, msg);
            continue;
        };

        if entry.is_symlink {
            let msg = format!("Skipped symlink: {}", entry.path.display());
            skip_entry(&mut report, observer, msg);
            continue;
        }

        if last_index.get(&name) != Some(&idx) {
            let msg = format!(
                "Skipped duplicate entry: {name} ({} is replaced by a later input)",
                entry.path.display()
            );
            skip_entry(&mut report, observer, msg);
            continue;
        }

        observer.on_entry_start(&name, idx + 1, Some(total));

        if entry.is_dir {
            zip.add_directory(name.as_str(), options).map_err(sink_error)?;
            report.directories_added += 1;
        } else {
            let bytes = add_file(
                &mut zip,
                &entry.path,
                &name,
                config,
                options,
                &mut buffer,
                observer,
            )?;
            report.files_added += 1;
            report.bytes_read += bytes;
        }

        observer.on_entry_complete(&name);
        report.entries.push(name);
    }

    let mut writer = zip.finish().map_err(sink_error)?;
    writer.flush().map_err(ArchiveError::SinkUnwritable)?;
    report.archive_size = writer.stream_position().unwrap_or(0);
    report.duration = start.elapsed();

    log::debug!(
        "archive created: {} entries, {} bytes read",
        report.total_entries(),
        report.bytes_read
    );
    observer.on_complete();

    Ok(report)
}

/// Packs `sources` into a ZIP archive and copies it to a non-seekable sink.
///
/// The archive is built in an anonymous temporary file first, because the
/// ZIP writer needs to seek back and record entry sizes in local headers.
/// Nothing reaches `sink` unless packing succeeds.
///
/// # Errors
///
/// Same as [`pack`], plus failures creating the temporary file or writing
/// the finished archive to `sink`.
///
/// # Examples
///
/// ```no_run
/// use pipezip_core::NoopObserver;
/// use pipezip_core::PackConfig;
/// use pipezip_core::pack_to_stream;
/// use std::path::Path;
///
/// let stdout = std::io::stdout().lock();
/// pack_to_stream(&[Path::new("testData")], stdout, &PackConfig::default(), &mut NoopObserver)?;
/// # Ok::<(), pipezip_core::ArchiveError>(())
/// ```
pub fn pack_to_stream<W: Write, P: AsRef<Path>>(
    sources: &[P],
    mut sink: W,
    config: &PackConfig,
    observer: &mut dyn ArchiveObserver,
) -> Result<PackReport> {
    let mut spool = tempfile::tempfile()?;
    let mut report = pack(sources, &mut spool, config, observer)?;

    spool.rewind()?;
    let mut buffer = CopyBuffer::new(SPOOL_COPY_SIZE);
    let copied = copy_chunked(&mut spool, &mut sink, &mut buffer, &mut NoopObserver)
        .map_err(|e| match e {
            CopyError::Read(e) => ArchiveError::Io(e),
            CopyError::Write(e) => ArchiveError::SinkUnwritable(e),
        })?;
    sink.flush().map_err(ArchiveError::SinkUnwritable)?;

    report.archive_size = copied;
    Ok(report)
}

/// Traverses every source and pairs each entry with its archive name.
fn plan_entries<P: AsRef<Path>>(
    sources: &[P],
    config: &PackConfig,
) -> Result<Vec<(FileEntry, Option<String>)>> {
    let mut planned = Vec::new();

    for source in sources {
        let input = resolve_input(source.as_ref())?;
        let root = archive_root(&input);
        log::debug!("root of {} is {}", input.display(), root.display());

        for entry in list_entries(&input, config.follow_symlinks)? {
            let name = archive_name(&entry.path, &root, entry.is_dir)?;
            planned.push((entry, name));
        }
    }

    Ok(planned)
}

/// Gives nameless inputs such as `.` or `..` a name by resolving them.
fn resolve_input(input: &Path) -> Result<PathBuf> {
    if normalize_path(input).file_name().is_some() {
        return Ok(input.to_path_buf());
    }
    std::fs::canonicalize(input).map_err(|e| ArchiveError::source_unreadable(input, e))
}

fn entry_options(config: &PackConfig) -> SimpleFileOptions {
    match config.compression_level {
        Some(0) => SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
        level => SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(level.map(i64::from)),
    }
}

/// Streams one source file into a new archive entry.
fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    path: &Path,
    name: &str,
    config: &PackConfig,
    options: SimpleFileOptions,
    buffer: &mut CopyBuffer,
    observer: &mut dyn ArchiveObserver,
) -> Result<u64> {
    let mut file = File::open(path).map_err(|e| ArchiveError::source_unreadable(path, e))?;
    let metadata = file
        .metadata()
        .map_err(|e| ArchiveError::source_unreadable(path, e))?;

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut file_options = options.large_file(metadata.len() >= u64::from(u32::MAX));
    #[cfg(unix)]
    if config.preserve_permissions {
        use std::os::unix::fs::PermissionsExt;
        file_options = file_options.unix_permissions(metadata.permissions().mode());
    }
    #[cfg(not(unix))]
    let _ = config.preserve_permissions;

    zip.start_file(name, file_options).map_err(sink_error)?;

    copy_chunked(&mut file, zip, buffer, observer).map_err(|e| match e {
        CopyError::Read(e) => ArchiveError::source_unreadable(path, e),
        CopyError::Write(e) => ArchiveError::SinkUnwritable(e),
    })
}

fn skip_entry(report: &mut PackReport, observer: &mut dyn ArchiveObserver, msg: String) {
    observer.on_warning(&msg);
    report.add_warning(msg);
    report.entries_skipped += 1;
}

fn sink_error(err: ZipError) -> ArchiveError {
    match err {
        ZipError::Io(e) => ArchiveError::SinkUnwritable(e),
        other => ArchiveError::SinkUnwritable(std::io::Error::other(other.to_string())),
    }
}
