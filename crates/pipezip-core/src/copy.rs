//! Chunked stream copy shared by pack and unpack.
//!
//! Both directions move bytes through a single reusable buffer so a file is
//! never held in memory whole, and every chunk is reported to the observer.

use std::io::Read;
use std::io::Write;
use std::io;

use crate::ArchiveObserver;

/// Reusable heap buffer for chunked copies.
///
/// # Examples
///
/// ```
/// use pipezip_core::copy::CopyBuffer;
///
/// let buffer = CopyBuffer::new(2048);
/// assert_eq!(buffer.size(), 2048);
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Vec<u8>,
}

impl CopyBuffer {
    /// Creates a buffer of `size` bytes (at least one).
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            buf: vec![0u8; size.max(1)],
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

/// Where a failed chunk copy went wrong.
#[derive(Debug)]
pub enum CopyError {
    /// Reading from the source failed.
    Read(io::Error),
    /// Writing to the destination failed.
    Write(io::Error),
}

/// Copies `reader` into `writer` one chunk at a time.
///
/// Returns the number of bytes copied. Read and write failures are kept
/// apart so callers can blame the right side.
///
/// # Errors
///
/// Returns `CopyError::Read` or `CopyError::Write` on the first failure.
///
/// # Examples
///
/// ```
/// use pipezip_core::NoopObserver;
/// use pipezip_core::copy::CopyBuffer;
/// use pipezip_core::copy::copy_chunked;
/// use std::io::Cursor;
///
/// let mut buffer = CopyBuffer::new(4);
/// let mut input = Cursor::new(b"hello world".to_vec());
/// let mut output = Vec::new();
///
/// let copied = copy_chunked(&mut input, &mut output, &mut buffer, &mut NoopObserver).unwrap();
/// assert_eq!(copied, 11);
/// assert_eq!(output, b"hello world");
/// ```
pub fn copy_chunked<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
    observer: &mut dyn ArchiveObserver,
) -> Result<u64, CopyError> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Read(e)),
        };

        writer
            .write_all(&buffer.buf[..bytes_read])
            .map_err(CopyError::Write)?;

        total += bytes_read as u64;
        observer.on_bytes_written(bytes_read as u64);
    }

    Ok(total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::NoopObserver;
    use std::io::Cursor;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct ChunkRecorder {
        chunks: Vec<u64>,
    }

    impl ArchiveObserver for ChunkRecorder {
        fn on_entry_start(&mut self, _name: &str, _current: usize, _total: Option<usize>) {}

        fn on_bytes_written(&mut self, bytes: u64) {
            self.chunks.push(bytes);
        }

        fn on_entry_complete(&mut self, _name: &str) {}
    }

    #[test]
    fn test_copy_buffer_minimum_size() {
        assert_eq!(CopyBuffer::new(0).size(), 1);
    }

    #[test]
    fn test_copy_empty_source() {
        let mut buffer = CopyBuffer::new(2048);
        let mut input = Cursor::new(Vec::<u8>::new());
        let mut output = Vec::new();

        let copied = copy_chunked(&mut input, &mut output, &mut buffer, &mut NoopObserver).unwrap();
        assert_eq!(copied, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_copy_reports_each_chunk() {
        let mut buffer = CopyBuffer::new(2048);
        let data = vec![7u8; 5000];
        let mut input = Cursor::new(&data);
        let mut output = Vec::new();
        let mut recorder = ChunkRecorder::default();

        let copied = copy_chunked(&mut input, &mut output, &mut buffer, &mut recorder).unwrap();

        assert_eq!(copied, 5000);
        assert_eq!(output, data);
        assert_eq!(recorder.chunks, vec![2048, 2048, 904]);
    }

    #[test]
    fn test_copy_read_error() {
        let mut buffer = CopyBuffer::new(16);
        let mut output = Vec::new();
        let result = copy_chunked(&mut FailingReader, &mut output, &mut buffer, &mut NoopObserver);
        assert!(matches!(result, Err(CopyError::Read(_))));
    }

    #[test]
    fn test_copy_write_error() {
        let mut buffer = CopyBuffer::new(16);
        let mut input = Cursor::new(b"payload".to_vec());
        let result = copy_chunked(&mut input, &mut FailingWriter, &mut buffer, &mut NoopObserver);
        assert!(matches!(result, Err(CopyError::Write(_))));
    }
}
