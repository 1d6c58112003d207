//! Observer hooks for pack and unpack progress.
//!
//! The core never prints. Every event a caller might want to display or log
//! goes through an [`ArchiveObserver`] passed into the operation.

/// Callback trait for progress reporting during pack and unpack.
///
/// # Examples
///
/// ```
/// use pipezip_core::ArchiveObserver;
///
/// struct Counter {
///     entries: usize,
/// }
///
/// impl ArchiveObserver for Counter {
///     fn on_entry_start(&mut self, _name: &str, _current: usize, _total: Option<usize>) {
///         self.entries += 1;
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _name: &str) {}
/// }
/// ```
pub trait ArchiveObserver {
    /// Called before an entry is written to the archive or to disk.
    ///
    /// # Arguments
    ///
    /// * `name` - Archive name of the entry
    /// * `current` - Current entry number (1-indexed)
    /// * `total` - Total number of entries, when known up front
    fn on_entry_start(&mut self, name: &str, current: usize, total: Option<usize>);

    /// Called for every chunk copied into the archive or onto disk.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called after an entry has been fully processed.
    fn on_entry_complete(&mut self, name: &str);

    /// Called when a path is skipped or something unexpected but
    /// non-fatal happens.
    fn on_warning(&mut self, _message: &str) {}

    /// Called once after the last entry has been processed.
    fn on_complete(&mut self) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl ArchiveObserver for NoopObserver {
    fn on_entry_start(&mut self, _name: &str, _current: usize, _total: Option<usize>) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _name: &str) {}
}

/// Observer that forwards events to the `log` facade.
///
/// Entry events are logged at `debug`, warnings at `warn`.
#[derive(Debug, Default)]
pub struct LogObserver {
    bytes: u64,
}

impl LogObserver {
    /// Creates a new logging observer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of bytes reported so far.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl ArchiveObserver for LogObserver {
    fn on_entry_start(&mut self, name: &str, current: usize, total: Option<usize>) {
        match total {
            Some(total) => log::debug!("[{current}/{total}] {name}"),
            None => log::debug!("[{current}] {name}"),
        }
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes += bytes;
    }

    fn on_entry_complete(&mut self, name: &str) {
        log::trace!("done: {name}");
    }

    fn on_warning(&mut self, message: &str) {
        log::warn!("{message}");
    }

    fn on_complete(&mut self) {
        log::debug!("processed {} bytes", self.bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_observer_accepts_all_events() {
        let mut observer = NoopObserver;
        observer.on_entry_start("a.txt", 1, Some(1));
        observer.on_bytes_written(10);
        observer.on_entry_complete("a.txt");
        observer.on_warning("ignored");
        observer.on_complete();
    }

    #[test]
    fn test_log_observer_counts_bytes() {
        let mut observer = LogObserver::new();
        observer.on_entry_start("a.txt", 1, None);
        observer.on_bytes_written(2048);
        observer.on_bytes_written(12);
        observer.on_entry_complete("a.txt");
        observer.on_complete();
        assert_eq!(observer.bytes_written(), 2060);
    }
}
