//! Progress display for CLI operations.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressDrawTarget;
use indicatif::ProgressStyle;
use pipezip_core::ArchiveObserver;
use std::time::Duration;

/// CLI progress indicator implementing `ArchiveObserver`.
///
/// Starts as a spinner and turns into a bar once the total number of
/// entries is known. Always draws to stderr. Automatically cleans up on
/// drop.
pub struct CliProgress {
    bar: ProgressBar,
    bytes_written: u64,
    has_length: bool,
}

impl CliProgress {
    /// Creates a new progress indicator.
    ///
    /// # Arguments
    ///
    /// * `message` - Message to display (e.g., "Packing", "Unpacking")
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self::with_target(message, ProgressDrawTarget::stderr())
    }

    fn with_target(message: &str, target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(None, target);

        // Template: "⠙ Unpacking 42 entries (15.2 MB) testData/readme.txt"
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {prefix} {pos} entries ({msg})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_prefix(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self {
            bar,
            bytes_written: 0,
            has_length: false,
        }
    }

    /// Checks if we should show progress (TTY detection on stderr).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }

    fn switch_to_bar(&mut self, total: usize) {
        self.bar.set_length(total as u64);
        // Template: "Packing [████████░░░░] 42/100 entries (15.2 MB)"
        self.bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix} [{bar:40.cyan/blue}] {pos}/{len} entries ({msg})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        self.has_length = true;
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ArchiveObserver for CliProgress {
    fn on_entry_start(&mut self, _name: &str, _current: usize, total: Option<usize>) {
        if let Some(total) = total
            && !self.has_length
        {
            self.switch_to_bar(total);
        }
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
        self.bar.set_message(humanize_bytes(self.bytes_written));
    }

    fn on_entry_complete(&mut self, _name: &str) {
        self.bar.inc(1);
    }

    fn on_warning(&mut self, message: &str) {
        self.bar.suspend(|| log::warn!("{message}"));
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Converts bytes to human-readable format (KB, MB, GB, TB).
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
