//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use console::Term;
use console::style;
use pipezip_core::PackReport;
use pipezip_core::UnpackReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled_stderr(),
            term: Term::stderr(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn headline(&self, ok: bool, text: &str) {
        if self.use_colors {
            let mark = if ok {
                style("✓").green().bold()
            } else {
                style("✗").red().bold()
            };
            let _ = self.term.write_line(&format!("{mark} {text}"));
        } else {
            let _ = self.term.write_line(text);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_pack_result(&self, report: &PackReport) {
        if self.quiet {
            return;
        }

        self.headline(true, "Archive written to stdout");
        let _ = self.term.write_line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added)
        ));
        let _ = self.term.write_line(&format!(
            "  Directories:      {}",
            Self::format_number(report.directories_added)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_read)
        ));

        if report.archive_size > 0 {
            let _ = self.term.write_line(&format!(
                "  Archive size:     {}",
                Self::format_size(report.archive_size)
            ));
            let _ = self.term.write_line(&format!(
                "  Compression:      {:.1}%",
                report.compression_percentage()
            ));
        }

        if report.entries_skipped > 0 {
            let _ = self
                .term
                .write_line(&format!("  Entries skipped:  {}", report.entries_skipped));
        }

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", report.duration));
            for name in &report.entries {
                let _ = self.term.write_line(&format!("    {name}"));
            }
        }
    }

    fn format_unpack_result(&self, report: &UnpackReport) {
        if self.quiet || report.extracted.is_empty() {
            return;
        }

        if report.is_complete() {
            self.headline(true, "Extraction complete");
        } else {
            self.headline(false, "Extraction stopped early");
        }

        let _ = self
            .term
            .write_line(&format!("  Files extracted: {}", report.files_extracted));
        let _ = self
            .term
            .write_line(&format!("  Directories: {}", report.directories_created));
        let _ = self.term.write_line(&format!(
            "  Total size: {}",
            Self::format_size(report.bytes_written)
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
            for path in &report.extracted {
                let _ = self.term.write_line(&format!("    {}", path.display()));
            }
        }
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}
