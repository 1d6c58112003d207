//! Stderr backend for the `log` facade.
//!
//! stdout may carry archive bytes, so every log line goes to stderr.

use console::Term;
use console::style;
use log::Level;
use log::LevelFilter;
use log::Log;
use log::Metadata;
use log::Record;

struct StderrLogger {
    level: LevelFilter,
    use_colors: bool,
    term: Term,
}

impl StderrLogger {
    fn label(&self, level: Level) -> String {
        let text = match level {
            Level::Error => "ERROR:",
            Level::Warn => "WARNING:",
            Level::Info => "INFO:",
            Level::Debug => "DEBUG:",
            Level::Trace => "TRACE:",
        };

        if !self.use_colors {
            return text.to_string();
        }

        let styled = match level {
            Level::Error => style(text).red().bold(),
            Level::Warn => style(text).yellow().bold(),
            Level::Info => style(text).green(),
            Level::Debug | Level::Trace => style(text).dim(),
        };
        styled.to_string()
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let _ = self
            .term
            .write_line(&format!("{} {}", self.label(record.level()), record.args()));
    }

    fn flush(&self) {
        let _ = self.term.flush();
    }
}

/// Maps the verbosity flags to a log level.
pub fn level_for(verbose: bool, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Installs the stderr logger as the global `log` backend.
pub fn init(verbose: bool, quiet: bool) -> Result<(), log::SetLoggerError> {
    let level = level_for(verbose, quiet);
    log::set_boxed_logger(Box::new(StderrLogger {
        level,
        use_colors: console::colors_enabled_stderr(),
        term: Term::stderr(),
    }))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_flags() {
        assert_eq!(level_for(false, false), LevelFilter::Warn);
        assert_eq!(level_for(true, false), LevelFilter::Debug);
        assert_eq!(level_for(false, true), LevelFilter::Error);
    }

    #[test]
    fn test_plain_labels() {
        let logger = StderrLogger {
            level: LevelFilter::Trace,
            use_colors: false,
            term: Term::stderr(),
        };
        assert_eq!(logger.label(Level::Warn), "WARNING:");
        assert_eq!(logger.label(Level::Error), "ERROR:");
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = StderrLogger {
            level: LevelFilter::Warn,
            use_colors: false,
            term: Term::stderr(),
        };
        let warn = Metadata::builder().level(Level::Warn).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&debug));
    }
}
