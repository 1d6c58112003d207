//! Output formatter trait for CLI results.

use pipezip_core::PackReport;
use pipezip_core::UnpackReport;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format pack result
    fn format_pack_result(&self, report: &PackReport);

    /// Format unpack result
    fn format_unpack_result(&self, report: &UnpackReport);

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);
}
