//! Report sink trait.

use crate::activity::OrgReport;

/// Consumes a finished organization report.
///
/// The sink receives a read-only view. It renders one row per roster member
/// for every repository, including members with no activity.
pub trait ReportSink {
    /// What a successful write produces (a file path, a row count, ...).
    type Output;
    /// The sink's own failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Render and emit one organization's report.
    fn write_report(&mut self, report: &OrgReport) -> Result<Self::Output, Self::Error>;
}
