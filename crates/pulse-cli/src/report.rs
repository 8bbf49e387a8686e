//! CSV report sink.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use tracing::debug;

use pulse_core::{Classifier, OrgReport, ReportSink};

/// Column headers, repeated under every repository heading.
const HEADER: [&str; 6] = ["Username", "Commits", "Issues", "PRs", "Last Activity", "Status"];

/// Writes one CSV file per organization.
///
/// Each repository gets a `Repository: <name>` line, the header, one row per
/// roster member in sorted order, and a blank separator line. Members with no
/// activity in a repository still get a row.
#[derive(Debug, Clone)]
pub struct CsvReportSink {
    dir: PathBuf,
    threshold_days: u32,
}

impl CsvReportSink {
    pub fn new(dir: impl Into<PathBuf>, threshold_days: u32) -> Self {
        Self {
            dir: dir.into(),
            threshold_days,
        }
    }

    /// `<org>_user_activity_<YYYYmmdd_HHMMSS>.csv` inside the output directory.
    fn file_path(&self, report: &OrgReport) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        self.dir
            .join(format!("{}_user_activity_{stamp}.csv", report.organization()))
    }
}

impl ReportSink for CsvReportSink {
    type Output = PathBuf;
    type Error = csv::Error;

    fn write_report(&mut self, report: &OrgReport) -> Result<PathBuf, csv::Error> {
        let path = self.file_path(report);
        let classifier = Classifier::from_now(self.threshold_days);
        let file = File::create(&path)?;
        write_rows(file, report, &classifier)?;
        debug!(path = %path.display(), "report written");
        Ok(path)
    }
}

/// Render `report` as CSV into `writer`, classifying against `classifier`.
pub fn write_rows<W: Write>(
    mut writer: W,
    report: &OrgReport,
    classifier: &Classifier,
) -> Result<(), csv::Error> {
    for (repo, activity) in report.repositories() {
        let mut out = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut writer);
        out.write_record([format!("Repository: {repo}")])?;
        out.write_record(HEADER)?;

        for login in report.roster().iter() {
            let summary = activity.summary_or_default(login.as_str());
            let last = summary.last_activity();
            out.write_record([
                login.to_string(),
                summary.commits.count.to_string(),
                summary.issues.count.to_string(),
                summary.prs.count.to_string(),
                last.map_or_else(|| "N/A".to_string(), |ts| ts.to_string()),
                classifier.classify(last).to_string(),
            ])?;
        }

        out.flush()?;
        drop(out);
        // An empty csv record renders as `""`, so the separator bypasses the writer.
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}
