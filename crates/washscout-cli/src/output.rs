//! Appending CSV writers for candidate and summary rows.
//!
//! Both files are opened in append mode; the header is written only when the
//! file is new or empty so repeated runs over row ranges build one table.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::Context;
use washscout_cascade::SiteReport;
use washscout_core::SiteSummary;

pub(crate) const CANDIDATES_FILE: &str = "competitor_analysis.csv";
pub(crate) const SUMMARY_FILE: &str = "competitor_summary.csv";

pub(crate) struct ReportWriter {
    candidates: csv::Writer<File>,
    summary: csv::Writer<File>,
    summary_path: PathBuf,
}

impl ReportWriter {
    pub(crate) fn open(dir: &Path, summary_slots: usize) -> anyhow::Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;

        let (candidates, _) = open_append(&dir.join(CANDIDATES_FILE))?;

        let summary_path = dir.join(SUMMARY_FILE);
        let (mut summary, summary_is_new) = open_append(&summary_path)?;
        if summary_is_new {
            summary.write_record(SiteSummary::header(summary_slots))?;
            summary.flush()?;
        }

        Ok(Self {
            candidates,
            summary,
            summary_path,
        })
    }

    /// Appends the report's rows and flushes both files, so an interrupted
    /// run keeps every completed site.
    pub(crate) fn write(&mut self, report: &SiteReport) -> anyhow::Result<()> {
        for record in &report.candidates {
            self.candidates.serialize(record)?;
        }
        self.candidates.flush()?;

        self.summary
            .write_record(report.summary.to_row())
            .with_context(|| format!("failed to append to {}", self.summary_path.display()))?;
        self.summary.flush()?;
        Ok(())
    }
}

/// Opens `path` for appending. Headers are enabled on the returned writer
/// only when the file did not already hold data.
fn open_append(path: &Path) -> anyhow::Result<(csv::Writer<File>, bool)> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let is_new = file.metadata()?.len() == 0;

    let writer = csv::WriterBuilder::new()
        .has_headers(is_new)
        .from_writer(file);
    Ok((writer, is_new))
}
