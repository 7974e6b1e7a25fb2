// src/report.rs
// =============================================================================
// This module defines the audit report and where it ends up.
//
// Pieces:
// - RowRecord: one line of the results table (page, kind, url, status)
// - Report: every page, every row, plus the { total, broken, ok } summary
// - ReportSink: somewhere to persist the report (JSON file, debug log)
//
// Saving is best-effort. save_report() never fails: a sink error is logged
// as a warning and the audit result stays what it was.
// =============================================================================

use crate::checker::{CheckStatus, RefKind};
use crate::config::AuditMode;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

// The "kind" column of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// A reference found on the page
    Reference(RefKind),
    /// The repaired version of a broken image reference
    Fixed(RefKind),
    /// The page itself could not be fetched or processed
    Page,
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKind::Reference(kind) => write!(f, "{}", kind),
            RowKind::Fixed(kind) => write!(f, "{} (FIXED)", kind),
            RowKind::Page => write!(f, "PAGE"),
        }
    }
}

impl Serialize for RowKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// One line of the results table. Never modified once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowRecord {
    pub page: String,
    pub kind: RowKind,
    pub url: String,
    pub status: CheckStatus,
}

impl RowRecord {
    // The synthetic row recorded when a page can't be fetched or processed
    pub fn broken_page(page: &str) -> Self {
        Self {
            page: page.to_string(),
            kind: RowKind::Page,
            url: page.to_string(),
            status: CheckStatus::Broken,
        }
    }
}

// A checked reference as listed under its page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckedReference {
    pub kind: RowKind,
    pub url: String,
    pub status: CheckStatus,
}

// Everything checked on one successfully parsed page
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub page: String,
    pub references: Vec<CheckedReference>,
}

impl PageReport {
    pub fn new(page: &str) -> Self {
        Self {
            page: page.to_string(),
            references: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub broken: usize,
    pub ok: usize,
}

impl Summary {
    // Built from the running counters, never by re-scanning the rows
    pub fn from_counters(total: usize, broken: usize) -> Self {
        Self {
            total,
            broken,
            ok: total - broken,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub timestamp: DateTime<Utc>,
    pub mode: AuditMode,
    /// Number of page identifiers the run covered
    pub pages_checked: usize,
    pub pages: Vec<PageReport>,
    pub rows: Vec<RowRecord>,
    pub summary: Summary,
}

impl Report {
    pub fn has_broken(&self) -> bool {
        self.summary.broken > 0
    }

    // Short human-readable outcome, e.g.
    //   "✅ All OK! Checked 42 items across 6 pages."
    //   "❌ Found 3 broken items out of 42 total items across 6 pages."
    pub fn status_line(&self) -> String {
        let noun = self.mode.item_noun();
        if self.has_broken() {
            format!(
                "❌ Found {} broken {} out of {} total {} across {} pages.",
                self.summary.broken, noun, self.summary.total, noun, self.pages_checked
            )
        } else {
            let all_ok = match self.mode {
                AuditMode::Links => "All OK!",
                AuditMode::Images => "All images OK!",
            };
            format!(
                "✅ {} Checked {} {} across {} pages.",
                all_ok, self.summary.total, noun, self.pages_checked
            )
        }
    }
}

// Somewhere to persist a finished report
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn save(&self, report: &Report) -> Result<()>;
}

// Writes the report as pretty JSON to a file
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReportSink for JsonFileSink {
    async fn save(&self, report: &Report) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write report to {}", self.path.display()))?;
        info!(path = %self.path.display(), "report saved");
        Ok(())
    }
}

// Emits the report as a debug log event
pub struct LogSink;

#[async_trait]
impl ReportSink for LogSink {
    async fn save(&self, report: &Report) -> Result<()> {
        let json = serde_json::to_string(report)?;
        debug!(report = %json, "audit report");
        Ok(())
    }
}

// Hands the report to a sink; failures are only logged
pub async fn save_report(sink: &dyn ReportSink, report: &Report) {
    if let Err(e) = sink.save(report).await {
        warn!("Could not save report: {:#}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn report(mode: AuditMode, total: usize, broken: usize) -> Report {
        Report {
            timestamp: Utc::now(),
            mode,
            pages_checked: 6,
            pages: Vec::new(),
            rows: Vec::new(),
            summary: Summary::from_counters(total, broken),
        }
    }

    #[test]
    fn test_row_kind_labels() {
        assert_eq!(RowKind::Reference(RefKind::Image).to_string(), "IMAGE");
        assert_eq!(RowKind::Fixed(RefKind::Image).to_string(), "IMAGE (FIXED)");
        assert_eq!(RowKind::Fixed(RefKind::Source).to_string(), "SOURCE (FIXED)");
        assert_eq!(RowKind::Page.to_string(), "PAGE");
    }

    #[test]
    fn test_broken_page_row() {
        let row = RowRecord::broken_page("contact.html");
        assert_eq!(row.page, "contact.html");
        assert_eq!(row.url, "contact.html");
        assert_eq!(row.kind, RowKind::Page);
        assert_eq!(row.status, CheckStatus::Broken);
    }

    #[test]
    fn test_summary_adds_up() {
        let summary = Summary::from_counters(10, 3);
        assert_eq!(summary.ok, 7);
        assert_eq!(summary.total, summary.ok + summary.broken);
    }

    #[test]
    fn test_status_line_all_clear() {
        assert_eq!(
            report(AuditMode::Links, 12, 0).status_line(),
            "✅ All OK! Checked 12 items across 6 pages."
        );
        assert_eq!(
            report(AuditMode::Images, 4, 0).status_line(),
            "✅ All images OK! Checked 4 images across 6 pages."
        );
    }

    #[test]
    fn test_status_line_broken() {
        assert_eq!(
            report(AuditMode::Links, 12, 2).status_line(),
            "❌ Found 2 broken items out of 12 total items across 6 pages."
        );
        assert_eq!(
            report(AuditMode::Images, 4, 1).status_line(),
            "❌ Found 1 broken images out of 4 total images across 6 pages."
        );
    }

    #[test]
    fn test_row_serializes_flat_strings() {
        let row = RowRecord {
            page: "index.html".to_string(),
            kind: RowKind::Fixed(RefKind::Img),
            url: "a.png".to_string(),
            status: CheckStatus::Ok,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["kind"], "IMG (FIXED)");
        assert_eq!(json["status"], "OK");
    }

    #[tokio::test]
    async fn test_json_file_sink_writes_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");

        save_report(&JsonFileSink::new(&path), &report(AuditMode::Links, 3, 1)).await;

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["summary"]["total"], 3);
        assert_eq!(saved["summary"]["broken"], 1);
        assert_eq!(saved["mode"], "links");
    }

    #[tokio::test]
    async fn test_sink_failure_is_swallowed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no/such/dir/report.json");
        let sink = JsonFileSink::new(&path);

        assert!(sink.save(&report(AuditMode::Links, 1, 0)).await.is_err());
        // save_report returns () either way
        save_report(&sink, &report(AuditMode::Links, 1, 0)).await;
        assert!(!path.exists());
    }
}
