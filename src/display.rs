// src/display.rs
// =============================================================================
// Live progress output while an audit runs.
//
// The audit core reports two things as it goes:
// - a status message ("Checking about.html..."), each one replacing the last
// - table rows, appended one per checked reference
//
// TerminalDisplay prints status to stderr and the table to stdout, so
// `--json` can keep stdout for the JSON report alone.
// =============================================================================

use crate::checker::CheckStatus;
use crate::report::RowRecord;

pub trait AuditDisplay {
    /// Replaces the current status message
    fn status(&mut self, message: &str);

    /// Appends one row to the results table
    fn row(&mut self, row: &RowRecord);
}

pub struct TerminalDisplay {
    show_table: bool,
    header_printed: bool,
}

impl TerminalDisplay {
    // `show_table = false` suppresses the stdout table (JSON output mode)
    pub fn new(show_table: bool) -> Self {
        Self {
            show_table,
            header_printed: false,
        }
    }

    fn print_header(&mut self) {
        println!("{:<20} {:<16} {:<50} {:<10}", "PAGE", "KIND", "URL", "STATUS");
        println!("{}", "=".repeat(99));
        self.header_printed = true;
    }
}

impl AuditDisplay for TerminalDisplay {
    fn status(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    fn row(&mut self, row: &RowRecord) {
        if !self.show_table {
            return;
        }
        if !self.header_printed {
            self.print_header();
        }

        println!(
            "{:<20} {:<16} {:<50} {:<10}",
            truncate(&row.page, 20),
            row.kind.to_string(),
            truncate(&row.url, 50),
            format_status(row.status)
        );
    }
}

// Keeps everything in memory; used by tests and embedders
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub statuses: Vec<String>,
    pub rows: Vec<RowRecord>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    // The message currently "on screen"
    pub fn current_status(&self) -> Option<&str> {
        self.statuses.last().map(String::as_str)
    }
}

impl AuditDisplay for RecordingDisplay {
    fn status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }

    fn row(&mut self, row: &RowRecord) {
        self.rows.push(row.clone());
    }
}

fn format_status(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Ok => "✅ OK",
        CheckStatus::Broken => "❌ BROKEN",
    }
}

// Shortens long cells, keeping them valid UTF-8
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    }
}
