// src/audit/runner.rs
// =============================================================================
// This module runs an audit over a fixed list of pages.
//
// How it works:
// 1. Take the next page identifier from the configured list
// 2. Fetch the page body (failure -> one "PAGE ... BROKEN" row, next page)
// 3. Parse it and extract references in a fixed order
// 4. For each reference: normalize, skip if not local, probe, record a row
// 5. Broken image references get one repair attempt; a successful repair
//    adds an extra "(FIXED)" row
// 6. After the last page, build the summary from the running counters
//
// Everything is sequential: one page at a time, one probe at a time, each
// awaited before the next starts. Nothing that happens on one page can stop
// the run.
//
// Rust concepts:
// - &mut state threaded through calls instead of global variables
// - let-else: early exit when a pattern doesn't match
// =============================================================================

use crate::checker::{
    check_url, extract_references, is_local_image, is_local_url, normalize_url, repair_image_path,
    CheckStatus, Reference,
};
use crate::config::{AuditConfig, AuditMode};
use crate::display::AuditDisplay;
use crate::error::AuditError;
use crate::report::{CheckedReference, PageReport, Report, RowKind, RowRecord, Summary};
use crate::site::SiteSource;
use chrono::Utc;
use tracing::{debug, info, warn};

// Everything the run accumulates. Owned by audit_site, lent out by &mut.
struct AuditState {
    rows: Vec<RowRecord>,
    pages: Vec<PageReport>,
    total: usize,
    broken: usize,
}

impl AuditState {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            pages: Vec::new(),
            total: 0,
            broken: 0,
        }
    }

    // Appends a row; the counters move exactly once per row
    fn record(&mut self, display: &mut dyn AuditDisplay, row: RowRecord) {
        self.total += 1;
        if row.status == CheckStatus::Broken {
            self.broken += 1;
        }
        display.row(&row);
        self.rows.push(row);
    }

    fn into_report(self, config: &AuditConfig) -> Report {
        Report {
            timestamp: Utc::now(),
            mode: config.mode,
            pages_checked: config.pages.len(),
            pages: self.pages,
            rows: self.rows,
            summary: Summary::from_counters(self.total, self.broken),
        }
    }
}

// Audits every configured page, in order, and returns the finished report
//
// Parameters:
//   source: where pages and assets come from (HTTP, disk, memory)
//   config: mode and page list
//   display: receives status messages and rows as they happen
pub async fn audit_site(
    source: &dyn SiteSource,
    config: &AuditConfig,
    display: &mut dyn AuditDisplay,
) -> Report {
    info!(
        mode = %config.mode,
        pages = config.pages.len(),
        site = %source.describe(),
        "starting audit"
    );

    let mut state = AuditState::new();

    display.status(match config.mode {
        AuditMode::Links => "Starting QA check...",
        AuditMode::Images => "Starting image check...",
    });

    for page in &config.pages {
        let message = match config.mode {
            AuditMode::Links => format!("Checking {}...", page),
            AuditMode::Images => format!("Checking images in {}...", page),
        };
        display.status(&message);

        match process_page(source, page, config.mode, &mut state, display).await {
            Ok(page_report) => state.pages.push(page_report),
            Err(e) => {
                warn!(page = %page, error = %e, "page could not be audited");
                state.record(display, RowRecord::broken_page(page));
            }
        }
    }

    let report = state.into_report(config);
    display.status(&report.status_line());

    info!(
        total = report.summary.total,
        broken = report.summary.broken,
        "audit complete"
    );

    report
}

// Fetches, parses and checks a single page
//
// Rows recorded before an error stay in the log; the caller adds the PAGE
// row on top.
async fn process_page(
    source: &dyn SiteSource,
    page: &str,
    mode: AuditMode,
    state: &mut AuditState,
    display: &mut dyn AuditDisplay,
) -> Result<PageReport, AuditError> {
    let html = source.fetch_page(page).await?;

    // Parsing happens in one synchronous step; the DOM is gone before the
    // first probe is awaited.
    let references = extract_references(&html, page, mode)?;
    debug!(page, count = references.len(), "references extracted");

    let mut page_report = PageReport::new(page);
    for reference in &references {
        check_reference(source, reference, mode, state, display, &mut page_report).await;
    }

    Ok(page_report)
}

async fn check_reference(
    source: &dyn SiteSource,
    reference: &Reference,
    mode: AuditMode,
    state: &mut AuditState,
    display: &mut dyn AuditDisplay,
    page_report: &mut PageReport,
) {
    let normalized = normalize_url(&reference.raw_value, &reference.origin_page, mode);

    let checkable = match mode {
        AuditMode::Links => is_local_url(normalized.as_deref()),
        AuditMode::Images => is_local_image(normalized.as_deref()),
    };

    let Some(url) = normalized.filter(|_| checkable) else {
        debug!(raw = %reference.raw_value, kind = %reference.kind, "skipped, not local");
        return;
    };

    let status = check_url(source, &url).await;
    record_reference(
        state,
        display,
        page_report,
        RowKind::Reference(reference.kind),
        &url,
        status,
    );

    if status == CheckStatus::Broken && reference.kind.is_image() {
        let repaired = repair_image_path(&url);
        if repaired == url {
            return;
        }

        // One attempt only; a failed repair adds nothing
        if check_url(source, &repaired).await.is_ok() {
            debug!(from = %url, to = %repaired, "image path repaired");
            record_reference(
                state,
                display,
                page_report,
                RowKind::Fixed(reference.kind),
                &repaired,
                CheckStatus::Ok,
            );
        }
    }
}

fn record_reference(
    state: &mut AuditState,
    display: &mut dyn AuditDisplay,
    page_report: &mut PageReport,
    kind: RowKind,
    url: &str,
    status: CheckStatus,
) {
    page_report.references.push(CheckedReference {
        kind,
        url: url.to_string(),
        status,
    });
    state.record(
        display,
        RowRecord {
            page: page_report.page.clone(),
            kind,
            url: url.to_string(),
            status,
        },
    );
}
