//! site-auditor: broken link and asset checks for a small static website
//!
//! Modules:
//! - audit: runs the page-by-page audit
//! - checker: reference extraction, normalization, probing
//! - site: backends the audit reads from (HTTP, filesystem, memory)
//! - report / display: results, summary and live output
//! - kpi: inline KPI data renderer

pub mod audit;
pub mod checker;
pub mod config;
pub mod display;
pub mod error;
pub mod kpi;
pub mod report;
pub mod site;

pub use audit::audit_site;
pub use config::{AuditConfig, AuditMode};
pub use report::{Report, RowKind, RowRecord, Summary};
pub use site::{FsSite, HttpSite, MemorySite, SiteSource};
