// src/audit/mod.rs
// =============================================================================
// This module drives an audit run.
//
// Features:
// - Walks a fixed, ordered list of pages (no link following)
// - Checks every local reference on each page, one probe at a time
// - Repairs case-mismatched image extensions when it can
// - Degrades any per-page failure to a single BROKEN row and keeps going
// =============================================================================

mod runner;

pub use runner::audit_site;
