// src/error.rs
// =============================================================================
// Error types shared by the library modules.
//
// None of these ever stop an audit run: the page processor downgrades every
// FetchError or AuditError into a BROKEN row. They exist so each layer can
// say *what* went wrong in the debug logs.
//
// Rust concepts:
// - thiserror: derive Display/Error impls from attributes
// - #[from]: automatic conversion so `?` works across error types
// =============================================================================

use thiserror::Error;

// Errors from a SiteSource backend (HTTP, filesystem, in-memory)
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Errors raised while processing a single page
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

// Errors raised by the KPI renderer
#[derive(Error, Debug)]
pub enum KpiError {
    #[error("inline data is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid selector '{0}'")]
    Selector(String),
}
