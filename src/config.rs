// src/config.rs
// =============================================================================
// Run configuration for an audit.
//
// The CLI (src/cli.rs) folds its flags into an AuditConfig; the audit core
// only ever sees this struct, so tests can build one directly.
// =============================================================================

use serde::Serialize;
use std::fmt;

// The pages audited when no --page flag is given, in processing order
pub const DEFAULT_PAGES: [&str; 6] = [
    "index.html",
    "about.html",
    "blog.html",
    "portfolio.html",
    "contact.html",
    "404.html",
];

// Default per-request timeout for the HTTP backend, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// Which flavour of audit to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditMode {
    /// Links, images, stylesheets and scripts
    Links,
    /// Images only (img + source elements)
    Images,
}

impl AuditMode {
    // Noun used in the human-readable status line
    pub fn item_noun(&self) -> &'static str {
        match self {
            AuditMode::Links => "items",
            AuditMode::Images => "images",
        }
    }
}

impl fmt::Display for AuditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditMode::Links => write!(f, "links"),
            AuditMode::Images => write!(f, "images"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub mode: AuditMode,
    pub pages: Vec<String>,
}

impl AuditConfig {
    pub fn new(mode: AuditMode) -> Self {
        Self {
            mode,
            pages: DEFAULT_PAGES.iter().map(|p| p.to_string()).collect(),
        }
    }

    // Replaces the page list; an empty list keeps the defaults
    pub fn with_pages(mut self, pages: Vec<String>) -> Self {
        if !pages.is_empty() {
            self.pages = pages;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pages_in_order() {
        let config = AuditConfig::new(AuditMode::Links);
        assert_eq!(config.pages.len(), 6);
        assert_eq!(config.pages[0], "index.html");
        assert_eq!(config.pages[5], "404.html");
    }

    #[test]
    fn test_with_pages_overrides() {
        let config = AuditConfig::new(AuditMode::Images)
            .with_pages(vec!["blog/post.html".to_string()]);
        assert_eq!(config.pages, vec!["blog/post.html"]);
    }

    #[test]
    fn test_empty_page_list_keeps_defaults() {
        let config = AuditConfig::new(AuditMode::Links).with_pages(Vec::new());
        assert_eq!(config.pages.len(), DEFAULT_PAGES.len());
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(AuditMode::Links.to_string(), "links");
        assert_eq!(AuditMode::Images.to_string(), "images");
        assert_eq!(AuditMode::Images.item_noun(), "images");
    }
}
