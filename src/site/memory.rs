// src/site/memory.rs
// In-memory site: pages with bodies, assets that merely exist.
// Every call is counted so tests can assert how often a path was probed.

use super::SiteSource;
use crate::error::FetchError;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemorySite {
    pages: HashMap<String, String>,
    assets: HashSet<String>,
    probes: Mutex<Vec<String>>,
}

impl MemorySite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: &str, body: &str) -> Self {
        self.pages.insert(page.to_string(), body.to_string());
        self
    }

    pub fn with_asset(mut self, path: &str) -> Self {
        self.assets.insert(path.to_string());
        self
    }

    // Every path passed to probe(), in call order
    pub fn probed(&self) -> Vec<String> {
        self.probes
            .lock()
            .map(|probes| probes.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SiteSource for MemorySite {
    async fn fetch_page(&self, page: &str) -> Result<String, FetchError> {
        self.pages
            .get(page)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(page.to_string()))
    }

    async fn probe(&self, path: &str) -> Result<(), FetchError> {
        if let Ok(mut probes) = self.probes.lock() {
            probes.push(path.to_string());
        }

        if self.assets.contains(path) || self.pages.contains_key(path) {
            Ok(())
        } else {
            Err(FetchError::NotFound(path.to_string()))
        }
    }

    fn describe(&self) -> String {
        format!("memory ({} pages, {} assets)", self.pages.len(), self.assets.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_page_is_not_found() {
        let site = MemorySite::new();
        assert!(matches!(
            site.fetch_page("index.html").await,
            Err(FetchError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_probes_are_recorded() {
        let site = MemorySite::new().with_asset("a.png");
        let _ = site.probe("a.png").await;
        let _ = site.probe("b.png").await;
        let _ = site.probe("a.png").await;
        assert_eq!(site.probed(), vec!["a.png", "b.png", "a.png"]);
    }
}
