// src/checker/probe.rs
// =============================================================================
// This module decides whether a local path is reachable.
//
// The actual request is made by whichever SiteSource backend is in use
// (HTTP, filesystem, in-memory). Here we only collapse its answer into the
// two outcomes the report knows about: OK or BROKEN.
//
// There is no retry and no cache: every call hits the backend again.
// =============================================================================

use crate::site::SiteSource;
use serde::Serialize;
use std::fmt;
use tracing::debug;

// Outcome of probing one URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    /// The backend answered with success
    Ok,
    /// Non-success status, network error, timeout, missing file...
    Broken,
}

impl CheckStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Ok => write!(f, "OK"),
            CheckStatus::Broken => write!(f, "BROKEN"),
        }
    }
}

// Probes a normalized local path
//
// Any error from the backend counts as BROKEN; the cause only goes to the
// debug log.
pub async fn check_url(source: &dyn SiteSource, url: &str) -> CheckStatus {
    match source.probe(url).await {
        Ok(()) => {
            debug!(url, "probe ok");
            CheckStatus::Ok
        }
        Err(e) => {
            debug!(url, error = %e, "probe failed");
            CheckStatus::Broken
        }
    }
}
