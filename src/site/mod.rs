// src/site/mod.rs
// =============================================================================
// This module is the audit's window onto the website being checked.
//
// The audit core never talks to reqwest or the filesystem directly; it only
// sees the SiteSource trait. Three backends implement it:
// - http: a live site behind a base URL (reqwest)
// - fs: a directory of static files, served the way a static server would
// - memory: in-memory fixtures, handy for tests
//
// Rust concepts:
// - Traits: a shared interface several types implement
// - async_trait: lets a trait have async methods and still be used as
//   `&dyn SiteSource`
// =============================================================================

mod fs;
mod http;
mod memory;

pub use fs::FsSite;
pub use http::HttpSite;
pub use memory::MemorySite;

use crate::error::FetchError;
use async_trait::async_trait;

// A website that can hand out page bodies and answer existence probes
//
// Paths are site-relative and already normalized ("about.html",
// "img/logo.png"). Backends decide how to resolve them.
#[async_trait]
pub trait SiteSource: Send + Sync {
    /// Fetches a page's full body as text
    ///
    /// Returns an error for non-success responses as well as transport
    /// failures.
    async fn fetch_page(&self, page: &str) -> Result<String, FetchError>;

    /// Lightweight existence check (HEAD for HTTP)
    ///
    /// Ok(()) means the resource exists.
    async fn probe(&self, path: &str) -> Result<(), FetchError>;

    /// Short description for log lines
    fn describe(&self) -> String;
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `Send + Sync` on the trait?
//    - #[async_trait] boxes each method's future as `Send`
//    - A future borrowing `&self` is only Send if Self is Sync
//
// 2. What does `&dyn SiteSource` buy us?
//    - The audit core is compiled once and works with any backend
//    - Tests pass a MemorySite, the CLI passes an HttpSite or FsSite
//
// 3. Why does probe return Result<(), FetchError> and not bool?
//    - The caller only turns it into OK/BROKEN, but the error carries the
//      cause (404, timeout, missing file) for the debug log
//    - `?` works inside the backends, keeping them short
// -----------------------------------------------------------------------------
