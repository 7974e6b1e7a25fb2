// src/site/http.rs
// =============================================================================
// This backend talks to a live website over HTTP.
//
// Key functionality:
// - GET requests to fetch page bodies
// - HEAD requests (lightweight, no body download) to probe assets
// - Paths are joined onto a base URL, e.g.
//     base "http://localhost:8000/" + "img/a.png"
//       -> "http://localhost:8000/img/a.png"
//
// Unlike a full link checker we do not categorize failures (timeouts, DNS,
// TLS...). A probe either succeeds or it doesn't.
// =============================================================================

use super::SiteSource;
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub struct HttpSite {
    client: Client,
    base: Url,
}

impl HttpSite {
    // Creates a backend rooted at `base_url`
    //
    // A base without a trailing slash is treated as a directory, so
    // "http://host/site" and "http://host/site/" behave the same.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(concat!("site-auditor/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    // Resolves a site-relative path against the base URL
    fn resolve(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(path)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl SiteSource for HttpSite {
    async fn fetch_page(&self, page: &str) -> Result<String, FetchError> {
        let url = self.resolve(page)?;
        debug!(%url, "GET");

        let response = ensure_success(self.client.get(url).send().await?)?;
        Ok(response.text().await?)
    }

    async fn probe(&self, path: &str) -> Result<(), FetchError> {
        let url = self.resolve(path)?;
        debug!(%url, "HEAD");

        ensure_success(self.client.head(url).send().await?)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

// 2xx is success; everything else (including unfollowed 3xx) is an error
fn ensure_success(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Status(status.as_u16()))
    }
}
