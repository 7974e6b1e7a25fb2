// src/site/fs.rs
// =============================================================================
// This backend audits a site straight from its directory on disk.
//
// It resolves paths the way a simple static file server would:
// - anything after '?' or '#' is ignored
// - percent-escapes are decoded ("my%20photo.png" -> "my photo.png")
// - absolute paths and ".." never reach outside the root
// - an empty path or a directory serves its index.html
// - page bodies that aren't valid UTF-8 are decoded lossily, like an
//   HTTP client would
//
// Handy for checking a site before it's deployed:
//   site-auditor links --root ./public
// =============================================================================

use super::SiteSource;
use crate::error::FetchError;
use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

pub struct FsSite {
    root: PathBuf,
}

impl FsSite {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // Maps a site path to the file a static server would send back
    async fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        // Strip the query string and fragment: "a.css?v=2" -> "a.css"
        let file_part = path.split(['?', '#']).next().unwrap_or_default();

        // Undo URL escaping; bad UTF-8 escapes become U+FFFD and simply
        // won't match a file
        let decoded = percent_decode_str(file_part).decode_utf8_lossy();

        // Only plain names and "." may appear; "/etc/passwd" or
        // "../secret" is treated as missing
        let relative = Path::new(&*decoded);
        let escapes_root = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes_root {
            debug!(path, "outside the site root");
            return Err(FetchError::NotFound(path.to_string()));
        }

        let mut candidate = self.root.join(relative);

        // Directories (and the bare root) serve their index.html
        let is_dir = tokio::fs::metadata(&candidate)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if decoded.is_empty() || is_dir {
            candidate = candidate.join("index.html");
        }

        // Anything that isn't a regular file is a 404
        match tokio::fs::metadata(&candidate).await {
            Ok(meta) if meta.is_file() => Ok(candidate),
            _ => Err(FetchError::NotFound(path.to_string())),
        }
    }
}

#[async_trait]
impl SiteSource for FsSite {
    async fn fetch_page(&self, page: &str) -> Result<String, FetchError> {
        let file = self.resolve(page).await?;
        debug!(file = %file.display(), "read page");

        // Read raw bytes and decode leniently; a stray Latin-1 byte should
        // not turn the whole page into a broken row
        let bytes = tokio::fs::read(&file).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn probe(&self, path: &str) -> Result<(), FetchError> {
        let file = self.resolve(path).await?;
        debug!(file = %file.display(), "found");
        Ok(())
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is Path::components()?
//    - Splits a path into its pieces: "a/../b" -> Normal("a"), ParentDir,
//      Normal("b")
//    - A leading "/" shows up as RootDir, which is how absolute paths are
//      spotted without string matching
//
// 2. Why percent_decode_str(...).decode_utf8_lossy()?
//    - Pages write "my%20photo.png"; the file on disk is "my photo.png"
//    - It returns a Cow<str>: borrowed when nothing needed decoding, owned
//      otherwise
//
// 3. What does String::from_utf8_lossy do?
//    - Turns bytes into text, swapping invalid sequences for U+FFFD
//    - .into_owned() is needed because it returns a Cow as well
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_fetch_and_probe_files() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("img")).unwrap();
        fs::write(dir.path().join("index.html"), "<h1>Home</h1>").unwrap();
        fs::write(dir.path().join("img/logo.png"), [0u8; 4]).unwrap();

        let site = FsSite::new(dir.path());
        assert_eq!(site.fetch_page("index.html").await.unwrap(), "<h1>Home</h1>");
        assert!(site.probe("img/logo.png").await.is_ok());
        assert!(matches!(
            site.probe("img/missing.png").await,
            Err(FetchError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_query_and_fragment_ignored() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("style.css"), "body{}").unwrap();
        fs::write(dir.path().join("about.html"), "about").unwrap();

        let site = FsSite::new(dir.path());
        assert!(site.probe("style.css?v=3").await.is_ok());
        assert!(site.probe("about.html#team").await.is_ok());
    }

    #[tokio::test]
    async fn test_directory_serves_index() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("blog")).unwrap();
        fs::write(dir.path().join("blog/index.html"), "blog").unwrap();
        fs::write(dir.path().join("index.html"), "home").unwrap();

        let site = FsSite::new(dir.path());
        assert!(site.probe("blog/").await.is_ok());
        assert!(site.probe("blog").await.is_ok());
        assert!(site.probe("").await.is_ok());
    }

    #[tokio::test]
    async fn test_directory_without_index_is_missing() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();

        let site = FsSite::new(dir.path());
        assert!(site.probe("empty/").await.is_err());
    }

    #[tokio::test]
    async fn test_percent_escapes_decoded() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("my photo.png"), [0u8; 4]).unwrap();

        let site = FsSite::new(dir.path());
        assert!(site.probe("my%20photo.png").await.is_ok());
        assert!(site.probe("my photo.png").await.is_ok());
    }

    #[tokio::test]
    async fn test_paths_cannot_leave_the_root() {
        let outer = tempdir().unwrap();
        let root = outer.path().join("site");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("index.html"), "home").unwrap();
        fs::write(outer.path().join("secret.txt"), "nope").unwrap();

        let site = FsSite::new(&root);
        let absolute = outer.path().join("secret.txt");

        assert!(matches!(
            site.probe(&absolute.to_string_lossy()).await,
            Err(FetchError::NotFound(_))
        ));
        assert!(site.probe("../secret.txt").await.is_err());
        assert!(site.probe("img/../../secret.txt").await.is_err());
        assert!(site.probe("..%2Fsecret.txt").await.is_err());
        assert!(site.fetch_page("/index.html").await.is_err());
        // "./" is harmless
        assert!(site.probe("./index.html").await.is_ok());
    }

    #[tokio::test]
    async fn test_non_utf8_page_is_decoded_lossily() {
        let dir = tempdir().unwrap();
        // "café" in Latin-1
        fs::write(dir.path().join("index.html"), b"<p>caf\xe9</p>").unwrap();

        let site = FsSite::new(dir.path());
        let body = site.fetch_page("index.html").await.unwrap();
        assert_eq!(body, "<p>caf\u{FFFD}</p>");
    }

    #[tokio::test]
    async fn test_case_sensitive_names() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("photo.png"), [0u8; 4]).unwrap();

        let site = FsSite::new(dir.path());
        assert!(site.probe("photo.png").await.is_ok());
        // Only meaningful on case-sensitive filesystems
        if !dir.path().join("PHOTO.PNG").exists() {
            assert!(site.probe("photo.PNG").await.is_err());
        }
    }
}
