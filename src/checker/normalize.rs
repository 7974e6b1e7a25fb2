// src/checker/normalize.rs
// =============================================================================
// This module turns raw attribute values into local site paths.
//
// Three jobs:
// - normalize_url: rewrite a raw href/src into a path relative to site root
// - is_local_url / is_local_image: decide whether a path is worth probing
// - repair_image_path: the case-fix heuristic tried on broken images
//
// Everything here is plain prefix/suffix string work. There is no URL
// parsing, no "../" collapsing and no query or fragment stripping.
//
// Rust concepts:
// - Option<String>: None means "not locally checkable"
// - &str slicing: cheap views into the original string
// =============================================================================

use crate::config::AuditMode;

// Prefixes that mark a reference as pointing at another origin
const EXTERNAL_PREFIXES: [&str; 3] = ["http://", "https://", "//"];

// Substrings the image classifier looks for (lower-cased match)
const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".webp", ".gif", ".svg"];

// Trailing extensions the repair heuristic rewrites, applied in this order
const EXTENSION_FIXES: [(&str, &str); 4] = [
    (".jpg", ".jpg"),
    (".jpeg", ".jpg"),
    (".png", ".png"),
    (".webp", ".webp"),
];

// Normalizes a raw reference found on `origin_page`
//
// Returns:
//   Some(path)  - a site-relative path, or the raw value unchanged when it is
//                 external (the locality check rejects those)
//   None        - anchors and mailto:/tel: links (link audit only)
//
// Examples (origin "blog/post.html"):
//   "./a.png"  -> Some("a.png")
//   "/a.png"   -> Some("a.png")
//   "a.png"    -> Some("blog/a.png")
//   "#top"     -> None
pub fn normalize_url(raw: &str, origin_page: &str, mode: AuditMode) -> Option<String> {
    // Other origins pass through untouched; is_local_url says no later
    if is_external(raw) {
        return Some(raw.to_string());
    }

    // Anchors and non-HTTP protocols only matter to the link audit
    if mode == AuditMode::Links {
        // Same-page anchor, e.g. "#top"
        if raw.starts_with('#') {
            return None;
        }
        // Email and phone links can't be probed
        if raw.starts_with("mailto:") || raw.starts_with("tel:") {
            return None;
        }
    }

    // "./img/a.png" -> "img/a.png"
    if let Some(rest) = raw.strip_prefix("./") {
        return Some(rest.to_string());
    }

    // Root-relative: "/img/a.png" -> "img/a.png"
    if let Some(rest) = raw.strip_prefix('/') {
        return Some(rest.to_string());
    }

    // Relative to the origin page's directory. A value that already carries
    // that prefix has been normalized before and is left alone.
    let dir = page_directory(origin_page);
    if dir.is_empty() || raw.starts_with(dir) {
        Some(raw.to_string())
    } else {
        Some(format!("{}{}", dir, raw))
    }
}

// Everything up to and including the last '/', or "" for root-level pages
pub fn page_directory(page: &str) -> &str {
    match page.rfind('/') {
        Some(idx) => &page[..=idx],
        None => "",
    }
}

pub fn is_external(url: &str) -> bool {
    EXTERNAL_PREFIXES.iter().any(|prefix| url.starts_with(prefix))
}

// True for a present, non-empty, same-site path
pub fn is_local_url(url: Option<&str>) -> bool {
    match url {
        Some(u) => !u.is_empty() && !is_external(u),
        // None is the "not checkable" marker from normalize_url
        None => false,
    }
}

// Stricter check used by the image audit: local AND looks like an image.
// The extension match is a substring search, so "a.pngs/x" also passes.
pub fn is_local_image(url: Option<&str>) -> bool {
    if !is_local_url(url) {
        return false;
    }
    // Compare in lowercase so "Photo.JPG" counts as an image
    let lower = url.unwrap_or_default().to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.contains(ext))
}

// Best-effort fix for a broken image path
//
// Strips one leading '/', then rewrites a case-mismatched trailing extension
// (.JPG, .JPEG, .PNG, .WEBP in any case) to its lowercase canonical form.
// Only the end of the string is touched.
//
//   "images/Photo.JPG" -> "images/Photo.jpg"
//   "/a/b.Jpeg"        -> "a/b.jpg"
//   "a/b.png"          -> "a/b.png" (unchanged)
pub fn repair_image_path(url: &str) -> String {
    // Drop one leading slash (at most one)
    let mut repaired = url.strip_prefix('/').unwrap_or(url).to_string();

    // Each fix looks at the current tail, so ".JPEG" ends as ".jpg"
    for (suffix, canonical) in EXTENSION_FIXES {
        repaired = replace_suffix_ignore_case(&repaired, suffix, canonical);
    }

    repaired
}

fn replace_suffix_ignore_case(value: &str, suffix: &str, replacement: &str) -> String {
    // Too short to end with the suffix
    if value.len() < suffix.len() {
        return value.to_string();
    }

    // Byte index where the suffix would start; a multi-byte character
    // straddling it means the tail can't be an ASCII extension
    let split = value.len() - suffix.len();
    if !value.is_char_boundary(split) {
        return value.to_string();
    }

    let (stem, tail) = value.split_at(split);
    // Case-insensitive match, canonical lowercase replacement
    if tail.eq_ignore_ascii_case(suffix) {
        format!("{}{}", stem, replacement)
    } else {
        value.to_string()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does an external URL come back as Some(url) instead of None?
//    - The link audit distinguishes "skip, not a URL we check" (anchors,
//      mailto:) from "a real URL that lives elsewhere"
//    - Both end up skipped, but only the second survives normalization
//
// 2. What is strip_prefix?
//    - Returns Some(rest) if the string starts with the prefix, else None
//    - if let Some(rest) = raw.strip_prefix("./") reads as
//      "if raw starts with ./, give me what follows"
//
// 3. Why eq_ignore_ascii_case?
//    - File extensions are ASCII, so we can compare without allocating a
//      lower-cased copy of the whole path
//
// 4. What is is_char_boundary?
//    - Rust strings are UTF-8, so one character can take several bytes
//    - Slicing in the middle of a character panics; is_char_boundary
//      tells us whether a byte index is a safe place to cut
// -----------------------------------------------------------------------------
