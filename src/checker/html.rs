// src/checker/html.rs
// =============================================================================
// This module extracts asset references from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Extraction order is fixed and matters for the report:
//   link audit:  a[href] -> img/source -> link[href] -> script[src]
//   image audit: img[src] -> source[srcset]
// Within each group, elements come out in document order.
//
// Rust concepts:
// - Enums with Display: the reference kind prints as LINK, IMAGE, ...
// - Result<T, E>: selector parsing can fail, so we propagate instead of panic
// =============================================================================

use crate::config::AuditMode;
use crate::error::AuditError;
use scraper::{ElementRef, Html, Selector};
use serde::{Serialize, Serializer};
use std::fmt;

// What kind of element a reference was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// <a href>
    Link,
    /// <img src> or <source srcset> in the link audit
    Image,
    /// <link href>
    Css,
    /// <script src>
    Script,
    /// <img src> in the image audit
    Img,
    /// <source srcset> in the image audit
    Source,
}

impl RefKind {
    // Image kinds are eligible for the path repair heuristic
    pub fn is_image(&self) -> bool {
        matches!(self, RefKind::Image | RefKind::Img | RefKind::Source)
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RefKind::Link => "LINK",
            RefKind::Image => "IMAGE",
            RefKind::Css => "CSS",
            RefKind::Script => "SCRIPT",
            RefKind::Img => "IMG",
            RefKind::Source => "SOURCE",
        };
        f.write_str(label)
    }
}

impl Serialize for RefKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// A reference exactly as authored in the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub kind: RefKind,
    /// The literal attribute value (first candidate for srcset)
    pub raw_value: String,
    /// The page identifier the reference was found on
    pub origin_page: String,
}

// Parses `html` and extracts its references
//
// Parameters:
//   html: raw page body
//   page: the page identifier (kept on each Reference)
//   mode: which elements to look at
pub fn extract_references(html: &str, page: &str, mode: AuditMode) -> Result<Vec<Reference>, AuditError> {
    let document = Html::parse_document(html);
    extract_from_document(&document, page, mode)
}

// Same as extract_references, for an already parsed document
pub fn extract_from_document(document: &Html, page: &str, mode: AuditMode) -> Result<Vec<Reference>, AuditError> {
    let mut refs = Vec::new();

    match mode {
        AuditMode::Links => {
            for element in document.select(&selector("a[href]")?) {
                push(&mut refs, RefKind::Link, element.value().attr("href"), page);
            }

            // One combined selector keeps img and source in document order
            for element in document.select(&selector("img[src], source[srcset]")?) {
                let value = non_empty(element.value().attr("src"))
                    .or_else(|| element.value().attr("srcset"))
                    .and_then(first_candidate);
                push(&mut refs, RefKind::Image, value, page);
            }

            for element in document.select(&selector(r#"link[rel="stylesheet"], link[href]"#)?) {
                push(&mut refs, RefKind::Css, element.value().attr("href"), page);
            }

            for element in document.select(&selector("script[src]")?) {
                push(&mut refs, RefKind::Script, element.value().attr("src"), page);
            }
        }
        AuditMode::Images => {
            for element in document.select(&selector("img[src]")?) {
                push(&mut refs, RefKind::Img, element.value().attr("src"), page);
            }

            for element in document.select(&selector("source[srcset]")?) {
                push(&mut refs, RefKind::Source, srcset_value(&element), page);
            }
        }
    }

    Ok(refs)
}

fn selector(css: &str) -> Result<Selector, AuditError> {
    Selector::parse(css).map_err(|e| AuditError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

fn srcset_value<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    element.value().attr("srcset").and_then(first_candidate)
}

// "hero.jpg 1x, hero@2x.jpg 2x" -> "hero.jpg"
// Later candidates (higher resolutions) are never checked.
fn first_candidate(value: &str) -> Option<&str> {
    value.split_whitespace().next()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// Empty attribute values produce no reference
fn push(refs: &mut Vec<Reference>, kind: RefKind, value: Option<&str>, page: &str) {
    if let Some(raw) = non_empty(value) {
        refs.push(Reference {
            kind,
            raw_value: raw.to_string(),
            origin_page: page.to_string(),
        });
    }
}
