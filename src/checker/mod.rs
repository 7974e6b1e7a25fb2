// src/checker/mod.rs
// =============================================================================
// This module contains the per-reference checking logic.
//
// Submodules:
// - html: Extracts references (links, images, stylesheets, scripts) from HTML
// - normalize: Rewrites raw references into local paths, classifies them,
//   and repairs broken image paths
// - probe: Collapses a backend probe into OK / BROKEN
//
// This file (mod.rs) is the module root - it re-exports the public API so
// callers can write `checker::normalize_url()`.
// =============================================================================

mod html;
mod normalize;
mod probe;

pub use html::{extract_from_document, extract_references, RefKind, Reference};
pub use normalize::{
    is_external, is_local_image, is_local_url, normalize_url, page_directory, repair_image_path,
};
pub use probe::{check_url, CheckStatus};
