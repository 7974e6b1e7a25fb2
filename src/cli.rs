// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Subcommands:
// - links:  audit links, images, stylesheets and scripts
// - images: audit images only (with case-repair of broken paths)
// - kpi:    fill KPI placeholders in a page from its inline JSON data
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use site_auditor::config::DEFAULT_TIMEOUT_SECS;

#[derive(Parser, Debug)]
#[command(
    name = "site-auditor",
    version,
    about = "Audit a static website for broken links, images and assets",
    long_about = "site-auditor walks a fixed list of pages, extracts every local link, image, \
                  stylesheet and script, and checks that each one exists. \
                  Exit code 0 = all OK, 1 = broken items found, 2 = error."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check links, images, stylesheets and scripts on every page
    ///
    /// Example: site-auditor links --base http://localhost:8000/
    Links(AuditArgs),

    /// Check images only, trying a case fix for broken image paths
    ///
    /// Example: site-auditor images --root ./public
    Images(AuditArgs),

    /// Fill KPI placeholders from a page's inline JSON data
    ///
    /// Example: site-auditor kpi index.html --output dist/index.html
    Kpi {
        /// HTML file containing the inline data script
        file: PathBuf,

        /// Write the rendered page here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// Arguments shared by `links` and `images`
#[derive(Args, Debug)]
pub struct AuditArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Page to audit (repeatable); defaults to the six site pages
    ///
    /// Example: --page index.html --page blog/post.html
    #[arg(long = "page", value_name = "PAGE")]
    pub pages: Vec<String>,

    /// Per-request timeout in seconds (HTTP only)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Also save the full report as JSON to this file (best-effort)
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

// Where the site lives: exactly one of --base or --root
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SiteArgs {
    /// Base URL of a running site, e.g. http://localhost:8000/
    #[arg(long, env = "SITE_AUDITOR_BASE_URL")]
    pub base: Option<String>,

    /// Directory holding the site's static files
    #[arg(long)]
    pub root: Option<PathBuf>,
}
