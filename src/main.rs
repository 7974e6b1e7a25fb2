// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (tracing, to stderr)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = broken items, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{AuditArgs, Cli, Commands};
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use site_auditor::config::{AuditConfig, AuditMode};
use site_auditor::display::TerminalDisplay;
use site_auditor::report::{save_report, JsonFileSink, LogSink, ReportSink};
use site_auditor::site::{FsSite, HttpSite, SiteSource};
use site_auditor::{audit_site, kpi};

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Unexpected error: print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Diagnostics go to stderr; RUST_LOG overrides the default "warn" level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Returns:
//   Ok(0) = nothing broken
//   Ok(1) = broken items found
//   Err   = could not run at all
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Links(args) => handle_audit(AuditMode::Links, args).await,
        Commands::Images(args) => handle_audit(AuditMode::Images, args).await,
        Commands::Kpi { file, output } => handle_kpi(&file, output.as_deref()).await,
    }
}

// Handles the 'links' and 'images' subcommands
async fn handle_audit(mode: AuditMode, args: AuditArgs) -> Result<i32> {
    let source = build_source(&args)?;
    let config = AuditConfig::new(mode).with_pages(args.pages);

    eprintln!("🔍 Auditing {} ({} pages, {} mode)", source.describe(), config.pages.len(), mode);

    let mut display = TerminalDisplay::new(!args.json);
    let report = audit_site(source.as_ref(), &config, &mut display).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        println!("📊 Summary:");
        println!("   ✅ OK: {}", report.summary.ok);
        println!("   ❌ Broken: {}", report.summary.broken);
        println!("   📋 Total: {}", report.summary.total);
    }

    // Persisting the report never changes the outcome
    let sink: Box<dyn ReportSink> = match &args.report {
        Some(path) => Box::new(JsonFileSink::new(path)),
        None => Box::new(LogSink),
    };
    save_report(sink.as_ref(), &report).await;

    Ok(if report.has_broken() { 1 } else { 0 })
}

fn build_source(args: &AuditArgs) -> Result<Box<dyn SiteSource>> {
    if let Some(base) = &args.site.base {
        let site = HttpSite::new(base, Duration::from_secs(args.timeout))
            .with_context(|| format!("Invalid base URL: {}", base))?;
        return Ok(Box::new(site));
    }

    match &args.site.root {
        Some(root) => {
            if !root.is_dir() {
                anyhow::bail!("Site root is not a directory: {}", root.display());
            }
            Ok(Box::new(FsSite::new(root)))
        }
        None => anyhow::bail!("Either --base or --root is required"),
    }
}

// Handles the 'kpi' subcommand
async fn handle_kpi(file: &Path, output: Option<&Path>) -> Result<i32> {
    let html = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read file: {}", file.display()))?;

    let rendered = kpi::render_kpis(&html);

    match output {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            eprintln!("✅ KPIs written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(0)
}
