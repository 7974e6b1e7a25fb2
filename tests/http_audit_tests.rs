// Tests for auditing a live site over HTTP (wiremock stands in for the server)

use site_auditor::checker::{CheckStatus, RefKind};
use site_auditor::display::RecordingDisplay;
use site_auditor::{audit_site, AuditConfig, AuditMode, HttpSite, RowKind};
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn config(mode: AuditMode, pages: &[&str]) -> AuditConfig {
    AuditConfig::new(mode).with_pages(pages.iter().map(|p| p.to_string()).collect())
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

async fn mount_asset(server: &MockServer, asset_path: &str) {
    Mock::given(method("HEAD"))
        .and(path(asset_path))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

/// The case-repair scenario over real HTTP requests
#[tokio::test]
async fn test_http_image_repair() {
    let server = MockServer::start().await;
    mount_page(&server, "/index.html", r#"<img src="/photo.PNG">"#).await;
    mount_asset(&server, "/photo.png").await;

    let site = HttpSite::new(&server.uri(), Duration::from_secs(5)).unwrap();
    let mut display = RecordingDisplay::new();
    let report = audit_site(&site, &config(AuditMode::Links, &["index.html"]), &mut display).await;

    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].kind, RowKind::Reference(RefKind::Image));
    assert_eq!(report.rows[0].url, "photo.PNG");
    assert_eq!(report.rows[0].status, CheckStatus::Broken);
    assert_eq!(report.rows[1].kind, RowKind::Fixed(RefKind::Image));
    assert_eq!(report.rows[1].url, "photo.png");
    assert_eq!(report.rows[1].status, CheckStatus::Ok);
}

/// Non-success page responses become a single PAGE row
#[tokio::test]
async fn test_http_page_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog.html"))
        .respond_with(ResponseTemplate::new(500).set_body_string(r#"<a href="x.html">x</a>"#))
        .mount(&server)
        .await;

    let site = HttpSite::new(&server.uri(), Duration::from_secs(5)).unwrap();
    let mut display = RecordingDisplay::new();
    let report = audit_site(&site, &config(AuditMode::Links, &["blog.html"]), &mut display).await;

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].kind, RowKind::Page);
    assert_eq!(report.rows[0].url, "blog.html");
}

/// Probes are HEAD requests, issued once per reference, with no retry
#[tokio::test]
async fn test_http_probe_is_single_head_request() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/index.html",
        r#"<link rel="stylesheet" href="css/site.css"><script src="js/gone.js"></script>"#,
    )
    .await;

    Mock::given(method("HEAD"))
        .and(path("/css/site.css"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/js/gone.js"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let site = HttpSite::new(&server.uri(), Duration::from_secs(5)).unwrap();
    let mut display = RecordingDisplay::new();
    let report = audit_site(&site, &config(AuditMode::Links, &["index.html"]), &mut display).await;

    assert_eq!(report.summary.total, 2);
    assert_eq!(report.summary.broken, 1);
    // expect(1) is verified when the server drops
}

/// A slow asset times out and counts as broken without failing the run
#[tokio::test]
async fn test_http_timeout_is_broken() {
    let server = MockServer::start().await;
    mount_page(&server, "/index.html", r#"<img src="slow.png"><a href="about.html">a</a>"#).await;
    mount_asset(&server, "/about.html").await;

    Mock::given(method("HEAD"))
        .and(path("/slow.png"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let site = HttpSite::new(&server.uri(), Duration::from_millis(500)).unwrap();
    let mut display = RecordingDisplay::new();
    let report = audit_site(&site, &config(AuditMode::Links, &["index.html"]), &mut display).await;

    let statuses: Vec<(String, CheckStatus)> = report
        .rows
        .iter()
        .map(|r| (r.url.clone(), r.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("about.html".to_string(), CheckStatus::Ok),
            ("slow.png".to_string(), CheckStatus::Broken),
        ]
    );
}
