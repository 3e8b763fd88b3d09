//! Tests for the best-effort download side-channel.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use paper_catalog::config::Config;
use paper_catalog::download::{DownloadOutcome, Downloader, suggested_filename};

/// Downloader whose provider origin does NOT match the mock server, so
/// every mock URL counts as cross-origin.
fn cross_origin_downloader(dest: &std::path::Path) -> Downloader {
    let config = Config::for_testing("https://provider.invalid");
    Downloader::new(&config).unwrap().with_dest_dir(dest)
}

/// Downloader treating the mock server as the provider origin.
fn provider_downloader(server: &MockServer, dest: &std::path::Path) -> Downloader {
    let config = Config::for_testing(&server.uri());
    Downloader::new(&config).unwrap().with_dest_dir(dest)
}

#[tokio::test]
async fn test_cross_origin_pdf_is_saved() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/files/paper.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/pdf")
                .set_body_bytes(b"%PDF-1.7 fake".to_vec()),
        )
        .mount(&server)
        .await;

    let downloader = cross_origin_downloader(dir.path());
    let url = format!("{}/files/paper.pdf", server.uri());

    match downloader.fetch(&url, Some("saved.pdf")).await {
        DownloadOutcome::Saved(path) => {
            assert!(path.ends_with("saved.pdf"));
            assert_eq!(std::fs::read(path).unwrap(), b"%PDF-1.7 fake");
        }
        other => panic!("expected save, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cross_origin_html_is_opened_instead() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    // Paywall pages like to answer .pdf URLs with HTML.
    Mock::given(method("GET"))
        .and(path("/files/paper.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/html")
                .set_body_string("<html>login required</html>"),
        )
        .mount(&server)
        .await;

    let downloader = cross_origin_downloader(dir.path());
    let url = format!("{}/files/paper.pdf", server.uri());

    assert_eq!(downloader.fetch(&url, None).await, DownloadOutcome::Opened(url));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_non_pdf_url_opens_without_fetching() {
    let dir = tempfile::tempdir().unwrap();
    let downloader = cross_origin_downloader(dir.path());

    // Article pages are never fetched, just handed back.
    let url = "https://journal.site/article/123";
    assert_eq!(downloader.fetch(url, None).await, DownloadOutcome::Opened(url.to_string()));
}

#[tokio::test]
async fn test_provider_origin_relative_path_saves_without_confirmation() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    // Provider downloads skip the content-type gate, as the UI does.
    Mock::given(method("GET"))
        .and(path("/uploads/cover.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/plain")
                .set_body_string("payload"),
        )
        .mount(&server)
        .await;

    let downloader = provider_downloader(&server, dir.path());

    match downloader.fetch("/uploads/cover.pdf", None).await {
        DownloadOutcome::Saved(path) => assert!(path.ends_with("cover.pdf")),
        other => panic!("expected save, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_falls_back_to_open() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/files/paper.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let downloader = cross_origin_downloader(dir.path());
    let url = format!("{}/files/paper.pdf", server.uri());

    assert_eq!(downloader.fetch(&url, None).await, DownloadOutcome::Opened(url));
}

#[tokio::test]
async fn test_transport_failure_falls_back_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let downloader = cross_origin_downloader(dir.path());

    // Nothing listens on this port.
    let url = "http://127.0.0.1:9/files/paper.pdf";
    assert_eq!(downloader.fetch(url, None).await, DownloadOutcome::Opened(url.to_string()));
}

#[test]
fn test_suggested_filename_matches_provider_ui() {
    assert_eq!(suggested_filename("Emergent Order"), "emergent_order.pdf");
    assert_eq!(suggested_filename("CO₂ & Climate"), "co____climate.pdf");
}

#[test]
fn test_download_target_feeds_the_side_channel() {
    let paper: paper_catalog::Paper = serde_json::from_value(json!({
        "id": 1,
        "papertitle": "Linked",
        "files": [{"url": "https://host/a.pdf"}]
    }))
    .unwrap();

    assert_eq!(paper.download_target(), Some("https://host/a.pdf"));
    assert_eq!(suggested_filename(paper.display_title()), "linked.pdf");
}
