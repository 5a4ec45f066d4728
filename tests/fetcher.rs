//! HttpFetcher against a local server, and full scans over real HTTP.

mod common;

use aeoscan::analyzer::ScanEngine;
use aeoscan::fetcher::{fetch_auxiliary, AuxiliaryFetch, FetchError, Fetcher, HttpFetcher};
use aeoscan::{CheckId, ScanFailure};
use common::{perfect_page, Route, TestServer, ECHO_HEADERS_PATH};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

#[test]
fn fetch_reports_status_body_and_content_type() {
    let server = TestServer::start(vec![Route::html("/", "<h1>Hello</h1>")]);
    let result = HttpFetcher::default().fetch(&server.url("/"), TIMEOUT).unwrap();

    assert_eq!(result.status_code, 200);
    assert_eq!(result.text(), "<h1>Hello</h1>");
    assert!(result.content_type.unwrap().starts_with("text/html"));
    assert!(result.elapsed < TIMEOUT);
}

#[test]
fn non_2xx_is_a_result_not_an_error() {
    let server = TestServer::start(vec![Route::new("/", 403, "text/plain", "denied")]);
    let result = HttpFetcher::default().fetch(&server.url("/"), TIMEOUT).unwrap();
    assert_eq!(result.status_code, 403);
    assert!(!result.is_success());
}

#[test]
fn slow_response_times_out() {
    let server = TestServer::start(vec![
        Route::html("/", "<p>late</p>").delayed(Duration::from_millis(1_500))
    ]);
    let err = HttpFetcher::default()
        .fetch(&server.url("/"), Duration::from_millis(200))
        .unwrap_err();
    assert!(matches!(err, FetchError::Timeout(_)), "got {:?}", err);
}

#[test]
fn refused_connection_is_an_error() {
    // Bind then drop to get a port nobody listens on
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let result = HttpFetcher::default().fetch(&format!("http://127.0.0.1:{}/", port), TIMEOUT);
    assert!(result.is_err());
}

#[test]
fn auxiliary_fetch_maps_404_to_absent() {
    let server = TestServer::start(vec![Route::html("/page", "<p>x</p>")]);
    let outcome = fetch_auxiliary(&HttpFetcher::default(), &server.url("/page"), "/llms.txt", TIMEOUT);
    assert_eq!(outcome, AuxiliaryFetch::Absent(404));
}

#[test]
fn full_scan_over_http() {
    let server = TestServer::start(vec![
        Route::html("/", &perfect_page()),
        Route::text("/robots.txt", "User-agent: *\nAllow: /\n"),
        Route::text("/llms.txt", "# Acme\n"),
    ]);
    let report = ScanEngine::new(HttpFetcher::default()).scan(&server.url("/"));

    assert!(report.failure.is_none());
    assert_eq!(report.checks.len(), CheckId::ALL.len());
    // Local responses are fast, so every signal should land
    assert_eq!(report.score.value, 100, "{:#?}", report.feedback);
}

#[test]
fn html_llms_txt_is_a_soft_404() {
    let server = TestServer::start(vec![
        Route::html("/", "<h1>Home</h1>"),
        Route::html("/llms.txt", "<!DOCTYPE html><html><body>Page not found</body></html>"),
    ]);
    let report = ScanEngine::new(HttpFetcher::default()).scan(&server.url("/"));
    let manifest = report
        .checks
        .iter()
        .find(|c| c.check == CheckId::AiManifest)
        .unwrap();
    assert_eq!(manifest.points, 0);
}

#[test]
fn forbidden_over_http_is_blocked() {
    let server = TestServer::start(vec![Route::new("/", 403, "text/html", "<h1>WAF</h1>")]);
    let report = ScanEngine::new(HttpFetcher::default()).scan(&server.url("/"));
    assert_eq!(report.failure, Some(ScanFailure::Blocked));
    assert_eq!(report.score.value, 0);
}

#[test]
fn sends_browser_headers() {
    let server = TestServer::start(vec![]);
    let result = HttpFetcher::default()
        .fetch(&server.url(ECHO_HEADERS_PATH), TIMEOUT)
        .unwrap();
    let headers = result.text().to_ascii_lowercase();
    assert!(headers.contains("user-agent: mozilla/5.0"), "{}", headers);
    assert!(headers.contains("accept: text/html"), "{}", headers);
}

#[test]
fn unusable_user_agent_keeps_browser_headers() {
    let server = TestServer::start(vec![]);
    let result = HttpFetcher::new(Some("bad\nagent"))
        .fetch(&server.url(ECHO_HEADERS_PATH), TIMEOUT)
        .unwrap();
    let headers = result.text().to_ascii_lowercase();
    assert!(headers.contains("user-agent: mozilla/5.0"), "{}", headers);
    assert!(!headers.contains("bad"), "{}", headers);
}
