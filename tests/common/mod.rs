//! Shared fixtures: a canned-response fetcher and a tiny local HTTP server.

#![allow(dead_code)]

use aeoscan::fetcher::{FetchError, FetchResult, Fetcher};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

/// Fetcher that answers from a URL -> response map; unknown URLs are 404
#[derive(Default)]
pub struct StubFetcher {
    responses: HashMap<String, Result<FetchResult, FetchError>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, status: u16, body: &str, elapsed: Duration) -> Self {
        self.response(url, status, body, elapsed, Some("text/html; charset=utf-8"))
    }

    pub fn text(self, url: &str, body: &str) -> Self {
        self.response(url, 200, body, Duration::from_millis(20), Some("text/plain"))
    }

    pub fn error(mut self, url: &str, err: FetchError) -> Self {
        self.responses.insert(url.to_string(), Err(err));
        self
    }

    fn response(
        mut self,
        url: &str,
        status: u16,
        body: &str,
        elapsed: Duration,
        content_type: Option<&str>,
    ) -> Self {
        self.responses.insert(
            url.to_string(),
            Ok(FetchResult {
                status_code: status,
                body: body.as_bytes().to_vec(),
                elapsed,
                final_url: url.to_string(),
                content_type: content_type.map(str::to_string),
            }),
        );
        self
    }
}

impl Fetcher for StubFetcher {
    fn fetch(&self, url: &str, _timeout: Duration) -> Result<FetchResult, FetchError> {
        self.responses.get(url).cloned().unwrap_or_else(|| {
            Ok(FetchResult {
                status_code: 404,
                body: b"not found".to_vec(),
                elapsed: Duration::from_millis(5),
                final_url: url.to_string(),
                content_type: Some("text/plain".to_string()),
            })
        })
    }
}

/// Page with every readiness signal present
pub fn perfect_page() -> String {
    let filler = vec!["insight"; 1100].join(" ");
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Acme Widgets</title>
  <meta name="author" content="Jane Doe">
  <meta property="article:modified_time" content="2025-06-01T08:00:00Z">
  <script type="application/ld+json">{{"@context":"https://schema.org","@type":"Organization","name":"Acme"}}</script>
  <script type="application/ld+json">{{"@context":"https://schema.org","@type":"FAQPage","mainEntity":[]}}</script>
</head>
<body>
  <h1>What is a widget?</h1>
  <p>A widget is a small mechanical part that converts rotation into straight line motion in machines.</p>
  <div>{}</div>
  <footer><a href="https://www.linkedin.com/company/acme">LinkedIn</a></footer>
</body>
</html>"#,
        filler
    )
}

/// Page with none of the signals and 200 words of text
pub fn bare_page() -> String {
    format!(
        "<html><body><div>{}</div></body></html>",
        vec!["word"; 200].join(" ")
    )
}

/// Unrouted path where the server answers with the request headers
pub const ECHO_HEADERS_PATH: &str = "/__headers";

#[derive(Clone)]
pub struct Route {
    pub path: String,
    pub status: u16,
    pub content_type: String,
    pub body: String,
    pub delay: Duration,
}

impl Route {
    pub fn new(path: &str, status: u16, content_type: &str, body: &str) -> Self {
        Self {
            path: path.to_string(),
            status,
            content_type: content_type.to_string(),
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn html(path: &str, body: &str) -> Self {
        Self::new(path, 200, "text/html; charset=utf-8", body)
    }

    pub fn text(path: &str, body: &str) -> Self {
        Self::new(path, 200, "text/plain", body)
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// HTTP/1.1 server on 127.0.0.1 that answers from fixed routes. Lives
/// until the test process exits.
pub struct TestServer {
    addr: SocketAddr,
}

impl TestServer {
    pub fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
        let addr = listener.local_addr().expect("local addr");
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = routes.clone();
                thread::spawn(move || handle(stream, &routes));
            }
        });
        Self { addr }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

fn handle(mut stream: TcpStream, routes: &[Route]) {
    let mut reader = BufReader::new(match stream.try_clone() {
        Ok(s) => s,
        Err(_) => return,
    });
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let mut headers = String::new();
    let mut line = String::new();
    while reader.read_line(&mut line).map(|n| n > 2).unwrap_or(false) {
        headers.push_str(&line);
        line.clear();
    }

    let path = request_line.split_whitespace().nth(1).unwrap_or("/");
    let route = routes.iter().find(|r| r.path == path);
    let (status, content_type, body, delay) = match route {
        Some(r) => (r.status, r.content_type.as_str(), r.body.as_str(), r.delay),
        // Echo the request headers back for inspection
        None if path == ECHO_HEADERS_PATH => (200, "text/plain", headers.as_str(), Duration::ZERO),
        None => (404, "text/plain", "not found", Duration::ZERO),
    };

    thread::sleep(delay);
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        if status == 200 { "OK" } else { "Status" },
        content_type,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
