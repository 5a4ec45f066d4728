//! Scan engine - orchestrates fetching, extraction and all checks

use crate::config::Config;
use crate::fetcher::{fetch_auxiliary, Fetcher, AI_MANIFEST_PATH, ROBOTS_PATH};
use crate::parser::PageDocument;
use crate::{CheckResult, ScanFailure, ScanReport, Score};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::checks::{default_checks, Check, ScanContext};
use super::ScoreCalculator;

const FORBIDDEN: u16 = 403;

/// Runs one independent evaluation per URL. Holds no mutable state, so a
/// single engine can be shared across threads.
pub struct ScanEngine<F: Fetcher> {
    fetcher: F,
    config: Config,
    checks: Vec<Box<dyn Check>>,
}

impl<F: Fetcher> ScanEngine<F> {
    /// Create an engine with every check enabled and default timeouts
    pub fn new(fetcher: F) -> Self {
        let config = Config::default();
        let checks = default_checks(&config);
        Self {
            fetcher,
            config,
            checks,
        }
    }

    /// Apply config: check toggles, scoring policies and timeouts
    pub fn with_config(mut self, config: &Config) -> Self {
        self.checks = default_checks(config);
        self.config = config.clone();
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan one URL. Never fails: primary-fetch problems become a
    /// zero-score report with a single line naming the cause.
    pub fn scan(&self, url: &str) -> ScanReport {
        let started = Instant::now();
        debug!(url, "fetching page");

        let primary = match self.fetcher.fetch(url, self.config.page_timeout()) {
            Ok(resp) => resp,
            Err(e) => {
                warn!(url, error = %e, "page fetch failed");
                return ScanReport::failed(url, ScanFailure::Connectivity(e.to_string()));
            }
        };
        if primary.status_code == FORBIDDEN {
            warn!(url, "page fetch blocked with 403");
            return ScanReport::failed(url, ScanFailure::Blocked);
        }
        if !primary.is_success() {
            warn!(url, status = primary.status_code, "page fetch returned non-2xx");
            return ScanReport::failed(url, ScanFailure::HttpStatus(primary.status_code));
        }

        let aux_timeout = self.config.auxiliary_timeout();
        let fetcher: &dyn Fetcher = &self.fetcher;
        let (robots, manifest) = rayon::join(
            || fetch_auxiliary(fetcher, url, ROBOTS_PATH, aux_timeout),
            || fetch_auxiliary(fetcher, url, AI_MANIFEST_PATH, aux_timeout),
        );

        let page = PageDocument::parse_bytes(&primary.body);
        let ctx = ScanContext {
            page: &page,
            elapsed: primary.elapsed,
            robots: &robots,
            manifest: &manifest,
        };
        let report = self.evaluate(url, &ctx);

        info!(
            url,
            score = report.score.value,
            readiness = %report.score.readiness,
            total_ms = started.elapsed().as_millis() as u64,
            "scan complete"
        );
        report
    }

    /// Run every enabled check over already-fetched inputs and aggregate.
    /// Pure: the report carries no timestamp.
    pub fn evaluate(&self, url: &str, ctx: &ScanContext<'_>) -> ScanReport {
        let results: Vec<CheckResult> = self
            .checks
            .iter()
            .map(|check| {
                let result = check.evaluate(ctx);
                debug!(
                    check = %result.check,
                    points = result.points,
                    max = result.max_points,
                    "check evaluated"
                );
                result
            })
            .collect();

        let aggregate = ScoreCalculator::aggregate(&results);
        ScanReport {
            url: url.to_string(),
            score: aggregate.score,
            feedback: aggregate.feedback,
            checks: aggregate.checks,
            failure: None,
            elapsed_ms: Some(ctx.elapsed.as_millis() as u64),
            scanned_at: None,
        }
    }

    /// Scan several URLs in parallel using rayon. Output order matches input.
    pub fn scan_many(&self, urls: &[String]) -> Vec<ScanReport> {
        use rayon::prelude::*;

        urls.par_iter().map(|url| self.scan(url)).collect()
    }
}

/// Get aggregate stats from multiple reports. Failed scans count as 0.
pub fn aggregate_stats(reports: &[ScanReport]) -> AggregateStats {
    if reports.is_empty() {
        return AggregateStats::default();
    }

    let total: u32 = reports.iter().map(|r| r.score.value as u32).sum();
    let average = (total / reports.len() as u32) as u8;

    AggregateStats {
        urls_scanned: reports.len(),
        average_score: Score::new(average),
        failed_scans: reports.iter().filter(|r| r.is_failure()).count(),
    }
}

/// Aggregate statistics from multiple scans
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub urls_scanned: usize,
    pub average_score: Score,
    pub failed_scans: usize,
}

impl Default for AggregateStats {
    fn default() -> Self {
        Self {
            urls_scanned: 0,
            average_score: Score::new(0),
            failed_scans: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckToggle;
    use crate::fetcher::{FetchError, FetchResult};
    use crate::CheckId;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Canned responses keyed by URL; anything else is a 404
    #[derive(Default)]
    struct StubFetcher {
        responses: HashMap<String, Result<FetchResult, FetchError>>,
        requested: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn with(mut self, url: &str, status: u16, body: &str) -> Self {
            self.responses.insert(
                url.to_string(),
                Ok(FetchResult {
                    status_code: status,
                    body: body.as_bytes().to_vec(),
                    elapsed: Duration::from_millis(200),
                    final_url: url.to_string(),
                    content_type: None,
                }),
            );
            self
        }

        fn failing(mut self, url: &str, err: FetchError) -> Self {
            self.responses.insert(url.to_string(), Err(err));
            self
        }
    }

    impl Fetcher for StubFetcher {
        fn fetch(&self, url: &str, _timeout: Duration) -> Result<FetchResult, FetchError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.responses.get(url).cloned().unwrap_or_else(|| {
                Ok(FetchResult {
                    status_code: 404,
                    body: Vec::new(),
                    elapsed: Duration::from_millis(1),
                    final_url: url.to_string(),
                    content_type: None,
                })
            })
        }
    }

    const PAGE: &str = "https://example.com/pricing";

    #[test]
    fn forbidden_page_is_blocked_failure() {
        let engine = ScanEngine::new(StubFetcher::default().with(PAGE, 403, "denied"));
        let report = engine.scan(PAGE);
        assert_eq!(report.failure, Some(ScanFailure::Blocked));
        assert_eq!(report.score.value, 0);
        assert_eq!(report.feedback.len(), 1);
        assert!(report.checks.is_empty());
    }

    #[test]
    fn other_status_is_http_failure() {
        let engine = ScanEngine::new(StubFetcher::default().with(PAGE, 500, "oops"));
        let report = engine.scan(PAGE);
        assert_eq!(report.failure, Some(ScanFailure::HttpStatus(500)));
        assert!(report.feedback[0].message.contains("HTTP 500"));
    }

    #[test]
    fn network_error_is_connectivity_failure() {
        let fetcher = StubFetcher::default().failing(
            PAGE,
            FetchError::Connect("dns error: no such host".to_string()),
        );
        let report = ScanEngine::new(fetcher).scan(PAGE);
        assert!(matches!(report.failure, Some(ScanFailure::Connectivity(ref c)) if c.contains("dns error")));
        assert_eq!(report.score.value, 0);
    }

    #[test]
    fn failed_page_skips_auxiliary_fetches() {
        let engine = ScanEngine::new(StubFetcher::default().with(PAGE, 403, ""));
        engine.scan(PAGE);
        let requested = engine.fetcher.requested.lock().unwrap();
        assert_eq!(requested.as_slice(), &[PAGE.to_string()]);
    }

    #[test]
    fn auxiliary_paths_derive_from_host() {
        let engine = ScanEngine::new(StubFetcher::default().with(PAGE, 200, "<h1>x</h1>"));
        let report = engine.scan(PAGE);
        assert!(report.failure.is_none());
        let mut requested = engine.fetcher.requested.lock().unwrap().clone();
        requested.sort();
        assert_eq!(
            requested,
            vec![
                "https://example.com/llms.txt".to_string(),
                "https://example.com/pricing".to_string(),
                "https://example.com/robots.txt".to_string(),
            ]
        );
    }

    #[test]
    fn every_check_reports_in_order() {
        let engine = ScanEngine::new(StubFetcher::default().with(PAGE, 200, "<p>hello</p>"));
        let report = engine.scan(PAGE);
        let ids: Vec<CheckId> = report.checks.iter().map(|c| c.check).collect();
        assert_eq!(ids, CheckId::ALL.to_vec());
        assert_eq!(report.elapsed_ms, Some(200));
    }

    #[test]
    fn disabled_check_contributes_nothing() {
        let mut config = Config::default();
        config
            .checks
            .insert("load-velocity".to_string(), CheckToggle::Off);
        let engine = ScanEngine::new(StubFetcher::default().with(PAGE, 200, "<p>hello</p>"))
            .with_config(&config);
        let report = engine.scan(PAGE);
        assert_eq!(report.checks.len(), 9);
        assert!(report.feedback.iter().all(|f| f.title != "Speed"));
        // robots absent (10) only
        assert_eq!(report.score.value, 10);
    }

    #[test]
    fn scan_many_preserves_input_order() {
        let fetcher = StubFetcher::default()
            .with("https://a.example/", 200, "<h1>A</h1>")
            .with("https://b.example/", 403, "")
            .with("https://c.example/", 200, "<h1>C</h1>");
        let urls: Vec<String> = ["https://a.example/", "https://b.example/", "https://c.example/"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let reports = ScanEngine::new(fetcher).scan_many(&urls);
        let got: Vec<&str> = reports.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(got, vec!["https://a.example/", "https://b.example/", "https://c.example/"]);
        assert!(reports[1].is_failure());
    }

    #[test]
    fn aggregate_stats_averages_including_failures() {
        let mut ok = ScanReport::failed("https://a.example/", ScanFailure::Blocked);
        ok.failure = None;
        ok.score = Score::new(80);
        let failed = ScanReport::failed("https://b.example/", ScanFailure::Blocked);

        let stats = aggregate_stats(&[ok, failed]);
        assert_eq!(stats.urls_scanned, 2);
        assert_eq!(stats.average_score.value, 40);
        assert_eq!(stats.failed_scans, 1);
    }

    #[test]
    fn aggregate_stats_empty() {
        let stats = aggregate_stats(&[]);
        assert_eq!(stats.urls_scanned, 0);
        assert_eq!(stats.average_score.value, 0);
    }
}
