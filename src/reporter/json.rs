//! JSON reporter for machine-readable output

use crate::analyzer::AggregateStats;
use crate::ScanReport;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report a single scan as JSON
    pub fn report(&self, report: &ScanReport) -> String {
        self.encode(report, "{}")
    }

    /// Report with summary
    pub fn report_with_summary(&self, reports: &[ScanReport], stats: &AggregateStats) -> String {
        let output = JsonOutput {
            results: reports,
            summary: JsonSummary {
                urls_scanned: stats.urls_scanned,
                average_score: stats.average_score.value,
                average_readiness: stats.average_score.readiness.to_string(),
                failed_scans: stats.failed_scans,
            },
        };
        self.encode(&output, "{}")
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        encoded.unwrap_or_else(|_| fallback.to_string())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: &'a [ScanReport],
    summary: JsonSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    urls_scanned: usize,
    average_score: u8,
    average_readiness: String,
    failed_scans: usize,
}
