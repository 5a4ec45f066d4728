//! Console reporter with colored output

use crate::analyzer::AggregateStats;
use crate::{CheckSummary, Finding, Readiness, ScanReport, Status};
use colored::{ColoredString, Colorize};
use std::fmt::Write;

const RULE_WIDTH: usize = 60;
const SCORE_BAR_WIDTH: usize = 20;
const MINI_BAR_WIDTH: usize = 10;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single scan
    pub fn report(&self, report: &ScanReport) {
        print!("{}", self.render(report));
    }

    /// Report multiple scans with summary
    pub fn report_many(&self, reports: &[ScanReport], stats: &AggregateStats) {
        for report in reports {
            self.report(report);
            println!("{}", "─".repeat(RULE_WIDTH));
        }
        print!("{}", self.render_summary(stats));
    }

    /// Report in quiet mode (just score)
    pub fn report_quiet(&self, report: &ScanReport) {
        println!("{}", self.render_quiet(report));
    }

    /// Full report as text
    pub fn render(&self, report: &ScanReport) -> String {
        let mut out = String::new();
        self.write_header(&mut out, report);
        self.write_score(&mut out, report);
        if !report.checks.is_empty() {
            self.write_breakdown(&mut out, &report.checks);
        }
        self.write_findings(&mut out, &report.feedback);
        out.push('\n');
        out
    }

    pub fn render_quiet(&self, report: &ScanReport) -> String {
        format!(
            "{}: {} ({})",
            report.url,
            report.score.value,
            self.colorize_readiness(report.score.readiness)
        )
    }

    pub fn render_summary(&self, stats: &AggregateStats) -> String {
        let mut out = String::new();
        let rule = "═".repeat(RULE_WIDTH);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "{}", self.bold("Summary"));
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "   URLs scanned:  {}", self.bold(&stats.urls_scanned.to_string()));
        let _ = writeln!(
            out,
            "   Average score: {} ({})",
            self.bold(&stats.average_score.value.to_string()),
            self.colorize_readiness(stats.average_score.readiness)
        );
        let _ = writeln!(out, "   Failed scans:  {}", stats.failed_scans);
        let _ = writeln!(out);
        out
    }

    fn write_header(&self, out: &mut String, report: &ScanReport) {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}",
            self.bold(&format!("📊 AEO Readiness Scan: {}", report.url))
        );
        if let Some(ms) = report.elapsed_ms {
            let _ = writeln!(
                out,
                "   Fetched in {:.2}s | Checks: {}",
                ms as f64 / 1000.0,
                report.checks.len()
            );
        }
        if let (true, Some(at)) = (self.verbose, &report.scanned_at) {
            let _ = writeln!(out, "   Scanned at {}", at);
        }
        let _ = writeln!(out);
    }

    fn write_score(&self, out: &mut String, report: &ScanReport) {
        let bar = self.create_score_bar(report.score.value);
        let band = self.colorize_readiness(report.score.readiness);
        let _ = writeln!(out, "   Score: {} {}", bar, band);
        let description = report.score.readiness.description();
        if self.use_colors {
            let _ = writeln!(out, "   {}", description.dimmed());
        } else {
            let _ = writeln!(out, "   {}", description);
        }
        let _ = writeln!(out);
    }

    fn write_breakdown(&self, out: &mut String, checks: &[CheckSummary]) {
        let _ = writeln!(out, "   {}", self.bold("Check Breakdown:"));
        for summary in checks {
            let bar = self.create_mini_bar(summary.points, summary.max_points);
            let score_str = format!("{:>3}/{}", summary.points, summary.max_points);
            let colored_score = if !self.use_colors {
                score_str
            } else if summary.points >= summary.max_points {
                score_str.green().to_string()
            } else if summary.points > 0 {
                score_str.yellow().to_string()
            } else {
                score_str.red().to_string()
            };
            if self.verbose {
                let _ = writeln!(
                    out,
                    "   {} {} {} [{}]",
                    bar,
                    colored_score,
                    summary.check.label(),
                    summary.check
                );
            } else {
                let _ = writeln!(out, "   {} {} {}", bar, colored_score, summary.check.label());
            }
        }
        let _ = writeln!(out);
    }

    fn write_findings(&self, out: &mut String, feedback: &[Finding]) {
        let _ = writeln!(out, "   {}", self.bold("Findings:"));
        for finding in feedback {
            let _ = writeln!(out, "   {}", self.colorize_finding(finding));
        }
    }

    fn colorize_finding(&self, finding: &Finding) -> String {
        let line = finding.to_string();
        if !self.use_colors {
            return line;
        }
        match finding.status {
            Status::Pass => line.green().to_string(),
            Status::Warn => line.yellow().to_string(),
            Status::Fail => line.red().to_string(),
        }
    }

    fn colorize_readiness(&self, readiness: Readiness) -> String {
        let s = readiness.to_string();
        if !self.use_colors {
            return s;
        }
        let colored: ColoredString = match readiness {
            Readiness::Ready => s.green().bold(),
            Readiness::Partial => s.yellow().bold(),
            Readiness::Invisible => s.red().bold(),
        };
        colored.to_string()
    }

    fn bold(&self, s: &str) -> String {
        if self.use_colors {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn create_score_bar(&self, score: u8) -> String {
        let filled = (score as usize * SCORE_BAR_WIDTH) / 100;
        let empty = SCORE_BAR_WIDTH - filled;
        let bar = format!(
            "[{}{}] {:>3}%",
            "█".repeat(filled),
            "░".repeat(empty),
            score
        );
        if self.use_colors {
            if score >= 80 {
                bar.green().to_string()
            } else if score >= 50 {
                bar.yellow().to_string()
            } else {
                bar.red().to_string()
            }
        } else {
            bar
        }
    }

    fn create_mini_bar(&self, points: i32, max: i32) -> String {
        let filled = if max > 0 {
            (points.clamp(0, max) as usize * MINI_BAR_WIDTH) / max as usize
        } else {
            0
        };
        let empty = MINI_BAR_WIDTH - filled;
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CheckId, ScanFailure, Score};

    fn sample() -> ScanReport {
        ScanReport {
            url: "https://example.com/".to_string(),
            score: Score::new(65),
            feedback: vec![
                Finding::fail("Bot Access", "CRITICAL: robots.txt blocks AI crawlers (GPTBot)."),
                Finding::pass("Speed", "Excellent load time for AI bots (0.50s)."),
            ],
            checks: vec![
                CheckSummary {
                    check: CheckId::BotAccess,
                    points: -10,
                    max_points: 10,
                },
                CheckSummary {
                    check: CheckId::LoadVelocity,
                    points: 10,
                    max_points: 10,
                },
            ],
            failure: None,
            elapsed_ms: Some(500),
            scanned_at: Some("2026-01-01T00:00:00+00:00".to_string()),
        }
    }

    #[test]
    fn render_includes_score_band_and_findings() {
        let text = ConsoleReporter::new().without_colors().render(&sample());
        assert!(text.contains("AEO Readiness Scan: https://example.com/"));
        assert!(text.contains(" 65%"));
        assert!(text.contains("PARTIALLY VISIBLE"));
        assert!(text.contains("Fetched in 0.50s"));
        assert!(text.contains("❌ Bot Access: CRITICAL"));
        assert!(text.contains("✅ Speed:"));
    }

    #[test]
    fn breakdown_lists_negative_points() {
        let text = ConsoleReporter::new().without_colors().render(&sample());
        assert!(text.contains("[░░░░░░░░░░] -10/10 Bot Access"));
        assert!(text.contains("[▓▓▓▓▓▓▓▓▓▓]  10/10 Load Velocity"));
    }

    #[test]
    fn findings_keep_report_order() {
        let text = ConsoleReporter::new().without_colors().render(&sample());
        let bot = text.find("Bot Access: CRITICAL").unwrap();
        let speed = text.find("Speed:").unwrap();
        assert!(bot < speed);
    }

    #[test]
    fn failed_scan_has_no_breakdown() {
        let report = ScanReport::failed("https://example.com/", ScanFailure::Blocked);
        let text = ConsoleReporter::new().without_colors().render(&report);
        assert!(!text.contains("Check Breakdown"));
        assert!(text.contains("Security Block (403 Forbidden)"));
        assert!(text.contains("INVISIBLE TO AI"));
    }

    #[test]
    fn quiet_line() {
        let line = ConsoleReporter::new().without_colors().render_quiet(&sample());
        assert_eq!(line, "https://example.com/: 65 (PARTIALLY VISIBLE)");
    }

    #[test]
    fn summary_counts() {
        let stats = AggregateStats {
            urls_scanned: 3,
            average_score: Score::new(42),
            failed_scans: 1,
        };
        let text = ConsoleReporter::new().without_colors().render_summary(&stats);
        assert!(text.contains("URLs scanned:  3"));
        assert!(text.contains("Average score: 42 (INVISIBLE TO AI)"));
        assert!(text.contains("Failed scans:  1"));
    }
}
