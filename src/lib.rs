//! aeoscan: AEO Readiness Scanner
//!
//! This library fetches a single web page plus its well-known sibling
//! resources (`/robots.txt`, `/llms.txt`), runs a fixed set of independent
//! checks over the markup, and aggregates them into a 0-100 readiness score
//! with an ordered list of findings.

pub mod analyzer;
pub mod config;
pub mod fetcher;
pub mod leads;
pub mod parser;
pub mod reporter;

use serde::{Deserialize, Serialize};

/// The result of scanning one URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    /// URL that was scanned
    pub url: String,
    /// Overall readiness score (0-100)
    pub score: Score,
    /// Findings in check declaration order
    pub feedback: Vec<Finding>,
    /// Per-check breakdown (empty when the scan failed)
    #[serde(default)]
    pub checks: Vec<CheckSummary>,
    /// Why the scan stopped early, if it did
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<ScanFailure>,
    /// Elapsed time of the primary page fetch in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,
    /// RFC 3339 timestamp, set by the caller once the scan is done
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanned_at: Option<String>,
}

impl ScanReport {
    /// Build the report for a scan that could not reach the page.
    /// The score is always 0 and the feedback is a single line naming the cause.
    pub fn failed(url: &str, failure: ScanFailure) -> Self {
        let finding = Finding::fail("Access", failure.message());
        Self {
            url: url.to_string(),
            score: Score::new(0),
            feedback: vec![finding],
            checks: Vec::new(),
            failure: Some(failure),
            elapsed_ms: None,
            scanned_at: None,
        }
    }

    /// Record when the scan happened. Kept out of the engine so that
    /// identical inputs always produce identical reports.
    pub fn stamped(mut self, at: chrono::DateTime<chrono::Utc>) -> Self {
        self.scanned_at = Some(at.to_rfc3339());
        self
    }

    /// Whether the scan stopped before any check ran
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }

    /// Feedback rendered as glyph-tagged strings, in check order
    pub fn feedback_lines(&self) -> Vec<String> {
        self.feedback.iter().map(|f| f.to_string()).collect()
    }
}

/// Readiness score with band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    /// Numeric score (0-100)
    pub value: u8,
    /// Readiness band
    pub readiness: Readiness,
}

impl Score {
    pub fn new(value: u8) -> Self {
        let value = value.min(100);
        Self {
            value,
            readiness: Readiness::from_score(value),
        }
    }
}

/// Readiness band derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Readiness {
    /// Below 50
    Invisible,
    /// 50-79
    Partial,
    /// 80 and above
    Ready,
}

impl Readiness {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=100 => Readiness::Ready,
            50..=79 => Readiness::Partial,
            _ => Readiness::Invisible,
        }
    }

    /// One-line interpretation shown under the score
    pub fn description(&self) -> &'static str {
        match self {
            Readiness::Invisible => {
                "Your site lacks the basic signals (schema, structure, access) AI engines need to recommend it"
            }
            Readiness::Partial => {
                "You have the basics, but content isn't optimized for answer engines yet"
            }
            Readiness::Ready => "Your technical foundation for AI answer engines is strong",
        }
    }
}

impl std::fmt::Display for Readiness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Readiness::Invisible => write!(f, "INVISIBLE TO AI"),
            Readiness::Partial => write!(f, "PARTIALLY VISIBLE"),
            Readiness::Ready => write!(f, "AI READY"),
        }
    }
}

/// Outcome tag of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Warn,
    Fail,
}

impl Status {
    /// Leading glyph used to tag feedback lines
    pub fn glyph(&self) -> &'static str {
        match self {
            Status::Pass => "✅",
            Status::Warn => "⚠️",
            Status::Fail => "❌",
        }
    }
}

/// A single human-readable feedback line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub status: Status,
    /// Short label, e.g. "Speed"
    pub title: String,
    pub message: String,
}

impl Finding {
    pub fn new(status: Status, title: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn pass(title: &str, message: impl Into<String>) -> Self {
        Self::new(Status::Pass, title, message)
    }

    pub fn warn(title: &str, message: impl Into<String>) -> Self {
        Self::new(Status::Warn, title, message)
    }

    pub fn fail(title: &str, message: impl Into<String>) -> Self {
        Self::new(Status::Fail, title, message)
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.status.glyph(), self.title, self.message)
    }
}

/// Checks, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckId {
    /// robots.txt does not block AI crawlers
    BotAccess,
    /// /llms.txt is published
    AiManifest,
    /// Organization / brand JSON-LD
    EntitySchema,
    /// FAQPage JSON-LD
    FaqSchema,
    /// Links to social profiles
    SocialAuthority,
    /// Enough visible text
    ContentDepth,
    /// meta author
    AuthorAttribution,
    /// Published / modified date metadata
    Freshness,
    /// h1 and a direct-answer lead paragraph
    TopicClarity,
    /// Primary fetch time
    LoadVelocity,
    /// `<title>` and meta description; advisory, worth no points
    Metadata,
}

impl CheckId {
    /// All checks in declaration order
    pub const ALL: [CheckId; 10] = [
        CheckId::BotAccess,
        CheckId::AiManifest,
        CheckId::EntitySchema,
        CheckId::FaqSchema,
        CheckId::SocialAuthority,
        CheckId::ContentDepth,
        CheckId::AuthorAttribution,
        CheckId::Freshness,
        CheckId::TopicClarity,
        CheckId::LoadVelocity,
    ];

    /// Checks that report but never score. They run after the scored
    /// checks and are off unless switched on in config.
    pub const ADVISORY: [CheckId; 1] = [CheckId::Metadata];

    /// Whether the check runs when config does not mention it
    pub fn enabled_by_default(&self) -> bool {
        !Self::ADVISORY.contains(self)
    }

    /// Human-readable name for breakdown output
    pub fn label(&self) -> &'static str {
        match self {
            CheckId::BotAccess => "Bot Access",
            CheckId::AiManifest => "AI Manifest",
            CheckId::EntitySchema => "Entity Schema",
            CheckId::FaqSchema => "FAQ Schema",
            CheckId::SocialAuthority => "Social Authority",
            CheckId::ContentDepth => "Content Depth",
            CheckId::AuthorAttribution => "Author",
            CheckId::Freshness => "Freshness",
            CheckId::TopicClarity => "Topic Clarity",
            CheckId::LoadVelocity => "Load Velocity",
            CheckId::Metadata => "Metadata",
        }
    }

    /// Parse a kebab-case id as used in config files
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .chain(Self::ADVISORY)
            .find(|c| c.to_string() == id)
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckId::BotAccess => write!(f, "bot-access"),
            CheckId::AiManifest => write!(f, "ai-manifest"),
            CheckId::EntitySchema => write!(f, "entity-schema"),
            CheckId::FaqSchema => write!(f, "faq-schema"),
            CheckId::SocialAuthority => write!(f, "social-authority"),
            CheckId::ContentDepth => write!(f, "content-depth"),
            CheckId::AuthorAttribution => write!(f, "author-attribution"),
            CheckId::Freshness => write!(f, "freshness"),
            CheckId::TopicClarity => write!(f, "topic-clarity"),
            CheckId::LoadVelocity => write!(f, "load-velocity"),
            CheckId::Metadata => write!(f, "metadata"),
        }
    }
}

/// Output of one check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub check: CheckId,
    /// Points awarded; negative when a penalty fired
    pub points: i32,
    /// Best possible points for this check
    pub max_points: i32,
    pub lines: Vec<Finding>,
}

impl CheckResult {
    pub fn new(check: CheckId, points: i32, max_points: i32) -> Self {
        Self {
            check,
            points,
            max_points,
            lines: Vec::new(),
        }
    }

    pub fn with_line(mut self, finding: Finding) -> Self {
        self.lines.push(finding);
        self
    }
}

/// Per-check entry in the report breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSummary {
    pub check: CheckId,
    pub points: i32,
    pub max_points: i32,
}

/// Why a scan stopped at the primary fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "detail")]
pub enum ScanFailure {
    /// DNS failure, refused connection, timeout, malformed URL
    Connectivity(String),
    /// The page answered 403
    Blocked,
    /// Any other non-2xx status
    HttpStatus(u16),
}

impl ScanFailure {
    pub fn message(&self) -> String {
        match self {
            ScanFailure::Connectivity(cause) => {
                format!("Could not reach the site ({}). Check the URL.", cause)
            }
            ScanFailure::Blocked => "Security Block (403 Forbidden). The site's firewall or WAF \
                 rejects automated requests, so AI crawlers are likely blocked too."
                .to_string(),
            ScanFailure::HttpStatus(code) => {
                format!("Could not access the site (HTTP {}). Check the URL.", code)
            }
        }
    }
}

/// Public API: scan a single URL with the default HTTP fetcher.
///
/// * `url` - absolute URL including scheme
/// * `config` - optional loaded config; defaults apply when None
pub fn scan_url(url: &str, config: Option<&config::Config>) -> ScanReport {
    let default_config = config::Config::default();
    let config = config.unwrap_or(&default_config);
    let fetcher = fetcher::HttpFetcher::new(config.user_agent.as_deref());
    analyzer::ScanEngine::new(fetcher)
        .with_config(config)
        .scan(url)
}
