//! Freshness: published/modified date metadata.

use super::{Check, ScanContext};
use crate::{CheckId, CheckResult, Finding};
use regex::Regex;
use std::sync::OnceLock;

pub const MAX_POINTS: i32 = 10;

/// Substrings of a meta key that mark it as a date. Keys with empty
/// content never count.
pub const DATE_KEY_MARKERS: &[&str] = &["published", "modified", "updated", "date"];

const TITLE: &str = "Freshness";

fn iso_date() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("valid static regex"))
}

pub struct FreshnessCheck;

impl FreshnessCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FreshnessCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for FreshnessCheck {
    fn id(&self) -> CheckId {
        CheckId::Freshness
    }

    fn max_points(&self) -> i32 {
        MAX_POINTS
    }

    fn evaluate(&self, ctx: &ScanContext<'_>) -> CheckResult {
        let result = CheckResult::new(self.id(), 0, MAX_POINTS);
        let filled = || ctx.page.meta.iter().filter(|(_, content)| !content.is_empty());
        // A date-named key wins; otherwise any meta value holding an ISO date
        let date_meta = filled()
            .find(|(key, _)| DATE_KEY_MARKERS.iter().any(|m| key.contains(m)))
            .or_else(|| filled().find(|(_, content)| iso_date().is_match(content)));

        let Some((key, content)) = date_meta else {
            return result.with_line(Finding::warn(
                TITLE,
                "No publish or update date metadata. AI engines favor content they can date.",
            ));
        };

        let message = match iso_date().find(content) {
            Some(date) => format!("Date metadata found ({}: {}).", key, date.as_str()),
            None => format!("Date metadata found ({}).", key),
        };
        CheckResult {
            points: MAX_POINTS,
            ..result
        }
        .with_line(Finding::pass(TITLE, message))
    }
}
