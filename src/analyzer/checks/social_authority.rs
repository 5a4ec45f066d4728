//! Social authority: links out to the brand's social profiles.

use super::{Check, ScanContext};
use crate::{CheckId, CheckResult, Finding};
use url::Url;

pub const MAX_POINTS: i32 = 10;

/// Platform domains; subdomains (www., m., uk.) match too
pub const SOCIAL_DOMAINS: &[&str] = &[
    "linkedin.com",
    "twitter.com",
    "x.com",
    "instagram.com",
    "youtube.com",
    "facebook.com",
    "tiktok.com",
];

const TITLE: &str = "Social Authority";

pub struct SocialAuthorityCheck;

impl SocialAuthorityCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SocialAuthorityCheck {
    fn default() -> Self {
        Self::new()
    }
}

/// The platform domain an href points at, if any
pub fn social_platform(href: &str) -> Option<&'static str> {
    let url = Url::parse(href).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();
    SOCIAL_DOMAINS.iter().copied().find(|domain| {
        host == *domain
            || host
                .strip_suffix(domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

impl Check for SocialAuthorityCheck {
    fn id(&self) -> CheckId {
        CheckId::SocialAuthority
    }

    fn max_points(&self) -> i32 {
        MAX_POINTS
    }

    fn evaluate(&self, ctx: &ScanContext<'_>) -> CheckResult {
        let result = CheckResult::new(self.id(), 0, MAX_POINTS);

        let mut platforms: Vec<&str> = ctx
            .page
            .anchor_hrefs
            .iter()
            .filter_map(|href| social_platform(href))
            .collect();
        platforms.sort_unstable();
        platforms.dedup();

        if platforms.is_empty() {
            result.with_line(Finding::warn(
                TITLE,
                "No social profile links found. Link your official profiles to corroborate your identity.",
            ))
        } else {
            CheckResult {
                points: MAX_POINTS,
                ..result
            }
            .with_line(Finding::pass(
                TITLE,
                format!("Linked social profiles: {}.", platforms.join(", ")),
            ))
        }
    }
}
