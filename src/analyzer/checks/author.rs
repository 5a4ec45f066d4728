//! Author attribution via `<meta name="author">`.

use super::{Check, ScanContext};
use crate::{CheckId, CheckResult, Finding};

pub const MAX_POINTS: i32 = 5;

const TITLE: &str = "Author";

pub struct AuthorCheck;

impl AuthorCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AuthorCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for AuthorCheck {
    fn id(&self) -> CheckId {
        CheckId::AuthorAttribution
    }

    fn max_points(&self) -> i32 {
        MAX_POINTS
    }

    fn evaluate(&self, ctx: &ScanContext<'_>) -> CheckResult {
        let result = CheckResult::new(self.id(), 0, MAX_POINTS);
        match ctx.page.meta_content("author").filter(|a| !a.is_empty()) {
            Some(author) => CheckResult {
                points: MAX_POINTS,
                ..result
            }
            .with_line(Finding::pass(TITLE, format!("Attributed to {}.", author))),
            None => result.with_line(Finding::warn(
                TITLE,
                "No author meta tag. Named authors make content easier for AI to trust.",
            )),
        }
    }
}
