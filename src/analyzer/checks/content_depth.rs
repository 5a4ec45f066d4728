//! Content depth: is there enough visible text to be worth citing?

use super::{Check, ScanContext};
use crate::{CheckId, CheckResult, Finding};

pub const MAX_POINTS: i32 = 10;
pub const HALF_POINTS: i32 = 5;

/// Fewer words than this earns nothing
pub const THIN_CONTENT_WORDS: usize = 500;
/// More words than this earns full credit. Both boundaries are half credit.
pub const DEEP_CONTENT_WORDS: usize = 1000;

const TITLE: &str = "Content Depth";

pub struct ContentDepthCheck;

impl ContentDepthCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ContentDepthCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for ContentDepthCheck {
    fn id(&self) -> CheckId {
        CheckId::ContentDepth
    }

    fn max_points(&self) -> i32 {
        MAX_POINTS
    }

    fn evaluate(&self, ctx: &ScanContext<'_>) -> CheckResult {
        let words = ctx.page.word_count;
        let result = CheckResult::new(self.id(), 0, MAX_POINTS);

        if words < THIN_CONTENT_WORDS {
            result.with_line(Finding::fail(
                TITLE,
                format!(
                    "Thin content ({} words). AI engines rarely cite pages under {} words.",
                    words, THIN_CONTENT_WORDS
                ),
            ))
        } else if words <= DEEP_CONTENT_WORDS {
            CheckResult {
                points: HALF_POINTS,
                ..result
            }
            .with_line(Finding::warn(
                TITLE,
                format!("Moderate depth ({} words). Expand key topics for full credit.", words),
            ))
        } else {
            CheckResult {
                points: MAX_POINTS,
                ..result
            }
            .with_line(Finding::pass(
                TITLE,
                format!("In-depth content ({} words).", words),
            ))
        }
    }
}
