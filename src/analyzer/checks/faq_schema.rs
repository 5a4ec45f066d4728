//! FAQ schema: question/answer pairs that answer engines can lift verbatim.

use super::{Check, ScanContext};
use crate::{CheckId, CheckResult, Finding};

pub const MAX_POINTS: i32 = 10;
pub const FAQ_MARKER: &str = "FAQPage";

const TITLE: &str = "FAQ Schema";

pub struct FaqSchemaCheck;

impl FaqSchemaCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FaqSchemaCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for FaqSchemaCheck {
    fn id(&self) -> CheckId {
        CheckId::FaqSchema
    }

    fn max_points(&self) -> i32 {
        MAX_POINTS
    }

    fn evaluate(&self, ctx: &ScanContext<'_>) -> CheckResult {
        let result = CheckResult::new(self.id(), 0, MAX_POINTS);
        let found = ctx.page.schema_types().contains(FAQ_MARKER)
            || ctx.page.schema_corpus().contains(FAQ_MARKER);

        if found {
            CheckResult {
                points: MAX_POINTS,
                ..result
            }
            .with_line(Finding::pass(
                TITLE,
                "FAQPage Schema found. Answers are ready to be quoted.",
            ))
        } else {
            result.with_line(Finding::warn(
                TITLE,
                "No FAQPage Schema. Mark up common questions so AI can cite direct answers.",
            ))
        }
    }
}
