//! Page title and meta description. Advisory: reported, never scored.

use super::{Check, ScanContext};
use crate::{CheckId, CheckResult, Finding};

pub const MAX_POINTS: i32 = 0;

const TITLE: &str = "Meta";

pub struct MetadataCheck;

impl MetadataCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MetadataCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for MetadataCheck {
    fn id(&self) -> CheckId {
        CheckId::Metadata
    }

    fn max_points(&self) -> i32 {
        MAX_POINTS
    }

    fn evaluate(&self, ctx: &ScanContext<'_>) -> CheckResult {
        let result = CheckResult::new(self.id(), 0, MAX_POINTS);
        let has_title = ctx.page.title.is_some();
        let has_description = ctx
            .page
            .meta_content("description")
            .is_some_and(|d| !d.is_empty());

        let finding = match (has_title, has_description) {
            (true, true) => Finding::pass(TITLE, "Title and description present."),
            (true, false) => Finding::warn(TITLE, "Missing meta description."),
            (false, true) => Finding::warn(TITLE, "Missing page title."),
            (false, false) => Finding::warn(TITLE, "Missing page title and meta description."),
        };
        result.with_line(finding)
    }
}
