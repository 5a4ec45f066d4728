//! Entity schema: does structured data say who runs the site?

use super::{Check, ScanContext};
use crate::{CheckId, CheckResult, Finding};

pub const MAX_POINTS: i32 = 15;

/// Schema.org types that assert an organization or brand identity
pub const ENTITY_MARKERS: &[&str] = &["Organization", "Brand", "Corporation", "LocalBusiness"];

const TITLE: &str = "Identity";

pub struct EntitySchemaCheck;

impl EntitySchemaCheck {
    pub fn new() -> Self {
        Self
    }

    /// Parsed `@type` names first, then raw substring search over every block
    /// so malformed JSON-LD still counts.
    fn find_marker(&self, ctx: &ScanContext<'_>) -> Option<&'static str> {
        let types = ctx.page.schema_types();
        if let Some(marker) = ENTITY_MARKERS.iter().copied().find(|m| types.contains(*m)) {
            return Some(marker);
        }
        let corpus = ctx.page.schema_corpus();
        ENTITY_MARKERS.iter().copied().find(|m| corpus.contains(m))
    }
}

impl Default for EntitySchemaCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for EntitySchemaCheck {
    fn id(&self) -> CheckId {
        CheckId::EntitySchema
    }

    fn max_points(&self) -> i32 {
        MAX_POINTS
    }

    fn evaluate(&self, ctx: &ScanContext<'_>) -> CheckResult {
        let result = CheckResult::new(self.id(), 0, MAX_POINTS);

        if ctx.page.structured_data.is_empty() {
            return result.with_line(Finding::fail(
                TITLE,
                "Critical Fail. No JSON-LD Schema detected.",
            ));
        }

        match self.find_marker(ctx) {
            Some(marker) => CheckResult {
                points: MAX_POINTS,
                ..result
            }
            .with_line(Finding::pass(
                TITLE,
                format!("'{}' Schema found. LLMs know who you are.", marker),
            )),
            None => result.with_line(Finding::fail(
                TITLE,
                "No 'Organization' Schema found. You are hard for AI to verify.",
            )),
        }
    }
}
