//! Topic clarity: a primary heading, optionally followed by a direct answer.

use super::{Check, ScanContext};
use crate::parser::count_words;
use crate::{CheckId, CheckResult, Finding};

pub const MAX_POINTS: i32 = 10;
/// h1 present but the lead paragraph is missing or badly sized
pub const HEADING_ONLY_POINTS: i32 = 5;

/// A direct answer has more than this many words...
pub const LEAD_MIN_WORDS: usize = 10;
/// ...and fewer than this many
pub const LEAD_MAX_WORDS: usize = 60;

/// Characters of the heading quoted back in feedback
const EXCERPT_CHARS: usize = 30;

const TITLE: &str = "Topic Clarity";
const STRUCTURE_TITLE: &str = "AEO Structure";

pub struct TopicClarityCheck {
    lead_paragraph: bool,
}

impl TopicClarityCheck {
    pub fn new() -> Self {
        Self {
            lead_paragraph: true,
        }
    }

    /// Toggle scoring of the paragraph that follows the h1
    pub fn with_lead_paragraph(mut self, enabled: bool) -> Self {
        self.lead_paragraph = enabled;
        self
    }
}

impl Default for TopicClarityCheck {
    fn default() -> Self {
        Self::new()
    }
}

fn excerpt(text: &str) -> String {
    if text.chars().count() > EXCERPT_CHARS {
        let cut: String = text.chars().take(EXCERPT_CHARS).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

pub fn is_direct_answer(paragraph: &str) -> bool {
    let words = count_words(paragraph);
    words > LEAD_MIN_WORDS && words < LEAD_MAX_WORDS
}

impl Check for TopicClarityCheck {
    fn id(&self) -> CheckId {
        CheckId::TopicClarity
    }

    fn max_points(&self) -> i32 {
        MAX_POINTS
    }

    fn evaluate(&self, ctx: &ScanContext<'_>) -> CheckResult {
        let result = CheckResult::new(self.id(), 0, MAX_POINTS);

        let Some(h1) = ctx.page.h1.as_deref().filter(|h| !h.is_empty()) else {
            return result.with_line(Finding::fail(
                TITLE,
                "No H1 tag found. AI cannot determine page topic.",
            ));
        };
        let heading = Finding::pass(TITLE, format!("H1 tag found: '{}'", excerpt(h1)));

        if !self.lead_paragraph {
            return CheckResult {
                points: MAX_POINTS,
                ..result
            }
            .with_line(heading);
        }

        match ctx.page.lead_paragraph.as_deref() {
            Some(lead) if is_direct_answer(lead) => CheckResult {
                points: MAX_POINTS,
                ..result
            }
            .with_line(heading)
            .with_line(Finding::pass(
                STRUCTURE_TITLE,
                "Direct answer detected immediately after H1.",
            )),
            Some(_) => CheckResult {
                points: HEADING_ONLY_POINTS,
                ..result
            }
            .with_line(heading)
            .with_line(Finding::warn(
                STRUCTURE_TITLE,
                "Intro paragraph is too long or too short. Optimize for 'Direct Answers'.",
            )),
            None => CheckResult {
                points: HEADING_ONLY_POINTS,
                ..result
            }
            .with_line(heading)
            .with_line(Finding::warn(
                STRUCTURE_TITLE,
                "No content found immediately after H1.",
            )),
        }
    }
}
