//! AI manifest: is `/llms.txt` published?

use super::{Check, ScanContext};
use crate::fetcher::AuxiliaryFetch;
use crate::{CheckId, CheckResult, Finding};

pub const MAX_POINTS: i32 = 10;

const TITLE: &str = "AI Manifest";

pub struct AiManifestCheck;

impl AiManifestCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AiManifestCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for AiManifestCheck {
    fn id(&self) -> CheckId {
        CheckId::AiManifest
    }

    fn max_points(&self) -> i32 {
        MAX_POINTS
    }

    fn evaluate(&self, ctx: &ScanContext<'_>) -> CheckResult {
        let result = CheckResult::new(self.id(), 0, MAX_POINTS);
        match ctx.manifest {
            // Sites that answer every path with their HTML shell do not publish one
            AuxiliaryFetch::Found(resp) if !resp.is_html_document() => CheckResult {
                points: MAX_POINTS,
                ..result
            }
            .with_line(Finding::pass(
                TITLE,
                "llms.txt found. AI agents get a curated map of the site.",
            )),
            AuxiliaryFetch::Unreachable(cause) => result.with_line(Finding::warn(
                TITLE,
                format!("Could not check for llms.txt ({}).", cause),
            )),
            _ => result.with_line(Finding::warn(
                TITLE,
                "No llms.txt found. Publish one to guide AI agents to your key content.",
            )),
        }
    }
}
