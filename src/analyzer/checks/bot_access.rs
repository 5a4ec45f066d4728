//! Bot access: does robots.txt shut AI crawlers out of the whole site?

use super::{Check, ScanContext};
use crate::config::BotBlockPolicy;
use crate::fetcher::AuxiliaryFetch;
use crate::parser::RobotsTxt;
use crate::{CheckId, CheckResult, Finding};

pub const MAX_POINTS: i32 = 10;
/// robots.txt could not be fetched at all
pub const UNVERIFIED_POINTS: i32 = 5;

const TITLE: &str = "Bot Access";

pub struct BotAccessCheck {
    policy: BotBlockPolicy,
}

impl BotAccessCheck {
    pub fn new() -> Self {
        Self {
            policy: BotBlockPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: BotBlockPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn blocked_points(&self) -> i32 {
        match self.policy {
            BotBlockPolicy::Penalty => -MAX_POINTS,
            BotBlockPolicy::Zero => 0,
        }
    }
}

impl Default for BotAccessCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for BotAccessCheck {
    fn id(&self) -> CheckId {
        CheckId::BotAccess
    }

    fn max_points(&self) -> i32 {
        MAX_POINTS
    }

    fn evaluate(&self, ctx: &ScanContext<'_>) -> CheckResult {
        let result = CheckResult::new(self.id(), 0, MAX_POINTS);
        match ctx.robots {
            AuxiliaryFetch::Found(resp) => {
                let robots = RobotsTxt::parse(&resp.text());
                let blocked = robots.blocked_ai_crawlers();
                if blocked.is_empty() {
                    CheckResult {
                        points: MAX_POINTS,
                        ..result
                    }
                    .with_line(Finding::pass(
                        TITLE,
                        "robots.txt allows AI crawlers.",
                    ))
                } else {
                    CheckResult {
                        points: self.blocked_points(),
                        ..result
                    }
                    .with_line(Finding::fail(
                        TITLE,
                        format!(
                            "CRITICAL: robots.txt blocks AI crawlers ({}). Answer engines cannot read this site.",
                            blocked.join(", ")
                        ),
                    ))
                }
            }
            AuxiliaryFetch::Absent(_) => CheckResult {
                points: MAX_POINTS,
                ..result
            }
            .with_line(Finding::pass(
                TITLE,
                "No robots.txt found; AI crawlers are assumed open.",
            )),
            AuxiliaryFetch::Unreachable(cause) => CheckResult {
                points: UNVERIFIED_POINTS,
                ..result
            }
            .with_line(Finding::warn(
                TITLE,
                format!("Could not verify robots.txt ({}).", cause),
            )),
        }
    }
}
