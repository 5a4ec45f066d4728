//! Load velocity: how long the primary fetch took.

use super::{Check, ScanContext};
use crate::{CheckId, CheckResult, Finding};
use std::time::Duration;

pub const MAX_POINTS: i32 = 10;
pub const HALF_POINTS: i32 = 5;

pub const FAST_LOAD: Duration = Duration::from_millis(1_500);
pub const SLOW_LOAD: Duration = Duration::from_millis(3_000);

const TITLE: &str = "Speed";

pub struct LoadVelocityCheck;

impl LoadVelocityCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoadVelocityCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for LoadVelocityCheck {
    fn id(&self) -> CheckId {
        CheckId::LoadVelocity
    }

    fn max_points(&self) -> i32 {
        MAX_POINTS
    }

    fn evaluate(&self, ctx: &ScanContext<'_>) -> CheckResult {
        let secs = ctx.elapsed.as_secs_f64();
        let result = CheckResult::new(self.id(), 0, MAX_POINTS);

        if ctx.elapsed < FAST_LOAD {
            CheckResult {
                points: MAX_POINTS,
                ..result
            }
            .with_line(Finding::pass(
                TITLE,
                format!("Excellent load time for AI bots ({:.2}s).", secs),
            ))
        } else if ctx.elapsed < SLOW_LOAD {
            CheckResult {
                points: HALF_POINTS,
                ..result
            }
            .with_line(Finding::warn(
                TITLE,
                format!("Acceptable ({:.2}s), but could be faster.", secs),
            ))
        } else {
            result.with_line(Finding::fail(
                TITLE,
                format!("Too slow ({:.2}s). AI bots may time out.", secs),
            ))
        }
    }
}
