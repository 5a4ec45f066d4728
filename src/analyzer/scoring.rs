//! Score aggregation across check results

use crate::{CheckResult, CheckSummary, Finding, Score};

const MIN_SCORE: i32 = 0;
const MAX_SCORE: i32 = 100;

/// Aggregated outcome of one evaluation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub score: Score,
    /// Findings in check declaration order
    pub feedback: Vec<Finding>,
    pub checks: Vec<CheckSummary>,
    /// Sum of points before clamping; negative when a penalty fired
    pub raw_total: i32,
}

/// Calculator for readiness scores
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Sum points, clamp into [0, 100] and concatenate lines in the order
    /// the results were given.
    pub fn aggregate(results: &[CheckResult]) -> Aggregate {
        let raw_total: i32 = results.iter().map(|r| r.points).sum();
        let value = raw_total.clamp(MIN_SCORE, MAX_SCORE) as u8;

        let feedback = results
            .iter()
            .flat_map(|r| r.lines.iter().cloned())
            .collect();
        let checks = results
            .iter()
            .map(|r| CheckSummary {
                check: r.check,
                points: r.points,
                max_points: r.max_points,
            })
            .collect();

        Aggregate {
            score: Score::new(value),
            feedback,
            checks,
            raw_total,
        }
    }

    /// Best possible total for a set of results
    pub fn max_total(results: &[CheckResult]) -> i32 {
        results.iter().map(|r| r.max_points).sum()
    }
}
