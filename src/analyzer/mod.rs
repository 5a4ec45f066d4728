//! Analyzer module - AEO readiness evaluation engine

pub mod checks;
pub mod engine;
pub mod scoring;

pub use checks::{default_checks, Check, ScanContext};
pub use engine::{aggregate_stats, AggregateStats, ScanEngine};
pub use scoring::{Aggregate, ScoreCalculator};
