//! Readiness checks. Each one is independent and pure over its inputs.

pub mod ai_manifest;
pub mod author;
pub mod bot_access;
pub mod content_depth;
pub mod entity_schema;
pub mod faq_schema;
pub mod freshness;
pub mod load_velocity;
pub mod metadata;
pub mod social_authority;
pub mod topic_clarity;

pub use ai_manifest::AiManifestCheck;
pub use author::AuthorCheck;
pub use bot_access::BotAccessCheck;
pub use content_depth::ContentDepthCheck;
pub use entity_schema::EntitySchemaCheck;
pub use faq_schema::FaqSchemaCheck;
pub use freshness::FreshnessCheck;
pub use load_velocity::LoadVelocityCheck;
pub use metadata::MetadataCheck;
pub use social_authority::SocialAuthorityCheck;
pub use topic_clarity::TopicClarityCheck;

use crate::config::Config;
use crate::fetcher::AuxiliaryFetch;
use crate::parser::PageDocument;
use crate::{CheckId, CheckResult};
use std::time::Duration;

/// Everything a check may read. Built once per scan.
#[derive(Debug, Clone, Copy)]
pub struct ScanContext<'a> {
    pub page: &'a PageDocument,
    /// Elapsed time of the primary page fetch
    pub elapsed: Duration,
    pub robots: &'a AuxiliaryFetch,
    pub manifest: &'a AuxiliaryFetch,
}

/// Trait for readiness checks
pub trait Check: Send + Sync {
    fn id(&self) -> CheckId;

    /// Best possible points
    fn max_points(&self) -> i32;

    fn evaluate(&self, ctx: &ScanContext<'_>) -> CheckResult;
}

/// The enabled checks in declaration order
pub fn default_checks(config: &Config) -> Vec<Box<dyn Check>> {
    let all: Vec<Box<dyn Check>> = vec![
        Box::new(BotAccessCheck::new().with_policy(config.bot_policy())),
        Box::new(AiManifestCheck::new()),
        Box::new(EntitySchemaCheck::new()),
        Box::new(FaqSchemaCheck::new()),
        Box::new(SocialAuthorityCheck::new()),
        Box::new(ContentDepthCheck::new()),
        Box::new(AuthorCheck::new()),
        Box::new(FreshnessCheck::new()),
        Box::new(TopicClarityCheck::new().with_lead_paragraph(config.lead_paragraph_enabled())),
        Box::new(LoadVelocityCheck::new()),
        Box::new(MetadataCheck::new()),
    ];

    all.into_iter()
        .filter(|check| config.is_check_enabled(check.id()))
        .collect()
}
