//! Config schema and deserialization

use crate::CheckId;
use reqwest::header::HeaderValue;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Default primary page timeout
pub const DEFAULT_PAGE_TIMEOUT_MS: u64 = 8_000;
/// Default timeout for robots.txt / llms.txt
pub const DEFAULT_AUXILIARY_TIMEOUT_MS: u64 = 3_000;

/// Per-check switch (on, off)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckToggle {
    On,
    /// Skip the check entirely; it contributes neither points nor feedback
    Off,
}

/// What a robots.txt that shuts out AI crawlers costs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BotBlockPolicy {
    /// Subtract the check's weight from the total (default)
    #[default]
    Penalty,
    /// Award nothing, subtract nothing
    Zero,
}

/// Fetch timeouts in milliseconds
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeoutConfig {
    #[serde(default)]
    pub page_ms: Option<u64>,
    #[serde(default)]
    pub auxiliary_ms: Option<u64>,
}

/// Where captured leads are written
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadConfig {
    /// Append-only JSON Lines file
    #[serde(default)]
    pub path: Option<String>,
    /// Endpoint that accepts one JSON record per POST (e.g. a spreadsheet web app)
    #[serde(default)]
    pub webhook: Option<String>,
}

/// Root config structure for .aeoscanrc.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default)]
    pub extends: Option<String>,

    /// Minimum score threshold (exit 1 if below)
    #[serde(default)]
    pub threshold: Option<u8>,

    /// Per-check switches. Key is the check id in kebab-case.
    #[serde(default)]
    pub checks: HashMap<String, CheckToggle>,

    /// Scoring of AI-crawler blocks in robots.txt (default: penalty)
    #[serde(default)]
    pub bot_block_policy: Option<BotBlockPolicy>,

    #[serde(default)]
    pub timeouts: TimeoutConfig,

    /// Override the browser-like User-Agent
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Score the paragraph after the h1 as a direct answer (default: true)
    #[serde(default)]
    pub lead_paragraph: Option<bool>,

    #[serde(default)]
    pub leads: LeadConfig,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(
        mut self,
        cli_threshold: Option<u8>,
        cli_lead_store: Option<String>,
        cli_lead_webhook: Option<String>,
    ) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        if cli_lead_store.is_some() {
            self.leads.path = cli_lead_store;
        }
        if cli_lead_webhook.is_some() {
            self.leads.webhook = cli_lead_webhook;
        }
        self
    }

    /// Whether a check runs. Checks absent from the map keep their default:
    /// scored checks on, advisory checks off.
    pub fn is_check_enabled(&self, check: CheckId) -> bool {
        match self.checks.get(&check.to_string()) {
            Some(toggle) => *toggle == CheckToggle::On,
            None => check.enabled_by_default(),
        }
    }

    pub fn bot_policy(&self) -> BotBlockPolicy {
        self.bot_block_policy.unwrap_or_default()
    }

    pub fn lead_paragraph_enabled(&self) -> bool {
        self.lead_paragraph.unwrap_or(true)
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_millis(self.timeouts.page_ms.unwrap_or(DEFAULT_PAGE_TIMEOUT_MS))
    }

    pub fn auxiliary_timeout(&self) -> Duration {
        Duration::from_millis(
            self.timeouts
                .auxiliary_ms
                .unwrap_or(DEFAULT_AUXILIARY_TIMEOUT_MS),
        )
    }

    /// The configured User-Agent, if it cannot be sent as a header
    pub fn invalid_user_agent(&self) -> Option<&str> {
        self.user_agent
            .as_deref()
            .filter(|ua| ua.trim().is_empty() || HeaderValue::from_str(ua).is_err())
    }

    /// Check ids in the `checks` map that name no known check
    pub fn unknown_check_ids(&self) -> Vec<String> {
        let mut unknown: Vec<String> = self
            .checks
            .keys()
            .filter(|id| CheckId::from_id(id).is_none())
            .cloned()
            .collect();
        unknown.sort();
        unknown
    }

    /// Merge a base config into this one. `extends` is resolved by the
    /// loader before merging and is not carried over.
    pub fn merge_from(&mut self, base: Config) {
        // Base values are overridden by this config's values
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.bot_block_policy.is_none() {
            self.bot_block_policy = base.bot_block_policy;
        }
        if self.user_agent.is_none() {
            self.user_agent = base.user_agent;
        }
        if self.lead_paragraph.is_none() {
            self.lead_paragraph = base.lead_paragraph;
        }
        if self.timeouts.page_ms.is_none() {
            self.timeouts.page_ms = base.timeouts.page_ms;
        }
        if self.timeouts.auxiliary_ms.is_none() {
            self.timeouts.auxiliary_ms = base.timeouts.auxiliary_ms;
        }
        if self.leads.path.is_none() {
            self.leads.path = base.leads.path;
        }
        if self.leads.webhook.is_none() {
            self.leads.webhook = base.leads.webhook;
        }

        // Merge checks (this config takes precedence)
        for (check, toggle) in base.checks {
            self.checks.entry(check).or_insert(toggle);
        }
    }
}
