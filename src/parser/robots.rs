//! Minimal robots.txt reader: groups of user agents and their allow/disallow rules.
//! Only answers one question: is a given crawler shut out of the whole site?

/// Crawler tokens used by AI answer engines and training pipelines
pub const AI_CRAWLER_TOKENS: &[&str] = &[
    "GPTBot",
    "ChatGPT-User",
    "CCBot",
    "ClaudeBot",
    "anthropic-ai",
    "Google-Extended",
    "PerplexityBot",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Group {
    /// Lowercased user-agent tokens
    agents: Vec<String>,
    disallow_all: bool,
    allow_all: bool,
}

impl Group {
    fn blocks_everything(&self) -> bool {
        self.disallow_all && !self.allow_all
    }
}

/// Parsed robots exclusion file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsTxt {
    groups: Vec<Group>,
}

impl RobotsTxt {
    /// Parse robots.txt content. Unknown lines are ignored.
    pub fn parse(content: &str) -> Self {
        let mut groups: Vec<Group> = Vec::new();
        let mut current = Group::default();
        let mut in_rules = false;

        for raw in content.lines() {
            let line = raw.split('#').next().unwrap_or("").trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    // A user-agent line after rules starts a new group
                    if in_rules {
                        groups.push(std::mem::take(&mut current));
                        in_rules = false;
                    }
                    current.agents.push(value.to_ascii_lowercase());
                }
                "disallow" => {
                    in_rules = true;
                    if value == "/" {
                        current.disallow_all = true;
                    }
                }
                "allow" => {
                    in_rules = true;
                    if value == "/" {
                        current.allow_all = true;
                    }
                }
                _ => {}
            }
        }
        if !current.agents.is_empty() {
            groups.push(current);
        }

        Self { groups }
    }

    /// Whether `agent` is disallowed from `/`. Uses the agent's own group when
    /// one names it, otherwise the `*` group.
    pub fn blocks_entire_site(&self, agent: &str) -> bool {
        let agent = agent.to_ascii_lowercase();
        let named: Vec<&Group> = self
            .groups
            .iter()
            .filter(|g| g.agents.iter().any(|a| a == &agent))
            .collect();

        if !named.is_empty() {
            return named.iter().any(|g| g.blocks_everything());
        }

        self.groups
            .iter()
            .filter(|g| g.agents.iter().any(|a| a == "*"))
            .any(|g| g.blocks_everything())
    }

    /// AI crawler tokens that are shut out of the whole site
    pub fn blocked_ai_crawlers(&self) -> Vec<&'static str> {
        AI_CRAWLER_TOKENS
            .iter()
            .copied()
            .filter(|token| self.blocks_entire_site(token))
            .collect()
    }
}
