//! Configuration loading for aeoscan

mod schema;

pub use schema::{
    BotBlockPolicy, CheckToggle, Config, LeadConfig, TimeoutConfig, DEFAULT_AUXILIARY_TIMEOUT_MS,
    DEFAULT_PAGE_TIMEOUT_MS,
};

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".aeoscanrc.json";

/// Find and load config file with extends resolution. Searches current directory then parents.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if path.exists() {
            Some(path)
        } else {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    } else {
        find_config_in_parents(work_dir)
    };

    let config = match path {
        Some(path) => load_config_with_extends(&path, &mut HashSet::new())?,
        None => Config::default(),
    };

    let unknown = config.unknown_check_ids();
    if !unknown.is_empty() {
        anyhow::bail!("Unknown check id(s) in config: {}", unknown.join(", "));
    }
    if let Some(ua) = config.invalid_user_agent() {
        anyhow::bail!("Invalid userAgent in config: {:?}", ua);
    }

    Ok(config)
}

/// Load a config file and resolve extends chain
fn load_config_with_extends(config_path: &Path, visited: &mut HashSet<PathBuf>) -> Result<Config> {
    // Prevent circular extends
    let canonical = config_path
        .canonicalize()
        .unwrap_or_else(|_| config_path.to_path_buf());
    if !visited.insert(canonical) {
        anyhow::bail!(
            "Circular extends detected in config: {}",
            config_path.display()
        );
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let mut config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in config: {}", config_path.display()))?;

    if let Some(extends) = config.extends.take() {
        let base_config = resolve_extends(config_path, &extends, visited)?;
        config.merge_from(base_config);
    }

    Ok(config)
}

/// Resolve an extends reference (relative to the referencing file, or absolute)
fn resolve_extends(
    config_path: &Path,
    extends: &str,
    visited: &mut HashSet<PathBuf>,
) -> Result<Config> {
    let config_dir = config_path.parent().unwrap_or(Path::new("."));
    let extends_path = if Path::new(extends).is_absolute() {
        PathBuf::from(extends)
    } else {
        config_dir.join(extends)
    };

    let extends_path = if extends_path.extension().is_none() {
        extends_path.with_extension("json")
    } else {
        extends_path
    };

    if !extends_path.exists() {
        anyhow::bail!(
            "Extended config not found: {} (referenced from {})",
            extends_path.display(),
            config_path.display()
        );
    }

    load_config_with_extends(&extends_path, visited)
}

/// Search for .aeoscanrc.json in directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Starter config written by `aeoscan init`
pub fn starter_config(threshold: u8) -> String {
    format!(
        r#"{{
  "threshold": {},
  "botBlockPolicy": "penalty",
  "leadParagraph": true,
  "timeouts": {{
    "pageMs": {},
    "auxiliaryMs": {}
  }},
  "checks": {{
    "bot-access": "on",
    "ai-manifest": "on",
    "entity-schema": "on",
    "faq-schema": "on",
    "social-authority": "on",
    "content-depth": "on",
    "author-attribution": "on",
    "freshness": "on",
    "topic-clarity": "on",
    "load-velocity": "on",
    "metadata": "off"
  }}
}}
"#,
        threshold, DEFAULT_PAGE_TIMEOUT_MS, DEFAULT_AUXILIARY_TIMEOUT_MS
    )
}
