use crate::patterns::{self, ContentRule, RegexRule};
use crate::scoring::{ScoringEngine, Thresholds, MAX_RISK_SCORE};
use crate::taxonomy::{CategoryRule, Taxonomy};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternConfig {
    pub name: String,
    pub pattern: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub thresholds: Thresholds,
    /// Replaces the built-in taxonomy, in this order.
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryRule>,
    #[serde(default = "default_url_whitelist")]
    pub url_whitelist: Vec<String>,
    /// Evaluated after the built-in content rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_patterns: Vec<PatternConfig>,
}

fn default_categories() -> Vec<CategoryRule> {
    Taxonomy::default_rules()
}

fn default_url_whitelist() -> Vec<String> {
    patterns::DEFAULT_URL_WHITELIST
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            categories: default_categories(),
            url_whitelist: default_url_whitelist(),
            extra_patterns: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file '{path}'"))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid configuration in '{path}'"))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file '{path}'"))?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let Thresholds {
            safe_below,
            fraud_at,
        } = self.thresholds;
        if safe_below == 0 || safe_below > fraud_at || fraud_at > MAX_RISK_SCORE {
            bail!(
                "Thresholds must satisfy 0 < safe_below <= fraud_at <= {MAX_RISK_SCORE} (got {safe_below}, {fraud_at})"
            );
        }

        let mut seen = HashSet::new();
        for rule in &self.categories {
            if !seen.insert(rule.category) {
                bail!("Category '{}' is listed more than once", rule.category);
            }
            if rule.keywords.is_empty() {
                bail!("Category '{}' has no keywords", rule.category);
            }
            // An empty keyword would match every message.
            if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                bail!("Category '{}' has an empty keyword", rule.category);
            }
        }

        for pattern in &self.extra_patterns {
            if pattern.name.trim().is_empty() || pattern.pattern.is_empty() {
                bail!("Extra patterns need both a name and a pattern");
            }
        }

        Ok(())
    }

    /// Validates the configuration and compiles every rule into an engine.
    pub fn build_engine(&self) -> anyhow::Result<ScoringEngine> {
        self.validate()?;

        let mut rules: Vec<Box<dyn ContentRule>> = patterns::default_rules(&self.url_whitelist);
        for extra in &self.extra_patterns {
            let rule = RegexRule::new(&extra.name, &extra.pattern, &extra.description)
                .with_context(|| format!("Invalid regex in pattern '{}'", extra.name))?;
            rules.push(Box::new(rule));
        }

        log::info!(
            "Scoring engine ready: {} categories, {} content rules",
            self.categories.len(),
            rules.len()
        );

        Ok(ScoringEngine::new(
            Taxonomy::new(self.categories.clone()),
            rules,
            self.thresholds,
        ))
    }
}
