use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

// ── Router config ─────────────────────────────────────────────────

/// Router settings, usually the `[router]` table of the host's config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Static command prefixes, tried in order. Default: `["!"]`.
    pub prefixes: Vec<String>,
    /// Match prefixes case-insensitively. Default: `false`.
    pub ignore_prefix_case: bool,
    /// Process messages authored by bot accounts. Default: `false`.
    pub bots_allowed: bool,
    /// Process messages authored by the bot's own account. Default: `false`.
    pub self_bot: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            prefixes: vec!["!".to_string()],
            ignore_prefix_case: false,
            bots_allowed: false,
            self_bot: false,
        }
    }
}

impl RouterConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse router config")
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read router config {}", path.display()))?;
        let config = Self::from_toml_str(&contents)?;
        if config.prefixes.iter().any(String::is_empty) {
            tracing::warn!(
                "Router config {:?} contains an empty prefix; every message will be treated as a command",
                path
            );
        }
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize router config")
    }
}
