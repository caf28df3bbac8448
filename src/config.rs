use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::analysis::{extract, recommend, tags};
use crate::fetch::{TIMEOUT_SECS_DEFAULT, USER_AGENT_DEFAULT};
use crate::storage::{self, StorageManager};

pub const CONFIG_FILE: &str = "config.yaml";

/// Outbound HTTP settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_user_agent() -> String {
    USER_AGENT_DEFAULT.to_string()
}

fn default_timeout_secs() -> u64 {
    TIMEOUT_SECS_DEFAULT
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Minimum characters a content container must hold to be picked
    #[serde(default = "default_content_threshold")]
    pub content_threshold: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            content_threshold: default_content_threshold(),
        }
    }
}

fn default_content_threshold() -> usize {
    extract::CONTENT_THRESHOLD_DEFAULT
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
        }
    }
}

fn default_max_suggestions() -> usize {
    tags::MAX_SUGGESTIONS
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

fn default_limit() -> usize {
    recommend::DEFAULT_LIMIT
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub suggestions: SuggestionConfig,
    #[serde(default)]
    pub recommendations: RecommendationConfig,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: String,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            bail!("fetch.user_agent must not be empty");
        }

        if self.fetch.timeout_secs == 0 {
            bail!("fetch.timeout_secs must be greater than 0");
        }

        let max = self.suggestions.max_suggestions;
        if !(1..=tags::MAX_SUGGESTIONS).contains(&max) {
            bail!(
                "suggestions.max_suggestions must be between 1 and {}, got {max}",
                tags::MAX_SUGGESTIONS
            );
        }

        if self.recommendations.default_limit == 0 {
            bail!("recommendations.default_limit must be greater than 0");
        }

        Ok(())
    }

    pub fn load_with(base_path: &str) -> anyhow::Result<Self> {
        let store = storage::BackendLocal::new(base_path)
            .with_context(|| format!("failed to create data directory {base_path}"))?;

        // create new if does not exist
        if !store.exists(CONFIG_FILE) {
            log::info!("writing default {CONFIG_FILE} to {base_path}");
            store
                .write(CONFIG_FILE, serde_yml::to_string(&Self::default())?.as_bytes())
                .context("failed to write default config")?;
        }

        let raw = store.read(CONFIG_FILE).context("failed to read config")?;
        let config_str = String::from_utf8(raw).context("config file is not valid utf8")?;
        let mut config: Self = serde_yml::from_str(&config_str).context("config is malformed")?;

        config.base_path = base_path.to_string();

        config.validate()?;

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config)? {
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let store = storage::BackendLocal::new(&self.base_path)?;

        let config_str = serde_yml::to_string(&self)?;
        store
            .write(CONFIG_FILE, config_str.as_bytes())
            .context("failed to save config")?;

        Ok(())
    }
}
