use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the show catalog API
    #[serde(default = "default_catalog_api_url")]
    pub catalog_api_url: String,

    /// Maximum number of shows kept in the catalog cache
    #[serde(default = "default_catalog_limit")]
    pub catalog_limit: usize,

    /// Number of shows per trending page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Timeout applied to every catalog request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// File holding favorites and personal ratings
    #[serde(default = "default_preferences_path")]
    pub preferences_path: PathBuf,
}

fn default_catalog_api_url() -> String {
    "https://api.tvmaze.com".to_string()
}

fn default_catalog_limit() -> usize {
    20
}

fn default_page_size() -> usize {
    20
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("cinescope-preferences.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_api_url: default_catalog_api_url(),
            catalog_limit: default_catalog_limit(),
            page_size: default_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
            preferences_path: default_preferences_path(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.page_size == 0 {
            anyhow::bail!("PAGE_SIZE must be greater than zero");
        }
        if self.catalog_limit == 0 {
            anyhow::bail!("CATALOG_LIMIT must be greater than zero");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
