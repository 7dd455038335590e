//! Settings loading for the scraper.
//!
//! Configuration lives in a JSON file (default `config.json`): the
//! five category sources in display order, the store-selection cookie,
//! user agent, and request timeout. A missing or invalid file falls
//! back to the built-in defaults so the tool runs out of the box.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default browser-like user agent.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default retry count. Carried in configuration but not applied
/// anywhere; the fetch path never retries.
pub const DEFAULT_RETRY_COUNT: u32 = 3;

/// Number of category sources an aggregation run fans out over.
pub const CATEGORY_COUNT: usize = 5;

const BASE_URL: &str = "https://www.fengzhansy.com/wchyzyg/wap.shtml?method=ztmodel&ztid=gfl00";

/// One category page source. Order in the config is the order of the
/// final result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySource {
    pub id: String,
    pub name: String,
    pub url: String,
}

impl CategorySource {
    fn new(id: &str, name: &str, ztid: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            url: format!("{BASE_URL}{ztid}"),
        }
    }
}

/// Scraper settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Category sources, fixed length five, in display order.
    pub categories: Vec<CategorySource>,
    /// Store-selection cookie sent with every request.
    pub cookie: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Inert: declared by the original deployment, never applied to
    /// the fetch path. Kept so existing config files round-trip.
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_retry_count() -> u32 {
    DEFAULT_RETRY_COUNT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories: vec![
                CategorySource::new("fruit-vegetable", "瓜果花菜类", "%E7%93%9C%E6%9E%9C%E8%8A%B1%E8%8F%9C%E7%B1%BB"),
                CategorySource::new("leaf-vegetable", "叶菜类", "%E5%8F%B6%E8%8F%9C%E7%B1%BB"),
                CategorySource::new("root-vegetable", "根茎类", "%E6%A0%B9%E8%8C%8E%E7%B1%BB"),
                CategorySource::new("mushroom", "菌菇类", "%E8%8F%8C%E8%8F%87%E7%B1%BB"),
                CategorySource::new("condiment", "调味菜", "%E8%B0%83%E5%91%B3%E8%8F%9C"),
            ],
            cookie: "shdzarea=%E6%96%87%E5%8D%8E%E8%B7%AF; scsmdid=012; shdzmdname=%E5%87%A4%E5%B1%95%E8%B6%85%E5%B8%82%E6%96%87%E5%8D%8E%E8%B7%AF%E5%BA%97".to_string(),
            user_agent: default_user_agent(),
            timeout: DEFAULT_TIMEOUT_SECS,
            retry_count: DEFAULT_RETRY_COUNT,
        }
    }
}

impl Config {
    /// Load settings from a JSON file, validating the required fields.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings, falling back to defaults with a warning when the
    /// file is missing or invalid.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %path.as_ref().display(),
                    error = %e,
                    "failed to load config, using defaults"
                );
                Self::default()
            }
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.categories.len() != CATEGORY_COUNT {
            anyhow::bail!(
                "expected {} category sources, found {}",
                CATEGORY_COUNT,
                self.categories.len()
            );
        }
        for category in &self.categories {
            if category.url.is_empty() {
                anyhow::bail!("category {} has no URL", category.id);
            }
        }
        if self.cookie.is_empty() {
            anyhow::bail!("config is missing the store cookie");
        }
        Ok(())
    }

    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Find a configured category by id.
    pub fn category(&self, id: &str) -> Option<&CategorySource> {
        self.categories.iter().find(|c| c.id == id)
    }
}
