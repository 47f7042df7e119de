use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub recommend: RecommendOptions,
    #[serde(default)]
    pub search: SearchOptions,
}

/// Remote media catalog API. Every request carries the static API key and
/// the display language as query parameters.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Region used for watch-provider availability lookups.
    #[serde(default = "default_region")]
    pub region: String,
}

/// Federated identity provider (token exchange endpoint).
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct IdentityConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub token_url: String,
    #[serde(default)]
    pub authorize_url: String,
}

/// Per-user document store endpoint. Documents are addressed by user id
/// under `{base_url}/users/{uid}`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default)]
    pub base_url: String,
    /// Poll interval for the document watcher, in seconds.
    #[serde(default = "default_watch_interval")]
    pub watch_interval_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecommendOptions {
    /// Stop fetching candidate pages once the pool reaches this size.
    #[serde(default = "default_pool_target")]
    pub pool_target: usize,
    /// Hard cap on discover pages per request, prevents unbounded loops
    /// against a sparse or exhausted catalog.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    #[serde(default = "default_result_count")]
    pub result_count: usize,
    /// Candidates with fewer public votes than this are dropped.
    #[serde(default = "default_rec_min_votes")]
    pub min_votes: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchOptions {
    #[serde(default = "default_search_min_votes")]
    pub min_votes: u32,
}

fn default_catalog_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_region() -> String {
    "US".to_string()
}

fn default_watch_interval() -> u64 {
    30
}

fn default_pool_target() -> usize {
    120
}

fn default_page_limit() -> u32 {
    10
}

fn default_result_count() -> usize {
    40
}

fn default_rec_min_votes() -> u32 {
    10
}

fn default_search_min_votes() -> u32 {
    20
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_catalog_base_url(),
            language: default_language(),
            region: default_region(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            watch_interval_secs: default_watch_interval(),
        }
    }
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            pool_target: default_pool_target(),
            page_limit: default_page_limit(),
            result_count: default_result_count(),
            min_votes: default_rec_min_votes(),
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_votes: default_search_min_votes(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.catalog.api_key.is_empty() || self.catalog.api_key == "YOUR_API_KEY" {
            return Err(anyhow::anyhow!(
                "Catalog API key is not configured. Run 'reelvault config catalog' first."
            ));
        }
        if self.recommend.page_limit == 0 {
            return Err(anyhow::anyhow!("recommend.page_limit must be at least 1"));
        }
        if self.recommend.result_count == 0 {
            return Err(anyhow::anyhow!("recommend.result_count must be at least 1"));
        }
        if self.store.base_url.is_empty() {
            return Err(anyhow::anyhow!(
                "Document store base_url is not configured. Run 'reelvault config identity' first."
            ));
        }
        Ok(())
    }

    pub fn is_catalog_configured(&self) -> bool {
        !self.catalog.api_key.is_empty() && self.catalog.api_key != "YOUR_API_KEY"
    }

    pub fn is_identity_configured(&self) -> bool {
        !self.identity.client_id.is_empty()
            && !self.identity.token_url.is_empty()
            && !self.store.base_url.is_empty()
    }
}
