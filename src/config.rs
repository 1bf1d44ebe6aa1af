use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_DETAIL_CONCURRENCY: usize = 20;
pub const DEFAULT_SCROLL_THRESHOLD: usize = 5;
/// Highest national dex number covered by the name index.
pub const NAME_INDEX_LIMIT: usize = 1025;

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("api base url must not be empty")]
    EmptyApiBase,
    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

/// Runtime settings shared by the store and the HTTP client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub api_base: String,
    pub page_size: usize,
    pub detail_concurrency: usize,
    pub scroll_threshold: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            detail_concurrency: DEFAULT_DETAIL_CONCURRENCY,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
        }
    }
}

impl ExplorerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base.trim().is_empty() {
            return Err(ConfigError::EmptyApiBase);
        }
        if self.page_size == 0 {
            return Err(ConfigError::Zero("page size"));
        }
        if self.detail_concurrency == 0 {
            return Err(ConfigError::Zero("detail concurrency"));
        }
        Ok(())
    }

    fn base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    pub fn first_page_url(&self) -> String {
        format!("{}/pokemon?limit={}", self.base(), self.page_size)
    }

    pub fn name_index_url(&self) -> String {
        format!("{}/pokemon?limit={NAME_INDEX_LIMIT}", self.base())
    }

    pub fn type_url(&self, name: &str) -> String {
        format!("{}/type/{name}", self.base())
    }

    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{name}", self.base())
    }

    pub fn species_url(&self, name: &str) -> String {
        format!("{}/pokemon-species/{name}", self.base())
    }
}

/// Command line flags for [`ExplorerConfig`] plus logging.
#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    /// PokeAPI base URL
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Entries fetched per page
    #[arg(long, default_value = "20", value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: u64,

    /// Maximum concurrent detail requests per page
    #[arg(long, default_value = "20", value_parser = clap::value_parser!(u64).range(1..))]
    pub detail_concurrency: u64,

    /// Rows from the end of the list that trigger loading the next page
    #[arg(long, default_value = "5")]
    pub scroll_threshold: u64,

    /// Write tracing output to this file (filtered by RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn to_config(&self) -> Result<ExplorerConfig, ConfigError> {
        let config = ExplorerConfig {
            api_base: self.api_base.clone(),
            page_size: self.page_size as usize,
            detail_concurrency: self.detail_concurrency as usize,
            scroll_threshold: self.scroll_threshold as usize,
        };
        config.validate()?;
        Ok(config)
    }
}
