pub mod site;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub search: SearchConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub external_url: Option<String>,
    pub api_rate_limit: u64,
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Dataset file; the bundled dataset is used when unset
    pub dataset_path: Option<PathBuf>,
    pub site_config_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum accepted distance ratio (0.0 = identical, 1.0 = unrelated)
    pub threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub page_size: usize,
    pub api_max_page_size: usize,
    pub max_request_body_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: crate::catalog::search::DEFAULT_THRESHOLD,
        }
    }
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PORT value".to_string()))?;

        let external_url = std::env::var("EXTERNAL_URL").ok();

        let api_rate_limit = std::env::var("API_RATE_LIMIT")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid API_RATE_LIMIT value".to_string()))?;

        let static_dir = std::env::var("STATIC_DIR")
            .unwrap_or_else(|_| "static".to_string())
            .into();

        let dataset_path = std::env::var("DATASET_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let site_config_path = std::env::var("SITE_CONFIG_PATH")
            .unwrap_or_else(|_| "config/site.yaml".to_string())
            .into();

        let threshold = std::env::var("SEARCH_THRESHOLD")
            .unwrap_or_else(|_| crate::catalog::search::DEFAULT_THRESHOLD.to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid SEARCH_THRESHOLD value".to_string()))?;

        let page_size = std::env::var("PAGE_SIZE")
            .unwrap_or_else(|_| "8".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PAGE_SIZE value".to_string()))?;

        let api_max_page_size = std::env::var("API_MAX_PAGE_SIZE")
            .unwrap_or_else(|_| "50".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid API_MAX_PAGE_SIZE value".to_string()))?;

        let max_request_body_size = std::env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| "1048576".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAX_REQUEST_BODY_SIZE value".to_string()))?;

        Ok(Settings {
            server: ServerConfig {
                host,
                port,
                external_url,
                api_rate_limit,
                static_dir,
            },
            catalog: CatalogConfig {
                dataset_path,
                site_config_path,
            },
            search: SearchConfig { threshold },
            pagination: PaginationConfig {
                page_size,
                api_max_page_size,
                max_request_body_size,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if let Some(external_url) = &self.server.external_url {
            let parsed = url::Url::parse(external_url)
                .map_err(|e| Error::Config(format!("Invalid EXTERNAL_URL '{external_url}': {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(Error::Config(
                    "EXTERNAL_URL must be an http or https URL".to_string(),
                ));
            }
        }

        if self.server.api_rate_limit == 0 {
            return Err(Error::Config("API rate limit must be non-zero".to_string()));
        }

        if self.pagination.page_size == 0 || self.pagination.api_max_page_size == 0 {
            return Err(Error::Config("Page size must be non-zero".to_string()));
        }

        if !(0.0..=1.0).contains(&self.search.threshold) {
            return Err(Error::Config(
                "Search threshold must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_settings() -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            external_url: None,
            api_rate_limit: 100,
            static_dir: "static".into(),
        },
        catalog: CatalogConfig {
            dataset_path: None,
            site_config_path: "config/site.yaml".into(),
        },
        search: SearchConfig::default(),
        pagination: PaginationConfig {
            page_size: 8,
            api_max_page_size: 50,
            max_request_body_size: 1048576,
        },
    }
}
