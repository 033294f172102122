//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::query::{PageRequest, Sort, SortDirection, SortField};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind (e.g., "127.0.0.1:8080")
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Which store implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Postgres,
}

/// Storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Connection string, required for the postgres backend
    pub database_url: Option<String>,

    /// Upper bound on pooled connections
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection
    pub acquire_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::InMemory,
            database_url: None,
            max_connections: 10,
            acquire_timeout_secs: 30,
        }
    }
}

/// Search defaults applied when a request leaves paging or sorting unset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub default_sort_field: String,
    pub default_sort_direction: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: 25,
            max_page_size: 100,
            default_sort_field: SortField::UpdatedAt.as_str().to_string(),
            default_sort_direction: "desc".to_string(),
        }
    }
}

impl SearchConfig {
    /// Clamp a requested page size into `[1, max_page_size]`
    pub fn clamp_page_size(&self, size: Option<usize>) -> usize {
        size.unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }

    /// Sort used when the request names none
    pub fn default_sort(&self) -> Result<Sort, ConfigError> {
        let field = SortField::from_str(&self.default_sort_field).map_err(|e| {
            ConfigError::InvalidValue {
                field: "search.default_sort_field".to_string(),
                value: self.default_sort_field.clone(),
                message: e.to_string(),
            }
        })?;
        Ok(Sort::new(
            field,
            SortDirection::parse_lenient(&self.default_sort_direction),
        ))
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub search: SearchConfig,
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::from(e),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Replace the database URL (e.g. from `DATABASE_URL`)
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.storage.database_url = Some(url.into());
        self
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackend::Postgres
            && self
                .storage
                .database_url
                .as_deref()
                .is_none_or(|url| url.trim().is_empty())
        {
            return Err(invalid(
                "storage.database_url",
                "",
                "required when storage.backend is postgres",
            ));
        }

        if self.storage.max_connections == 0 {
            return Err(invalid("storage.max_connections", "0", "must be at least 1"));
        }

        if self.search.max_page_size == 0 {
            return Err(invalid("search.max_page_size", "0", "must be at least 1"));
        }

        if self.search.default_page_size == 0 {
            return Err(invalid("search.default_page_size", "0", "must be at least 1"));
        }

        if self.search.default_page_size > self.search.max_page_size {
            return Err(invalid(
                "search.default_page_size",
                &self.search.default_page_size.to_string(),
                "must not exceed search.max_page_size",
            ));
        }

        self.search.default_sort()?;

        Ok(())
    }

    /// First page with the configured defaults
    pub fn default_page_request(&self) -> Result<PageRequest, ConfigError> {
        let sort = self.search.default_sort()?;
        PageRequest::with_sort(0, self.search.default_page_size, sort).map_err(|e| {
            ConfigError::InvalidValue {
                field: "search.default_page_size".to_string(),
                value: self.search.default_page_size.to_string(),
                message: e.to_string(),
            }
        })
    }
}

fn invalid(field: &str, value: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}
