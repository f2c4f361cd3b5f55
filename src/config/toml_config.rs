use crate::utils::error::{CleanError, Result};
use crate::utils::validation::{validate_path, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub store: StoreSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    pub location: String,
    pub timeout_seconds: Option<u64>,
    pub download_dir: Option<String>,
}

impl StoreConfig {
    pub fn from_location(location: &str) -> Self {
        Self {
            store: StoreSection {
                location: location.to_string(),
                timeout_seconds: None,
                download_dir: None,
            },
        }
    }

    /// Loads the store settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CleanError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses the store settings from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CleanError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Substitutes `${VAR_NAME}` placeholders with environment variables.
    /// Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn location(&self) -> &str {
        &self.store.location
    }

    /// HTTP tracking service or local directory registry.
    pub fn is_http(&self) -> bool {
        self.store.location.starts_with("http://") || self.store.location.starts_with("https://")
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.store.timeout_seconds.map(Duration::from_secs)
    }

    pub fn download_dir_or(&self, fallback: &str) -> PathBuf {
        self.store
            .download_dir
            .as_deref()
            .unwrap_or(fallback)
            .into()
    }
}

impl Validate for StoreConfig {
    fn validate(&self) -> Result<()> {
        if self.is_http() {
            validate_url("store.location", &self.store.location)?;
        } else {
            validate_path("store.location", &self.store.location)?;
        }

        if let Some(dir) = &self.store.download_dir {
            validate_path("store.download_dir", dir)?;
        }

        Ok(())
    }
}
