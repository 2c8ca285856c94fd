use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, StudentsError};

pub const DEFAULT_TABLE_NAME: &str = "Student";
pub const DEFAULT_REGION: &str = "eu-west-1";

/// Inline YAML configuration, used when no config path is given.
pub const CONFIG_ENV_VAR: &str = "STUDENTS_CONFIG";
pub const TABLE_NAME_ENV_VAR: &str = "DYNAMODB_TABLE_NAME";
pub const ENDPOINT_URL_ENV_VAR: &str = "DYNAMODB_ENDPOINT_URL";
pub const REGION_ENV_VAR: &str = "STUDENTS_REGION";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StudentsConfig {
    pub table_name: String,
    pub region: String,
    /// Points the client at DynamoDB Local or another compatible endpoint.
    pub endpoint_url: Option<String>,
    /// Upper bound on items per scan request. `None` lets DynamoDB page by size.
    pub scan_page_limit: Option<i32>,
    pub cors: CorsConfig,
}

/// Headers attached to the fetch response.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allow_headers: String,
    pub allow_origin: String,
    pub allow_methods: String,
}

impl Default for StudentsConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
            scan_page_limit: None,
            cors: CorsConfig::default(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_headers: "Content-Type".to_string(),
            allow_origin: "https://www.example.com".to_string(),
            allow_methods: "OPTIONS,POST,GET".to_string(),
        }
    }
}

/// Loads configuration from `config_path` when given, otherwise from the
/// `STUDENTS_CONFIG` environment variable, otherwise defaults. Environment
/// overrides are applied last and the result is validated.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<StudentsConfig> {
    let mut config = match config_path {
        Some(path) => StudentsConfig::from_file(path)?,
        None if std::env::var_os(CONFIG_ENV_VAR).is_some() => StudentsConfig::from_env()?,
        None => StudentsConfig::default(),
    };

    config.apply_overrides(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

impl StudentsConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            origin: path.to_string(),
            error: Box::new(e),
        })?;
        Self::from_yaml(&content, path)
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let config_str = std::env::var(CONFIG_ENV_VAR)
            .map_err(|_| anyhow::anyhow!("{} environment variable not set", CONFIG_ENV_VAR))?;
        Self::from_yaml(&config_str, CONFIG_ENV_VAR)
    }

    fn from_yaml(content: &str, origin: &str) -> anyhow::Result<Self> {
        let config: StudentsConfig =
            serde_yaml::from_str(content).map_err(|e| ConfigError::LoadFailed {
                origin: origin.to_string(),
                error: Box::new(e),
            })?;
        Ok(config)
    }

    /// Applies single-value overrides. `lookup` is `std::env::var` in
    /// production; tests pass a map.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(table_name) = lookup(TABLE_NAME_ENV_VAR) {
            self.table_name = table_name;
        }
        if let Some(endpoint_url) = lookup(ENDPOINT_URL_ENV_VAR) {
            self.endpoint_url = Some(endpoint_url);
        }
        if let Some(region) = lookup(REGION_ENV_VAR) {
            self.region = region;
        }
    }

    pub fn validate(&self) -> Result<(), StudentsError> {
        let fail = |reason: &str| {
            Err(StudentsError::Config(ConfigError::ValidationFailed {
                reason: reason.to_string(),
            }))
        };

        if self.table_name.trim().is_empty() {
            return fail("Table name cannot be empty");
        }
        if self.region.trim().is_empty() {
            return fail("Region cannot be empty");
        }
        if matches!(self.scan_page_limit, Some(limit) if limit <= 0) {
            return fail("Scan page limit must be positive");
        }
        if self.cors.allow_origin.trim().is_empty() {
            return fail("CORS allowed origin cannot be empty");
        }
        if matches!(&self.endpoint_url, Some(url) if url.trim().is_empty()) {
            return fail("Endpoint URL cannot be blank when set");
        }
        Ok(())
    }
}
