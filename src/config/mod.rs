// src/config/mod.rs
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// File stem searched in the working directory (`dashboard.toml`, `dashboard.ron`, ...).
pub const CONFIG_FILE_STEM: &str = "dashboard";
pub const ENV_PREFIX: &str = "FEEDBACK";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub dataset_path: PathBuf,
    /// Rows kept from the dataset file.
    pub load_limit: usize,
    /// Leading rows sent to the classifier on each analysis pass.
    pub analyze_limit: usize,
    pub id_column: String,
    pub comment_column: String,
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data").join("feedback student.csv"),
            load_limit: 50,
            analyze_limit: 5,
            id_column: "Id".to_string(),
            comment_column: "comment".to_string(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.0,
            max_tokens: 10,
            timeout_secs: 30,
        }
    }
}

impl DashboardConfig {
    /// Defaults, overridden by an optional `dashboard.*` file, overridden by
    /// `FEEDBACK_*` environment variables (`__` separates nested keys).
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(CONFIG_FILE_STEM, ENV_PREFIX)
    }

    fn from_sources(file_stem: &str, env_prefix: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(file_stem).required(false))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: DashboardConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.load_limit == 0 {
            return Err(ConfigError::Invalid("load_limit must be at least 1".into()));
        }
        if self.analyze_limit == 0 {
            return Err(ConfigError::Invalid("analyze_limit must be at least 1".into()));
        }
        if self.id_column.trim().is_empty() || self.comment_column.trim().is_empty() {
            return Err(ConfigError::Invalid("column names must not be empty".into()));
        }
        self.classifier.validate()
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("classifier.base_url must not be empty".into()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("classifier.model must not be empty".into()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid(format!(
                "classifier.temperature must be within 0..=2, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::Invalid("classifier.max_tokens must be at least 1".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("classifier.timeout_secs must be at least 1".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API key, if the configured variable is set and non-blank.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}
