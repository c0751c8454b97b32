//! Configuration System
//!
//! Layered configuration for the generation client, the document index and logging.
//! Sources are merged by [`ConfigLoader`]: built-in defaults, the global config file,
//! workspace config files, then `APLUS_*` environment variables.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

pub const DEFAULT_ENDPOINT: &str = "http://ollama:11434/v1/llama";
pub const DEFAULT_MODEL: &str = "llama2";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Remote generation service settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Document index settings
    #[serde(default)]
    pub index: IndexConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the remote generation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Optional credential applied when a session starts; still format-checked
    #[serde(default)]
    pub api_key: Option<String>,

    /// Max tokens for each module during parallel population
    #[serde(default = "default_population_max_tokens")]
    pub population_max_tokens: u32,

    /// Max tokens for a manual module execution
    #[serde(default = "default_module_max_tokens")]
    pub module_max_tokens: u32,

    #[serde(default = "default_headline_max_tokens")]
    pub headline_max_tokens: u32,

    #[serde(default = "default_summary_max_tokens")]
    pub summary_max_tokens: u32,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_population_max_tokens() -> u32 {
    150
}

fn default_module_max_tokens() -> u32 {
    1050
}

fn default_headline_max_tokens() -> u32 {
    150
}

fn default_summary_max_tokens() -> u32 {
    512
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            population_max_tokens: default_population_max_tokens(),
            module_max_tokens: default_module_max_tokens(),
            headline_max_tokens: default_headline_max_tokens(),
            summary_max_tokens: default_summary_max_tokens(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GenerationConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate generation settings
    pub fn validate(&self) -> Result<(), String> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err("Endpoint cannot be empty".to_string());
        }
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(format!("Endpoint must be an http(s) URL: {}", endpoint));
        }
        if self.model.trim().is_empty() {
            return Err("Model cannot be empty".to_string());
        }
        if self.population_max_tokens == 0 || self.module_max_tokens == 0 {
            return Err("Max token limits must be positive".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be positive".to_string());
        }
        Ok(())
    }
}

/// Settings for the directory-backed document index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Where the index manifest is persisted
    #[serde(default = "default_persist_dir")]
    pub persist_dir: PathBuf,

    /// File extensions (with leading dot) treated as book documents
    #[serde(default = "default_supported_extensions")]
    pub supported_extensions: Vec<String>,

    /// Upper bound on document text folded into a summary request
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
}

fn default_persist_dir() -> PathBuf {
    PathBuf::from("./client_books")
}

fn default_supported_extensions() -> Vec<String> {
    [
        ".txt", ".md", ".json", ".csv", ".xls", ".xlsx", ".html", ".docx", ".pdf",
    ]
    .iter()
    .map(|ext| ext.to_string())
    .collect()
}

fn default_excerpt_chars() -> usize {
    4000
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            persist_dir: default_persist_dir(),
            supported_extensions: default_supported_extensions(),
            excerpt_chars: default_excerpt_chars(),
        }
    }
}

impl IndexConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.persist_dir.as_os_str().is_empty() {
            return Err("Persist dir cannot be empty".to_string());
        }
        if self.supported_extensions.is_empty() {
            return Err("At least one supported extension is required".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Generation(String),
    Index(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Generation(msg) => write!(f, "Generation: {}", msg),
            ValidationError::Index(msg) => write!(f, "Index: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl PlannerConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.generation.validate() {
            errors.push(ValidationError::Generation(e));
        }
        if let Err(e) = self.index.validate() {
            errors.push(ValidationError::Index(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
