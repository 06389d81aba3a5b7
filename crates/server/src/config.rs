//! # Application Configuration
//!
//! This module defines the configuration structure for the `assetlens-server`
//! and provides the logic for loading it from a `config.yml` file and
//! environment variables, layered on top of the library's defaults.

use assetlens::{
    constants::{
        DEFAULT_FALLBACK_CLASSIFICATION, DEFAULT_MAX_RETRIES, DEFAULT_RESULT_LIMIT,
        DEFAULT_RETRY_DELAY_SECS, MAX_CONTENT_CHARS,
    },
    prompts::{ASSET_EXTRACTION_SYSTEM_PROMPT, ASSET_EXTRACTION_USER_PROMPT},
    ExtractionOptions,
};
use assetlens_search::DEFAULT_DUCKDUCKGO_URL;
use config::{
    Config as ConfigBuilder, Environment, File, FileFormat, Value as ConfigValue,
    ValueKind as ConfigValueKind,
};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::time::Duration;
use tracing::info;

/// The task name under which the extraction prompts are configured.
pub const ASSET_EXTRACTION_TASK: &str = "asset_extraction";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The completion provider.
    pub ai: AiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// A map of tasks, each specifying its prompts.
    #[serde(default)]
    pub tasks: HashMap<String, TaskConfig>,
}

/// Provides a default value for the `port` field if not set in the environment.
fn default_port() -> u16 {
    8002
}

/// Configuration for the completion provider.
#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// The type of provider (`gemini` or `local`).
    pub provider: String,
    /// The API URL. Optional for Gemini, where it is derived from the model.
    pub api_url: Option<String>,
    /// The API key, which can be null for local providers.
    pub api_key: Option<String>,
    pub model_name: Option<String>,
}

/// Configuration for the web search provider.
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_search_base_url")]
    pub base_url: String,
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
}

fn default_search_base_url() -> String {
    DEFAULT_DUCKDUCKGO_URL.to_string()
}

fn default_result_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            result_limit: default_result_limit(),
        }
    }
}

/// Retry and fallback behaviour of the extraction pipeline.
#[derive(Debug, Deserialize, Clone)]
pub struct ExtractionConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
    #[serde(default = "default_fallback_classification")]
    pub fallback_classification: String,
    #[serde(default)]
    pub abort_on_fatal_error: bool,
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_retry_delay_secs() -> u64 {
    DEFAULT_RETRY_DELAY_SECS
}

fn default_max_content_chars() -> usize {
    MAX_CONTENT_CHARS
}

fn default_fallback_classification() -> String {
    DEFAULT_FALLBACK_CLASSIFICATION.to_string()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
            max_content_chars: default_max_content_chars(),
            fallback_classification: default_fallback_classification(),
            abort_on_fatal_error: false,
        }
    }
}

/// Where log lines are written besides stdout.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log file path. An empty string disables the file log.
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
}

fn default_log_file() -> Option<String> {
    Some("asset_extraction.log".to_string())
}

impl LoggingConfig {
    /// The log file path, if file logging is enabled.
    pub fn file_path(&self) -> Option<&str> {
        self.file.as_deref().filter(|path| !path.is_empty())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
        }
    }
}

impl AppConfig {
    /// The pipeline options described by this configuration.
    pub fn extraction_options(&self) -> ExtractionOptions {
        ExtractionOptions {
            max_retries: self.extraction.max_retries,
            retry_delay: Duration::from_secs(self.extraction.retry_delay_secs),
            result_limit: self.search.result_limit,
            max_content_chars: self.extraction.max_content_chars,
            fallback_classification: self.extraction.fallback_classification.clone(),
            abort_on_fatal_error: self.extraction.abort_on_fatal_error,
        }
    }
}

/// Defines the prompts for a specific application task.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TaskConfig {
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub user_prompt: Option<String>,
}

/// Constructs a `config::Value` map of the default, hardcoded tasks from the library.
/// This serves as the base layer of configuration.
fn build_default_tasks() -> HashMap<String, ConfigValue> {
    let tasks = vec![(
        ASSET_EXTRACTION_TASK,
        (ASSET_EXTRACTION_SYSTEM_PROMPT, ASSET_EXTRACTION_USER_PROMPT),
    )];

    tasks
        .into_iter()
        .map(|(name, (sys, user))| {
            let mut table = HashMap::new();
            table.insert("system_prompt".to_string(), ConfigValue::from(sys));
            table.insert("user_prompt".to_string(), ConfigValue::from(user));
            (
                name.to_string(),
                ConfigValue::new(None, ConfigValueKind::Table(table)),
            )
        })
        .collect()
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|_| "".to_string())
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// - Top-level keys like `port` are overridden by `PORT`.
/// - Nested keys are overridden by `ASSETLENS_...` variables
///   (e.g., `ASSETLENS_EXTRACTION__MAX_RETRIES`).
/// - An empty or missing `ai.api_key` is filled from `AI_API_KEY`, then `GOOGLE_API_KEY`.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder()
        // Layer 1: Programmatic defaults from the library.
        .set_default("tasks", build_default_tasks())?;

    // Layer 2: Main Config (with Fallback)
    let main_config_path = if let Some(override_path) = config_path_override {
        override_path.to_string()
    } else {
        let user_config_path = format!("{base_path}/config.yml");
        if std::path::Path::new(&user_config_path).exists() {
            info!("Loading user-defined configuration from '{user_config_path}'.");
            user_config_path
        } else {
            let provider = env::var("AI_PROVIDER").unwrap_or_else(|_| "gemini".to_string());
            let fallback_path = format!("{base_path}/config.{provider}.yml");
            info!("'{user_config_path}' not found. Falling back to '{fallback_path}' based on AI_PROVIDER='{provider}'.");
            fallback_path
        }
    };

    let main_content = read_and_substitute(&main_config_path)?
        .ok_or_else(|| ConfigError::NotFound(format!("Main config file not found at '{main_config_path}'. Please ensure 'config.yml' exists or your AI_PROVIDER is set to load a valid template ('gemini' or 'local').")))?;
    builder = builder.add_source(File::from_str(&main_content, FileFormat::Yaml));

    // Layer 3: User Prompt Overrides (Optional)
    let user_prompt_path = format!("{base_path}/prompt.yml");
    if let Some(user_prompts_content) = read_and_substitute(&user_prompt_path)? {
        info!("Loading user prompt overrides from '{user_prompt_path}'.");
        builder = builder.add_source(File::from_str(&user_prompts_content, FileFormat::Yaml));
    }

    let settings = builder
        // Layer 4: Top-level keys such as PORT.
        .add_source(Environment::default().try_parsing(true))
        // Layer 5: Prefixed environment variables for deeper overrides.
        .add_source(
            Environment::with_prefix("ASSETLENS")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    if config.ai.api_key.as_deref().is_none_or(str::is_empty) {
        config.ai.api_key = ["AI_API_KEY", "GOOGLE_API_KEY"]
            .into_iter()
            .filter_map(|name| env::var(name).ok())
            .find(|key| !key.is_empty())
            .or(config.ai.api_key);
    }

    Ok(config)
}
