use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles loading, validating and saving the JSON configuration
/// file. The language pair is fixed to Spanish -> English; it is still kept in
/// the file so the backends can read their codes from one place.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Chunking limits
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Where download artifacts are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: self-hosted LibreTranslate (OPUS-MT / Argos models)
    #[default]
    LibreTranslate,
    // @provider: Ollama
    Ollama,
    // @provider: deterministic offline engine
    Mock,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::LibreTranslate => "LibreTranslate",
            Self::Ollama => "Ollama",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::LibreTranslate => "libretranslate".to_string(),
            Self::Ollama => "ollama".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "libretranslate" => Ok(Self::LibreTranslate),
            "ollama" => Ok(Self::Ollama),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name (Ollama only)
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key (optional for LibreTranslate)
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::LibreTranslate => Self {
                provider_type: "libretranslate".to_string(),
                model: String::new(),
                api_key: String::new(),
                endpoint: default_libretranslate_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Ollama => Self {
                provider_type: "ollama".to_string(),
                model: default_ollama_model(),
                api_key: String::new(),
                endpoint: default_ollama_endpoint(),
                timeout_secs: default_ollama_timeout_secs(),
            },
            TranslationProvider::Mock => Self {
                provider_type: "mock".to_string(),
                model: String::new(),
                api_key: String::new(),
                endpoint: String::new(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

/// Limits applied by the chunker and the backend adapter
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChunkingConfig {
    /// Maximum characters per chunk (a single longer line is kept whole)
    #[serde(default = "default_max_chunk_length")]
    pub max_chunk_length: usize,

    /// Generation ceiling passed to the backend for each chunk
    #[serde(default = "default_max_generation_length")]
    pub max_generation_length: u32,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_length: default_max_chunk_length(),
            max_generation_length: default_max_generation_length(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// System prompt template for prompt-driven backends
    /// Placeholders: {source_language}, {target_language}
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff multiplier for retries (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Keep translated chunks in memory for the lifetime of the process
    #[serde(default = "default_true")]
    pub cache_enabled: bool,

    /// Probe the backend once when the engine is constructed
    #[serde(default = "default_true")]
    pub verify_connection: bool,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            temperature: default_temperature(),
            cache_enabled: true,
            verify_connection: true,
        }
    }
}

/// Download artifact settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Directory receiving the translated artifacts
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "es".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_max_chunk_length() -> usize {
    450
}

fn default_max_generation_length() -> u32 {
    512
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_ollama_timeout_secs() -> u64 {
    120
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000 // doubled on each retry
}

fn default_temperature() -> f32 {
    0.1
}

fn default_true() -> bool {
    true
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_libretranslate_endpoint() -> String {
    "http://localhost:5000".to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.1".to_string()
}

fn default_system_prompt() -> String {
    "You are a professional translator. Translate the following text from {source_language} to {target_language}. Only respond with the translated text, without any explanations or notes.".to_string()
}

impl Config {
    /// Load a configuration file, or write the defaults to `path` when it does not exist yet
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            Ok(config)
        } else {
            log::warn!("Config file not found at {:?}, creating default config.", path);
            let config = Config::default();
            let config_json = serde_json::to_string_pretty(&config)
                .context("Failed to serialize default config to JSON")?;
            std::fs::write(path, config_json)
                .with_context(|| format!("Failed to write default config to file: {:?}", path))?;
            Ok(config)
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::get_language_name(&self.source_language)?;
        crate::language_utils::get_language_name(&self.target_language)?;

        // Only the Spanish -> English pair is supported
        if !crate::language_utils::language_codes_match(&self.source_language, "es")
            || !crate::language_utils::language_codes_match(&self.target_language, "en")
        {
            return Err(anyhow!(
                "Unsupported language pair {} -> {}; only es -> en is available",
                self.source_language,
                self.target_language
            ));
        }

        if self.chunking.max_chunk_length == 0 {
            return Err(anyhow!("chunking.max_chunk_length must be greater than zero"));
        }
        if self.chunking.max_generation_length == 0 {
            return Err(anyhow!("chunking.max_generation_length must be greater than zero"));
        }

        if self.translation.provider != TranslationProvider::Mock
            && self.translation.get_endpoint().is_empty()
        {
            return Err(anyhow!(
                "No endpoint configured for provider {}",
                self.translation.provider.display_name()
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            chunking: ChunkingConfig::default(),
            translation: TranslationConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter().find(|p| p.provider_type == provider_str)
    }

    /// Mutable access to the active provider configuration, inserting the defaults if absent
    pub fn active_provider_config_mut(&mut self) -> &mut ProviderConfig {
        let provider_str = self.provider.to_lowercase_string();
        let index = match self.available_providers.iter().position(|p| p.provider_type == provider_str) {
            Some(index) => index,
            None => {
                self.available_providers.push(ProviderConfig::new(self.provider));
                self.available_providers.len() - 1
            }
        };
        &mut self.available_providers[index]
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        match self.provider {
            TranslationProvider::Ollama => default_ollama_model(),
            TranslationProvider::LibreTranslate | TranslationProvider::Mock => String::new(),
        }
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        match self.provider {
            TranslationProvider::LibreTranslate => default_libretranslate_endpoint(),
            TranslationProvider::Ollama => default_ollama_endpoint(),
            TranslationProvider::Mock => String::new(),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        match self.get_active_provider_config() {
            Some(provider_config) if provider_config.timeout_secs > 0 => provider_config.timeout_secs,
            _ => default_timeout_secs(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: vec![
                ProviderConfig::new(TranslationProvider::LibreTranslate),
                ProviderConfig::new(TranslationProvider::Ollama),
            ],
            common: TranslationCommonConfig::default(),
        }
    }
}
