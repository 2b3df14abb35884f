use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};
use url::Url;

use crate::generation::client::DEFAULT_MAX_TOKENS;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Paths of the catalogue, theme table and company profile
    #[serde(default)]
    pub inputs: InputConfig,

    /// Root directory for generated documents
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Company the documents are written for
    #[serde(default)]
    pub company: CompanyConfig,

    /// Generation service config
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Location of the three configuration sources
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InputConfig {
    /// JSON catalogue of document types per platform
    #[serde(default = "default_type_catalogue_path")]
    pub type_catalogue: PathBuf,

    /// CSV table of themes
    #[serde(default = "default_themes_path")]
    pub themes: PathBuf,

    /// Markdown company profile
    #[serde(default = "default_company_profile_path")]
    pub company_profile: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            type_catalogue: default_type_catalogue_path(),
            themes: default_themes_path(),
            company_profile: default_company_profile_path(),
        }
    }
}

/// Company description embedded in every prompt
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CompanyConfig {
    #[serde(default = "default_company_name")]
    pub name: String,

    /// One or two sentences about the business
    #[serde(default = "default_company_description")]
    pub description: String,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: default_company_name(),
            description: default_company_description(),
        }
    }
}

/// Generation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProvider {
    // @provider: Anthropic
    #[default]
    Anthropic,
    // @provider: OpenAI (or any compatible chat completions server)
    OpenAI,
}

impl GenerationProvider {
    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Anthropic => "anthropic".to_string(),
            Self::OpenAI => "openai".to_string(),
        }
    }

    // @returns: Environment variable holding the API key
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::OpenAI => "OPENAI_API_KEY",
        }
    }
}

// Implement Display trait for GenerationProvider
impl std::fmt::Display for GenerationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for GenerationProvider
impl std::str::FromStr for GenerationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAI),
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

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key, the environment variable takes precedence
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
    pub fn new(provider_type: GenerationProvider) -> Self {
        match provider_type {
            GenerationProvider::Anthropic => Self {
                provider_type: "anthropic".to_string(),
                model: default_anthropic_model(),
                api_key: String::new(),
                endpoint: default_anthropic_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            GenerationProvider::OpenAI => Self {
                provider_type: "openai".to_string(),
                model: default_openai_model(),
                api_key: String::new(),
                endpoint: default_openai_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

/// Generation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Provider to use
    #[serde(default)]
    pub provider: GenerationProvider,

    /// Available providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Token budget per document
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature (0.0 to 1.0); the provider default when unset
    #[serde(default)]
    pub temperature: Option<f32>,
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

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_type_catalogue_path() -> PathBuf {
    PathBuf::from("file_generation_types.json")
}

fn default_themes_path() -> PathBuf {
    PathBuf::from("generation_themes.csv")
}

fn default_company_profile_path() -> PathBuf {
    PathBuf::from("sondermind_company_profile.md")
}

fn default_company_name() -> String {
    "SonderMind".to_string()
}

fn default_company_description() -> String {
    "SonderMind is a technology-driven behavioral health company that connects individuals with licensed therapists and psychiatrists. They offer both virtual and in-person therapy services with a focus on personalized care.".to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-5-sonnet-20240620".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

impl Config {
    /// Load a config file, or write and return the defaults when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        let path = path.as_ref();
        if path.exists() {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok((config, false));
        }

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok((config, true))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.inputs.type_catalogue.as_os_str().is_empty()
            || self.inputs.themes.as_os_str().is_empty()
            || self.inputs.company_profile.as_os_str().is_empty()
        {
            return Err(anyhow!("All input paths (type catalogue, themes, company profile) must be set"));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(anyhow!("Output directory must be set"));
        }

        if self.company.name.trim().is_empty() {
            return Err(anyhow!("Company name must not be empty"));
        }

        if self.generation.max_tokens == 0 {
            return Err(anyhow!("max_tokens must be greater than zero"));
        }

        if let Some(temperature) = self.generation.temperature {
            if !(0.0..=1.0).contains(&temperature) {
                return Err(anyhow!("temperature must be between 0.0 and 1.0, got {}", temperature));
            }
        }

        let endpoint = self.generation.get_endpoint();
        Url::parse(&endpoint).with_context(|| format!("Invalid provider endpoint: {}", endpoint))?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            inputs: InputConfig::default(),
            output_dir: default_output_dir(),
            company: CompanyConfig::default(),
            generation: GenerationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl GenerationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    fn get_active_provider_config_mut(&mut self) -> Option<&mut ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers
            .iter_mut()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &GenerationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Override the model of the active provider, adding its entry if needed
    pub fn set_model(&mut self, model: &str) {
        if self.get_active_provider_config().is_none() {
            self.available_providers.push(ProviderConfig::new(self.provider));
        }
        if let Some(provider_config) = self.get_active_provider_config_mut() {
            provider_config.model = model.to_string();
        }
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        // Default fallback based on provider type
        match self.provider {
            GenerationProvider::Anthropic => default_anthropic_model(),
            GenerationProvider::OpenAI => default_openai_model(),
        }
    }

    /// Get the API key for the active provider, preferring the environment
    pub fn get_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var(self.provider.api_key_env()) {
            if !key.trim().is_empty() {
                return Some(key);
            }
        }

        self.get_active_provider_config()
            .map(|p| p.api_key.clone())
            .filter(|key| !key.trim().is_empty())
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        // Default fallback based on provider type
        match self.provider {
            GenerationProvider::Anthropic => default_anthropic_endpoint(),
            GenerationProvider::OpenAI => default_openai_endpoint(),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        self.get_active_provider_config()
            .map(|p| p.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or_else(default_timeout_secs)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: GenerationProvider::default(),
            available_providers: vec![
                ProviderConfig::new(GenerationProvider::Anthropic),
                ProviderConfig::new(GenerationProvider::OpenAI),
            ],
            max_tokens: default_max_tokens(),
            temperature: None,
        }
    }
}
