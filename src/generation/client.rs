/*!
 * Generation client.
 *
 * Wraps an optional provider. Without a credential no provider is configured
 * and every request degrades to a placeholder; provider failures degrade to an
 * error sentinel. Neither case is returned as an `Err`: the caller receives a
 * tagged `GenerationOutcome` and decides whether to keep going.
 */

use log::{debug, warn};
use std::fmt;

use crate::app_config::{GenerationConfig, GenerationProvider};
use crate::providers::Provider;
use crate::providers::anthropic::Anthropic;
use crate::providers::openai::OpenAI;

/// Prefix of the sentinel written when no credential is configured
pub const PLACEHOLDER_PREFIX: &str = "[PLACEHOLDER]";

/// Prefix of the sentinel written when the provider call failed
pub const API_ERROR_PREFIX: &str = "[API ERROR]";

/// Full placeholder text written when no credential is configured
pub const PLACEHOLDER_TEXT: &str = "[PLACEHOLDER] Synthetic data would be generated based on the prompt.";

/// Default token budget per request
pub const DEFAULT_MAX_TOKENS: u32 = 2500;

/// Why a request produced a sentinel instead of generated text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradedReason {
    /// No API key was available
    MissingCredential,
    /// The provider call failed
    ProviderFailure(String),
}

impl fmt::Display for DegradedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential => write!(f, "no API credential configured"),
            Self::ProviderFailure(message) => write!(f, "{}", message),
        }
    }
}

/// Result of a generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Text returned by the provider
    Generated(String),
    /// Sentinel text standing in for the document
    Degraded { reason: DegradedReason, sentinel: String },
}

impl GenerationOutcome {
    fn missing_credential() -> Self {
        Self::Degraded {
            reason: DegradedReason::MissingCredential,
            sentinel: PLACEHOLDER_TEXT.to_string(),
        }
    }

    fn provider_failure(message: String) -> Self {
        Self::Degraded {
            sentinel: format!(
                "{} Synthetic data would be generated based on the prompt. Error: {}",
                API_ERROR_PREFIX, message
            ),
            reason: DegradedReason::ProviderFailure(message),
        }
    }

    /// Text to write, generated or sentinel
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) => text,
            Self::Degraded { sentinel, .. } => sentinel,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// Whether file content is a sentinel rather than a generated document
pub fn is_sentinel(content: &str) -> bool {
    content.starts_with(PLACEHOLDER_PREFIX) || content.starts_with(API_ERROR_PREFIX)
}

/// Client issuing one generation request per document
#[derive(Debug)]
pub struct GenerationClient {
    provider: Option<Box<dyn Provider>>,
}

impl GenerationClient {
    /// Create a client around a provider; `None` means no credential is available
    pub fn new(provider: Option<Box<dyn Provider>>) -> Self {
        Self { provider }
    }

    /// Client without a provider: every request returns the placeholder
    pub fn offline() -> Self {
        Self::new(None)
    }

    /// Build the client for the configured provider
    pub fn from_config(config: &GenerationConfig) -> Self {
        let Some(api_key) = config.get_api_key() else {
            warn!(
                "{} not found in environment variables or config. Using placeholder responses.",
                config.provider.api_key_env()
            );
            return Self::offline();
        };

        let provider: Box<dyn Provider> = match config.provider {
            GenerationProvider::Anthropic => Box::new(
                Anthropic::new(api_key, config.get_endpoint(), config.get_model(), config.get_timeout_secs())
                    .with_temperature(config.temperature),
            ),
            GenerationProvider::OpenAI => Box::new(
                OpenAI::new(api_key, config.get_endpoint(), config.get_model(), config.get_timeout_secs())
                    .with_temperature(config.temperature),
            ),
        };

        Self::new(Some(provider))
    }

    /// Whether requests reach a real provider
    pub fn is_online(&self) -> bool {
        self.provider.is_some()
    }

    /// Provider name for logs
    pub fn provider_name(&self) -> &str {
        self.provider.as_ref().map_or("offline", |p| p.name())
    }

    /// Generate text for a prompt
    pub async fn generate(&self, prompt: &str, max_tokens: u32) -> GenerationOutcome {
        let Some(provider) = &self.provider else {
            debug!("No provider configured, returning placeholder");
            return GenerationOutcome::missing_credential();
        };

        match provider.complete(prompt, max_tokens).await {
            Ok(text) => GenerationOutcome::Generated(text),
            Err(e) => {
                warn!("Error calling {} API: {}", provider.name(), e);
                GenerationOutcome::provider_failure(e.to_string())
            }
        }
    }
}
