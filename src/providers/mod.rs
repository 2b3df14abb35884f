/*!
 * Provider implementations for text generation services.
 *
 * This module contains client implementations for the supported LLM providers:
 * - Anthropic: Anthropic Messages API
 * - OpenAI: OpenAI (or compatible) Chat Completions API
 * - Mock: scripted provider used by tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all LLM providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the generation client.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a single prompt
    ///
    /// # Arguments
    /// * `prompt` - The user prompt
    /// * `max_tokens` - Token budget for the completion
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The first text segment of the response or an error
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, ProviderError>;

    /// Name used in logs
    fn name(&self) -> &str;
}

/// Map a transport error from reqwest to a provider error
pub(crate) fn transport_error(provider: &str, error: reqwest::Error) -> ProviderError {
    if error.is_timeout() || error.is_connect() {
        ProviderError::ConnectionError(format!("{}: {}", provider, error))
    } else {
        ProviderError::RequestFailed(format!("{}: {}", provider, error))
    }
}

pub mod anthropic;
pub mod mock;
pub mod openai;
