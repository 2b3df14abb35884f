/*!
 * Mock provider for testing.
 *
 * This module provides a scripted provider that never touches the network:
 * - `MockProvider::working(text)` - Always returns the given text
 * - `MockProvider::intermittent(text, n)` - Fails every Nth request
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::empty()` - Answers without any text content
 *
 * Every prompt received is recorded so tests can inspect what was sent.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with the given response
    Working(String),
    /// Fails on every Nth request, succeeds otherwise
    Intermittent { response: String, fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns a response without text content
    Empty,
}

/// Mock provider for testing generation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Prompts received, in order
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working(response: impl Into<String>) -> Self {
        Self::new(MockBehavior::Working(response.into()))
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(response: impl Into<String>, fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent {
            response: response.into(),
            fail_every: fail_every.max(1),
        })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Copy of every prompt received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, prompt: &str, _max_tokens: u32) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.prompts.lock().push(prompt.to_string());

        match &self.behavior {
            MockBehavior::Working(response) => Ok(response.clone()),
            MockBehavior::Intermittent { response, fail_every } => {
                if count % fail_every == 0 {
                    Err(ProviderError::ConnectionError(format!("Simulated failure on request {}", count)))
                } else {
                    Ok(response.clone())
                }
            }
            MockBehavior::Failing => Err(ProviderError::AuthenticationError("invalid x-api-key".to_string())),
            MockBehavior::Empty => Err(ProviderError::EmptyResponse),
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
