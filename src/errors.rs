/*!
 * Error types for the synthdoc application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::ProfileSection;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The API answered but returned no text segment
    #[error("API response contained no text content")]
    EmptyResponse,
}

impl ProviderError {
    /// Map a non-success HTTP status and body to the matching variant
    pub fn from_status(status_code: u16, message: String) -> Self {
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }
}

/// Errors raised while loading the type catalogue, the theme table or the company profile
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration source does not exist
    #[error("Configuration source not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A configuration source exists but could not be read or parsed
    #[error("Malformed configuration source {}: {}", .path.display(), .reason)]
    Malformed {
        /// Offending file
        path: PathBuf,
        /// What went wrong
        reason: String,
    },
}

impl ConfigError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors raised when the company profile does not have the expected shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// A section marker is absent from the profile
    #[error("Company profile is missing the {} section (marker {})", .0.key(), .0.marker())]
    SectionMissing(ProfileSection),

    /// A section marker only appears before the preceding section
    #[error("Company profile section {} (marker {}) appears out of order", .0.key(), .0.marker())]
    SectionOutOfOrder(ProfileSection),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error loading configuration sources
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error extracting the company profile
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// A generation request degraded to a sentinel while the run demanded real content
    #[error("Generation degraded for {document}: {reason}")]
    Degraded {
        /// Document type name
        document: String,
        /// Why generation degraded
        reason: String,
    },

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
