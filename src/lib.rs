/*!
 * # synthdoc - Synthetic business documents with AI
 *
 * A Rust library that generates realistic synthetic business documents for
 * a company across several collaboration platforms (Coda, Dialpad, Slack)
 * using LLM providers.
 *
 * ## Features
 *
 * - Document type catalogue per platform with per-type output format
 * - Theme table sampled per document with keyword relevance rules
 * - Company profile split into named sections, excerpted into prompts
 * - Generation through various AI providers:
 *   - Anthropic API
 *   - OpenAI API
 * - Placeholder output when no credential is configured
 * - Response sanitization (code fences, conversational preambles)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `catalog`: Loading of the type catalogue, theme table and company profile
 * - `generation`: Selection, prompt composition, generation client and sanitizer:
 *   - `generation::selector`: Relevance tables and theme sampling
 *   - `generation::prompts`: Prompt composition per platform
 *   - `generation::schema`: Typed output schemas used in prompt examples
 *   - `generation::client`: Generation client and tagged outcome
 *   - `generation::sanitizer`: Removal of conversational framing
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `providers`: Client implementations for various LLM providers:
 *   - `providers::openai`: OpenAI API client
 *   - `providers::anthropic`: Anthropic API client
 *   - `providers::mock`: Scripted provider for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod catalog;
pub mod errors;
pub mod file_utils;
pub mod generation;
pub mod providers;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, FailurePolicy, GenerationResult, RunOptions, RunSummary};
pub use catalog::{CompanyProfile, DocumentTypeSpec, OutputFormat, Platform, SourceData, ThemeEntry, TypeCatalogue};
pub use errors::{AppError, ConfigError, ProfileError, ProviderError};
pub use generation::{GenerationClient, GenerationOutcome, sanitize};
