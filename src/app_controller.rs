use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use rand::Rng;
use rand::seq::index;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::catalog::{DocumentTypeSpec, Platform, SourceData, TypeCatalogue};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::generation::{GenerationClient, GenerationOutcome, GenerationRequest, sanitize};

// @module: Application controller for document generation

/// What to do when a single document fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure and continue with the next document
    #[default]
    Continue,
    /// Stop the whole run on the first failure
    Abort,
}

/// Parameters of a generation run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Platforms to generate for, in any order
    pub platforms: Vec<Platform>,
    /// Maximum number of document types per platform; `None` or `Some(0)` means no cap
    pub count: Option<usize>,
    pub failure_policy: FailurePolicy,
    /// Treat placeholder/error sentinels as failures
    pub abort_on_degraded: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            platforms: Platform::ALL.to_vec(),
            count: None,
            failure_policy: FailurePolicy::default(),
            abort_on_degraded: false,
        }
    }
}

/// One generated document
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub spec: DocumentTypeSpec,
    pub raw_text: String,
    pub sanitized_text: String,
    pub output_path: PathBuf,
    /// The file holds a sentinel instead of generated content
    pub degraded: bool,
}

/// A document that could not be produced
#[derive(Debug, Clone)]
pub struct DocumentFailure {
    pub platform: Platform,
    pub type_name: String,
    pub error: String,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub results: Vec<GenerationResult>,
    pub failures: Vec<DocumentFailure>,
}

impl RunSummary {
    pub fn degraded_count(&self) -> usize {
        self.results.iter().filter(|r| r.degraded).count()
    }

    /// True when no document failed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Main application controller for document generation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Client used for every document
    client: GenerationClient,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        let client = GenerationClient::from_config(&config.generation);
        Self::new(config, client)
    }

    /// Create a controller with an explicit generation client
    pub fn new(config: Config, client: GenerationClient) -> Self {
        Self { config, client }
    }

    /// Load the catalogue, themes and company profile
    pub fn load_sources(&self) -> Result<SourceData, AppError> {
        SourceData::load(&self.config.inputs)
    }

    /// Load the sources, then generate every selected document
    pub async fn run<R: Rng>(&self, options: &RunOptions, rng: &mut R) -> Result<RunSummary, AppError> {
        let sources = self.load_sources()?;
        self.run_with_sources(&sources, options, rng).await
    }

    /// Generate every selected document from already loaded sources
    pub async fn run_with_sources<R: Rng>(
        &self,
        sources: &SourceData,
        options: &RunOptions,
        rng: &mut R,
    ) -> Result<RunSummary, AppError> {
        let start_time = Instant::now();

        let mut plan = Vec::new();
        for platform in Platform::normalize(&options.platforms) {
            let selected = Self::select_document_types(&sources.catalogue, platform, options.count, rng);
            if selected.is_empty() {
                warn!("No document types configured for {}", platform);
            }
            plan.extend(selected);
        }

        info!(
            "Generating {} document(s) with {} - {}",
            plan.len(),
            self.client.provider_name(),
            self.config.generation.get_model()
        );

        let progress_bar = ProgressBar::new(plan.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        let mut summary = RunSummary::default();
        for spec in &plan {
            progress_bar.set_message(spec.type_name.clone());

            match self
                .generate_document(spec, sources, options.abort_on_degraded, rng)
                .await
            {
                Ok(result) => summary.results.push(result),
                Err(e) => {
                    error!("Failed to generate {} ({}): {}", spec.type_name, spec.platform, e);
                    if options.failure_policy == FailurePolicy::Abort {
                        progress_bar.abandon();
                        return Err(e);
                    }
                    summary.failures.push(DocumentFailure {
                        platform: spec.platform,
                        type_name: spec.type_name.clone(),
                        error: e.to_string(),
                    });
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        info!(
            "Run finished in {}: {} written ({} placeholder/error), {} failed",
            Self::format_duration(start_time.elapsed()),
            summary.results.len(),
            summary.degraded_count(),
            summary.failures.len()
        );

        Ok(summary)
    }

    /// Document types for a platform, sampled without replacement when capped below the catalogue size
    ///
    /// A cap of zero is treated as no cap.
    pub fn select_document_types<R: Rng>(
        catalogue: &TypeCatalogue,
        platform: Platform,
        count: Option<usize>,
        rng: &mut R,
    ) -> Vec<DocumentTypeSpec> {
        let types = catalogue.types_for(platform);
        match count {
            Some(count) if count > 0 && count < types.len() => {
                index::sample(rng, types.len(), count)
                    .into_iter()
                    .map(|i| types[i].clone())
                    .collect()
            }
            _ => types.to_vec(),
        }
    }

    /// Compose, generate, sanitize and write a single document
    ///
    /// With `abort_on_degraded` a sentinel outcome is returned as
    /// `AppError::Degraded` and nothing is written.
    pub async fn generate_document<R: Rng>(
        &self,
        spec: &DocumentTypeSpec,
        sources: &SourceData,
        abort_on_degraded: bool,
        rng: &mut R,
    ) -> Result<GenerationResult, AppError> {
        let request = GenerationRequest::compose(spec, sources, &self.config.company, rng);

        info!("Generating {}...", spec.type_name);
        let outcome = self
            .client
            .generate(&request.prompt, self.config.generation.max_tokens)
            .await;

        let (raw_text, sanitized_text, degraded) = match outcome {
            GenerationOutcome::Generated(raw) => {
                let sanitized = sanitize(&raw, spec.output_format);
                (raw, sanitized, false)
            }
            GenerationOutcome::Degraded { reason, sentinel } => {
                if abort_on_degraded {
                    return Err(AppError::Degraded {
                        document: spec.type_name.clone(),
                        reason: reason.to_string(),
                    });
                }
                warn!("{}: writing sentinel ({})", spec.type_name, reason);
                (sentinel.clone(), sentinel, true)
            }
        };

        let output_path = FileManager::write_document(
            &self.config.output_dir,
            spec.platform,
            &spec.type_name,
            spec.output_format,
            &sanitized_text,
        )?;
        info!("Generated: {}", output_path.display());

        Ok(GenerationResult {
            spec: spec.clone(),
            raw_text,
            sanitized_text,
            output_path,
            degraded,
        })
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
