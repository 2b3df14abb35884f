// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use synthdoc::app_config::{self, Config, GenerationProvider};
use synthdoc::app_controller::{Controller, FailurePolicy, RunOptions};
use synthdoc::catalog::Platform;

/// CLI Wrapper for Platform to implement ValueEnum
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliPlatform {
    #[value(name = "Coda")]
    Coda,
    #[value(name = "Dialpad")]
    Dialpad,
    #[value(name = "Slack")]
    Slack,
    #[value(name = "all")]
    All,
}

impl CliPlatform {
    fn expand(selection: &[CliPlatform]) -> Vec<Platform> {
        if selection.is_empty() || selection.contains(&CliPlatform::All) {
            return Platform::ALL.to_vec();
        }

        selection
            .iter()
            .filter_map(|p| match p {
                CliPlatform::Coda => Some(Platform::Coda),
                CliPlatform::Dialpad => Some(Platform::Dialpad),
                CliPlatform::Slack => Some(Platform::Slack),
                CliPlatform::All => None,
            })
            .collect()
    }
}

/// CLI Wrapper for GenerationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliGenerationProvider {
    Anthropic,
    #[value(name = "openai")]
    OpenAI,
}

impl From<CliGenerationProvider> for GenerationProvider {
    fn from(cli_provider: CliGenerationProvider) -> Self {
        match cli_provider {
            CliGenerationProvider::Anthropic => GenerationProvider::Anthropic,
            CliGenerationProvider::OpenAI => GenerationProvider::OpenAI,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for synthdoc
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Platforms to generate documents for
    #[arg(short, long, value_enum, num_args = 1.., ignore_case = true, default_value = "all")]
    platforms: Vec<CliPlatform>,

    /// Number of document types to generate per platform (default: all)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    count: Option<u64>,

    /// Configuration file path
    #[arg(long = "config", default_value = "conf.json")]
    config_path: PathBuf,

    /// Generation provider to use
    #[arg(long, value_enum)]
    provider: Option<CliGenerationProvider>,

    /// Model name to use for generation
    #[arg(short, long)]
    model: Option<String>,

    /// Token budget per document
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Root directory for generated documents
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Seed for reproducible theme and document type selection
    #[arg(long)]
    seed: Option<u64>,

    /// Stop at the first document that fails
    #[arg(long)]
    fail_fast: bool,

    /// Treat placeholder and API error output as failures
    #[arg(long)]
    abort_on_degraded: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// synthdoc - Synthetic business documents with AI
///
/// Generates realistic synthetic documents (Coda docs, Dialpad call exports,
/// Slack conversations) for a company, seeded with themes and company profile
/// excerpts.
#[derive(Parser, Debug)]
#[command(name = "synthdoc")]
#[command(version)]
#[command(about = "AI-powered synthetic document generator")]
#[command(long_about = "synthdoc generates realistic synthetic business documents for each configured platform using AI providers.

EXAMPLES:
    synthdoc                                    # All platforms, all document types
    synthdoc -p Slack -c 1                      # One random Slack document
    synthdoc -p Coda Dialpad -c 3 --seed 42     # Reproducible selection
    synthdoc --provider openai -m gpt-4o        # Use specific provider and model
    synthdoc --fail-fast --abort-on-degraded    # Stop on the first problem
    synthdoc completions bash > synthdoc.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically. API keys are read from ANTHROPIC_API_KEY or
    OPENAI_API_KEY (a .env file is honored), then from the config file. Without a
    key every document is written as a placeholder.

SUPPORTED PROVIDERS:
    anthropic - Anthropic Claude API (default: claude-3-5-sonnet-20240620)
    openai    - OpenAI API or any compatible chat completions server")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Load environment variables from a .env file in the current directory, if any
fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => log::debug!("Loaded environment variables from: {}", path.display()),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to load .env file: {}", e),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logger accepts everything; the effective level is set through max_level below
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "synthdoc", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    load_dotenv();

    match run_generate(cli.generate).await {
        Ok(true) => {
            info!("Successfully generated synthetic data files.");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            error!("Error generating files: one or more documents failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Error generating files: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Build the configuration from file and CLI overrides
fn load_config(options: &GenerateArgs) -> Result<Config> {
    let (mut config, created) = Config::load_or_create(&options.config_path)?;
    if created {
        warn!(
            "Config file not found at {:?}, created default config.",
            options.config_path
        );
    }

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.generation.provider = provider.clone().into();
    }

    if let Some(model) = &options.model {
        config.generation.set_model(model);
    }

    if let Some(max_tokens) = options.max_tokens {
        config.generation.max_tokens = max_tokens;
    }

    if let Some(output_dir) = &options.output_dir {
        config.output_dir = output_dir.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    Ok(config)
}

/// Run a generation batch; `Ok(false)` when some documents failed
async fn run_generate(options: GenerateArgs) -> Result<bool> {
    // If log level is set via command line, apply it before reading the config
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    let config = load_config(&options)?;
    log::set_max_level(level_filter(&config.log_level));

    let run_options = RunOptions {
        platforms: CliPlatform::expand(&options.platforms),
        count: options.count.map(|c| c as usize),
        failure_policy: if options.fail_fast {
            FailurePolicy::Abort
        } else {
            FailurePolicy::Continue
        },
        abort_on_degraded: options.abort_on_degraded,
    };

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let controller = Controller::with_config(config);
    let summary = controller.run(&run_options, &mut rng).await?;

    for failure in &summary.failures {
        error!(
            "{} / {}: {}",
            failure.platform, failure.type_name, failure.error
        );
    }

    Ok(summary.is_success())
}
