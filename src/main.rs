// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::Path;
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use crate::errors::AppError;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod kanji;
mod language_utils;
mod subtitles;
mod vocabulary;

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconcile vendor exports and print the tracked word list
    Words {
        /// Language of the words to print (e.g., 'ja', 'de')
        #[arg(long)]
        language: Option<String>,

        /// Only print words in this stage (learning or known)
        #[arg(long)]
        stage: Option<String>,
    },

    /// Convert subtitle cue sheets into SRT files
    Srt,

    /// Aggregate kanji usage into a TSV report or an Anki search query
    Kanji {
        /// Print an Anki search query instead of the TSV report
        #[arg(long)]
        anki: bool,

        /// Anki query cutoff as "min_known,min_learning"
        #[arg(long, value_name = "KNOWN,LEARNING")]
        min_counts: Option<String>,
    },

    /// Word cache maintenance
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Generate shell completions for tangocho
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum CacheAction {
    /// Delete the cached word set
    Clear,
}

/// tangocho - vocabulary and subtitle export processor
///
/// Reconciles word exports from Language Reactor and Migaku into one
/// tracked-word set, and converts subtitle cue sheets into SRT files.
#[derive(Parser, Debug)]
#[command(name = "tangocho")]
#[command(version = "1.0.0")]
#[command(about = "Language-learning export processor")]
#[command(long_about = "tangocho merges word exports from Language Reactor and Migaku into one
deduplicated word set, remembers it between runs, and converts subtitle
cue sheets into timed SRT files.

EXAMPLES:
    tangocho words --language ja                 # Print every tracked Japanese word
    tangocho words --language ja --stage known   # Only mastered words
    tangocho srt                                 # Convert cue sheets from the export directory
    tangocho kanji > kanji.tsv                   # Kanji usage report
    tangocho kanji --anki --min-counts 2,0       # Anki query for well-covered kanji
    tangocho cache clear                         # Forget the reconciled word set
    tangocho --set exported_files_dir=/data words --language de
    tangocho completions bash > tangocho.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config. If the config file doesn't exist,
    a default one will be created automatically. Any setting can be
    overridden per run with --set KEY=VALUE.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", env = "TANGOCHO_CONFIG", global = true)]
    config_path: String,

    /// Override a configuration value (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    overrides: Vec<String>,

    /// Set logging level
    #[arg(short, long, value_enum, env = "TANGOCHO_LOG_LEVEL", global = true)]
    log_level: Option<CliLogLevel>,
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

    // @returns: Emoji and ANSI color code for log level
    fn get_style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "31"),
            Level::Warn => ("🚧 ", "33"),
            Level::Info => (" ", "32"),
            Level::Debug => ("🔍 ", "36"),
            Level::Trace => ("📋 ", "35"),
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
            let (emoji, color) = Self::get_style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[1;{}m{} {} {}\x1B[0m",
                color,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Completions need no configuration
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "tangocho", &mut std::io::stdout());
        return Ok(());
    }

    match run_command(cli) {
        Ok(()) => Ok(()),
        Err(err) => match err.downcast_ref::<AppError>() {
            // Environment and input problems get a single readable line
            Some(user_error) => {
                eprintln!("ERROR: {}", user_error);
                std::process::exit(1);
            }
            // Anything else is a defect; fail loud with the full chain
            None => Err(err),
        },
    }
}

fn run_command(cli: CommandLineOptions) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    // Load or create configuration
    let config_path = &cli.config_path;
    let mut config: Config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Update log level in config if specified via command line
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    // Apply --set overrides, then subcommand flags on top
    config.apply_overrides(&cli.overrides)?;
    match &cli.command {
        Commands::Words { language, stage } => {
            if let Some(language) = language {
                config.language = language.clone();
            }
            if let Some(stage) = stage {
                config.stage = stage.clone();
            }
        }
        Commands::Kanji { min_counts, .. } => {
            if let Some(min_counts) = min_counts {
                config.anki_min_counts = min_counts.clone();
            }
        }
        _ => {}
    }

    // Validate the configuration after loading and overriding
    config.validate()?;

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;
    match &cli.command {
        Commands::Words { .. } => controller.run_words(),
        Commands::Srt => controller.run_srt(),
        Commands::Kanji { anki, .. } => controller.run_kanji(*anki),
        Commands::Cache { action } => match action {
            CacheAction::Clear => controller.run_cache_clear(),
        },
        // Handled in main before configuration loading
        Commands::Completions { .. } => Ok(()),
    }
}
