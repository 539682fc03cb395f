// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context, bail};
use log::{error, info, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use subnorm::app_config::{Config, IntegrityMode, LogLevel};
use subnorm::app_controller::{Controller, TRACE_TARGET};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalize subtitle files (default command)
    #[command(alias = "run")]
    Normalize(NormalizeArgs),

    /// Generate shell completions for subnorm
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct NormalizeArgs {
    /// SubRip files or directories to process
    #[arg(value_name = "INPUT_PATH")]
    input_paths: Vec<PathBuf>,

    /// Force overwrite of existing adjusted files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Shift every timing by this many seconds (>= 0)
    #[arg(long, value_name = "SECONDS", allow_hyphen_values = true)]
    lead_in: Option<f64>,

    /// Maximum characters per line
    #[arg(long)]
    max_line_length: Option<usize>,

    /// Reading speed in characters per second
    #[arg(long, value_name = "CPS")]
    reading_speed: Option<f64>,

    /// Minimum on-screen duration in milliseconds
    #[arg(long)]
    min_duration_ms: Option<u64>,

    /// Maximum on-screen duration in milliseconds
    #[arg(long)]
    max_duration_ms: Option<u64>,

    /// Minimum blank interval between subtitles in milliseconds
    #[arg(long)]
    transition_gap_ms: Option<u64>,

    /// Configuration file path (JSON)
    #[arg(short, long, value_name = "PATH", env = "SUBNORM_CONFIG")]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Emit a structured per-entry trace on stderr
    #[arg(short, long)]
    debug: bool,

    /// Report the first differing word when the integrity check fails
    #[arg(long)]
    detailed_integrity: bool,
}

/// subnorm - subtitle re-flow and re-timing
///
/// Re-flows SubRip subtitles into readable lines and re-times them by reading
/// speed, without losing a single word of dialogue.
#[derive(Parser, Debug)]
#[command(name = "subnorm")]
#[command(version)]
#[command(about = "Subtitle re-flow and re-timing tool")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "subnorm re-flows subtitle text into readable lines and re-times every entry so it respects reading speed, duration bounds and transition gaps. Output is written beside each input as <name>.adjusted.srt.

EXAMPLES:
    subnorm movie.srt                          # Normalize with default settings
    subnorm -f movie.srt                       # Overwrite an existing movie.adjusted.srt
    subnorm --lead-in 1.5 movie.srt            # Delay every subtitle by 1.5 seconds
    subnorm --max-line-length 32 /subtitles/   # Process a whole directory
    subnorm --debug movie.srt 2> trace.log     # Keep the per-entry trace
    subnorm completions bash > subnorm.bash    # Generate bash completions

CONFIGURATION:
    Settings can be read from a JSON file with --config. Command line options
    override values from the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    normalize: NormalizeArgs,
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

    // @returns: ANSI color code and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut stderr = std::io::stderr();

        // Trace records are JSON lines; keep them free of decoration
        if record.target() == TRACE_TARGET {
            let _ = writeln!(stderr, "{}", record.args());
            return;
        }

        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        let (color, tag) = Self::style_for_level(record.level());
        let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, tag, record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Start at info; the level is updated once the configuration is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subnorm", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Normalize(args)) => run_normalize(args),
        None => run_normalize(cli.normalize),
    }
}

/// Merge the configuration file with command line overrides
fn build_config(options: &NormalizeArgs) -> Result<Config> {
    let mut config = match &options.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(lead_in) = options.lead_in {
        config.lead_in_offset = lead_in;
    }
    if let Some(max_line_length) = options.max_line_length {
        config.max_line_length = max_line_length;
    }
    if let Some(reading_speed) = options.reading_speed {
        config.max_reading_speed = reading_speed;
    }
    if let Some(min_duration_ms) = options.min_duration_ms {
        config.min_duration_ms = min_duration_ms;
    }
    if let Some(max_duration_ms) = options.max_duration_ms {
        config.max_duration_ms = max_duration_ms;
    }
    if let Some(transition_gap_ms) = options.transition_gap_ms {
        config.transition_gap_ms = transition_gap_ms;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if options.debug {
        config.debug = true;
    }
    if options.detailed_integrity {
        config.integrity_mode = IntegrityMode::Detailed;
    }

    Ok(config)
}

fn run_normalize(options: NormalizeArgs) -> Result<()> {
    if options.input_paths.is_empty() {
        bail!("INPUT_PATH is required when no subcommand is specified");
    }

    // Configuration is fully validated before any subtitle file is opened
    let config = build_config(&options)?;
    config.validate().context("Configuration validation failed")?;

    let level = if config.debug {
        config.log_level.to_level_filter().max(LevelFilter::Debug)
    } else {
        config.log_level.to_level_filter()
    };
    log::set_max_level(level);
    debug!("Effective configuration: {:?}", config);

    let controller = Controller::with_config(config)?;
    let summary = controller.run_paths(&options.input_paths, options.force_overwrite)?;

    if summary.has_failures() {
        error!("{} file(s) could not be normalized", summary.failed);
        bail!(
            "{} of {} file(s) failed",
            summary.failed,
            summary.processed + summary.skipped + summary.failed
        );
    }

    if summary.processed == 0 && summary.skipped > 0 {
        info!("Nothing to do, all outputs already exist");
    }

    Ok(())
}
