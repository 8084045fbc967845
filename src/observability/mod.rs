//! Tracing setup
//!
//! The library only emits `tracing` events; applications that want them
//! printed can install a subscriber here.
//!
//! ```rust,ignore
//! use unillm::observability::{init_tracing, OutputFormat, TracingConfig};
//!
//! let _guard = init_tracing(TracingConfig::default().with_format(OutputFormat::Json))?;
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::LlmError;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Multi-line, human oriented
    #[default]
    Pretty,
    Compact,
    /// One JSON object per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(LlmError::ConfigurationError(format!(
                "invalid log format: {other}. Valid options: pretty, compact, json"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub level: tracing::Level,
    pub format: OutputFormat,
    /// Write to this file instead of stdout.
    pub log_file: Option<PathBuf>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            format: OutputFormat::Pretty,
            log_file: None,
        }
    }
}

impl TracingConfig {
    pub fn debug() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Read `UNILLM_LOG_LEVEL`, `UNILLM_LOG_FORMAT` and `UNILLM_LOG_FILE`.
    pub fn from_env() -> Result<Self, LlmError> {
        let mut config = Self::default();
        if let Ok(level) = std::env::var("UNILLM_LOG_LEVEL") {
            config.level = level.parse().map_err(|_| {
                LlmError::ConfigurationError(format!(
                    "invalid log level: {level}. Valid options: trace, debug, info, warn, error"
                ))
            })?;
        }
        if let Ok(format) = std::env::var("UNILLM_LOG_FORMAT") {
            config.format = format.parse()?;
        }
        if let Ok(path) = std::env::var("UNILLM_LOG_FILE") {
            config.log_file = Some(PathBuf::from(path));
        }
        Ok(config)
    }

    /// `RUST_LOG` wins when set; otherwise only this crate at `level`.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }

    fn default_directive(&self) -> String {
        format!("unillm={}", self.level.as_str().to_ascii_lowercase())
    }
}

/// Install a global subscriber.
///
/// Returns the file writer's guard when logging to a file; keep it alive for
/// the life of the program or buffered lines are lost. A subscriber that is
/// already installed is left in place.
pub fn init_tracing(config: TracingConfig) -> Result<Option<WorkerGuard>, LlmError> {
    let (writer, guard) = match &config.log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let file_name = path.file_name().ok_or_else(|| {
                LlmError::ConfigurationError(format!("log file has no name: {}", path.display()))
            })?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };
    let ansi = config.log_file.is_none();

    let layer = match config.format {
        OutputFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed(),
        OutputFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed(),
        OutputFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .boxed(),
    };

    match tracing_subscriber::registry()
        .with(layer)
        .with(config.env_filter())
        .try_init()
    {
        Ok(()) => Ok(guard),
        Err(e) => {
            tracing::debug!(error = %e, "tracing subscriber already installed");
            Ok(None)
        }
    }
}
