//! Logging and tracing configuration
//!
//! This module provides centralized logging configuration for the catalog
//! library and its command line front-end.

use std::fmt as std_fmt;
use std::io;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for the application
    pub level: Level,
    /// Whether to enable JSON formatting on the console
    pub json_format: bool,
    /// Whether to log to file
    pub log_to_file: bool,
    /// Log file directory (if logging to file)
    pub log_directory: Option<String>,
    /// Log file prefix (if logging to file)
    pub log_file_prefix: String,
    /// Whether to enable span events
    pub enable_span_events: bool,
    /// Whether to enable ansi colors in console output
    pub enable_ansi: bool,
    /// Custom environment filter
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            json_format: false,
            log_to_file: false,
            log_directory: None,
            log_file_prefix: "poims".to_string(),
            enable_span_events: false,
            enable_ansi: true,
            env_filter: None,
        }
    }
}

/// Keeps the non-blocking log writers flushing until dropped
pub struct LoggingGuard {
    _guards: Vec<WorkerGuard>,
}

impl std_fmt::Debug for LoggingGuard {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        f.debug_struct("LoggingGuard").field("writers", &self._guards.len()).finish()
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable JSON formatting
    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Enable file logging
    pub fn with_file_logging(mut self, directory: impl Into<String>) -> Self {
        self.log_to_file = true;
        self.log_directory = Some(directory.into());
        self
    }

    /// Set log file prefix
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_file_prefix = prefix.into();
        self
    }

    /// Enable span events
    pub fn with_span_events(mut self) -> Self {
        self.enable_span_events = true;
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.enable_ansi = false;
        self
    }

    /// Set custom environment filter
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Filter directive used when neither a custom filter nor `RUST_LOG` is set
    pub fn default_directive(&self) -> String {
        format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), self.level)
    }

    fn span_events(&self) -> FmtSpan {
        if self.enable_span_events {
            FmtSpan::FULL
        } else {
            FmtSpan::NONE
        }
    }

    /// Install the global tracing subscriber.
    ///
    /// Console output always goes to stderr so reports on stdout stay clean.
    /// File output is JSON, rotated daily. The returned guard must be kept
    /// alive for buffered lines to reach their writers.
    pub fn init(self) -> Result<LoggingGuard, Box<dyn std::error::Error + Send + Sync>> {
        let env_filter = match &self.env_filter {
            Some(filter) => EnvFilter::try_new(filter)?,
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.default_directive())),
        };

        let mut guards = Vec::new();

        let file_layer = if self.log_to_file {
            let log_dir = self.log_directory.as_deref().unwrap_or("logs");
            let (file_writer, guard) = non_blocking(rolling::daily(log_dir, &self.log_file_prefix));
            guards.push(guard);
            Some(fmt::layer().json().with_writer(file_writer).with_span_events(self.span_events()))
        } else {
            None
        };

        let (console_writer, console_guard) = non_blocking(io::stderr());
        guards.push(console_guard);

        let (json_console, pretty_console) = if self.json_format {
            let layer = fmt::layer().json().with_writer(console_writer).with_span_events(self.span_events());
            (Some(layer), None)
        } else {
            let layer = fmt::layer()
                .pretty()
                .with_writer(console_writer)
                .with_ansi(self.enable_ansi)
                .with_span_events(self.span_events());
            (None, Some(layer))
        };

        Registry::default()
            .with(env_filter)
            .with(file_layer)
            .with(json_console)
            .with(pretty_console)
            .try_init()?;

        info!(config = ?self, "Logging initialized");
        Ok(LoggingGuard { _guards: guards })
    }

    /// Initialize logging for testing (minimal output)
    pub fn init_test() -> Result<LoggingGuard, Box<dyn std::error::Error + Send + Sync>> {
        Self::new().with_level(Level::WARN).without_ansi().init()
    }

    /// Initialize verbose logging (INFO level)
    pub fn init_verbose() -> Result<LoggingGuard, Box<dyn std::error::Error + Send + Sync>> {
        Self::new().with_level(Level::INFO).init()
    }

    /// Initialize debug logging (DEBUG level with span events)
    pub fn init_debug() -> Result<LoggingGuard, Box<dyn std::error::Error + Send + Sync>> {
        Self::new().with_level(Level::DEBUG).with_span_events().init()
    }
}
