//! Logging System
//!
//! Structured logging using the `tracing` crate. Library code only emits
//! events; this module installs the subscriber for the binary (or any
//! embedding application that wants the same setup).
//!
//! Environment overrides win over configuration: `FSV_LOG` is a full
//! `EnvFilter` directive string, `FSV_LOG_FORMAT` and `FSV_LOG_OUTPUT` pick
//! the format and destination, `FSV_LOG_FILE` moves the log file.

use crate::error::FsvError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Event encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Where events are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum LogOutput {
    #[serde(rename = "stdout")]
    #[value(name = "stdout")]
    Stdout,
    #[default]
    #[serde(rename = "stderr")]
    #[value(name = "stderr")]
    Stderr,
    #[serde(rename = "file")]
    #[value(name = "file")]
    File,
    #[serde(rename = "file+stderr")]
    #[value(name = "file+stderr")]
    FileAndStderr,
    /// stdout and stderr
    #[serde(rename = "both")]
    #[value(name = "both")]
    Both,
}

impl LogOutput {
    fn writes_file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::FileAndStderr)
    }
}

impl FromStr for LogFormat {
    type Err = FsvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <LogFormat as ValueEnum>::from_str(s, true)
            .map_err(|_| FsvError::Config(format!("Invalid log format: {} (text, json)", s)))
    }
}

impl FromStr for LogOutput {
    type Err = FsvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <LogOutput as ValueEnum>::from_str(s, true).map_err(|_| {
            FsvError::Config(format!(
                "Invalid log output: {} (stdout, stderr, file, file+stderr, both)",
                s
            ))
        })
    }
}

/// Logging configuration, the `[logging]` table of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    /// Default filter directive (`warn`, `debug`, `fsv::hash=trace` ...)
    pub level: String,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Log file for the file outputs; `None` uses the platform default
    pub file: Option<PathBuf>,
    /// ANSI colors for text written to a terminal stream
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "warn".to_string(),
            format: LogFormat::Text,
            output: LogOutput::Stderr,
            file: None,
            color: true,
        }
    }
}

impl LoggingConfig {
    /// Apply `FSV_LOG_FORMAT`, `FSV_LOG_OUTPUT` and `FSV_LOG_FILE`.
    fn with_env_overrides(mut self) -> Result<Self, FsvError> {
        if let Ok(format) = std::env::var("FSV_LOG_FORMAT") {
            self.format = format.parse()?;
        }
        if let Ok(output) = std::env::var("FSV_LOG_OUTPUT") {
            self.output = output.parse()?;
        }
        if let Some(file) = std::env::var_os("FSV_LOG_FILE").filter(|f| !f.is_empty()) {
            self.file = Some(PathBuf::from(file));
        }
        Ok(self)
    }

    fn filter(&self) -> Result<EnvFilter, FsvError> {
        if let Ok(filter) = EnvFilter::try_from_env("FSV_LOG") {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level)
            .map_err(|e| FsvError::Config(format!("Invalid log level {:?}: {}", self.level, e)))
    }
}

/// Log file location: `explicit` when non-empty, otherwise the platform
/// state directory (local data directory where there is none).
pub fn resolve_log_file_path(explicit: Option<PathBuf>) -> Result<PathBuf, FsvError> {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path);
    }
    let dirs = directories::ProjectDirs::from("", "fsv", "fsv").ok_or_else(|| {
        FsvError::Config("Could not determine platform directories for log file".to_string())
    })?;
    let dir = dirs.state_dir().unwrap_or_else(|| dirs.data_local_dir());
    Ok(dir.join("fsv.log"))
}

/// Install the global subscriber.
///
/// Fails if a subscriber is already installed or the settings are invalid.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), FsvError> {
    let config = config.cloned().unwrap_or_default().with_env_overrides()?;
    let installed = if !config.enabled {
        Registry::default()
            .with(EnvFilter::new("off"))
            .with(fmt::layer().with_writer(io::sink))
            .try_init()
    } else {
        let filter = config.filter()?;
        let writer = build_writer(&config)?;
        let layer = fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339());
        match config.format {
            LogFormat::Json => Registry::default()
                .with(filter)
                .with(layer.json().with_writer(writer))
                .try_init(),
            LogFormat::Text => Registry::default()
                .with(filter)
                .with(
                    layer
                        .with_ansi(config.color && !config.output.writes_file())
                        .with_writer(writer),
                )
                .try_init(),
        }
    };
    installed.map_err(|e| FsvError::Config(format!("Failed to install subscriber: {}", e)))
}

fn build_writer(config: &LoggingConfig) -> Result<BoxMakeWriter, FsvError> {
    if !config.output.writes_file() {
        return Ok(match config.output {
            LogOutput::Stdout => BoxMakeWriter::new(io::stdout),
            LogOutput::Both => BoxMakeWriter::new(io::stdout.and(io::stderr)),
            _ => BoxMakeWriter::new(io::stderr),
        });
    }

    let log_file = resolve_log_file_path(config.file.clone())?;
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| FsvError::Config(format!("Failed to create log directory: {}", e)))?;
    }
    let handle = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| FsvError::Config(format!("Failed to open log file {:?}: {}", log_file, e)))?;
    let file = Arc::new(handle);

    Ok(match config.output {
        LogOutput::FileAndStderr => BoxMakeWriter::new(file.and(io::stderr)),
        _ => BoxMakeWriter::new(file),
    })
}
