//! CLI Tooling
//!
//! Command-line interface over the path operations. Every command returns
//! its rendered output plus an exit status; printing is left to the binary.

use crate::cancel::CancelToken;
use crate::config::{ConfigLoader, FsvConfig};
use crate::error::FsvError;
use crate::info::Stat;
use crate::logging::{LogFormat, LogOutput};
use crate::path::Path;
use crate::remove::{Flag, FlagSet};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

/// Exit status when a comparison finds the paths different.
pub const EXIT_DIFFERENT: i32 = 2;

/// fsv - path utilities: hashing, comparison, symlink resolution, removal
#[derive(Parser)]
#[command(name = "fsv")]
#[command(about = "Path utilities: content hashing, comparison, symlink resolution, removal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Log output
    #[arg(long, value_enum)]
    pub log_output: Option<LogOutput>,
}

/// How `same` decides equality
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompareBy {
    /// Concurrent FNV-1a digests
    Hash,
    /// Byte-by-byte, stopping at the first difference
    Contents,
    /// Same underlying file (device and inode)
    Info,
}

/// Rendering of `stat`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StatFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the FNV-1a digest of a file
    Hash { path: String },
    /// Check whether two paths are equivalent (exit 2 when not)
    Same {
        a: String,
        b: String,
        #[arg(long, value_enum, default_value = "contents")]
        by: CompareBy,
    },
    /// Resolve a chain of symlinks
    Target { path: String },
    /// Show metadata without following symlinks
    Stat {
        path: String,
        #[arg(long, value_enum, default_value_t = StatFormat::Text)]
        format: StatFormat,
    },
    /// List a directory
    Ls { path: String },
    /// Remove a file, symlink or (with -r) directory tree
    Rm {
        path: String,
        /// Remove directories recursively
        #[arg(short = 'r', long)]
        recursive: bool,
    },
}

/// Rendered command result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub status: i32,
}

impl CommandOutput {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: 0,
        }
    }
}

/// CLI execution context
pub struct CliContext {
    config: FsvConfig,
    cancel: CancelToken,
}

impl CliContext {
    /// Create a new CLI context, loading configuration from the given file
    /// (if any) and the environment.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, FsvError> {
        let config = ConfigLoader::load(config_path.as_deref())
            .map_err(|e| FsvError::Config(e.to_string()))?;
        Self::with_config(config)
    }

    pub fn with_config(config: FsvConfig) -> Result<Self, FsvError> {
        config.validate()?;
        Ok(Self {
            config,
            cancel: CancelToken::new(),
        })
    }

    pub fn config(&self) -> &FsvConfig {
        &self.config
    }

    /// Token observed by long-running reads; cancel it to abort them.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Execute a command
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, FsvError> {
        match command {
            Commands::Hash { path } => {
                let path = Path::from(path.as_str());
                let digest = path.hash_with(&self.config.hash, &self.cancel)?;
                Ok(CommandOutput::ok(format!("{}  {}", digest, path)))
            }
            Commands::Same { a, b, by } => {
                let (a, b) = (Path::from(a.as_str()), Path::from(b.as_str()));
                let equal = match by {
                    CompareBy::Hash => {
                        a.same_hash_as_with(&b, &self.config.hash, &self.cancel)?
                    }
                    CompareBy::Contents => {
                        a.same_contents_as_with(&b, &self.config.compare, &self.cancel)?
                    }
                    CompareBy::Info => a.same_info_as(&b)?,
                };
                info!(a = %a, b = %b, ?by, equal, "same");
                Ok(CommandOutput {
                    text: if equal { "same" } else { "different" }.to_string(),
                    status: if equal { 0 } else { EXIT_DIFFERENT },
                })
            }
            Commands::Target { path } => {
                let target =
                    Path::from(path.as_str()).target_with_limit(self.config.symlink.max_hops)?;
                Ok(CommandOutput::ok(target.to_string()))
            }
            Commands::Stat { path, format } => {
                let stat = Path::from(path.as_str()).stat()?;
                let text = match format {
                    StatFormat::Json => format_stat_json(&stat)?,
                    StatFormat::Text => format_stat_text(&stat),
                };
                Ok(CommandOutput::ok(text))
            }
            Commands::Ls { path } => {
                let list = Path::from(path.as_str()).ls()?;
                Ok(CommandOutput::ok(
                    list.iter()
                        .map(|p| p.base().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("\n"),
                ))
            }
            Commands::Rm { path, recursive } => {
                let flags = if *recursive {
                    FlagSet::from(Flag::Recursive)
                } else {
                    FlagSet::empty()
                };
                let path = Path::from(path.as_str());
                path.rm_with(flags)?;
                info!(path = %path, flags = %flags, "rm");
                Ok(CommandOutput::ok(String::new()))
            }
        }
    }
}

fn format_stat_json(stat: &Stat) -> Result<String, FsvError> {
    let value = json!({
        "path": stat.path,
        "exists": stat.exists,
        "mode": format!("{:o}", stat.mode),
        "is_dir": stat.is_dir,
        "is_regular": stat.is_regular,
        "is_symlink": stat.is_symlink,
        "size": stat.size,
        "owner": stat.owner,
        "owner_name": stat.owner_name,
    });
    serde_json::to_string_pretty(&value)
        .map_err(|e| FsvError::Io(e.into()))
}

fn format_stat_text(stat: &Stat) -> String {
    let kind = if !stat.exists {
        "missing"
    } else if stat.is_symlink {
        "symlink"
    } else if stat.is_dir {
        "directory"
    } else if stat.is_regular {
        "file"
    } else {
        "other"
    };
    let owner = match (&stat.owner_name, stat.owner) {
        (Some(name), Some(uid)) => format!("{} ({})", name, uid),
        (None, Some(uid)) => uid.to_string(),
        _ => "-".to_string(),
    };

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Path".to_string(), stat.path.to_string()]);
    table.add_row(vec!["Kind".to_string(), kind.to_string()]);
    table.add_row(vec!["Mode".to_string(), format!("{:o}", stat.mode)]);
    table.add_row(vec!["Size".to_string(), stat.size.to_string()]);
    table.add_row(vec!["Owner".to_string(), owner]);
    table.to_string()
}
