//! Configuration
//!
//! Tunables for hashing, comparison and symlink resolution, plus logging.
//! Loaded by [`ConfigLoader`] from defaults, an optional TOML file and
//! `FSV__*` environment variables.

mod facade;
pub mod sources;

pub use facade::ConfigLoader;

use crate::error::FsvError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Default read chunk for hashing.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Default number of chunks buffered between the hash reader and folder.
pub const DEFAULT_CHANNEL_DEPTH: usize = 4;

/// Default per-file buffer for byte-wise comparison.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Default symlink hop limit (matches the Linux MAXSYMLINKS value).
pub const DEFAULT_MAX_HOPS: usize = 40;

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_channel_depth() -> usize {
    DEFAULT_CHANNEL_DEPTH
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

fn default_max_hops() -> usize {
    DEFAULT_MAX_HOPS
}

/// Streaming hasher settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashConfig {
    /// Bytes read per chunk. Affects throughput only, never the digest.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Chunks that may be in flight between reader and folder
    #[serde(default = "default_channel_depth")]
    pub channel_depth: usize,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            channel_depth: default_channel_depth(),
        }
    }
}

/// Byte-wise comparison settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareConfig {
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
        }
    }
}

/// Symlink resolution settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymlinkConfig {
    /// Hops `Path::target` follows before reporting a cycle
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,
}

impl Default for SymlinkConfig {
    fn default() -> Self {
        Self {
            max_hops: default_max_hops(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FsvConfig {
    #[serde(default)]
    pub hash: HashConfig,

    #[serde(default)]
    pub compare: CompareConfig,

    #[serde(default)]
    pub symlink: SymlinkConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FsvConfig {
    /// Reject settings no operation can run with.
    pub fn validate(&self) -> Result<(), FsvError> {
        let checks = [
            ("hash.chunk_size", self.hash.chunk_size),
            ("hash.channel_depth", self.hash.channel_depth),
            ("compare.buffer_size", self.compare.buffer_size),
            ("symlink.max_hops", self.symlink.max_hops),
        ];
        for (key, value) in checks {
            if value == 0 {
                return Err(FsvError::Config(format!("{} must be greater than zero", key)));
            }
        }
        Ok(())
    }
}
