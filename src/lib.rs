//! fsv: Path-Centric Filesystem Utilities
//!
//! A string-backed [`Path`] value type with operations for symlink
//! resolution, metadata inspection, content hashing and comparison, and
//! policy-gated removal.

pub mod cancel;
pub mod compare;
pub mod config;
pub mod error;
pub mod hash;
pub mod info;
pub mod logging;
pub mod path;
pub mod remove;
pub mod tooling;

pub use cancel::CancelToken;
pub use error::{same_kind, ErrorKind, FsvError, FsvResult};
pub use hash::{Digest, Fnv1a64};
pub use info::Stat;
pub use path::{Path, PathList};
pub use remove::{Flag, FlagSet};
