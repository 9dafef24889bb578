//! Policy-gated removal
//!
//! Removing a missing path succeeds. Files and symlinks are unlinked (links
//! are never followed). Directories are only removed when the recursive
//! flag is present.

use crate::error::{ErrorKind, FsvResult};
use crate::path::Path;
use std::fmt;
use std::fs;
use std::io;
use tracing::debug;

/// Recognized operation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// `r`: allow removing a directory tree
    Recursive,
}

impl Flag {
    pub const ALL: [Flag; 1] = [Flag::Recursive];

    pub fn as_char(self) -> char {
        match self {
            Flag::Recursive => 'r',
        }
    }

    fn bit(self) -> u8 {
        match self {
            Flag::Recursive => 1,
        }
    }
}

impl TryFrom<char> for Flag {
    type Error = crate::error::FsvError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Flag::ALL
            .iter()
            .copied()
            .find(|f| f.as_char() == c)
            .ok_or_else(|| ErrorKind::InvalidFlag.new("", Some(c)))
    }
}

/// Set of [`Flag`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FlagSet(u8);

impl FlagSet {
    pub fn empty() -> Self {
        Self(0)
    }

    /// Parse flag characters. The first unrecognized one is an
    /// `InvalidFlag` error carrying that character.
    pub fn parse(flags: &[char]) -> FsvResult<FlagSet> {
        let mut set = FlagSet::empty();
        for &c in flags {
            set = set.with(Flag::try_from(c)?);
        }
        Ok(set)
    }

    pub fn with(self, flag: Flag) -> Self {
        Self(self.0 | flag.bit())
    }

    pub fn contains(self, flag: Flag) -> bool {
        self.0 & flag.bit() != 0
    }
}

impl From<Flag> for FlagSet {
    fn from(flag: Flag) -> Self {
        FlagSet::empty().with(flag)
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for flag in Flag::ALL {
            if self.contains(flag) {
                write!(f, "{}", flag.as_char())?;
            }
        }
        Ok(())
    }
}

impl Path {
    /// Remove the entry at this path.
    ///
    /// Flags are validated first, so an unknown flag fails even when the
    /// path is absent. Supported flags: `'r'` (recursive).
    pub fn rm(&self, flags: &[char]) -> FsvResult<()> {
        self.rm_with(FlagSet::parse(flags)?)
    }

    pub fn rm_with(&self, flags: FlagSet) -> FsvResult<()> {
        let meta = match fs::symlink_metadata(self.as_std_path()) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self, "nothing to remove");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        if !meta.file_type().is_dir() {
            fs::remove_file(self.as_std_path())?;
            debug!(path = %self, "removed file");
            return Ok(());
        }

        if !flags.contains(Flag::Recursive) {
            return Err(ErrorKind::MissingRecFlag.new(self, None));
        }
        fs::remove_dir_all(self.as_std_path())?;
        debug!(path = %self, flags = %flags, "removed directory tree");
        Ok(())
    }
}
