//! The `Path` value type and name-based helpers.
//!
//! A `Path` wraps the raw OS string, so names that are not valid UTF-8
//! survive listing and symlink reads unchanged. Nothing is normalized on
//! construction, so two unequal paths may still name the same inode (see
//! [`Path::same_info_as`]).

use crate::error::FsvError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fmt;

/// Basenames generated by operating systems rather than users.
const OS_FILE_NAMES: [&str; 5] = [
    ".DS_Store",
    "__MACOSX",
    "desktop.ini",
    "Thumbs.db",
    "thumbs.db",
];

/// Filesystem location identifier. Equality compares the raw OS strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(OsString);

impl Path {
    pub fn new(path: impl Into<OsString>) -> Self {
        Self(path.into())
    }

    pub fn as_os_str(&self) -> &OsStr {
        &self.0
    }

    /// The path as UTF-8, if it is.
    pub fn to_str(&self) -> Option<&str> {
        self.0.to_str()
    }

    /// Display form. Invalid sequences become U+FFFD, so never feed this
    /// back into the filesystem.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        self.0.to_string_lossy()
    }

    pub fn as_std_path(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a child, inserting a separator when needed.
    pub fn join(&self, name: impl AsRef<std::path::Path>) -> Path {
        Path::from(self.as_std_path().join(name))
    }

    pub fn join_str(&self, name: &str) -> Path {
        self.join(name)
    }

    /// Last component of the path, or the whole path when it has none.
    pub fn base(&self) -> &OsStr {
        self.as_std_path()
            .file_name()
            .unwrap_or(self.0.as_os_str())
    }

    pub fn parent(&self) -> Option<Path> {
        self.as_std_path().parent().map(Path::from)
    }

    /// Hidden by name: the basename starts with a dot.
    pub fn is_hidden(&self) -> bool {
        self.base().to_string_lossy().starts_with('.')
    }

    pub fn is_visible(&self) -> bool {
        !self.is_hidden()
    }

    /// Whether the basename is one of the files operating systems drop
    /// into directories on their own.
    pub fn is_os_file(&self) -> bool {
        OS_FILE_NAMES.iter().any(|name| self.base() == *name)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_std_path().display())
    }
}

// Serialized for reports, so the lossy form is enough.
impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Path::from)
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<OsString> for Path {
    fn from(s: OsString) -> Self {
        Self(s)
    }
}

impl From<&Path> for Path {
    fn from(p: &Path) -> Self {
        p.clone()
    }
}

impl From<std::path::PathBuf> for Path {
    fn from(p: std::path::PathBuf) -> Self {
        Self(p.into_os_string())
    }
}

impl From<&std::path::Path> for Path {
    fn from(p: &std::path::Path) -> Self {
        Self(p.as_os_str().to_owned())
    }
}

impl AsRef<std::path::Path> for Path {
    fn as_ref(&self) -> &std::path::Path {
        self.as_std_path()
    }
}

/// Ordered collection of paths, as returned by [`Path::ls`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathList(pub Vec<Path>);

impl PathList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Path> {
        self.0.iter()
    }

    /// Apply `op` to every entry, continuing past failures.
    ///
    /// Returns the failing paths paired with their errors, in list order.
    pub fn each<F>(&self, mut op: F) -> Vec<(Path, FsvError)>
    where
        F: FnMut(&Path) -> Result<(), FsvError>,
    {
        self.0
            .iter()
            .filter_map(|p| op(p).err().map(|e| (p.clone(), e)))
            .collect()
    }
}

impl From<Vec<Path>> for PathList {
    fn from(paths: Vec<Path>) -> Self {
        Self(paths)
    }
}

impl IntoIterator for PathList {
    type Item = Path;
    type IntoIter = std::vec::IntoIter<Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PathList {
    type Item = &'a Path;
    type IntoIter = std::slice::Iter<'a, Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
