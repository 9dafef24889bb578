//! Error types for path operations.
//!
//! Policy violations (bad flags, wrong target kind, symlink loops) are typed
//! variants with a stable [`ErrorKind`] discriminant. Every OS-level failure
//! passes through unchanged in [`FsvError::Io`].

use crate::path::Path;
use thiserror::Error;

/// Result type alias for path operations.
pub type FsvResult<T> = Result<T, FsvError>;

/// Error variants for path operations.
#[derive(Debug, Error)]
pub enum FsvError {
    /// An unrecognized operation flag was supplied.
    #[error("Invalid flag: {flag}")]
    InvalidFlag { flag: char },

    /// The destination already exists where a fresh target was required.
    #[error("Occupied path: {path}")]
    OccupiedPath { path: Path },

    /// A required destination directory does not exist.
    #[error("Inexistent target directory: {path}")]
    MissingTargetDir { path: Path },

    /// A directory was targeted without the recursive flag.
    #[error("Removing a directory requires the recursive flag: {path}")]
    MissingRecFlag { path: Path },

    /// The platform lacks a primitive this operation needs.
    #[error("Operating system does not support this operation.")]
    MissingOsSupport,

    #[error("Unknown error.")]
    Unknown,

    /// The operation needs a regular file but found something else.
    #[error("Not a regular file: {path}")]
    FileOperation { path: Path },

    /// Symlink resolution gave up after too many hops.
    #[error("Too many levels of symbolic links: {path}")]
    SymlinkCycle { path: Path },

    /// A cancellation token fired before the operation finished.
    #[error("Operation cancelled: {path}")]
    Cancelled { path: Path },

    /// Configuration or logging setup failed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Underlying OS failure, unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Discriminant of a typed [`FsvError`].
///
/// Two errors are the same kind iff their discriminants match; the path and
/// flag they carry are informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidFlag,
    OccupiedPath,
    MissingTargetDir,
    MissingRecFlag,
    MissingOsSupport,
    Unknown,
    FileOperation,
    SymlinkCycle,
    Cancelled,
}

impl ErrorKind {
    /// All kinds, in code order.
    pub const ALL: [ErrorKind; 9] = [
        ErrorKind::InvalidFlag,
        ErrorKind::OccupiedPath,
        ErrorKind::MissingTargetDir,
        ErrorKind::MissingRecFlag,
        ErrorKind::MissingOsSupport,
        ErrorKind::Unknown,
        ErrorKind::FileOperation,
        ErrorKind::SymlinkCycle,
        ErrorKind::Cancelled,
    ];

    /// Instantiate an error of this kind with its failure-site context.
    ///
    /// Kinds that carry no path or flag ignore the corresponding argument.
    pub fn new(self, path: impl Into<Path>, flag: Option<char>) -> FsvError {
        let path = path.into();
        match self {
            ErrorKind::InvalidFlag => FsvError::InvalidFlag {
                flag: flag.unwrap_or('\0'),
            },
            ErrorKind::OccupiedPath => FsvError::OccupiedPath { path },
            ErrorKind::MissingTargetDir => FsvError::MissingTargetDir { path },
            ErrorKind::MissingRecFlag => FsvError::MissingRecFlag { path },
            ErrorKind::MissingOsSupport => FsvError::MissingOsSupport,
            ErrorKind::Unknown => FsvError::Unknown,
            ErrorKind::FileOperation => FsvError::FileOperation { path },
            ErrorKind::SymlinkCycle => FsvError::SymlinkCycle { path },
            ErrorKind::Cancelled => FsvError::Cancelled { path },
        }
    }

    /// Whether `err` is an error of this kind. `None` never matches.
    pub fn is_type_of(self, err: Option<&FsvError>) -> bool {
        same_kind(Some(self), err)
    }

    /// Stable numeric discriminant, starting at 1.
    pub fn code(self) -> u8 {
        match self {
            ErrorKind::InvalidFlag => 1,
            ErrorKind::OccupiedPath => 2,
            ErrorKind::MissingTargetDir => 3,
            ErrorKind::MissingRecFlag => 4,
            ErrorKind::MissingOsSupport => 5,
            ErrorKind::Unknown => 6,
            ErrorKind::FileOperation => 7,
            ErrorKind::SymlinkCycle => 8,
            ErrorKind::Cancelled => 9,
        }
    }

    pub fn from_code(code: u8) -> Option<ErrorKind> {
        ErrorKind::ALL.iter().copied().find(|k| k.code() == code)
    }
}

impl FsvError {
    /// Discriminant of a typed error; `None` for pass-through failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            FsvError::InvalidFlag { .. } => Some(ErrorKind::InvalidFlag),
            FsvError::OccupiedPath { .. } => Some(ErrorKind::OccupiedPath),
            FsvError::MissingTargetDir { .. } => Some(ErrorKind::MissingTargetDir),
            FsvError::MissingRecFlag { .. } => Some(ErrorKind::MissingRecFlag),
            FsvError::MissingOsSupport => Some(ErrorKind::MissingOsSupport),
            FsvError::Unknown => Some(ErrorKind::Unknown),
            FsvError::FileOperation { .. } => Some(ErrorKind::FileOperation),
            FsvError::SymlinkCycle { .. } => Some(ErrorKind::SymlinkCycle),
            FsvError::Cancelled { .. } => Some(ErrorKind::Cancelled),
            FsvError::Config(_) | FsvError::Io(_) => None,
        }
    }

    /// Path associated with a typed error, if it carries one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            FsvError::OccupiedPath { path }
            | FsvError::MissingTargetDir { path }
            | FsvError::MissingRecFlag { path }
            | FsvError::FileOperation { path }
            | FsvError::SymlinkCycle { path }
            | FsvError::Cancelled { path } => Some(path),
            _ => None,
        }
    }

    /// Flag associated with a typed error, if it carries one.
    pub fn flag(&self) -> Option<char> {
        match self {
            FsvError::InvalidFlag { flag } => Some(*flag),
            _ => None,
        }
    }
}

/// Classify an outcome against an expected kind.
///
/// `None` on both sides ("no error") matches. Exactly one `None` does not.
/// Otherwise the discriminants are compared; pass-through failures have no
/// discriminant and never match.
pub fn same_kind(expected: Option<ErrorKind>, actual: Option<&FsvError>) -> bool {
    match (expected, actual) {
        (None, None) => true,
        (Some(_), None) | (None, Some(_)) => false,
        (Some(kind), Some(err)) => err.kind() == Some(kind),
    }
}

/// Render an error from its numeric discriminant.
///
/// # Panics
///
/// Panics on a code outside the enumerated set. Codes only come from
/// [`ErrorKind::code`], so an unknown one is a programming defect.
pub fn render_code(code: u8, path: &Path, flag: Option<char>) -> String {
    match ErrorKind::from_code(code) {
        Some(kind) => kind.new(path.clone(), flag).to_string(),
        None => panic!("cannot render unidentifiable error code {code}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills_context() {
        let err = ErrorKind::OccupiedPath.new("/tmp/x", None);
        assert_eq!(err.kind(), Some(ErrorKind::OccupiedPath));
        assert_eq!(err.path(), Some(&Path::from("/tmp/x")));
        assert_eq!(err.to_string(), "Occupied path: /tmp/x");

        let err = ErrorKind::InvalidFlag.new("", Some('x'));
        assert_eq!(err.flag(), Some('x'));
        assert_eq!(err.to_string(), "Invalid flag: x");
    }

    #[test]
    fn test_is_type_of_ignores_payload() {
        let a = ErrorKind::MissingRecFlag.new("/a", None);
        assert!(ErrorKind::MissingRecFlag.is_type_of(Some(&a)));
        assert!(!ErrorKind::InvalidFlag.is_type_of(Some(&a)));
        assert!(!ErrorKind::MissingRecFlag.is_type_of(None));
    }

    #[test]
    fn test_same_kind_truth_table() {
        let err = ErrorKind::Unknown.new("", None);
        assert!(same_kind(None, None));
        assert!(!same_kind(Some(ErrorKind::Unknown), None));
        assert!(!same_kind(None, Some(&err)));
        assert!(same_kind(Some(ErrorKind::Unknown), Some(&err)));
    }

    #[test]
    fn test_io_errors_never_match() {
        let err = FsvError::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(err.kind(), None);
        for kind in ErrorKind::ALL {
            assert!(!kind.is_type_of(Some(&err)));
        }
    }

    #[test]
    fn test_codes_round_trip() {
        for kind in ErrorKind::ALL {
            assert_eq!(ErrorKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(ErrorKind::from_code(0), None);
    }

    #[test]
    fn test_render_code() {
        let rendered = render_code(ErrorKind::MissingTargetDir.code(), &Path::from("/d"), None);
        assert_eq!(rendered, "Inexistent target directory: /d");
    }

    #[test]
    #[should_panic(expected = "unidentifiable")]
    fn test_render_unknown_code_panics() {
        render_code(200, &Path::from(""), None);
    }
}
