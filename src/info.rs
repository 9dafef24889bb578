//! Path identity and metadata
//!
//! Every query here uses lstat semantics: a symlink in the final component
//! is described, not followed. [`Path::exists`] is the one exception.

use crate::config::DEFAULT_MAX_HOPS;
use crate::error::{ErrorKind, FsvError, FsvResult};
use crate::path::{Path, PathList};
use serde::Serialize;
use std::fs;
use std::io;
use tracing::trace;

/// Snapshot of a path's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub path: Path,
    pub exists: bool,
    /// Permission bits plus file type bits where the platform exposes them
    pub mode: u32,
    pub is_dir: bool,
    pub is_regular: bool,
    pub is_symlink: bool,
    pub size: u64,
    /// Owning user id; `None` where the platform has no such concept
    pub owner: Option<u32>,
    /// Owning user's login name, when the user database knows the id
    pub owner_name: Option<String>,
}

impl Stat {
    fn from_metadata(path: &Path, meta: &fs::Metadata) -> Self {
        let file_type = meta.file_type();
        Self {
            path: path.clone(),
            exists: true,
            mode: mode_bits(meta),
            is_dir: file_type.is_dir(),
            is_regular: file_type.is_file(),
            is_symlink: file_type.is_symlink(),
            size: meta.len(),
            owner: owner_id(meta),
            owner_name: owner_id(meta).and_then(user_name),
        }
    }

    fn missing(path: &Path) -> Self {
        Self {
            path: path.clone(),
            exists: false,
            mode: 0,
            is_dir: false,
            is_regular: false,
            is_symlink: false,
            size: 0,
            owner: None,
            owner_name: None,
        }
    }
}

#[cfg(unix)]
fn mode_bits(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    meta.mode()
}

#[cfg(not(unix))]
fn mode_bits(meta: &fs::Metadata) -> u32 {
    if meta.permissions().readonly() {
        0o444
    } else {
        0o666
    }
}

#[cfg(unix)]
fn owner_id(meta: &fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::MetadataExt;
    Some(meta.uid())
}

#[cfg(not(unix))]
fn owner_id(_meta: &fs::Metadata) -> Option<u32> {
    None
}

#[cfg(unix)]
fn user_name(uid: u32) -> Option<String> {
    uzers::get_user_by_uid(uid).map(|user| user.name().to_string_lossy().into_owned())
}

#[cfg(not(unix))]
fn user_name(_uid: u32) -> Option<String> {
    None
}

impl Path {
    /// Whether anything exists at this path.
    ///
    /// Follows symlinks, so a dangling link reports `false`. Any stat failure,
    /// including permission denied, also reports `false`: the answer is
    /// "could not confirm", not "definitely absent".
    pub fn exists(&self) -> bool {
        fs::metadata(self.as_std_path()).is_ok()
    }

    /// Raw lstat metadata.
    pub fn info(&self) -> FsvResult<fs::Metadata> {
        Ok(fs::symlink_metadata(self.as_std_path())?)
    }

    /// Metadata snapshot. A missing path yields `exists == false` instead of
    /// an error; other failures propagate.
    pub fn stat(&self) -> FsvResult<Stat> {
        match fs::symlink_metadata(self.as_std_path()) {
            Ok(meta) => Ok(Stat::from_metadata(self, &meta)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Stat::missing(self)),
            Err(e) => Err(e.into()),
        }
    }

    pub fn mode(&self) -> FsvResult<u32> {
        Ok(mode_bits(&self.info()?))
    }

    /// Regular file (not a link, directory, device ...).
    pub fn is_file(&self) -> FsvResult<bool> {
        Ok(self.info()?.file_type().is_file())
    }

    pub fn is_dir(&self) -> FsvResult<bool> {
        Ok(self.info()?.file_type().is_dir())
    }

    pub fn is_symlink(&self) -> FsvResult<bool> {
        Ok(self.info()?.file_type().is_symlink())
    }

    /// Size in bytes of a regular file.
    pub fn size(&self) -> FsvResult<u64> {
        let meta = self.info()?;
        if !meta.file_type().is_file() {
            return Err(ErrorKind::FileOperation.new(self, None));
        }
        Ok(meta.len())
    }

    /// Owning user id.
    pub fn owner(&self) -> FsvResult<u32> {
        let meta = self.info()?;
        owner_id(&meta).ok_or(FsvError::MissingOsSupport)
    }

    /// Login name of the owning user.
    ///
    /// An id missing from the user database is a `NotFound` I/O error.
    pub fn owner_name(&self) -> FsvResult<String> {
        let uid = self.owner()?;
        user_name(uid).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no user with uid {}", uid)).into()
        })
    }

    /// Read a symlink's target, one hop, exactly as stored.
    pub fn follow(&self) -> FsvResult<Path> {
        Ok(Path::from(fs::read_link(self.as_std_path())?))
    }

    /// Follow symlinks until a non-symlink is reached.
    ///
    /// Relative link targets resolve against the directory holding the link.
    /// A non-symlink is returned unchanged. Gives up with `SymlinkCycle`
    /// after the default hop limit.
    pub fn target(&self) -> FsvResult<Path> {
        self.target_with_limit(DEFAULT_MAX_HOPS)
    }

    pub fn target_with_limit(&self, max_hops: usize) -> FsvResult<Path> {
        let mut current = self.clone();
        let mut hops = 0;
        while current.is_symlink()? {
            if hops == max_hops {
                return Err(ErrorKind::SymlinkCycle.new(&current, None));
            }
            let next = current.follow()?;
            current = if next.as_std_path().is_absolute() {
                next
            } else {
                match current.as_std_path().parent() {
                    Some(dir) => Path::from(dir.join(next.as_std_path())),
                    None => next,
                }
            };
            hops += 1;
            trace!(from = %self, hop = hops, to = %current, "followed symlink");
        }
        Ok(current)
    }

    /// Whether both paths refer to the same file at the OS level.
    ///
    /// Uses device and inode numbers on unix. Elsewhere this falls back to
    /// comparing canonicalized paths, which misses hard links.
    pub fn same_info_as(&self, other: &Path) -> FsvResult<bool> {
        let a = self.info()?;
        let b = other.info()?;
        Ok(same_file(self, &a, other, &b))
    }

    /// List directory entries, joined onto this path and sorted by name.
    pub fn ls(&self) -> FsvResult<PathList> {
        let mut names = fs::read_dir(self.as_std_path())?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect::<Result<Vec<_>, _>>()?;
        names.sort();
        Ok(names.iter().map(|name| self.join(name)).collect::<Vec<_>>().into())
    }

    /// Set permission bits.
    pub fn chmod(&self, mode: u32) -> FsvResult<()> {
        set_mode(self, mode)
    }

    /// Change owner and group.
    pub fn chown(&self, uid: u32, gid: u32) -> FsvResult<()> {
        change_owner(self, uid, gid)
    }

    pub fn read_bytes(&self) -> FsvResult<Vec<u8>> {
        Ok(fs::read(self.as_std_path())?)
    }

    pub fn read_string(&self) -> FsvResult<String> {
        Ok(fs::read_to_string(self.as_std_path())?)
    }

    /// Number of characters in a UTF-8 file.
    pub fn count_runes(&self) -> FsvResult<usize> {
        Ok(self.read_string()?.chars().count())
    }

    /// Number of newline characters in a UTF-8 file.
    pub fn count_lines(&self) -> FsvResult<usize> {
        Ok(self.read_string()?.matches('\n').count())
    }
}

#[cfg(unix)]
fn same_file(_: &Path, a: &fs::Metadata, _: &Path, b: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    a.dev() == b.dev() && a.ino() == b.ino()
}

#[cfg(not(unix))]
fn same_file(pa: &Path, _: &fs::Metadata, pb: &Path, _: &fs::Metadata) -> bool {
    match (dunce::canonicalize(pa), dunce::canonicalize(pb)) {
        (Ok(a), Ok(b)) => a == b,
        _ => pa == pb,
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> FsvResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path.as_std_path(), fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(path: &Path, mode: u32) -> FsvResult<()> {
    let mut perms = fs::metadata(path.as_std_path())?.permissions();
    perms.set_readonly(mode & 0o200 == 0);
    fs::set_permissions(path.as_std_path(), perms)?;
    Ok(())
}

#[cfg(unix)]
fn change_owner(path: &Path, uid: u32, gid: u32) -> FsvResult<()> {
    std::os::unix::fs::chown(path.as_std_path(), Some(uid), Some(gid))?;
    Ok(())
}

#[cfg(not(unix))]
fn change_owner(_path: &Path, _uid: u32, _gid: u32) -> FsvResult<()> {
    Err(FsvError::MissingOsSupport)
}
