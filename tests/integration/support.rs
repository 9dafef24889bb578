use fsv::Path;
use std::fs;
use tempfile::TempDir;

/// Temporary directory with helpers for building fixtures.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> Path {
        Path::from(self.dir.path().join(name))
    }

    pub fn file(&self, name: &str, contents: impl AsRef<[u8]>) -> Path {
        let path = self.path(name);
        if let Some(parent) = path.as_std_path().parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path.as_std_path(), contents).unwrap();
        path
    }

    pub fn dir(&self, name: &str) -> Path {
        let path = self.path(name);
        fs::create_dir_all(path.as_std_path()).unwrap();
        path
    }

    #[cfg(unix)]
    pub fn symlink(&self, name: &str, target: &Path) -> Path {
        let path = self.path(name);
        std::os::unix::fs::symlink(target.as_std_path(), path.as_std_path()).unwrap();
        path
    }
}
