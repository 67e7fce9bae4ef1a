//! Filesystem metadata probing.
//!
//! The classifier needs to know whether a path is a directory *after* the
//! host has performed its mutation (a rename target may already exist, so
//! the answer cannot be taken from the source). All such questions go
//! through [`PathProbe`] so tests can answer them without a real tree.

use std::path::Path;

/// Answers metadata questions about paths.
pub trait PathProbe: Send + Sync {
    /// Returns `true` if `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Returns `true` if `path` exists.
    fn exists(&self, path: &Path) -> bool;
}

/// [`PathProbe`] backed by `std::fs::metadata`.
///
/// Symlinks are followed, matching what the explorer displays.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn is_dir(&self, path: &Path) -> bool {
        std::fs::metadata(path).is_ok_and(|m| m.is_dir())
    }

    fn exists(&self, path: &Path) -> bool {
        std::fs::metadata(path).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fs_probe() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.txt");
        std::fs::write(&file, "x").unwrap();

        let probe = FsProbe;
        assert!(probe.is_dir(temp.path()));
        assert!(!probe.is_dir(&file));
        assert!(probe.exists(&file));
        assert!(!probe.exists(&temp.path().join("missing")));
        assert!(!probe.is_dir(&temp.path().join("missing")));
    }
}
