// ABOUTME: File system capability used by the config service and installer.
// ABOUTME: LocalFs backs it with std::fs and replaces files via temp-file rename.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Permission bits for directories created on behalf of callers (umask applies).
pub const DEFAULT_DIR_MODE: u32 = 0o777;

/// File operations: existence, whole-file read/write, directory creation.
pub trait FileSystem: Send + Sync {
    /// Check whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the whole file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replace the file's contents in full.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Create `path` and all missing ancestors with the given mode.
    fn create_dir_all(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// Local disk implementation.
///
/// Writes go to a temp file in the destination directory which is then
/// renamed over the target, so readers never observe a half-written file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(contents)?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn create_dir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;
        builder.create(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_then_read() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("state.json");
        let fs = LocalFs::new();

        fs.write(&file, b"hello").unwrap();
        assert_eq!(fs.read(&file).unwrap(), b"hello");
    }

    #[test]
    fn write_replaces_existing_contents() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("state.json");
        let fs = LocalFs::new();

        fs.write(&file, b"a much longer original body").unwrap();
        fs.write(&file, b"short").unwrap();

        assert_eq!(fs.read(&file).unwrap(), b"short");
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nested").join("dir").join("state.json");

        LocalFs::new().write(&file, b"{}").unwrap();
        assert!(file.exists());
    }

    #[test]
    fn write_leaves_no_temp_files_behind() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("state.json");

        LocalFs::new().write(&file, b"{}").unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn create_dir_all_is_idempotent() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("c");
        let fs = LocalFs::new();

        fs.create_dir_all(&nested, DEFAULT_DIR_MODE).unwrap();
        fs.create_dir_all(&nested, DEFAULT_DIR_MODE).unwrap();

        assert!(nested.is_dir());
    }

    #[test]
    fn remove_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = LocalFs::new()
            .remove_file(&dir.path().join("missing"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
