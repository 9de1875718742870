//! Local filesystem adapter using std::fs.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use trellis_core::application::{
    error::{FileSystemError, FsErrorReason, FsResult},
    ports::{Ensured, Filesystem},
};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        fs::create_dir_all(path).map_err(|e| dir_error(path, &e))
    }

    fn create_file(&self, path: &Path) -> FsResult<Ensured> {
        // create_new is an atomic "create if absent"; it never truncates.
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(_) => Ok(Ensured::Created),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(Ensured::AlreadyExisted),
            Err(e) => Err(FileSystemError::from_io(path, &e)),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so that a dangling symlink still counts as "something is there"
        fs::symlink_metadata(path).is_ok()
    }

    fn count_files(&self, root: &Path) -> FsResult<usize> {
        if !root.exists() {
            return Ok(0);
        }

        let mut count = 0;
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                match e.into_io_error() {
                    Some(io) => FileSystemError::from_io(path, &io),
                    None => FileSystemError::new(path, FsErrorReason::Other, "filesystem loop"),
                }
            })?;
            if entry.file_type().is_file() {
                count += 1;
            }
        }
        Ok(count)
    }
}

/// `create_dir_all` reports a file sitting where a directory should be as
/// `AlreadyExists` (or `NotADirectory` further down); both are collisions.
fn dir_error(path: &Path, e: &io::Error) -> FileSystemError {
    let offending = path
        .ancestors()
        .find(|p| p.is_file())
        .unwrap_or(path)
        .to_path_buf();

    match e.kind() {
        io::ErrorKind::AlreadyExists | io::ErrorKind::NotADirectory => FileSystemError::new(
            offending,
            FsErrorReason::NameCollision,
            format!("a file exists where a directory is needed ({e})"),
        ),
        _ => FileSystemError::from_io(path, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn create_file_never_truncates() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("App.kt");
        fs::write(&path, "keep me").unwrap();

        let result = LocalFilesystem.create_file(&path).unwrap();

        assert_eq!(result, Ensured::AlreadyExisted);
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn create_file_makes_empty_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("App.kt");

        assert_eq!(LocalFilesystem.create_file(&path).unwrap(), Ensured::Created);
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn existing_directory_counts_as_already_existed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("res");
        fs::create_dir(&path).unwrap();

        assert_eq!(
            LocalFilesystem.create_file(&path).unwrap(),
            Ensured::AlreadyExisted
        );
        assert!(path.is_dir());
    }

    #[test]
    fn create_dir_all_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a/b/c");

        LocalFilesystem.create_dir_all(&path).unwrap();
        LocalFilesystem.create_dir_all(&path).unwrap();
        assert!(path.is_dir());
    }

    #[test]
    fn file_in_the_way_is_name_collision() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("core"), "").unwrap();

        let err = LocalFilesystem
            .create_dir_all(&tmp.path().join("core/di"))
            .unwrap_err();

        assert_eq!(err.reason, FsErrorReason::NameCollision);
        assert_eq!(err.path, tmp.path().join("core"));
    }

    #[test]
    fn count_files_walks_recursively() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        fs::write(tmp.path().join("a/one"), "").unwrap();
        fs::write(tmp.path().join("a/b/two"), "").unwrap();

        assert_eq!(LocalFilesystem.count_files(tmp.path()).unwrap(), 2);
        assert_eq!(
            LocalFilesystem
                .count_files(&tmp.path().join("missing"))
                .unwrap(),
            0
        );
    }

    #[cfg(unix)]
    #[test]
    fn read_only_directory_is_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let locked = tmp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        let result = LocalFilesystem.create_file(&locked.join("App.kt"));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // root ignores permission bits
        if let Err(err) = result {
            assert_eq!(err.reason, FsErrorReason::PermissionDenied);
        }
    }
}
