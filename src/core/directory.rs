// src/core/directory.rs

//! The filesystem boundary of the engine.
//!
//! Everything that reads or mutates a workspace goes through [`DirLister`] and
//! [`FileManager`], so tests can observe or intercept individual operations.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures of the filesystem boundary, each carrying the path involved.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// A directory couldn't be read.
    #[error("Could not list directory '{}': {source}", path.display())]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A file or directory couldn't be removed.
    #[error("Could not remove '{}': {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A file couldn't be written.
    #[error("Could not write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A directory couldn't be created.
    #[error("Could not create directory '{}': {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A rename failed.
    #[error("Could not move '{}' to '{}': {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of every filesystem boundary operation.
pub type DirResult<T> = Result<T, DirectoryError>;

/// Read access to the namespace.
pub trait DirLister {
    /// Names of the subdirectories of `dir`, sorted. Hidden ones only if asked.
    fn list(&self, dir: &Path, include_hidden: bool) -> DirResult<Vec<String>>;

    /// Names of the non-directory entries of `dir`, sorted.
    fn list_files(&self, dir: &Path) -> DirResult<Vec<String>>;

    /// True if `path` exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Write access to the namespace.
pub trait FileManager {
    /// Removes a single file.
    fn remove(&self, path: &Path) -> DirResult<()>;

    /// Removes a directory and everything below it. A missing directory is not an error.
    fn remove_all(&self, dir: &Path) -> DirResult<()>;

    /// Replaces `path` with `bytes` in a single step.
    fn write(&self, path: &Path, bytes: &[u8]) -> DirResult<()>;

    /// Creates `dir` and any missing parents.
    fn create_dir_all(&self, dir: &Path) -> DirResult<()>;

    /// Moves `from` to `to`. Both must be on the same filesystem.
    fn rename(&self, from: &Path, to: &Path) -> DirResult<()>;
}

/// The real, local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl LocalFs {
    fn entries(dir: &Path) -> DirResult<Vec<(String, bool)>> {
        let list_err = |source| DirectoryError::List {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(list_err)? {
            let entry = entry.map_err(list_err)?;
            let is_dir = entry.file_type().map_err(list_err)?.is_dir();
            entries.push((entry.file_name().to_string_lossy().into_owned(), is_dir));
        }
        entries.sort();
        Ok(entries)
    }
}

impl DirLister for LocalFs {
    fn list(&self, dir: &Path, include_hidden: bool) -> DirResult<Vec<String>> {
        Ok(Self::entries(dir)?
            .into_iter()
            .filter(|(name, is_dir)| *is_dir && (include_hidden || !name.starts_with('.')))
            .map(|(name, _)| name)
            .collect())
    }

    fn list_files(&self, dir: &Path) -> DirResult<Vec<String>> {
        Ok(Self::entries(dir)?
            .into_iter()
            .filter(|(_, is_dir)| !is_dir)
            .map(|(name, _)| name)
            .collect())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

impl FileManager for LocalFs {
    fn remove(&self, path: &Path) -> DirResult<()> {
        log::trace!("Removing file: {}", path.display());
        fs::remove_file(path).map_err(|source| DirectoryError::Remove {
            path: path.to_path_buf(),
            source,
        })
    }

    fn remove_all(&self, dir: &Path) -> DirResult<()> {
        log::debug!("Removing directory: {}", dir.display());
        match fs::remove_dir_all(dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(DirectoryError::Remove {
                path: dir.to_path_buf(),
                source,
            }),
        }
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> DirResult<()> {
        let write_err = |source| DirectoryError::Write {
            path: path.to_path_buf(),
            source,
        };
        // Stage next to the target so the final rename never crosses filesystems.
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let mut staged = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
        staged.write_all(bytes).map_err(write_err)?;
        staged.flush().map_err(write_err)?;
        staged.persist(path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    fn create_dir_all(&self, dir: &Path) -> DirResult<()> {
        fs::create_dir_all(dir).map_err(|source| DirectoryError::Create {
            path: dir.to_path_buf(),
            source,
        })
    }

    fn rename(&self, from: &Path, to: &Path) -> DirResult<()> {
        log::debug!("Moving '{}' to '{}'", from.display(), to.display());
        fs::rename(from, to).map_err(|source| DirectoryError::Move {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })
    }
}
