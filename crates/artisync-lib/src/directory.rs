use crate::error::ArtifactSyncError;
use std::io::ErrorKind;
use std::path::Path;

/// Creates `path` and any missing ancestors.
///
/// An existing directory is left untouched. A non-directory at `path` is a
/// [`ArtifactSyncError::DirectoryConflict`] and nothing is created.
pub fn ensure_dir(path: &Path) -> Result<(), ArtifactSyncError> {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => return Ok(()),
        Ok(_) => {
            return Err(ArtifactSyncError::DirectoryConflict {
                path: path.to_path_buf(),
            });
        }
        // A file ancestor shows up as NotADirectory; the parent check below reports it.
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {}
        Err(e) => {
            return Err(ArtifactSyncError::DirectoryCreation {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
        }
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    tracing::trace!(path = %path.display(), "Creating directory");
    match std::fs::create_dir(path) {
        Ok(()) => Ok(()),
        // Lost a race with another creator.
        Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(ArtifactSyncError::DirectoryCreation {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

/// Removes the directory tree at `path` if there is one.
///
/// A non-directory at `path` is left alone so that a following [`ensure_dir`]
/// reports the conflict.
pub fn clear_dir(path: &Path) -> Result<(), ArtifactSyncError> {
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(ArtifactSyncError::DirectoryClear {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
        }
    };

    if !metadata.is_dir() {
        tracing::debug!(path = %path.display(), "Not a directory, leaving in place");
        return Ok(());
    }

    tracing::debug!(path = %path.display(), "Removing previous contents");
    std::fs::remove_dir_all(path).map_err(|e| ArtifactSyncError::DirectoryClear {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
