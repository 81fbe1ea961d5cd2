use std::{fs, io, path::Path};

use crate::error::{FsError, FsResult};

/// Remove a file or directory tree, treating a missing path as already done.
///
/// Symlinks are removed as links, never followed, so a link into a tree that
/// must survive cannot drag that tree down with it.
pub fn safe_remove<P: AsRef<Path>>(path: P) -> FsResult<()> {
    let path = path.as_ref();

    let outcome = match path.symlink_metadata() {
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => Err(err),
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
    };

    outcome.map_err(|source| FsError::Remove {
        path: path.to_path_buf(),
        source,
    })
}

/// Create `path` and any missing parents. A directory already being there is
/// fine; anything else already being there is [`FsError::NotADirectory`].
pub fn ensure_dir_exists<P: AsRef<Path>>(path: P) -> FsResult<()> {
    let path = path.as_ref();

    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(FsError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    fs::create_dir_all(path).map_err(|source| FsError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
