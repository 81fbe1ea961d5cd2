use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum FsError {
    #[error("Could not remove `{path}`: {source}")]
    #[diagnostic(code(docsmith_utils::remove))]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not create directory `{path}`: {source}")]
    #[diagnostic(code(docsmith_utils::create_dir))]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{path}` exists but is not a directory")]
    #[diagnostic(
        code(docsmith_utils::not_a_directory),
        help("Remove the conflicting file or pick another destination")
    )]
    NotADirectory { path: PathBuf },
}

pub type FsResult<T> = std::result::Result<T, FsError>;

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_remove_error_display_and_source() {
        let err = FsError::Remove {
            path: PathBuf::from("/tmp/gone"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert_eq!(
            err.to_string(),
            "Could not remove `/tmp/gone`: permission denied"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_not_a_directory_display() {
        let err = FsError::NotADirectory {
            path: PathBuf::from("/tmp/file.txt"),
        };
        assert_eq!(err.to_string(), "`/tmp/file.txt` exists but is not a directory");
        assert!(std::error::Error::source(&err).is_none());
    }
}
