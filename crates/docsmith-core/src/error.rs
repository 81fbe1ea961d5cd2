use std::path::PathBuf;

use docsmith_utils::error::FsError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CoreError {
    #[error("Unsupported archive type: {kind}")]
    #[diagnostic(
        code(docsmith_core::unsupported_archive),
        help("Only zip and tar(.gz) archives are supported")
    )]
    UnsupportedArchive { kind: String },

    #[error("archive extraction failed: {0}")]
    #[diagnostic(code(docsmith_core::extraction))]
    Extraction(String),

    #[error("Invalid content: not all files are markdown (.md) or image files")]
    #[diagnostic(
        code(docsmith_core::invalid_content),
        help("The source repository may contain files other than documentation")
    )]
    InvalidContent,

    #[error("File `{path}` is not valid UTF-8 markdown")]
    #[diagnostic(code(docsmith_core::invalid_markdown))]
    InvalidMarkdown { path: PathBuf },

    #[error("No extracted content found in `{path}`")]
    #[diagnostic(code(docsmith_core::empty_source))]
    EmptySource { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(code(docsmith_core::filesystem))]
    FileSystem(#[from] FsError),

    #[error(transparent)]
    #[diagnostic(code(docsmith_core::walk))]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    #[diagnostic(code(docsmith_core::io))]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_error_carries_context() {
        let err = CoreError::Extraction("invalid Zip archive".to_string());
        assert_eq!(
            err.to_string(),
            "archive extraction failed: invalid Zip archive"
        );
    }

    #[test]
    fn test_unsupported_archive_display() {
        let err = CoreError::UnsupportedArchive {
            kind: "rar".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported archive type: rar");
    }
}
