use docsmith_core::error::CoreError;
use docsmith_dl::error::DownloadError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum OperationError {
    #[error("No source named `{name}` in the configuration")]
    #[diagnostic(
        code(docsmith_operations::source_not_found),
        help("Run `docsmith list` to see the configured sources")
    )]
    SourceNotFound { name: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Download(#[from] DownloadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    #[diagnostic(code(docsmith_operations::io))]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OperationError>;
