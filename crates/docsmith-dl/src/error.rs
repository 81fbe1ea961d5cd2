use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum DownloadError {
    #[error("Invalid URL: {url}")]
    #[diagnostic(code(docsmith_dl::invalid_url))]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Unrecognized repository host: {host}")]
    #[diagnostic(
        code(docsmith_dl::unrecognized_host),
        help("Only github.com and gitlab.com repositories are supported")
    )]
    UnrecognizedHost { host: String },

    #[error("Cannot parse owner/repository from URL: {url}")]
    #[diagnostic(
        code(docsmith_dl::malformed_repository_url),
        help("Repository URLs must look like https://github.com/owner/repo")
    )]
    MalformedRepositoryUrl { url: String },

    #[error(transparent)]
    #[diagnostic(
        code(docsmith_dl::network),
        help("Check your internet connection or try again later")
    )]
    Network(#[from] Box<ureq::Error>),

    #[error("HTTP {status}: {message}")]
    #[diagnostic(code(docsmith_dl::http_error))]
    HttpError { status: u16, message: String },

    #[error(transparent)]
    #[diagnostic(code(docsmith_dl::io))]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DownloadError>;

impl From<ureq::Error> for DownloadError {
    fn from(e: ureq::Error) -> Self {
        Self::Network(Box::new(e))
    }
}
