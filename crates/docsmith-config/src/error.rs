use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(docsmith_config::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(docsmith_config::io))]
    IoError(#[from] std::io::Error),

    #[error("Duplicate source name: {0}")]
    #[diagnostic(
        code(docsmith_config::duplicate_source),
        help("Each source must have a unique name")
    )]
    DuplicateSourceName(String),

    #[error("Source '{0}' has no tags configured")]
    #[diagnostic(
        code(docsmith_config::no_tags),
        help("Add at least one tag or branch to fetch for this source")
    )]
    EmptyTags(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
