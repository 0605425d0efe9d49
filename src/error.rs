use std::path::PathBuf;
use thiserror::Error;

/// Style guide error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigYaml(#[from] serde_yaml::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Configuration file not found at path '{0}'")]
    ConfigNotFound(PathBuf),

    #[error("No file named '{name}' found")]
    FileNotFound { name: String },

    #[error("Template '{0}' not found")]
    TemplateNotFound(String),

    #[error("Failed to parse template {path}: {message}")]
    TemplateParse { path: PathBuf, message: String },

    #[error("Page '{0}' not found")]
    PageNotFound(String),

    #[error("Static file '{0}' not found")]
    StaticNotFound(String),

    #[error("Destination directory '{0}' already exists")]
    AlreadyExists(PathBuf),

    #[error("Template error: {}", error_chain(.0))]
    Template(#[from] minijinja::Error),

    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for style guide operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Create a template parse error
    pub fn template_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::TemplateParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file-not-found error for a name searched across directories
    pub fn file_not_found(name: impl Into<String>) -> Self {
        Error::FileNotFound { name: name.into() }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// True for the user-correctable "something is missing" family
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::ConfigNotFound(_)
            | Error::FileNotFound { .. }
            | Error::TemplateNotFound(_)
            | Error::PageNotFound(_)
            | Error::StaticNotFound(_) => true,
            Error::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Flatten an error and its sources into one line
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
