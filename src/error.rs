use miette::Diagnostic;
use thiserror::Error;

/// Main error type for mapconv operations
#[derive(Error, Diagnostic, Debug)]
pub enum ConvertError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(mapconv::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(mapconv::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Conversion error: {message}")]
    #[diagnostic(code(mapconv::convert))]
    Conversion {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Graph error: {message}")]
    #[diagnostic(code(mapconv::graph))]
    Graph {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl ConvertError {
    /// Shorthand for a graph error without help text.
    pub(crate) fn graph(message: impl Into<String>) -> Self {
        ConvertError::Graph {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
