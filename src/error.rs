use std::path::PathBuf;

use thiserror::Error;

/// Problems with the settings themselves, reported before any document is read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },

    #[error("invalid pattern {pattern:?}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid base URL {url:?}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// A whole document could not be processed.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("cannot read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} contains no HTML elements", path.display())]
    NotHtml { path: PathBuf },
}

/// A single question block failed mid-parse. The scanner logs and skips it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestionError {
    #[error("options list has {count} items, more than letters A-Z can label")]
    TooManyOptions { count: usize },
}
