use thiserror::Error;

/// Error type shared by every tabrs operation
#[derive(Error, Debug)]
pub enum Error {
    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("index out of bounds: position {index}, size {size}")]
    IndexOutOfBounds { index: isize, size: usize },

    #[error("ambiguous key '{key}': {matches} rows match")]
    AmbiguousKey { key: String, matches: usize },

    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("format error: {0}")]
    Format(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("CSV error")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "excel")]
    #[error("Excel error: {0}")]
    Excel(String),
}

impl Error {
    /// True for the lookup failures: missing row label, missing column, or duplicate column
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            Error::KeyNotFound(_) | Error::ColumnNotFound(_) | Error::DuplicateColumnName(_)
        )
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Format(format!("invalid pattern: {}", err))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(err.to_string())
    }
}
