//! Error types for the auto-mpg pipeline.

/// Result type alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A record field could not be coerced to its type.
    Value,
    /// A dataset line is malformed.
    Parse,
    /// Neither cache file could be read or produced.
    Io,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Field coercion failed
    #[error("invalid {field} '{value}'{}", line_suffix(.line))]
    Value {
        field: &'static str,
        value: String,
        line: Option<usize>,
    },

    /// Malformed dataset line
    #[error("parse error{}: {message}", line_suffix(.line))]
    Parse {
        message: String,
        line: Option<usize>,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Raw dataset download failed
    #[error("failed to fetch dataset from {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Writing tabular output failed
    #[error("output error: {message}")]
    Output {
        message: String,
        #[source]
        source: csv::Error,
    },
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(n) => format!(" at line {n}"),
        None => String::new(),
    }
}

impl Error {
    pub fn value(field: &'static str, value: impl Into<String>) -> Self {
        Self::Value {
            field,
            value: value.into(),
            line: None,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            line: None,
        }
    }

    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    pub fn fetch(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Fetch {
            url: url.into(),
            source,
        }
    }

    pub fn output(message: impl Into<String>, source: csv::Error) -> Self {
        Self::Output {
            message: message.into(),
            source,
        }
    }

    /// Attaches a 1-based line number to value and parse errors.
    /// Other variants are returned unchanged.
    pub fn at_line(self, n: usize) -> Self {
        match self {
            Self::Value { field, value, .. } => Self::Value {
                field,
                value,
                line: Some(n),
            },
            Self::Parse { message, .. } => Self::Parse {
                message,
                line: Some(n),
            },
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Value { .. } => ErrorKind::Value,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Io { .. } | Self::Fetch { .. } | Self::Output { .. } => ErrorKind::Io,
        }
    }
}
