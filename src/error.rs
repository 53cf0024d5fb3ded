//! Error types for latlong-helper

use thiserror::Error;

/// Broad classification of an [`Error`]
///
/// `Type` covers arguments that are not numbers at all; `Value` covers
/// numbers that fall outside what the operation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Type,
    Value,
    Other,
}

/// Main error type for latlong-helper operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("{name} must be numeric")]
    NotNumeric { name: String },

    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("grid sizes must be > 0")]
    InvalidGrid,

    #[error("Invalid bin identifier: {0}")]
    InvalidBin(String),

    #[error("no bins to plot")]
    EmptyInput,

    #[error("Invalid figure size: {0}")]
    InvalidFigure(String),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn not_numeric(name: impl Into<String>) -> Self {
        Self::NotNumeric { name: name.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotNumeric { .. } => ErrorKind::Type,
            Self::OutOfRange { .. }
            | Self::InvalidGrid
            | Self::InvalidBin(_)
            | Self::EmptyInput
            | Self::InvalidFigure(_)
            | Self::UnknownFormat(_) => ErrorKind::Value,
            _ => ErrorKind::Other,
        }
    }
}

/// Result type alias for latlong-helper operations
pub type Result<T> = std::result::Result<T, Error>;
