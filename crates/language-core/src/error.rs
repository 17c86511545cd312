//! Error types for reference analysis and navigation.

use crate::locator::Locator;
use crate::types::{ByteRange, Position};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Malformed source, reported as data rather than a failure of the query.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct ParseError {
    /// Parser message
    pub message: String,
    /// Byte range of the offending text, when the parser reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<ByteRange>,
    /// Start point of `range`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Position>,
    /// End point of `range`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Position>,
}

impl ParseError {
    /// An error without a location.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            range: None,
            start: None,
            end: None,
        }
    }

    /// An error located at `range`, with points computed through `locator`.
    ///
    /// The range is clamped to the text so a parser reporting an offset at
    /// end-of-input still yields a usable location.
    pub fn at(message: impl Into<String>, range: ByteRange, locator: &Locator) -> Self {
        let end = range.end.min(locator.len());
        let start = range.start.min(end);
        let range = ByteRange::new(start, end);
        Self {
            message: message.into(),
            range: Some(range),
            start: locator.point_of(start).ok(),
            end: locator.point_of(end).ok(),
        }
    }
}

/// Offset/point conversion failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorError {
    #[error("offset {offset} is outside of the text (length {len})")]
    OffsetOutOfBounds { offset: u32, len: u32 },

    #[error("row {row} is outside of the text ({rows} lines)")]
    RowOutOfBounds { row: u32, rows: usize },
}

/// Why a jump context could not be built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// No analyzer is registered for the scope; nothing to do.
    #[error("unsupported scope '{0}'")]
    UnsupportedScope(String),

    /// The file does not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors that can occur during analysis and navigation.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// File could not be read
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File could not be parsed
    #[error("Failed to parse file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// Source could not be parsed (no file involved)
    #[error(transparent)]
    Syntax(#[from] ParseError),

    /// Offset or point outside of the text
    #[error(transparent)]
    Locator(#[from] LocatorError),

    /// Module resolution failed
    #[error("module {specifier} was not found")]
    ModuleNotFound {
        specifier: String,
        from_path: PathBuf,
    },

    /// Re-export chain longer than the hop budget
    #[error("Unable to find origin: too many jumps (limit {limit})")]
    TooManyJumps { limit: u32 },

    /// Scope not handled by any analyzer
    #[error("Scope '{scope}' is not supported")]
    UnsupportedScope { scope: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ContextError> for AnalysisError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::UnsupportedScope(scope) => AnalysisError::UnsupportedScope { scope },
            ContextError::Parse(source) => AnalysisError::Syntax(source),
        }
    }
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
