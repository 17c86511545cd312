//! PHP-specific analysis errors.

use language_core::{AnalysisError, ByteRange, Locator, ParseError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhpError {
    #[error("Failed to load the PHP grammar: {0}")]
    Language(String),

    #[error("Parser produced no tree")]
    NoTree,

    #[error("{message}")]
    Syntax { message: String, range: ByteRange },
}

impl PhpError {
    /// Locate the error in `source`.
    pub fn into_parse_error(self, source: &str) -> ParseError {
        match self {
            PhpError::Syntax { message, range } => {
                ParseError::at(message, range, &Locator::new(source))
            }
            other => ParseError::new(other.to_string()),
        }
    }
}

impl From<PhpError> for AnalysisError {
    fn from(err: PhpError) -> Self {
        AnalysisError::Syntax(ParseError::new(err.to_string()))
    }
}

pub type PhpResult<T> = Result<T, PhpError>;
