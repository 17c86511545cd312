//! Python-specific analysis errors.

use language_core::{AnalysisError, ByteRange, Locator, ParseError};
use thiserror::Error;

/// Errors that can occur during Python analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PythonError {
    /// The grammar could not be loaded into the parser.
    #[error("Failed to load the Python grammar: {0}")]
    Language(String),

    /// tree-sitter gave up without producing a tree.
    #[error("Parser produced no tree")]
    NoTree,

    /// Syntax error outside of IPython magic lines.
    #[error("{message}")]
    Syntax { message: String, range: ByteRange },
}

impl PythonError {
    /// Locate the error in `source`.
    pub fn into_parse_error(self, source: &str) -> ParseError {
        match self {
            PythonError::Syntax { message, range } => {
                ParseError::at(message, range, &Locator::new(source))
            }
            other => ParseError::new(other.to_string()),
        }
    }
}

impl From<PythonError> for AnalysisError {
    fn from(err: PythonError) -> Self {
        AnalysisError::Syntax(ParseError::new(err.to_string()))
    }
}

pub type PythonResult<T> = Result<T, PythonError>;
