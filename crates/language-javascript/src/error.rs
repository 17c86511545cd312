//! Error types specific to JavaScript analysis.

use language_core::{AnalysisError, ByteRange, Locator, ParseError};
use thiserror::Error;

/// Errors specific to JavaScript analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JsAnalysisError {
    /// OXC parser error
    #[error("{message}")]
    Syntax {
        message: String,
        span: Option<ByteRange>,
    },
}

impl JsAnalysisError {
    /// Locate the error in `source`.
    pub fn into_parse_error(self, source: &str) -> ParseError {
        match self {
            JsAnalysisError::Syntax {
                message,
                span: Some(span),
            } => ParseError::at(message, span, &Locator::new(source)),
            JsAnalysisError::Syntax { message, span: None } => ParseError::new(message),
        }
    }
}

impl From<JsAnalysisError> for AnalysisError {
    fn from(err: JsAnalysisError) -> Self {
        match err {
            JsAnalysisError::Syntax { message, .. } => {
                AnalysisError::Syntax(ParseError::new(message))
            }
        }
    }
}
