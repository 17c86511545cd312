//! Error types specific to Svelte components.

use language_core::{AnalysisError, ByteRange, Locator, ParseError};
use thiserror::Error;

/// Errors specific to Svelte components.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SvelteError {
    /// Malformed markup
    #[error("{message}")]
    Template { message: String, offset: u32 },

    /// Script or template expression that does not parse
    #[error("{message}")]
    Script { message: String, range: ByteRange },
}

impl SvelteError {
    pub(crate) fn template(message: impl Into<String>, offset: usize) -> Self {
        SvelteError::Template {
            message: message.into(),
            offset: offset as u32,
        }
    }

    /// Locate the error in the component source.
    pub fn into_parse_error(self, source: &str) -> ParseError {
        let locator = Locator::new(source);
        match self {
            SvelteError::Template { message, offset } => {
                ParseError::at(message, ByteRange::new(offset, offset), &locator)
            }
            SvelteError::Script { message, range } => ParseError::at(message, range, &locator),
        }
    }
}

impl From<SvelteError> for AnalysisError {
    fn from(err: SvelteError) -> Self {
        AnalysisError::Syntax(ParseError::new(err.to_string()))
    }
}
