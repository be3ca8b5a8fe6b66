pub(crate) mod newick;

use thiserror::Error;

/// Errors raised while reading a NEWICK statement.
///
/// Positions are byte offsets into the statement.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TreeParseError {
    #[error("Unbalanced parentheses at position {position}.")]
    UnbalancedParentheses { position: usize },
    #[error("Unterminated quoted label starting at position {position}.")]
    UnterminatedQuote { position: usize },
    #[error("Unterminated comment starting at position {position}.")]
    UnterminatedComment { position: usize },
    #[error("Invalid branch length \"{text}\" at position {position}.")]
    InvalidBranchLength { position: usize, text: String },
    #[error("Unexpected trailing content at position {position}.")]
    TrailingContent { position: usize },
    #[error("Missing terminating ';'.")]
    MissingTerminator,
    #[error("Unexpected character {character:?} at position {position}.")]
    UnexpectedCharacter { position: usize, character: char },
    #[error("Unexpected {token} at position {position}.")]
    UnexpectedToken { position: usize, token: String },
}

impl TreeParseError {
    /// Byte offset the error points at, if it has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            TreeParseError::UnbalancedParentheses { position }
            | TreeParseError::UnterminatedQuote { position }
            | TreeParseError::UnterminatedComment { position }
            | TreeParseError::InvalidBranchLength { position, .. }
            | TreeParseError::TrailingContent { position }
            | TreeParseError::UnexpectedCharacter { position, .. }
            | TreeParseError::UnexpectedToken { position, .. } => {
                Some(*position)
            }
            TreeParseError::MissingTerminator => None,
        }
    }
}
