use thiserror::Error;

use crate::Position;

/// A fatal parse failure and the source position that triggered it.
///
/// Every failure is terminal: the parser that produced it is closed and
/// emits nothing further.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source} at {position}")]
pub struct ParserError {
    pub(crate) source: SyntaxError,
    pub(crate) position: Position,
}

impl ParserError {
    pub(crate) const fn new(source: SyntaxError, position: Position) -> Self {
        Self { source, position }
    }

    /// What went wrong.
    #[must_use]
    pub const fn kind(&self) -> &SyntaxError {
        &self.source
    }

    /// Where it went wrong.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }
}

/// The kinds of fatal conditions the parser detects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A `}` arrived while no node was open.
    #[error("unmatched '}}'")]
    UnmatchedClose,
    /// The input ended while a node was still open.
    #[error("unterminated node")]
    UnterminatedNode,
    /// The input ended inside a quoted token opened with the given quote.
    #[error("unterminated quoted token")]
    UnterminatedQuote(char),
    /// The input ended right after a backslash.
    #[error("unterminated escape sequence")]
    UnterminatedEscape,
    /// The input ended inside a `/* ... */` comment.
    #[error("unterminated block comment")]
    UnterminatedComment,
    /// A top-level node had no name and nameless root nodes are disabled.
    #[error("nameless root node not allowed")]
    NamelessRootNode,
    /// A nested node had no name and nameless nested nodes are disabled.
    #[error("nameless nested node not allowed")]
    NamelessNestedNode,
    /// A character appeared where the grammar forbids it.
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    /// Opening a node would exceed the configured nesting limit.
    #[error("maximum nesting depth of {0} exceeded")]
    DepthLimitExceeded(usize),
}
