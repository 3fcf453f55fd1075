//! Error types shared by the lexer and parser layers.
//!
//! Two input-error categories exist: [`LexError`] for faults raised while
//! scanning characters (a stray `\` at the end of input, a byte no rule
//! matches) and [`ParseError`] for faults raised while consuming tokens
//! (unmatched delimiters, a missing expected token). Both carry a 1-indexed
//! `(row, col)` position computed from the failing offset.
//!
//! Builder misuse (unbalanced `start_node`/`finish_node`, `finish` with open
//! nodes) is an implementation bug, not an input error, and panics instead of
//! surfacing here.

use thiserror::Error;

/// A fault raised while scanning the source into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {row}:{col}")]
pub struct LexError {
    /// Human-readable description, e.g. `Unexpected EOF after '\'`.
    pub message: String,
    /// 1-indexed line of the offending character.
    pub row: usize,
    /// 1-indexed column of the offending character.
    pub col: usize,
}

/// A fault raised while consuming the token stream.
///
/// The first fault aborts the parse; there is no recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The cursor held a token of the wrong kind.
    #[error("Expected {expected} at {row}:{col}, found {found} instead")]
    Expected {
        expected: String,
        found: String,
        row: usize,
        col: usize,
    },
    /// The cursor ran out of tokens while more input was required.
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },
    /// A closing delimiter appeared with no group to close.
    #[error("Unmatched punctuation at {row}:{col}")]
    UnmatchedPunctuation { row: usize, col: usize },
    /// Infix-only punctuation appeared where an expression was required.
    #[error("Unexpected punctuation at {row}:{col}")]
    UnexpectedPunctuation { row: usize, col: usize },
    /// A closing delimiter appeared where an expression was required.
    #[error("Unmatched grouping at {row}:{col}")]
    UnmatchedGrouping { row: usize, col: usize },
}

/// Umbrella error for entry points that lex and parse in one call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
