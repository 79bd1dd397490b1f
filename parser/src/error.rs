//! FILENAME: parser/src/error.rs
//! PURPOSE: Structured error taxonomy for formula parsing.
//! CONTEXT: Every failure mode of the lexer and parser maps to exactly one
//! variant here, each carrying the byte offset where the problem was
//! detected. A failed parse never produces a partial tree; callers match
//! on the variant or propagate it.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    /// A character that cannot start any token.
    #[error("unrecognized character '{character}' at offset {offset}")]
    Lex { offset: usize, character: char },

    /// The token sequence violates the grammar.
    #[error("syntax error at offset {offset}: expected {expected}, found {found}")]
    Parse {
        offset: usize,
        expected: String,
        found: String,
    },

    /// A complete formula followed by extra tokens.
    #[error("trailing input at offset {offset}: found {found} after a complete formula")]
    TrailingInput { offset: usize, found: String },

    /// Nesting deeper than the configured recursion limit.
    #[error("formula nesting exceeds the depth limit of {limit} at offset {offset}")]
    DepthLimitExceeded { offset: usize, limit: usize },
}

pub type ParseResult<T> = Result<T, FormulaError>;
