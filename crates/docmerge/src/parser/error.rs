//! Template syntax errors.

use thiserror::Error;

/// A structurally invalid template.
///
/// These are authoring-time errors: a template that fails to parse must not be
/// saved or rendered. Positions are 1-based; `offset` is the byte offset of the
/// offending directive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `{{/each}}` with no open loop.
    #[error("syntax error at {line}:{column}: '{{{{/each}}}}' without a matching '{{{{#each}}}}'")]
    UnmatchedLoopEnd {
        offset: usize,
        line: usize,
        column: usize,
    },

    /// The template ended with a loop still open.
    #[error(
        "syntax error at {line}:{column}: loop over '{collection}' is never closed ({open} open at end of template)"
    )]
    UnterminatedLoop {
        collection: String,
        offset: usize,
        line: usize,
        column: usize,
        /// Number of loops still open when the template ended.
        open: usize,
    },

    /// A loop start nested deeper than [`MAX_LOOP_DEPTH`].
    ///
    /// [`MAX_LOOP_DEPTH`]: crate::parser::MAX_LOOP_DEPTH
    #[error(
        "syntax error at {line}:{column}: loop over '{collection}' is nested deeper than {limit} loops"
    )]
    NestingTooDeep {
        collection: String,
        offset: usize,
        line: usize,
        column: usize,
        limit: usize,
    },
}

impl ParseError {
    /// Returns the 1-based line and column of the offending directive.
    pub fn position(&self) -> (usize, usize) {
        match self {
            ParseError::UnmatchedLoopEnd { line, column, .. }
            | ParseError::UnterminatedLoop { line, column, .. }
            | ParseError::NestingTooDeep { line, column, .. } => (*line, *column),
        }
    }

    /// Returns the byte offset of the offending directive.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnmatchedLoopEnd { offset, .. }
            | ParseError::UnterminatedLoop { offset, .. }
            | ParseError::NestingTooDeep { offset, .. } => *offset,
        }
    }
}
