//! Lexer errors.
//!
//! Every error is fatal to the scan that produced it: the lexer does not
//! resynchronize, and its state is unspecified after a failed `get`.

use std::fmt;

use crate::pos::Pos;

/// An opening delimiter that must be matched before end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `"`
    DoubleQuote,
    /// `$(`
    CommandSubstitution,
    /// `$((`
    Arithmetic,
    /// `(` inside an arithmetic expansion
    ArithmeticGroup,
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Delimiter::DoubleQuote => "double-quoted string",
            Delimiter::CommandSubstitution => "command substitution",
            Delimiter::Arithmetic => "arithmetic expansion",
            Delimiter::ArithmeticGroup => "arithmetic group",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// A special character where only a plain word, `in`, or a pattern is valid.
    #[error("unexpected `{found}` at offset {pos}")]
    Unexpected { found: char, pos: Pos },

    /// The word after `case <subject>` is not `in`.
    #[error("expected \"in\", got {got:?} at offset {pos}")]
    ExpectedIn { got: String, pos: Pos },

    /// Syntax the lexer deliberately does not implement.
    #[error("{what} is not supported (at offset {pos})")]
    Unsupported { what: &'static str, pos: Pos },

    /// An opening delimiter reached end of input without its closing counterpart.
    #[error("unterminated {delimiter} starting at offset {pos}")]
    Unterminated { delimiter: Delimiter, pos: Pos },

    /// Quoted strings, substitutions and arithmetic groups nest too deeply.
    #[error("nesting deeper than {limit} levels at offset {pos}")]
    TooDeep { limit: usize, pos: Pos },

    /// A consumption routine matched nothing. This is a lexer defect, not bad input.
    #[error("internal lexer error at offset {pos}: {message}")]
    Internal { message: &'static str, pos: Pos },
}

impl LexError {
    pub fn pos(&self) -> Pos {
        match self {
            LexError::Unexpected { pos, .. }
            | LexError::ExpectedIn { pos, .. }
            | LexError::Unsupported { pos, .. }
            | LexError::Unterminated { pos, .. }
            | LexError::TooDeep { pos, .. }
            | LexError::Internal { pos, .. } => *pos,
        }
    }

    /// True for invariant violations inside the lexer, as opposed to grammar errors.
    pub fn is_internal(&self) -> bool {
        matches!(self, LexError::Internal { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offset() {
        let err = LexError::Unexpected { found: ';', pos: Pos::new(7) };
        assert_eq!(err.to_string(), "unexpected `;` at offset 7");

        let err = LexError::ExpectedIn { got: "on".into(), pos: Pos::new(8) };
        assert_eq!(err.to_string(), "expected \"in\", got \"on\" at offset 8");

        let err = LexError::Unterminated { delimiter: Delimiter::DoubleQuote, pos: Pos::new(0) };
        assert_eq!(err.to_string(), "unterminated double-quoted string starting at offset 0");

        let err = LexError::TooDeep { limit: 64, pos: Pos::new(128) };
        assert_eq!(err.to_string(), "nesting deeper than 64 levels at offset 128");
    }

    #[test]
    fn only_internal_errors_are_internal() {
        assert!(LexError::Internal { message: "nothing consumed", pos: Pos::new(0) }.is_internal());
        assert!(!LexError::Unsupported { what: "${...}", pos: Pos::new(0) }.is_internal());
    }
}
