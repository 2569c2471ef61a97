//! Arithmetic expansion: `$((...))`.
//!
//! Bodies are split with their own rules: names and numbers become
//! `Variable` leaves, operators become `Term` leaves, and parentheses open a
//! nested [`MathGroup`]. Keywords and quoting are not recognized here.

use tracing::debug;

use super::{Lexer, is_blank};
use crate::error::{Delimiter, LexError};
use crate::leaf::{Kind, Leaf};
use crate::node::{MathGroup, Node};
use crate::pos::Pos;

/// Longest first; single characters last.
const ARITH_OPERATORS: &[&[u8]] = &[
    b"<<=", b">>=", b"**", b"++", b"--", b"<<", b">>", b"<=", b">=", b"==", b"!=", b"&&", b"||",
    b"+=", b"-=", b"*=", b"/=", b"%=", b"&=", b"^=", b"|=", b"+", b"-", b"*", b"/", b"%", b"<",
    b">", b"=", b"!", b"~", b"&", b"^", b"|", b",", b"?", b":",
];

impl<'a> Lexer<'a> {
    /// Lexes `$((...))`, or `$(...)` if the arithmetic body does not close with `))`.
    ///
    /// Each start offset is lexed once: a `$(` retry reaches the same inner
    /// `$((` offsets as the failed attempt did.
    pub(super) fn get_arithmetic(&mut self) -> Result<Node<'a>, LexError> {
        let start = self.consumed;
        if let Some((result, end)) = self.arithmetic.get(&start).cloned() {
            self.consumed = end;
            return result;
        }

        let result = self.lex_arithmetic(start);
        // The nesting limit depends on the caller's depth, not the bytes
        if !matches!(result, Err(LexError::TooDeep { .. })) {
            self.arithmetic.insert(start, (result.clone(), self.consumed));
        }
        result
    }

    fn lex_arithmetic(&mut self, start: usize) -> Result<Node<'a>, LexError> {
        match self.get_math_expansion() {
            Ok(group) => Ok(group.into()),
            Err(err @ LexError::TooDeep { .. }) => Err(err),
            Err(err) => {
                debug!(pos = start, error = %err, "retrying arithmetic expansion as command substitution");
                self.consumed = start;
                Ok(self.get_subshell_string()?.into())
            }
        }
    }

    fn get_math_expansion(&mut self) -> Result<MathGroup<'a>, LexError> {
        let pos = self.pos();
        let lbrace = self.try_consume(b"$((", Kind::Quote).ok_or(LexError::Internal {
            message: "expected `$((`",
            pos,
        })?;
        let nodes = self.nested(pos, |lexer| lexer.get_math_body(Delimiter::Arithmetic, pos))?;
        let rbrace = self
            .try_consume(b"))", Kind::Quote)
            .ok_or(LexError::Unterminated {
                delimiter: Delimiter::Arithmetic,
                pos,
            })?;
        Ok(MathGroup::new(lbrace, nodes, rbrace))
    }

    /// Elements up to, not including, the next unmatched `)`.
    fn get_math_body(&mut self, delimiter: Delimiter, pos: Pos) -> Result<Vec<Node<'a>>, LexError> {
        let mut nodes = Vec::new();
        loop {
            match self.peek() {
                None => return Err(LexError::Unterminated { delimiter, pos }),
                Some(b')') => return Ok(nodes),
                Some(c) => nodes.push(self.get_math_element(c)?),
            }
        }
    }

    fn get_math_element(&mut self, c: u8) -> Result<Node<'a>, LexError> {
        let node = match c {
            b' ' | b'\t' => self.consume_while(is_blank, Kind::Space)?.into(),
            b'\n' => self.consume(1, Kind::NewLine).into(),
            b'\\' => self.consume_escaped().into(),
            b'$' => self.get_variable()?,
            b'(' => self.get_math_group()?.into(),
            b'0'..=b'9' => {
                let rest = self.rest();
                let len = if rest.starts_with(b"0x") || rest.starts_with(b"0X") {
                    2 + rest[2..].iter().take_while(|c| c.is_ascii_hexdigit()).count()
                } else {
                    rest.iter().take_while(|c| c.is_ascii_digit()).count()
                };
                self.consume(len, Kind::Variable).into()
            }
            c if c.is_ascii_alphabetic() || c == b'_' => self
                .consume_while(|c| c.is_ascii_alphanumeric() || c == b'_', Kind::Variable)?
                .into(),
            _ => match self.consume_longest(ARITH_OPERATORS) {
                Some(leaf) => leaf.into(),
                None => self.consume(1, Kind::Unknown).into(),
            },
        };
        Ok(node)
    }

    /// A parenthesized group nested inside an expansion.
    fn get_math_group(&mut self) -> Result<MathGroup<'a>, LexError> {
        let pos = self.pos();
        let lbrace = self.consume(1, Kind::Quote);
        let nodes = self.nested(pos, |lexer| {
            lexer.get_math_body(Delimiter::ArithmeticGroup, pos)
        })?;
        let rbrace = self.try_consume(b")", Kind::Quote).ok_or(LexError::Internal {
            message: "arithmetic group body stopped before `)`",
            pos: self.pos(),
        })?;
        Ok(MathGroup::new(lbrace, nodes, rbrace))
    }

    fn consume_longest(&mut self, table: &[&[u8]]) -> Option<Leaf<'a>> {
        table
            .iter()
            .find(|op| self.rest().starts_with(op))
            .map(|op| self.consume(op.len(), Kind::Term))
    }
}
