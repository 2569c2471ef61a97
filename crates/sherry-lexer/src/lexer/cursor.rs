//! Byte-level consumption primitives.

use super::Lexer;
use crate::error::LexError;
use crate::leaf::{Kind, Leaf};
use crate::pos::Pos;

impl<'a> Lexer<'a> {
    pub(super) fn rest(&self) -> &'a [u8] {
        &self.input[self.consumed..]
    }

    pub(super) fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    pub(super) fn peek_at(&self, offset: usize) -> Option<u8> {
        self.rest().get(offset).copied()
    }

    /// Issues the next `size` bytes as a leaf. `size` is clamped to the input.
    pub(super) fn consume(&mut self, size: usize, kind: Kind) -> Leaf<'a> {
        let end = (self.consumed + size).min(self.input.len());
        let leaf = Leaf::new(kind, &self.input[self.consumed..end], Pos::new(self.consumed));
        self.consumed = end;
        leaf
    }

    pub(super) fn try_consume(&mut self, s: &[u8], kind: Kind) -> Option<Leaf<'a>> {
        if self.rest().starts_with(s) {
            Some(self.consume(s.len(), kind))
        } else {
            None
        }
    }

    /// Tries `candidates` in order, falling back to a single byte.
    pub(super) fn consume_operator(&mut self, candidates: &[&[u8]]) -> Leaf<'a> {
        for candidate in candidates {
            if let Some(leaf) = self.try_consume(candidate, Kind::Operator) {
                return leaf;
            }
        }
        self.consume(1, Kind::Operator)
    }

    /// Consumes the longest prefix of bytes satisfying `accept`.
    pub(super) fn consume_while(
        &mut self,
        accept: impl Fn(u8) -> bool,
        kind: Kind,
    ) -> Result<Leaf<'a>, LexError> {
        let len = self.rest().iter().take_while(|&&c| accept(c)).count();
        if len == 0 {
            return Err(LexError::Internal {
                message: "nothing consumed",
                pos: self.pos(),
            });
        }
        Ok(self.consume(len, kind))
    }

    /// A backslash and the byte after it, or a lone trailing backslash.
    pub(super) fn consume_escaped(&mut self) -> Leaf<'a> {
        let size = if self.peek_at(1).is_some() { 2 } else { 1 };
        self.consume(size, Kind::Escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_while_rejects_empty_match() {
        let mut lexer = Lexer::new(b"abc");
        let err = lexer.consume_while(|c| c == b' ', Kind::Space).unwrap_err();
        assert!(err.is_internal());
        assert_eq!(lexer.pos(), Pos::new(0));
    }

    #[test]
    fn operator_prefers_earlier_candidates() {
        let mut lexer = Lexer::new(b"<<-EOF");
        let leaf = lexer.consume_operator(&[b"<<-", b"<<"]);
        assert_eq!(leaf.data(), b"<<-");
        assert_eq!(lexer.pos(), Pos::new(3));
    }

    #[test]
    fn trailing_backslash_is_one_byte() {
        let mut lexer = Lexer::new(b"\\");
        assert_eq!(lexer.consume_escaped().data(), b"\\");
        let mut lexer = Lexer::new(b"\\n");
        assert_eq!(lexer.consume_escaped().data(), b"\\n");
    }
}
