//! The `case <word> in <pattern>) ... esac` sub-machine.
//!
//! Only the parts of a `case` statement that change how bytes are split are
//! tracked here. The statement as a whole is left to the parser: pattern mode
//! ends at the first `)` or at `esac` in pattern position, and a `;;` in
//! command context re-enters it.

use super::{Lexer, State, is_operator_start, is_word_special};
use crate::error::LexError;
use crate::leaf::Kind;
use crate::node::Node;

impl<'a> Lexer<'a> {
    /// The subject of `case`: any plain word, including `$x` and quotes.
    pub(super) fn get_case_subject(&mut self, c: u8) -> Result<Node<'a>, LexError> {
        if is_operator_start(c) {
            return Err(self.unexpected(c));
        }
        let word = self.get_word()?;
        self.set_state(State::CaseWaitIn);
        Ok(word.into())
    }

    pub(super) fn get_case_in(&mut self, c: u8) -> Result<Node<'a>, LexError> {
        if is_word_special(c) {
            return Err(self.unexpected(c));
        }
        let pos = self.pos();
        let leaf = self.consume_while(|c| !is_word_special(c), Kind::Keyword)?;
        if leaf.data() != b"in" {
            return Err(LexError::ExpectedIn {
                got: String::from_utf8_lossy(leaf.data()).into_owned(),
                pos,
            });
        }
        self.set_state(State::CaseWaitPattern);
        Ok(leaf.into())
    }

    pub(super) fn get_case_pattern(&mut self, c: u8) -> Result<Node<'a>, LexError> {
        match c {
            b'(' => Ok(self.consume(1, Kind::Operator).into()),
            b')' => {
                let leaf = self.consume(1, Kind::Operator);
                self.set_state(State::Normal);
                Ok(leaf.into())
            }
            b';' | b'&' | b'|' | b'<' | b'>' => Err(self.unexpected(c)),
            _ => {
                let word = self.get_word()?;
                if let Some(leaf) = word.single_leaf(Kind::Term).filter(|leaf| leaf.data() == b"esac") {
                    self.set_state(State::Normal);
                    return Ok(leaf.with_kind(Kind::Keyword).into());
                }
                Ok(word.into())
            }
        }
    }

    fn unexpected(&self, c: u8) -> LexError {
        LexError::Unexpected {
            found: char::from(c),
            pos: self.pos(),
        }
    }
}
