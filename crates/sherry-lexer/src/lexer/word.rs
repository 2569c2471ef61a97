//! Bare words, double-quoted strings and `$` references.

use super::{Lexer, is_word_special};
use crate::error::{Delimiter, LexError};
use crate::leaf::Kind;
use crate::node::{Node, QQString, Word};

impl<'a> Lexer<'a> {
    /// Consumes word elements until a terminator and wraps them in a [`Word`].
    pub(super) fn get_word(&mut self) -> Result<Word<'a>, LexError> {
        let pos = self.pos();
        let mut nodes = Vec::new();
        while let Some(node) = self.get_word_element()? {
            nodes.push(node);
        }
        if nodes.is_empty() {
            return Err(LexError::Internal {
                message: "word without elements",
                pos,
            });
        }
        Ok(Word::new(nodes))
    }

    fn get_word_element(&mut self) -> Result<Option<Node<'a>>, LexError> {
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        let node = match c {
            b' ' | b'\t' | b'#' | b'\n' | b';' | b'&' | b'|' | b'(' | b')' => return Ok(None),
            b'<' | b'>' => return Ok(None),
            b'!' | b'{' | b'}' => self.consume(1, Kind::Term).into(),
            b'\\' => self.consume_escaped().into(),
            b'"' => self.get_qqstring()?.into(),
            b'$' => self.get_variable()?,
            _ => self.consume_while(|c| !is_word_special(c), Kind::Term)?.into(),
        };
        Ok(Some(node))
    }

    pub(super) fn get_qqstring(&mut self) -> Result<QQString<'a>, LexError> {
        let pos = self.pos();
        let lquote = self.try_consume(b"\"", Kind::Quote).ok_or(LexError::Internal {
            message: "expected opening double quote",
            pos,
        })?;

        let nodes = self.nested(pos, |lexer| {
            let mut nodes = Vec::new();
            while let Some(node) = lexer.get_qqstring_element()? {
                nodes.push(node);
            }
            Ok(nodes)
        })?;

        let rquote = self.try_consume(b"\"", Kind::Quote).ok_or(LexError::Unterminated {
            delimiter: Delimiter::DoubleQuote,
            pos,
        })?;
        Ok(QQString::new(lquote, nodes, rquote))
    }

    fn get_qqstring_element(&mut self) -> Result<Option<Node<'a>>, LexError> {
        let node = match self.peek() {
            None | Some(b'"') => return Ok(None),
            Some(b'\\') => self.consume_escaped().into(),
            Some(b'$') => self.get_variable()?,
            Some(_) => self
                .consume_while(|c| !matches!(c, b'\\' | b'"' | b'$'), Kind::Term)?
                .into(),
        };
        Ok(Some(node))
    }

    /// `$`, `$name`, `$?`-style shorthand, `$(...)` or `$((...))`.
    pub(super) fn get_variable(&mut self) -> Result<Node<'a>, LexError> {
        let pos = self.pos();
        if self.peek() != Some(b'$') {
            return Err(LexError::Internal {
                message: "expected `$`",
                pos,
            });
        }

        match self.peek_at(1) {
            None => Ok(self.consume(1, Kind::Variable).into()),
            Some(b'(') if self.peek_at(2) == Some(b'(') => self.get_arithmetic(),
            Some(b'(') => Ok(self.get_subshell_string()?.into()),
            Some(b'{') => Err(LexError::Unsupported {
                what: "`${...}` parameter expansion",
                pos,
            }),
            Some(c) if !c.is_ascii_alphabetic() => Ok(self.consume(2, Kind::Variable).into()),
            Some(_) => {
                let len = 1 + self.rest()[1..]
                    .iter()
                    .take_while(|c| c.is_ascii_alphabetic())
                    .count();
                Ok(self.consume(len, Kind::Variable).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos::Pos;

    #[test]
    fn word_collects_adjacent_elements() {
        let mut lexer = Lexer::new(b"foo\\ bar$x\"q\"! rest");
        let word = lexer.get_word().unwrap();
        let kinds: Vec<_> = word.nodes().iter().map(Node::type_name).collect();
        assert_eq!(kinds, ["Leaf", "Leaf", "Leaf", "Leaf", "QQString", "Leaf"]);
        assert_eq!(Node::from(word).text(), b"foo\\ bar$x\"q\"!");
        assert_eq!(lexer.pos(), Pos::new(14));
    }

    #[test]
    fn variable_names_are_letters_only() {
        let mut lexer = Lexer::new(b"$foo_bar");
        let node = lexer.get_variable().unwrap();
        assert_eq!(node.text(), b"$foo");
    }

    #[test]
    fn variable_shorthand_takes_one_byte() {
        for input in [&b"$?"[..], &b"$1"[..], &b"$$"[..], &b"$@"[..]] {
            let mut lexer = Lexer::new(input);
            let node = lexer.get_variable().unwrap();
            assert_eq!(node.as_leaf().map(|l| l.kind()), Some(Kind::Variable));
            assert_eq!(node.text(), input);
        }
    }

    #[test]
    fn lone_dollar_is_a_variable() {
        let mut lexer = Lexer::new(b"$");
        assert_eq!(lexer.get_variable().unwrap().text(), b"$");
    }

    #[test]
    fn qqstring_body_splits_on_escapes_and_variables() {
        let mut lexer = Lexer::new(b"\"a\\\"b $c\"");
        let s = lexer.get_qqstring().unwrap();
        let body: Vec<_> = s
            .nodes()
            .iter()
            .map(|n| (n.as_leaf().map(|l| l.kind()), n.text()))
            .collect();
        assert_eq!(
            body,
            [
                (Some(Kind::Term), b"a".to_vec()),
                (Some(Kind::Escaped), b"\\\"".to_vec()),
                (Some(Kind::Term), b"b ".to_vec()),
                (Some(Kind::Variable), b"$c".to_vec()),
            ]
        );
    }

    #[test]
    fn unterminated_qqstring_reports_opening_quote() {
        let mut lexer = Lexer::new(b"x \"abc");
        lexer.consume(2, Kind::Term);
        let err = lexer.get_qqstring().unwrap_err();
        assert_eq!(
            err,
            LexError::Unterminated {
                delimiter: Delimiter::DoubleQuote,
                pos: Pos::new(2)
            }
        );
    }
}
