//! Command substitution: `$(...)`.

use super::{Lexer, State};
use crate::error::{Delimiter, LexError};
use crate::leaf::Kind;
use crate::node::{Node, SubshellString};
use crate::pos::Pos;

impl<'a> Lexer<'a> {
    pub(super) fn get_subshell_string(&mut self) -> Result<SubshellString<'a>, LexError> {
        let pos = self.pos();
        let lquote = self.try_consume(b"$(", Kind::Quote).ok_or(LexError::Internal {
            message: "expected `$(`",
            pos,
        })?;
        let nodes = self.nested(pos, |lexer| lexer.get_subshell_body(pos))?;
        let rquote = self
            .try_consume(b")", Kind::Quote)
            .ok_or_else(|| unterminated(pos))?;
        Ok(SubshellString::new(lquote, nodes, rquote))
    }

    /// Lexes the body with a fresh `case` context.
    ///
    /// A `)` ends the body unless the inner state is `CaseWaitPattern`, in
    /// which case it closes a pattern and is lexed as an operator.
    fn get_subshell_body(&mut self, pos: Pos) -> Result<Vec<Node<'a>>, LexError> {
        let mut scope = self.scoped_state(State::Normal);
        let mut nodes = Vec::new();
        loop {
            match scope.peek() {
                None => return Err(unterminated(pos)),
                Some(b')') if scope.state() != State::CaseWaitPattern => return Ok(nodes),
                Some(_) => {}
            }
            match scope.get()? {
                Some(node) => nodes.push(node),
                None => return Err(unterminated(pos)),
            }
        }
    }
}

fn unterminated(pos: Pos) -> LexError {
    LexError::Unterminated {
        delimiter: Delimiter::CommandSubstitution,
        pos,
    }
}
