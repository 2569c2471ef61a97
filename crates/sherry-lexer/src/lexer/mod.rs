//! The lexer engine.
//!
//! [`Lexer::get`] dispatches on the current [`State`] and the next unconsumed
//! byte. Composite constructions (words, quoted strings, substitutions,
//! arithmetic) recurse into the same byte dispatch for their children and
//! then consume the closing delimiter.

mod case;
mod cursor;
mod math;
mod subshell;
mod word;

use std::collections::HashMap;
use std::iter::FusedIterator;
use std::ops::{Deref, DerefMut};

use tracing::trace;

use crate::error::LexError;
use crate::leaf::Kind;
use crate::node::Node;
use crate::pos::Pos;

/// Reserved words, recognized only in command-start position.
const KEYWORDS: &[&[u8]] = &[
    b"case", b"do", b"done", b"elif", b"else", b"esac", b"for", b"if", b"in", b"then", b"until",
    b"while",
];

/// Maximum nesting of quoted strings, substitutions and arithmetic groups.
///
/// Every level recurses on the native stack, so deeper input is rejected
/// with [`LexError::TooDeep`] instead of overflowing it.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Where the lexer is in the shell grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum State {
    /// Start of a command: keywords are recognized.
    #[default]
    Normal,
    /// Inside a command's arguments: keywords are plain words.
    Command,
    /// After `case`: the next word is the subject.
    CaseWaitWord,
    /// After `case <subject>`: only `in` is valid.
    CaseWaitIn,
    /// Inside a `case` pattern list.
    CaseWaitPattern,
}

/// Splits shell source into [`Node`]s, one per [`get`](Lexer::get) call.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a [u8],
    consumed: usize,
    state: State,
    failed: bool,
    depth: usize,
    /// Outcome of every `$((` already lexed, by start offset, with the
    /// offset it ended at. Both readings of `$((` depend only on the bytes
    /// that follow, so a retry as `$(` can reuse the inner results.
    arithmetic: HashMap<usize, (Result<Node<'a>, LexError>, usize)>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            consumed: 0,
            state: State::Normal,
            failed: false,
            depth: 0,
            arithmetic: HashMap::new(),
        }
    }

    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Position of the first unconsumed byte.
    pub fn pos(&self) -> Pos {
        Pos::new(self.consumed)
    }

    /// Returns the next node, or `None` once the input is exhausted.
    pub fn get(&mut self) -> Result<Option<Node<'a>>, LexError> {
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        match c {
            b' ' | b'\t' => return Ok(Some(self.consume_while(is_blank, Kind::Space)?.into())),
            b'#' => return Ok(Some(self.consume_while(|c| c != b'\n', Kind::Comment)?.into())),
            b'\n' => {
                if self.state == State::Command {
                    self.set_state(State::Normal);
                }
                return Ok(Some(self.consume(1, Kind::NewLine).into()));
            }
            _ => {}
        }

        let node = match self.state {
            State::CaseWaitWord => self.get_case_subject(c)?,
            State::CaseWaitIn => self.get_case_in(c)?,
            State::CaseWaitPattern => self.get_case_pattern(c)?,
            State::Normal | State::Command => self.get_command_element(c)?,
        };
        Ok(Some(node))
    }

    /// Operators, redirections and words in `Normal` or `Command` state.
    fn get_command_element(&mut self, c: u8) -> Result<Node<'a>, LexError> {
        match c {
            b';' | b'&' | b'|' | b'(' | b')' => {
                self.set_state(State::Normal);
                let leaf = match c {
                    b';' => match self.try_consume(b";;", Kind::Operator) {
                        Some(leaf) => {
                            self.set_state(State::CaseWaitPattern);
                            leaf
                        }
                        None => self.consume(1, Kind::Operator),
                    },
                    b'&' => self.consume_operator(&[b"&&"]),
                    b'|' => self.consume_operator(&[b"||"]),
                    _ => self.consume(1, Kind::Operator),
                };
                Ok(leaf.into())
            }
            b'<' => {
                self.set_state(State::Command);
                Ok(self.consume_operator(&[b"<<-", b"<<", b"<>", b"<&"]).into())
            }
            b'>' => {
                self.set_state(State::Command);
                Ok(self.consume_operator(&[b">>", b">&", b">|"]).into())
            }
            b'!' | b'{' | b'}' => {
                let word = self.get_word()?;
                if self.state == State::Normal {
                    if let Some(leaf) = word.single_leaf(Kind::Term).filter(|leaf| leaf.len() == 1) {
                        return Ok(leaf.with_kind(Kind::Operator).into());
                    }
                }
                self.set_state(State::Command);
                Ok(word.into())
            }
            _ => {
                let word = self.get_word()?;
                if self.state == State::Normal {
                    if let Some(leaf) = word.single_leaf(Kind::Term).filter(|leaf| is_keyword(leaf.data())) {
                        let next = if leaf.data() == b"case" {
                            State::CaseWaitWord
                        } else {
                            State::Command
                        };
                        self.set_state(next);
                        return Ok(leaf.with_kind(Kind::Keyword).into());
                    }
                }
                self.set_state(State::Command);
                Ok(word.into())
            }
        }
    }

    fn set_state(&mut self, state: State) {
        if self.state != state {
            trace!(from = ?self.state, to = ?state, pos = self.consumed, "lexer state transition");
            self.state = state;
        }
    }

    /// Runs `f` one nesting level deeper, failing past [`MAX_NESTING_DEPTH`].
    fn nested<T>(
        &mut self,
        pos: Pos,
        f: impl FnOnce(&mut Self) -> Result<T, LexError>,
    ) -> Result<T, LexError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(LexError::TooDeep {
                limit: MAX_NESTING_DEPTH,
                pos,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Switches to `state` until the returned guard is dropped.
    ///
    /// The previous state is restored on every exit path, including `?`.
    fn scoped_state(&mut self, state: State) -> ScopedState<'_, 'a> {
        let saved = self.state;
        self.set_state(state);
        ScopedState { lexer: self, saved }
    }
}

struct ScopedState<'l, 'a> {
    lexer: &'l mut Lexer<'a>,
    saved: State,
}

impl<'a> Deref for ScopedState<'_, 'a> {
    type Target = Lexer<'a>;

    fn deref(&self) -> &Self::Target {
        self.lexer
    }
}

impl<'a> DerefMut for ScopedState<'_, 'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.lexer
    }
}

impl Drop for ScopedState<'_, '_> {
    fn drop(&mut self) {
        let saved = self.saved;
        self.lexer.set_state(saved);
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Node<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.get() {
            Ok(node) => node.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Lexer<'_> {}

/// Lexes the whole input.
pub fn tokenize(input: &[u8]) -> Result<Vec<Node<'_>>, LexError> {
    Lexer::new(input).collect()
}

fn is_blank(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

fn is_keyword(data: &[u8]) -> bool {
    KEYWORDS.contains(&data)
}

/// Bytes that end a plain run of word text.
fn is_word_special(c: u8) -> bool {
    b" \t#\n;&|()!{}<>\"$\\".contains(&c)
}

/// Bytes that start an operator in command context.
fn is_operator_start(c: u8) -> bool {
    b";&|()<>".contains(&c)
}
