//! Atomic tokens.

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::pos::Pos;

/// Classifies a [`Leaf`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Kind {
    Unknown,
    /// A run of spaces and tabs.
    Space,
    NewLine,
    /// `#` up to, not including, the next newline.
    Comment,
    /// Plain word text.
    Term,
    Operator,
    /// A reserved word in command-start position, or `in` after `case <word>`.
    Keyword,
    /// `$name`, `$?`-style shorthand, or a name/number inside arithmetic.
    Variable,
    /// Opening or closing delimiter of a composite node.
    Quote,
    /// A backslash and the byte it escapes.
    Escaped,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Unknown => "Unknown",
            Kind::Space => "Space",
            Kind::NewLine => "NewLine",
            Kind::Comment => "Comment",
            Kind::Term => "Term",
            Kind::Operator => "Operator",
            Kind::Keyword => "Keyword",
            Kind::Variable => "Variable",
            Kind::Quote => "Quote",
            Kind::Escaped => "Escaped",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous slice of the input with a kind and a start position.
///
/// Leaves are only produced by the lexer, so `data` is always a view into
/// the buffer the lexer was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Leaf<'a> {
    kind: Kind,
    data: &'a [u8],
    pos: Pos,
}

impl<'a> Leaf<'a> {
    pub(crate) fn new(kind: Kind, data: &'a [u8], pos: Pos) -> Self {
        Self { kind, data, pos }
    }

    pub(crate) fn with_kind(self, kind: Kind) -> Self {
        Self { kind, ..self }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn end(&self) -> Pos {
        self.pos + self.data.len()
    }
}

impl Serialize for Leaf<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Leaf", 3)?;
        s.serialize_field("Type", "Leaf")?;
        s.serialize_field("Kind", &self.kind)?;
        s.serialize_field("Data", &String::from_utf8_lossy(self.data))?;
        s.end()
    }
}
