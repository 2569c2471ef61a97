//! The node tree.
//!
//! [`Node`] is a closed sum over the five shapes the lexer produces. All
//! composites own their children and report positions through their first
//! and last element, so `end - pos` is always the length of [`Node::text`].

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::leaf::{Kind, Leaf};
use crate::pos::Pos;

/// A piece of the input: a leaf or a composite of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'a> {
    Leaf(Leaf<'a>),
    Word(Word<'a>),
    QQString(QQString<'a>),
    SubshellString(SubshellString<'a>),
    MathGroup(MathGroup<'a>),
}

impl<'a> Node<'a> {
    pub fn pos(&self) -> Pos {
        match self {
            Node::Leaf(leaf) => leaf.pos(),
            Node::Word(word) => word.pos(),
            Node::QQString(s) => s.lquote.pos(),
            Node::SubshellString(s) => s.lquote.pos(),
            Node::MathGroup(g) => g.lbrace.pos(),
        }
    }

    pub fn end(&self) -> Pos {
        match self {
            Node::Leaf(leaf) => leaf.end(),
            Node::Word(word) => word.end(),
            Node::QQString(s) => s.rquote.end(),
            Node::SubshellString(s) => s.rquote.end(),
            Node::MathGroup(g) => g.rbrace.end(),
        }
    }

    /// Appends the exact input bytes this node was built from.
    pub fn write_text(&self, out: &mut Vec<u8>) {
        match self {
            Node::Leaf(leaf) => out.extend_from_slice(leaf.data()),
            Node::Word(word) => write_nodes(&word.nodes, out),
            Node::QQString(s) => write_delimited(&s.lquote, &s.nodes, &s.rquote, out),
            Node::SubshellString(s) => write_delimited(&s.lquote, &s.nodes, &s.rquote, out),
            Node::MathGroup(g) => write_delimited(&g.lbrace, &g.nodes, &g.rbrace, out),
        }
    }

    /// Returns the exact input bytes this node was built from.
    pub fn text(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.end().offset() - self.pos().offset());
        self.write_text(&mut out);
        out
    }

    /// Name of the variant, as used in the serialized form.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Leaf(_) => "Leaf",
            Node::Word(_) => "Word",
            Node::QQString(_) => "QQString",
            Node::SubshellString(_) => "SubshellString",
            Node::MathGroup(_) => "MathGroup",
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf<'a>> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }
}

fn write_nodes(nodes: &[Node<'_>], out: &mut Vec<u8>) {
    for node in nodes {
        node.write_text(out);
    }
}

fn write_delimited(open: &Leaf<'_>, nodes: &[Node<'_>], close: &Leaf<'_>, out: &mut Vec<u8>) {
    out.extend_from_slice(open.data());
    write_nodes(nodes, out);
    out.extend_from_slice(close.data());
}

/// Sibling nodes concatenated without a separator.
///
/// A word always has at least one child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word<'a> {
    nodes: Vec<Node<'a>>,
}

impl<'a> Word<'a> {
    pub(crate) fn new(nodes: Vec<Node<'a>>) -> Self {
        debug_assert!(!nodes.is_empty(), "a word needs at least one element");
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node<'a>] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node<'a>> {
        self.nodes
    }

    /// Returns the only child if the word is exactly one leaf of `kind`.
    pub fn single_leaf(&self, kind: Kind) -> Option<Leaf<'a>> {
        match self.nodes.as_slice() {
            [Node::Leaf(leaf)] if leaf.kind() == kind => Some(*leaf),
            _ => None,
        }
    }

    pub fn pos(&self) -> Pos {
        self.nodes.first().map_or_else(Pos::default, Node::pos)
    }

    pub fn end(&self) -> Pos {
        self.nodes.last().map_or_else(Pos::default, Node::end)
    }
}

/// A double-quoted string: `"` body `"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QQString<'a> {
    lquote: Leaf<'a>,
    nodes: Vec<Node<'a>>,
    rquote: Leaf<'a>,
}

impl<'a> QQString<'a> {
    pub(crate) fn new(lquote: Leaf<'a>, nodes: Vec<Node<'a>>, rquote: Leaf<'a>) -> Self {
        Self { lquote, nodes, rquote }
    }

    pub fn lquote(&self) -> &Leaf<'a> {
        &self.lquote
    }

    pub fn nodes(&self) -> &[Node<'a>] {
        &self.nodes
    }

    pub fn rquote(&self) -> &Leaf<'a> {
        &self.rquote
    }
}

/// A command substitution: `$(` body `)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubshellString<'a> {
    lquote: Leaf<'a>,
    nodes: Vec<Node<'a>>,
    rquote: Leaf<'a>,
}

impl<'a> SubshellString<'a> {
    pub(crate) fn new(lquote: Leaf<'a>, nodes: Vec<Node<'a>>, rquote: Leaf<'a>) -> Self {
        Self { lquote, nodes, rquote }
    }

    pub fn lquote(&self) -> &Leaf<'a> {
        &self.lquote
    }

    pub fn nodes(&self) -> &[Node<'a>] {
        &self.nodes
    }

    pub fn rquote(&self) -> &Leaf<'a> {
        &self.rquote
    }
}

/// An arithmetic group.
///
/// The outermost group of an expansion is delimited by `$((` and `))`;
/// parenthesized groups nested inside it by `(` and `)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathGroup<'a> {
    lbrace: Leaf<'a>,
    nodes: Vec<Node<'a>>,
    rbrace: Leaf<'a>,
}

impl<'a> MathGroup<'a> {
    pub(crate) fn new(lbrace: Leaf<'a>, nodes: Vec<Node<'a>>, rbrace: Leaf<'a>) -> Self {
        Self { lbrace, nodes, rbrace }
    }

    pub fn lbrace(&self) -> &Leaf<'a> {
        &self.lbrace
    }

    pub fn nodes(&self) -> &[Node<'a>] {
        &self.nodes
    }

    pub fn rbrace(&self) -> &Leaf<'a> {
        &self.rbrace
    }
}

impl<'a> From<Leaf<'a>> for Node<'a> {
    fn from(leaf: Leaf<'a>) -> Self {
        Node::Leaf(leaf)
    }
}

impl<'a> From<Word<'a>> for Node<'a> {
    fn from(word: Word<'a>) -> Self {
        Node::Word(word)
    }
}

impl<'a> From<QQString<'a>> for Node<'a> {
    fn from(s: QQString<'a>) -> Self {
        Node::QQString(s)
    }
}

impl<'a> From<SubshellString<'a>> for Node<'a> {
    fn from(s: SubshellString<'a>) -> Self {
        Node::SubshellString(s)
    }
}

impl<'a> From<MathGroup<'a>> for Node<'a> {
    fn from(g: MathGroup<'a>) -> Self {
        Node::MathGroup(g)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Serialization: {"Type": <variant>, <fields>...}
// ═══════════════════════════════════════════════════════════════════════════

impl Serialize for Node<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Leaf(leaf) => leaf.serialize(serializer),
            Node::Word(word) => word.serialize(serializer),
            Node::QQString(s) => s.serialize(serializer),
            Node::SubshellString(s) => s.serialize(serializer),
            Node::MathGroup(g) => g.serialize(serializer),
        }
    }
}

impl Serialize for Word<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Word", 2)?;
        s.serialize_field("Type", "Word")?;
        s.serialize_field("Nodes", &self.nodes)?;
        s.end()
    }
}

fn serialize_delimited<S: Serializer>(
    serializer: S,
    name: &'static str,
    fields: [&'static str; 2],
    open: &Leaf<'_>,
    nodes: &[Node<'_>],
    close: &Leaf<'_>,
) -> Result<S::Ok, S::Error> {
    let mut s = serializer.serialize_struct(name, 4)?;
    s.serialize_field("Type", name)?;
    s.serialize_field(fields[0], open)?;
    s.serialize_field("Nodes", nodes)?;
    s.serialize_field(fields[1], close)?;
    s.end()
}

impl Serialize for QQString<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_delimited(
            serializer,
            "QQString",
            ["Lquote", "Rquote"],
            &self.lquote,
            &self.nodes,
            &self.rquote,
        )
    }
}

impl Serialize for SubshellString<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_delimited(
            serializer,
            "SubshellString",
            ["Lquote", "Rquote"],
            &self.lquote,
            &self.nodes,
            &self.rquote,
        )
    }
}

impl Serialize for MathGroup<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_delimited(
            serializer,
            "MathGroup",
            ["Lbrace", "Rbrace"],
            &self.lbrace,
            &self.nodes,
            &self.rbrace,
        )
    }
}
