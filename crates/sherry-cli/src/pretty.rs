//! Indented tree dump of lexer output.
//!
//! Every nesting level is prefixed with `.  `:
//!
//! ```text
//! [
//! .  Word {
//! .  .  Nodes: [
//! .  .  .  Leaf Term { "ls" }
//! .  .  ]
//! .  }
//! ]
//! ```

use std::io::{self, Write};

use sherry_lexer::{Leaf, Node};

pub struct TreePrinter<W> {
    writer: W,
    depth: usize,
}

impl<W: Write> TreePrinter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, depth: 0 }
    }

    pub fn print(&mut self, nodes: &[Node<'_>]) -> io::Result<()> {
        self.print_list(nodes)
    }

    fn prefix(&mut self) -> io::Result<()> {
        for _ in 0..self.depth {
            self.writer.write_all(b".  ")?;
        }
        Ok(())
    }

    /// The opening `[` continues the current line.
    fn print_list(&mut self, nodes: &[Node<'_>]) -> io::Result<()> {
        writeln!(self.writer, "[")?;
        self.depth += 1;
        for node in nodes {
            self.prefix()?;
            self.print_node(node)?;
        }
        self.depth -= 1;
        self.prefix()?;
        writeln!(self.writer, "]")
    }

    fn print_node(&mut self, node: &Node<'_>) -> io::Result<()> {
        match node {
            Node::Leaf(leaf) => self.print_leaf(leaf),
            Node::Word(word) => self.print_composite("Word", None, word.nodes()),
            Node::QQString(s) => self.print_composite(
                "QQString",
                Some([("Lquote", s.lquote()), ("Rquote", s.rquote())]),
                s.nodes(),
            ),
            Node::SubshellString(s) => self.print_composite(
                "SubshellString",
                Some([("Lquote", s.lquote()), ("Rquote", s.rquote())]),
                s.nodes(),
            ),
            Node::MathGroup(g) => self.print_composite(
                "MathGroup",
                Some([("Lbrace", g.lbrace()), ("Rbrace", g.rbrace())]),
                g.nodes(),
            ),
        }
    }

    /// Fields print in declaration order: delimiters, then the body.
    fn print_composite(
        &mut self,
        name: &str,
        delimiters: Option<[(&str, &Leaf<'_>); 2]>,
        nodes: &[Node<'_>],
    ) -> io::Result<()> {
        writeln!(self.writer, "{name} {{")?;
        self.depth += 1;
        for (field, leaf) in delimiters.into_iter().flatten() {
            self.print_leaf_field(field, leaf)?;
        }
        self.prefix()?;
        write!(self.writer, "Nodes: ")?;
        self.print_list(nodes)?;
        self.depth -= 1;
        self.prefix()?;
        writeln!(self.writer, "}}")
    }

    fn print_leaf_field(&mut self, field: &str, leaf: &Leaf<'_>) -> io::Result<()> {
        self.prefix()?;
        write!(self.writer, "{field}: ")?;
        self.print_leaf(leaf)
    }

    fn print_leaf(&mut self, leaf: &Leaf<'_>) -> io::Result<()> {
        writeln!(
            self.writer,
            "Leaf {} {{ {:?} }}",
            leaf.kind(),
            String::from_utf8_lossy(leaf.data())
        )
    }
}
