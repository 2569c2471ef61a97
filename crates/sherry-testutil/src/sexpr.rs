//! S-expression formatting of node trees for test expectations.
//!
//! - a leaf is `(Kind "data")`, with data escaped like a Rust string literal
//! - a composite is `(word ...)`, `(qq ...)`, `(subshell ...)` or `(math ...)`
//!   listing its body; delimiters are implied by the head

use sherry_lexer::{Leaf, Node};

/// Formats one node as a single-line s-expression.
pub fn format_node(node: &Node<'_>) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Formats a node sequence, one s-expression per node.
pub fn format_nodes(nodes: &[Node<'_>]) -> Vec<String> {
    nodes.iter().map(format_node).collect()
}

fn write_node(node: &Node<'_>, out: &mut String) {
    match node {
        Node::Leaf(leaf) => write_leaf(leaf, out),
        Node::Word(word) => write_list("word", word.nodes(), out),
        Node::QQString(s) => write_list("qq", s.nodes(), out),
        Node::SubshellString(s) => write_list("subshell", s.nodes(), out),
        Node::MathGroup(g) => write_list("math", g.nodes(), out),
    }
}

fn write_leaf(leaf: &Leaf<'_>, out: &mut String) {
    let data = String::from_utf8_lossy(leaf.data());
    out.push_str(&format!("({} {:?})", leaf.kind(), data));
}

fn write_list(head: &str, nodes: &[Node<'_>], out: &mut String) {
    out.push('(');
    out.push_str(head);
    for node in nodes {
        out.push(' ');
        write_node(node, out);
    }
    out.push(')');
}
