//! sherry-lexer: a byte-exact lexer for POSIX shell source.
//!
//! This crate provides:
//!
//! - **Nodes**: `Leaf`, `Word`, `QQString`, `SubshellString` and `MathGroup`,
//!   joined under the [`Node`] sum type
//! - **Lexer**: a stateful splitter that hands out one [`Node`] per
//!   [`Lexer::get`] call
//! - **Errors**: [`LexError`], returned synchronously and fatal to the scan
//!
//! Every node borrows its bytes from the input buffer, and concatenating the
//! text of all nodes reproduces the input exactly:
//!
//! ```
//! use sherry_lexer::Lexer;
//!
//! let mut lexer = Lexer::new(b"echo \"$(date)\" >&2");
//! let mut text = Vec::new();
//! while let Some(node) = lexer.get()? {
//!     node.write_text(&mut text);
//! }
//! assert_eq!(text, b"echo \"$(date)\" >&2");
//! # Ok::<(), sherry_lexer::LexError>(())
//! ```
//!
//! A `Lexer` holds an unsynchronized cursor; give each scan its own instance.
//!
//! Quoted strings, command substitutions and arithmetic groups may nest at
//! most [`MAX_NESTING_DEPTH`] levels deep; past that the scan fails with
//! [`LexError::TooDeep`].

mod error;
mod leaf;
mod lexer;
mod node;
mod pos;

pub use error::{Delimiter, LexError};
pub use leaf::{Kind, Leaf};
pub use lexer::{Lexer, MAX_NESTING_DEPTH, State, tokenize};
pub use node::{MathGroup, Node, QQString, SubshellString, Word};
pub use pos::Pos;
